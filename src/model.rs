use serde::{Deserialize, Serialize};

use crate::error::ImportError;
use crate::instructions::{flatten_instructions, RawInstructions};

/// A single ingredient after tokenization.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Ingredient {
    /// An ingredient carrying only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// True when nothing but the name was detected.
    pub fn is_bare_name(&self) -> bool {
        self.amount.is_none() && self.unit.is_none() && self.note.is_none()
    }
}

/// A titled group of ingredients ("Für den Teig", "Für die Füllung").
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IngredientSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub ingredients: Vec<Ingredient>,
}

/// Ingredients of a recipe, either as one flat list or grouped in sections.
///
/// Serializes as an `ingredients` or an `ingredient_sections` key on the
/// surrounding record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngredientList {
    Ingredients(Vec<Ingredient>),
    IngredientSections(Vec<IngredientSection>),
}

impl Default for IngredientList {
    fn default() -> Self {
        IngredientList::Ingredients(Vec::new())
    }
}

impl IngredientList {
    /// Returns the sections, wrapping a flat list into one untitled section.
    pub fn into_sections(self) -> Vec<IngredientSection> {
        match self {
            IngredientList::Ingredients(ingredients) => vec![IngredientSection {
                title: None,
                ingredients,
            }],
            IngredientList::IngredientSections(sections) => sections,
        }
    }

    /// Iterates every ingredient regardless of grouping.
    pub fn iter(&self) -> Box<dyn Iterator<Item = &Ingredient> + '_> {
        match self {
            IngredientList::Ingredients(ingredients) => Box::new(ingredients.iter()),
            IngredientList::IngredientSections(sections) => {
                Box::new(sections.iter().flat_map(|s| s.ingredients.iter()))
            }
        }
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Checks that every section carries a title once there is more than one.
pub fn validate_sections(sections: &[IngredientSection]) -> Result<(), ImportError> {
    if sections.len() <= 1 {
        return Ok(());
    }

    let missing = sections.iter().position(|section| {
        section
            .title
            .as_deref()
            .map_or(true, |title| title.trim().is_empty())
    });

    match missing {
        Some(index) => Err(ImportError::InvalidSections(format!(
            "Section title missing at index {index}"
        ))),
        None => Ok(()),
    }
}

/// Recipe data as extracted from a page, before any normalization.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawRecipe {
    pub title: String,
    pub image: String,
    pub ingredients: Vec<String>,
    pub instructions: RawInstructions,
}

impl RawRecipe {
    /// True when the page yielded neither ingredients nor instructions.
    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty() && flatten_instructions(&self.instructions).is_empty()
    }
}

/// The normalized outcome of importing one recipe page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecipeImportResult {
    pub title: String,
    pub url: String,
    pub image: String,
    #[serde(flatten)]
    pub ingredients: IngredientList,
    pub spices: Vec<String>,
    pub instructions: Vec<String>,
}
