pub mod url;

use crate::ingredients::parse_ingredients;
use crate::instructions::flatten_instructions;
use crate::model::{IngredientList, RawRecipe, RecipeImportResult};
use crate::rules::ImportRules;

/// Tokenizes ingredients, applies the rules and flattens the instructions.
pub fn normalize(url: &str, raw: RawRecipe, rules: &ImportRules) -> RecipeImportResult {
    let classified = rules.apply(parse_ingredients(&raw.ingredients));

    RecipeImportResult {
        title: raw.title,
        url: url.to_string(),
        image: raw.image,
        ingredients: IngredientList::Ingredients(classified.ingredients),
        spices: classified.spices,
        instructions: flatten_instructions(&raw.instructions),
    }
}
