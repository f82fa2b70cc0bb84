//! Imports recipes from web pages into normalized records.
//!
//! Pages carrying schema.org Recipe metadata (JSON-LD) are read directly;
//! a few sites without metadata have hand-written scrapers. Ingredient lines
//! are split into amount, unit and name, and user rules rename ingredients
//! and move bare spices into their own list.

pub mod builder;
pub mod config;
pub mod error;
pub mod extractors;
pub mod fetchers;
pub mod ingredients;
pub mod instructions;
pub mod model;
pub mod pipelines;
pub mod quantity;
pub mod rules;
pub mod scrapers;

pub use builder::{RecipeImporter, RecipeImporterBuilder};
pub use config::ImporterConfig;
pub use error::ImportError;
pub use ingredients::{parse_ingredient_line, parse_ingredients};
pub use instructions::{flatten_instructions, RawInstructions};
pub use model::{
    validate_sections, Ingredient, IngredientList, IngredientSection, RawRecipe,
    RecipeImportResult,
};
pub use pipelines::url::import_html;
pub use quantity::parse_quantity;
pub use rules::{ImportRules, RenameRule, SpiceRules};

/// Fetches `url` and imports its recipe using `rules`.
///
/// # Example
/// ```no_run
/// # use mytaste_import::{import_recipe, ImportRules};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let rules = ImportRules::load("data/config.json")?;
/// let url = "https://www.chefkoch.de/rezepte/123/kuchen.html";
/// let recipe = import_recipe(url, &rules).await?;
/// println!("{} spices", recipe.spices.len());
/// # Ok(())
/// # }
/// ```
pub async fn import_recipe(
    url: &str,
    rules: &ImportRules,
) -> Result<RecipeImportResult, ImportError> {
    pipelines::url::process(url, rules, None, None).await
}
