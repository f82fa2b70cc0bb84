use log::error;
use std::env;

use mytaste_import::{ImporterConfig, RecipeImporter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Usage: mytaste-import <url> [rules.json]
    let args: Vec<String> = env::args().collect();
    let url = args
        .get(1)
        .ok_or("Usage: mytaste-import <url> [rules.json]")?;

    let config = ImporterConfig::load()?;
    let mut builder = RecipeImporter::builder().url(url);
    if let Some(rules_file) = args.get(2) {
        builder = builder.rules_file(rules_file);
    }

    match builder.config(&config).build().await {
        Ok(recipe) => {
            println!("{}", serde_json::to_string_pretty(&recipe)?);
            Ok(())
        }
        Err(e) => {
            error!("Import of {} failed: {}", url, e);
            Err(e.into())
        }
    }
}
