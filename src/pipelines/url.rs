use log::{debug, info};
use std::time::Duration;

use super::normalize;
use crate::error::ImportError;
use crate::extractors::{JsonLdExtractor, ParsingContext};
use crate::fetchers::RequestFetcher;
use crate::model::{RawRecipe, RecipeImportResult};
use crate::rules::ImportRules;
use crate::scrapers::find_scraper;

/// Where the raw recipe data of a page came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeSource {
    Metadata,
    Scraper(&'static str),
}

/// Fetches `url` and imports the recipe on it.
///
/// This pipeline:
/// 1. Fetches HTML using RequestFetcher (non-2xx responses fail)
/// 2. Looks for JSON-LD Recipe metadata
/// 3. Falls back to the scraper registered for the URL's host
/// 4. Tokenizes ingredients, applies the rules, flattens instructions
pub async fn process(
    url: &str,
    rules: &ImportRules,
    timeout: Option<Duration>,
    user_agent: Option<&str>,
) -> Result<RecipeImportResult, ImportError> {
    let fetcher = RequestFetcher::new(timeout, user_agent)?;
    let html = fetcher.fetch(url).await?;
    import_html(url, &html, rules)
}

/// Imports a recipe from an already fetched page.
pub fn import_html(
    url: &str,
    html: &str,
    rules: &ImportRules,
) -> Result<RecipeImportResult, ImportError> {
    let context = ParsingContext::new(url, html);
    let (source, raw) = extract(&context)?;
    info!("Imported recipe {:?} from {} via {:?}", raw.title, url, source);
    Ok(normalize(url, raw, rules))
}

/// Metadata first, then the site scraper.
pub fn extract(context: &ParsingContext) -> Result<(RecipeSource, RawRecipe), ImportError> {
    if let Some(raw) = JsonLdExtractor.parse(context) {
        return Ok((RecipeSource::Metadata, raw));
    }

    debug!("No recipe metadata on {}, trying site scrapers", context.url);
    let scraper = find_scraper(&context.url)?;
    let raw = scraper.scrape(context);
    if raw.is_empty() {
        return Err(ImportError::NoRecipeFound(context.url.clone()));
    }

    Ok((RecipeSource::Scraper(scraper.domain()), raw))
}
