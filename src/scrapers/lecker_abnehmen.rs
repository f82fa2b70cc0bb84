use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;

use super::{helpers, SiteScraper};

static INGREDIENTS_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^zutaten").unwrap());
static INSTRUCTIONS_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^zubereitung").unwrap());

/// leckerabnehmen.com keeps both ingredients and steps in plain paragraphs.
pub struct LeckerAbnehmen;

impl SiteScraper for LeckerAbnehmen {
    fn domain(&self) -> &'static str {
        "leckerabnehmen.com"
    }

    fn ingredient_lines(&self, document: &Html) -> Vec<String> {
        helpers::paragraph_section(document, "h2", &INGREDIENTS_HEADING)
    }

    fn instruction_lines(&self, document: &Html) -> Vec<String> {
        helpers::paragraph_section(document, "h2", &INSTRUCTIONS_HEADING)
    }
}
