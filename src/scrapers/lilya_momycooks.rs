use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;

use super::{helpers, SiteScraper};

static INGREDIENTS_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^zutaten").unwrap());
static INSTRUCTIONS_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)zubereitung|anleitung").unwrap());

/// lilya.momycooks.com lists ingredients in a block list with the text in
/// `<strong>`; steps are an ordered list, a plain list or paragraphs.
pub struct LilyaMomycooks;

impl SiteScraper for LilyaMomycooks {
    fn domain(&self) -> &'static str {
        "lilya.momycooks.com"
    }

    fn title(&self, document: &Html) -> String {
        helpers::extract_title(document, "h1.entry-title")
    }

    fn ingredient_lines(&self, document: &Html) -> Vec<String> {
        helpers::list_section(
            document,
            "h2",
            &INGREDIENTS_HEADING,
            "ul.wp-block-list",
            Some("strong"),
        )
    }

    fn instruction_lines(&self, document: &Html) -> Vec<String> {
        for list in ["ol", "ul"] {
            let steps = helpers::list_section(document, "h2", &INSTRUCTIONS_HEADING, list, None);
            if !steps.is_empty() {
                return steps;
            }
        }

        helpers::paragraph_section(document, "h2", &INSTRUCTIONS_HEADING)
    }
}
