//! Hand-written extraction for sites that publish no recipe metadata.
//!
//! Adding a site means adding one [`SiteScraper`] implementation and listing
//! it in [`SCRAPERS`].

use log::debug;
use scraper::Html;
use url::Url;

use crate::error::ImportError;
use crate::extractors::ParsingContext;
use crate::model::RawRecipe;

pub mod helpers;
mod lecker_abnehmen;
mod lilya_momycooks;

pub use lecker_abnehmen::LeckerAbnehmen;
pub use lilya_momycooks::LilyaMomycooks;

pub trait SiteScraper: Send + Sync {
    /// Registered domain; subdomains match as well.
    fn domain(&self) -> &'static str;

    fn title(&self, document: &Html) -> String {
        helpers::extract_title(document, "h1")
    }

    fn image(&self, document: &Html) -> String {
        helpers::extract_image(document)
    }

    fn ingredient_lines(&self, document: &Html) -> Vec<String>;

    fn instruction_lines(&self, document: &Html) -> Vec<String>;

    fn matches_host(&self, host: &str) -> bool {
        let domain = self.domain();
        host == domain
            || host
                .strip_suffix(domain)
                .is_some_and(|prefix| prefix.ends_with('.'))
    }

    fn scrape(&self, context: &ParsingContext) -> RawRecipe {
        debug!("Scraping {} with the {} scraper", context.url, self.domain());
        let document = &context.document;
        RawRecipe {
            title: self.title(document),
            image: self.image(document),
            ingredients: self.ingredient_lines(document),
            instructions: self.instruction_lines(document).into(),
        }
    }
}

pub static SCRAPERS: &[&dyn SiteScraper] = &[&LeckerAbnehmen, &LilyaMomycooks];

/// Finds the scraper registered for the host of `url`.
pub fn find_scraper(url: &str) -> Result<&'static dyn SiteScraper, ImportError> {
    let parsed = Url::parse(url)?;
    let host = parsed
        .host_str()
        .ok_or_else(|| ImportError::UnsupportedSource(url.to_string()))?;
    scraper_for_host(host).ok_or_else(|| ImportError::UnsupportedSource(host.to_string()))
}

pub fn scraper_for_host(host: &str) -> Option<&'static dyn SiteScraper> {
    let host = host.trim_end_matches('.').to_ascii_lowercase();
    SCRAPERS
        .iter()
        .copied()
        .find(|scraper| scraper.matches_host(&host))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_and_subdomain_match() {
        let scraper = find_scraper("https://leckerabnehmen.com/rezept/").unwrap();
        assert_eq!(scraper.domain(), "leckerabnehmen.com");

        let scraper = find_scraper("https://www.leckerabnehmen.com/rezept/").unwrap();
        assert_eq!(scraper.domain(), "leckerabnehmen.com");

        let scraper = find_scraper("https://lilya.momycooks.com/borschtsch").unwrap();
        assert_eq!(scraper.domain(), "lilya.momycooks.com");
    }

    #[test]
    fn test_suffix_must_start_at_label_boundary() {
        assert!(scraper_for_host("notleckerabnehmen.com").is_none());
        assert!(scraper_for_host("momycooks.com").is_none());
        assert!(scraper_for_host("LeckerAbnehmen.com").is_some());
    }

    #[test]
    fn test_unregistered_host_is_unsupported() {
        match find_scraper("https://www.example.com/recipe") {
            Err(ImportError::UnsupportedSource(host)) => assert_eq!(host, "www.example.com"),
            other => panic!("expected UnsupportedSource, got {:?}", other.map(|s| s.domain())),
        }
    }

    #[test]
    fn test_invalid_url() {
        assert!(matches!(
            find_scraper("not a url"),
            Err(ImportError::InvalidUrl(_))
        ));
    }
}
