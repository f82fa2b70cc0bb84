use thiserror::Error;

/// Errors that can occur during recipe import operations
#[derive(Error, Debug)]
pub enum ImportError {
    /// Failed to fetch the page (network error or non-2xx status)
    #[error("Failed to fetch URL: {0}")]
    FetchError(#[from] reqwest::Error),

    /// The URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// No recipe metadata on the page and no scraper registered for its host
    #[error("Unsupported source: {0}")]
    UnsupportedSource(String),

    /// A scraper matched the host but the page held no recipe content
    #[error("No recipe found on {0}")]
    NoRecipeFound(String),

    /// Ingredient sections violate the titling rule
    #[error("Invalid ingredient sections: {0}")]
    InvalidSections(String),

    /// Rule configuration is inconsistent and was not saved
    #[error("Invalid import rules: {0}")]
    InvalidRules(String),

    /// Reading or writing the rules file failed
    #[error("Rules file error: {0}")]
    RulesIo(#[from] std::io::Error),

    /// The rules file is not valid JSON of the expected shape
    #[error("Rules format error: {0}")]
    RulesFormat(#[from] serde_json::Error),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}
