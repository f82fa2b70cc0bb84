use std::path::PathBuf;
use std::time::Duration;

use crate::config::ImporterConfig;
use crate::pipelines;
use crate::{ImportError, ImportRules, RecipeImportResult};

/// Where the rules for an import come from
#[derive(Debug, Clone, Default)]
enum RulesSource {
    /// No rules: every ingredient is kept and nothing is renamed
    #[default]
    Empty,
    /// A fixed rule set
    Inline(ImportRules),
    /// A JSON rules file, read again on every import
    File(PathBuf),
}

/// Builder for configuring and executing recipe imports
#[derive(Debug, Default)]
pub struct RecipeImporterBuilder {
    url: Option<String>,
    rules: RulesSource,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl RecipeImporterBuilder {
    /// Set the URL of the recipe page
    ///
    /// # Example
    /// ```
    /// use mytaste_import::RecipeImporter;
    ///
    /// let builder = RecipeImporter::builder()
    ///     .url("https://www.chefkoch.de/rezepte/123/kuchen.html");
    /// ```
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Use a fixed set of rename and spice rules
    ///
    /// # Example
    /// ```
    /// use mytaste_import::{ImportRules, RecipeImporter, RenameRule};
    ///
    /// let rules = ImportRules {
    ///     rename_rules: vec![RenameRule::new(["Pfeffer und Salz"], "Salz und Pfeffer")],
    ///     ..Default::default()
    /// };
    /// let builder = RecipeImporter::builder()
    ///     .url("https://leckerabnehmen.com/rezept/")
    ///     .rules(rules);
    /// ```
    pub fn rules(mut self, rules: ImportRules) -> Self {
        self.rules = RulesSource::Inline(rules);
        self
    }

    /// Read rules from a JSON file when the import runs
    ///
    /// The file is read on every [`build`](Self::build), so edits are picked
    /// up without restarting. A missing file means empty rules.
    pub fn rules_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.rules = RulesSource::File(path.into());
        self
    }

    /// Set a timeout for the page request
    ///
    /// # Example
    /// ```
    /// use mytaste_import::RecipeImporter;
    /// use std::time::Duration;
    ///
    /// let builder = RecipeImporter::builder()
    ///     .url("https://www.chefkoch.de/rezepte/123/kuchen.html")
    ///     .timeout(Duration::from_secs(10));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Override the user agent sent with the page request
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Apply settings from an [`ImporterConfig`]
    ///
    /// Settings already set on the builder are kept.
    pub fn config(mut self, config: &ImporterConfig) -> Self {
        self.timeout.get_or_insert(config.timeout());
        self.user_agent.get_or_insert_with(|| config.user_agent.clone());
        if matches!(self.rules, RulesSource::Empty) {
            if let Some(path) = &config.rules_file {
                self.rules = RulesSource::File(path.clone());
            }
        }
        self
    }

    /// Build and execute the recipe import
    ///
    /// # Errors
    /// Returns `ImportError` if:
    /// - No URL was specified
    /// - The rules file cannot be read
    /// - The page cannot be fetched
    /// - The page has no recipe metadata and its host has no scraper
    ///
    /// # Example
    /// ```no_run
    /// # use mytaste_import::RecipeImporter;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let recipe = RecipeImporter::builder()
    ///     .url("https://www.chefkoch.de/rezepte/123/kuchen.html")
    ///     .rules_file("data/config.json")
    ///     .build()
    ///     .await?;
    /// println!("{}", recipe.title);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn build(self) -> Result<RecipeImportResult, ImportError> {
        let url = self.url.ok_or_else(|| {
            ImportError::BuilderError("No URL specified. Use .url()".to_string())
        })?;

        let rules = match self.rules {
            RulesSource::Empty => ImportRules::default(),
            RulesSource::Inline(rules) => rules,
            RulesSource::File(path) => ImportRules::load(path)?,
        };

        pipelines::url::process(&url, &rules, self.timeout, self.user_agent.as_deref()).await
    }
}

/// Main entry point for the builder API
pub struct RecipeImporter;

impl RecipeImporter {
    /// Creates a new builder for importing recipes
    ///
    /// # Example
    /// ```
    /// use mytaste_import::RecipeImporter;
    ///
    /// let builder = RecipeImporter::builder();
    /// ```
    pub fn builder() -> RecipeImporterBuilder {
        RecipeImporterBuilder::default()
    }
}
