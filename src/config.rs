use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::fetchers::DEFAULT_USER_AGENT;

/// Importer settings
#[derive(Debug, Deserialize, Clone)]
pub struct ImporterConfig {
    /// User agent sent with every page request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// JSON file holding rename and spice rules
    #[serde(default)]
    pub rules_file: Option<PathBuf>,
}

impl Default for ImporterConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout: default_timeout(),
            rules_file: None,
        }
    }
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_timeout() -> u64 {
    30
}

impl ImporterConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with MYTASTE__ prefix
    /// 2. mytaste.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: MYTASTE__RULES_FILE
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Load configuration from `mytaste.toml` and `MYTASTE__*` environment variables
pub fn load_config() -> Result<ImporterConfig, ConfigError> {
    let settings = Config::builder()
        .add_source(File::with_name("mytaste").required(false))
        .add_source(
            Environment::with_prefix("MYTASTE")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
