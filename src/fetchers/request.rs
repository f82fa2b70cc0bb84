use log::debug;
use reqwest::Client;
use std::time::Duration;

use crate::error::ImportError;

pub const DEFAULT_USER_AGENT: &str = concat!("MyTaste-Importer/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Plain HTTP GET of a recipe page.
pub struct RequestFetcher {
    client: Client,
}

impl RequestFetcher {
    pub fn new(timeout: Option<Duration>, user_agent: Option<&str>) -> Result<Self, ImportError> {
        let client = Client::builder()
            .timeout(timeout.unwrap_or(DEFAULT_TIMEOUT))
            .user_agent(user_agent.unwrap_or(DEFAULT_USER_AGENT))
            .build()?;

        Ok(Self { client })
    }

    /// Fetches `url`; any non-2xx status is an error.
    pub async fn fetch(&self, url: &str) -> Result<String, ImportError> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        debug!("Fetched {} ({})", url, response.status());
        let html = response.text().await?;
        Ok(html)
    }
}
