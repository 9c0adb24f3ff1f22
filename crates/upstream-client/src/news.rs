//! HTTP client for the news-sentiment API.

use crate::error::Error;
use crate::http::{endpoint, parse_base_url, send_json};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;


/// News client configuration.
#[derive(Clone)]
pub struct NewsConfig {
    /// API token, sent as the `token` query parameter.
    pub api_key: String,
    /// Base URL of the news API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://finnhub.io/api/v1".to_string(),
            timeout: Duration::from_secs(15),
        }
    }
}

impl std::fmt::Debug for NewsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Query string of the news endpoints.
#[derive(Debug, Serialize)]
struct NewsQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    symbol: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<&'a str>,
    token: &'a str,
}

/// HTTP client for the news-sentiment API.
#[derive(Clone)]
pub struct NewsClient {
    client: Client,
    base_url: Url,
    api_key: String,
    timeout: Duration,
}

impl std::fmt::Debug for NewsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsClient")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl NewsClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    /// Returns error if the base URL does not parse or the HTTP client cannot be built.
    pub fn new(config: NewsConfig) -> Result<Self, Error> {
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            base_url: parse_base_url(&config.base_url)?,
            api_key: config.api_key,
            timeout: config.timeout,
        })
    }

    /// Gets the news sentiment of a company.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn company_news_sentiment(&self, symbol: &str) -> Result<Value, Error> {
        debug!(symbol, "fetching news sentiment");
        let url = self.url(
            "news-sentiment",
            &NewsQuery {
                symbol: Some(symbol),
                category: None,
                token: &self.api_key,
            },
        )?;
        send_json(self.client.get(url), self.timeout).await
    }

    /// Gets general market news.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn market_news(&self) -> Result<Value, Error> {
        debug!("fetching general market news");
        let url = self.url(
            "news",
            &NewsQuery {
                symbol: None,
                category: Some("general"),
                token: &self.api_key,
            },
        )?;
        send_json(self.client.get(url), self.timeout).await
    }

    fn url(&self, path: &str, query: &NewsQuery<'_>) -> Result<Url, Error> {
        let mut url = endpoint(&self.base_url, &[path])?;
        let params = serde_urlencoded::to_string(query)
            .map_err(|e| Error::Validation(format!("cannot encode query: {}", e)))?;
        url.set_query(Some(&params));
        Ok(url)
    }

    /// Base URL of the news API.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}
