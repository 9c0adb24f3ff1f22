//! Application state management.

use crate::config::Config;
use tracing::{info, warn};
use upstream_client::{MarketClient, NewsClient};

/// Application state shared across all handlers.
///
/// Everything here is immutable after start-up; the clients only hold
/// connection pools.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Brokerage client.
    pub market: MarketClient,
    /// News client.
    pub news: NewsClient,
    /// Application configuration.
    pub config: Config,
}

impl AppState {
    /// Creates the application state from configuration.
    ///
    /// # Errors
    /// Returns error if either client cannot be built.
    pub fn from_config(config: Config) -> Result<Self, upstream_client::Error> {
        let market_config = config.market_config();
        if market_config.credentials.is_incomplete() {
            warn!("brokerage credentials are not configured; upstream calls will be rejected");
        }
        if config.finnhub.api_key.is_empty() {
            warn!("news API key is not configured; upstream calls will be rejected");
        }

        let market = MarketClient::new(market_config)?;
        let news = NewsClient::new(config.news_config())?;

        info!(
            trading_url = %market.trading_url(),
            data_url = %market.data_url(),
            news_url = %news.base_url(),
            "upstream clients ready"
        );

        Ok(Self {
            market,
            news,
            config,
        })
    }
}
