//! HTTP client for the brokerage API: prices, orders, positions and account.

use crate::error::Error;
use crate::http::{endpoint, parse_base_url, send_json};
use crate::order::OrderRequest;
use crate::types::{AssetClass, LatestQuoteResponse, LatestTradeResponse, PriceQuote};
use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;


/// Header carrying the API key id.
pub const KEY_ID_HEADER: &str = "apca-api-key-id";

/// Header carrying the API secret.
pub const SECRET_KEY_HEADER: &str = "apca-api-secret-key";

/// Brokerage API credentials.
#[derive(Clone, Default)]
pub struct Credentials {
    /// API key id.
    pub key_id: String,
    /// API secret.
    pub secret_key: String,
}

impl Credentials {
    /// Creates a credential pair.
    #[must_use]
    pub fn new(key_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Returns true if either half of the pair is missing.
    #[must_use]
    pub fn is_incomplete(&self) -> bool {
        self.key_id.is_empty() || self.secret_key.is_empty()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("key_id", &self.key_id)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Market client configuration.
#[derive(Debug, Clone)]
pub struct MarketConfig {
    /// API credentials.
    pub credentials: Credentials,
    /// Base URL of the trading API (orders, positions, account).
    pub trading_url: String,
    /// Base URL of the market data API (trades, quotes).
    pub data_url: String,
    /// Timeout for read requests.
    pub read_timeout: Duration,
    /// Timeout for order submission.
    pub write_timeout: Duration,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            credentials: Credentials::default(),
            trading_url: "https://paper-api.alpaca.markets".to_string(),
            data_url: "https://data.alpaca.markets/v2".to_string(),
            read_timeout: Duration::from_secs(15),
            write_timeout: Duration::from_secs(20),
        }
    }
}

/// HTTP client for the brokerage API.
#[derive(Debug, Clone)]
pub struct MarketClient {
    client: Client,
    trading_url: Url,
    data_url: Url,
    read_timeout: Duration,
    write_timeout: Duration,
}

impl MarketClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    /// Returns error if a base URL does not parse, a credential is not a valid
    /// header value, or the HTTP client cannot be built.
    pub fn new(config: MarketConfig) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut key_id = HeaderValue::from_str(&config.credentials.key_id)?;
        let mut secret = HeaderValue::from_str(&config.credentials.secret_key)?;
        key_id.set_sensitive(true);
        secret.set_sensitive(true);
        headers.insert(KEY_ID_HEADER, key_id);
        headers.insert(SECRET_KEY_HEADER, secret);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            trading_url: parse_base_url(&config.trading_url)?,
            data_url: parse_base_url(&config.data_url)?,
            read_timeout: config.read_timeout,
            write_timeout: config.write_timeout,
        })
    }

    // ========================================================================
    // Market Data
    // ========================================================================

    /// Gets the latest price of `symbol`.
    ///
    /// Equities use the last trade price. Options use the mid of the latest
    /// quote, or the only side quoted.
    ///
    /// # Errors
    /// Returns error if the request fails or the price field is absent.
    pub async fn latest_price(&self, symbol: &str, asset_class: AssetClass) -> Result<f64, Error> {
        if symbol.trim().is_empty() {
            return Err(Error::Validation("symbol is required".to_string()));
        }

        match asset_class {
            AssetClass::Equity => {
                let url = endpoint(&self.data_url, &["stocks", symbol, "trades", "latest"])?;
                debug!(symbol, "fetching latest trade");
                let resp: LatestTradeResponse =
                    send_json(self.client.get(url), self.read_timeout).await?;
                resp.price()
            }
            AssetClass::Option => {
                let url = endpoint(&self.data_url, &["options", symbol, "quotes", "latest"])?;
                debug!(symbol, "fetching latest option quote");
                let resp: LatestQuoteResponse =
                    send_json(self.client.get(url), self.read_timeout).await?;
                resp.price()
            }
        }
    }

    /// Gets the latest price of `symbol` as a [`PriceQuote`].
    ///
    /// # Errors
    /// Returns error if the request fails or the price field is absent.
    pub async fn latest_quote(
        &self,
        symbol: &str,
        asset_class: AssetClass,
    ) -> Result<PriceQuote, Error> {
        let price = self.latest_price(symbol, asset_class).await?;
        Ok(PriceQuote {
            symbol: symbol.to_string(),
            asset_class,
            price,
        })
    }

    // ========================================================================
    // Trading
    // ========================================================================

    /// Submits an order and returns the upstream order document unchanged.
    ///
    /// # Errors
    /// Returns a validation error before any request if the order is
    /// malformed, or an upstream error if submission fails.
    pub async fn place_order(&self, order: &OrderRequest) -> Result<Value, Error> {
        let payload = order.to_payload()?;
        let url = endpoint(&self.trading_url, &["v2", "orders"])?;

        info!(
            symbol = %payload.symbol,
            side = %payload.side,
            qty = payload.qty,
            order_type = %payload.order_type,
            "submitting order"
        );
        send_json(self.client.post(url).json(&payload), self.write_timeout).await
    }

    /// Lists open positions.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn positions(&self) -> Result<Value, Error> {
        let url = endpoint(&self.trading_url, &["v2", "positions"])?;
        send_json(self.client.get(url), self.read_timeout).await
    }

    /// Gets the trading account.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn account(&self) -> Result<Value, Error> {
        let url = endpoint(&self.trading_url, &["v2", "account"])?;
        send_json(self.client.get(url), self.read_timeout).await
    }

    /// Base URL of the trading API.
    #[must_use]
    pub fn trading_url(&self) -> &Url {
        &self.trading_url
    }

    /// Base URL of the market data API.
    #[must_use]
    pub fn data_url(&self) -> &Url {
        &self.data_url
    }
}
