//! HTTP clients for the upstream services behind the trading gateway.
//!
//! [`MarketClient`] talks to the brokerage API (latest prices, order
//! submission, positions, account) and [`NewsClient`] to the news-sentiment
//! API. Both are stateless: every operation is a single request with a fixed
//! timeout and no retries.
//!
//! # Example
//!
//! ```no_run
//! use upstream_client::{AssetClass, Credentials, MarketClient, MarketConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), upstream_client::Error> {
//!     let client = MarketClient::new(MarketConfig {
//!         credentials: Credentials::new("key-id", "secret"),
//!         ..Default::default()
//!     })?;
//!
//!     let price = client.latest_price("AAPL", AssetClass::Equity).await?;
//!     println!("AAPL: {}", price);
//!
//!     Ok(())
//! }
//! ```

mod error;
mod http;
mod market;
mod news;
mod order;
mod types;

pub use error::Error;
pub use market::{Credentials, KEY_ID_HEADER, MarketClient, MarketConfig, SECRET_KEY_HEADER};
pub use news::{NewsClient, NewsConfig};
pub use order::{OptionContract, OrderPayload, OrderRequest};
pub use types::*;
