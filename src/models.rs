//! Request and response models for the REST API.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use upstream_client::{AssetClass, OptionRight, OrderRequest};
use utoipa::ToSchema;

/// Health check response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

// ============================================================================
// Prices
// ============================================================================

/// Query parameters of the price endpoint.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PriceQuery {
    /// Symbol to price (OCC symbol for options).
    pub symbol: String,
    /// `equity` (or `us_equity`) or `option`.
    #[serde(default = "default_asset_class")]
    pub asset_class: String,
}

fn default_asset_class() -> String {
    "equity".to_string()
}

/// Latest price of a symbol.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PriceResponse {
    /// Symbol as requested.
    pub symbol: String,
    /// Asset class the price was looked up for.
    pub asset_class: String,
    /// Trade price for equities, mid quote for options.
    pub price: f64,
}

// ============================================================================
// Trading
// ============================================================================

/// Request to place an order.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct TradeRequest {
    /// Equity symbol, or the underlying of an option.
    pub symbol: String,
    /// `buy` or `sell`, case-insensitive.
    pub side: String,
    /// Number of shares or contracts.
    pub quantity: i64,
    /// `market` (default) or `limit`.
    #[serde(default = "default_order_type")]
    pub order_type: String,
    /// Limit price, required for limit orders.
    #[serde(default)]
    pub limit_price: Option<f64>,
    /// Time in force (default: `day`).
    #[serde(default = "default_time_in_force")]
    pub time_in_force: String,
    /// `equity` (default) or `option`.
    #[serde(default = "default_asset_class")]
    pub asset_class: String,
    /// Option strike price.
    #[serde(default)]
    pub strike_price: Option<f64>,
    /// Option expiry, YYYY-MM-DD.
    #[serde(default)]
    pub expiry: Option<String>,
    /// Option call/put designation (`call`, `put`, `C`, `P`).
    #[serde(default)]
    pub strategy: Option<String>,
}

fn default_order_type() -> String {
    "market".to_string()
}

fn default_time_in_force() -> String {
    "day".to_string()
}

impl TryFrom<TradeRequest> for OrderRequest {
    type Error = ApiError;

    fn try_from(req: TradeRequest) -> Result<Self, Self::Error> {
        let strategy = req
            .strategy
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse::<OptionRight>)
            .transpose()?;

        Ok(OrderRequest {
            symbol: req.symbol,
            side: req.side.parse()?,
            quantity: req.quantity,
            order_type: req.order_type.parse()?,
            limit_price: req.limit_price,
            time_in_force: req.time_in_force.parse()?,
            asset_class: req.asset_class.parse::<AssetClass>()?,
            strike_price: req.strike_price,
            expiry: req.expiry.filter(|e| !e.trim().is_empty()),
            strategy,
        })
    }
}

/// Response after placing an order.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TradeResponse {
    /// Order document as returned by the brokerage.
    #[schema(value_type = Object)]
    pub order: Value,
}

// ============================================================================
// News & Portfolio
// ============================================================================

/// Query parameters of the sentiment endpoint.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SentimentQuery {
    /// Company symbol; general market news when absent.
    #[serde(default)]
    pub symbol: Option<String>,
}

/// News sentiment or market news.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SentimentResponse {
    /// Document as returned by the news API.
    #[schema(value_type = Object)]
    pub data: Value,
}

/// Positions and account in one response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PortfolioResponse {
    /// Open positions as returned by the brokerage.
    #[schema(value_type = Object)]
    pub positions: Value,
    /// Account as returned by the brokerage.
    #[schema(value_type = Object)]
    pub account: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use upstream_client::{OrderSide, OrderType, TimeInForce};

    fn trade_request(body: &str) -> TradeRequest {
        serde_json::from_str(body).expect("valid trade request")
    }

    #[test]
    fn test_trade_request_defaults() {
        let req = trade_request(r#"{"symbol":"AAPL","side":"buy","quantity":3}"#);

        assert_eq!(req.order_type, "market");
        assert_eq!(req.time_in_force, "day");
        assert_eq!(req.asset_class, "equity");

        let order = OrderRequest::try_from(req).unwrap();
        assert_eq!(order.side, OrderSide::Buy);
        assert_eq!(order.order_type, OrderType::Market);
        assert_eq!(order.time_in_force, TimeInForce::Day);
        assert_eq!(order.asset_class, AssetClass::Equity);
    }

    #[test]
    fn test_trade_request_mixed_case() {
        let req = trade_request(
            r#"{"symbol":"AAPL","side":"BUY","quantity":1,"order_type":"LIMIT",
                "limit_price":1.5,"time_in_force":"GTC","asset_class":"us_equity"}"#,
        );

        let order = OrderRequest::try_from(req).unwrap();
        assert_eq!(order.side, OrderSide::Buy);
        assert_eq!(order.order_type, OrderType::Limit);
        assert_eq!(order.time_in_force, TimeInForce::Gtc);
    }

    #[test]
    fn test_trade_request_option_fields() {
        let req = trade_request(
            r#"{"symbol":"AAPL","side":"sell","quantity":2,"asset_class":"option",
                "strike_price":175.0,"expiry":"2023-09-15","strategy":"PUT"}"#,
        );

        let order = OrderRequest::try_from(req).unwrap();
        assert_eq!(order.asset_class, AssetClass::Option);
        assert_eq!(order.strategy, Some(OptionRight::Put));
        assert_eq!(order.expiry.as_deref(), Some("2023-09-15"));
    }

    #[test]
    fn test_trade_request_blank_option_fields_are_missing() {
        let req = trade_request(
            r#"{"symbol":"AAPL","side":"buy","quantity":1,"asset_class":"option",
                "strike_price":175.0,"expiry":"","strategy":""}"#,
        );

        let order = OrderRequest::try_from(req).unwrap();
        assert_eq!(order.expiry, None);
        assert_eq!(order.strategy, None);
        assert!(order.to_payload().unwrap_err().is_validation());
    }

    #[test]
    fn test_trade_request_invalid_enum_values() {
        for body in [
            r#"{"symbol":"AAPL","side":"hold","quantity":1}"#,
            r#"{"symbol":"AAPL","side":"buy","quantity":1,"order_type":"stop"}"#,
            r#"{"symbol":"AAPL","side":"buy","quantity":1,"asset_class":"crypto"}"#,
            r#"{"symbol":"AAPL","side":"buy","quantity":1,"strategy":"straddle"}"#,
        ] {
            let result = OrderRequest::try_from(trade_request(body));
            assert!(matches!(result, Err(ApiError::InvalidRequest(_))), "{body}");
        }
    }

    #[test]
    fn test_price_query_default_asset_class() {
        let query: PriceQuery = serde_json::from_str(r#"{"symbol":"AAPL"}"#).unwrap();
        assert_eq!(query.asset_class, "equity");
    }
}
