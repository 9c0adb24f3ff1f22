//! Domain enumerations and upstream response shapes.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::str::FromStr;


/// Asset class of a priced or traded instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum AssetClass {
    /// Stock or ETF.
    #[default]
    Equity,
    /// Listed option contract.
    Option,
}

impl FromStr for AssetClass {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "equity" | "us_equity" => Ok(Self::Equity),
            "option" => Ok(Self::Option),
            _ => Err(Error::UnsupportedAssetClass(s.to_string())),
        }
    }
}

impl TryFrom<String> for AssetClass {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::fmt::Display for AssetClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Equity => write!(f, "equity"),
            Self::Option => write!(f, "option"),
        }
    }
}

/// Order side for trading operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum OrderSide {
    /// Buy order.
    Buy,
    /// Sell order.
    Sell,
}

impl FromStr for OrderSide {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "buy" => Ok(Self::Buy),
            "sell" => Ok(Self::Sell),
            _ => Err(Error::Validation(format!(
                "invalid side: {}. Use 'buy' or 'sell'",
                s
            ))),
        }
    }
}

impl TryFrom<String> for OrderSide {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
        }
    }
}

/// Order type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum OrderType {
    /// Execute at the best available price.
    #[default]
    Market,
    /// Execute at the limit price or better.
    Limit,
}

impl FromStr for OrderType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "market" => Ok(Self::Market),
            "limit" => Ok(Self::Limit),
            _ => Err(Error::Validation(format!(
                "invalid order type: {}. Use 'market' or 'limit'",
                s
            ))),
        }
    }
}

impl TryFrom<String> for OrderType {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Market => write!(f, "market"),
            Self::Limit => write!(f, "limit"),
        }
    }
}

/// Time in force accepted by the brokerage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum TimeInForce {
    /// Valid for the current trading day (default).
    #[default]
    Day,
    /// Good till canceled.
    Gtc,
    /// Market on open.
    Opg,
    /// Market on close.
    Cls,
    /// Immediate or cancel.
    Ioc,
    /// Fill or kill.
    Fok,
}

impl FromStr for TimeInForce {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "gtc" => Ok(Self::Gtc),
            "opg" => Ok(Self::Opg),
            "cls" => Ok(Self::Cls),
            "ioc" => Ok(Self::Ioc),
            "fok" => Ok(Self::Fok),
            _ => Err(Error::Validation(format!("invalid time in force: {}", s))),
        }
    }
}

impl TryFrom<String> for TimeInForce {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Day => write!(f, "day"),
            Self::Gtc => write!(f, "gtc"),
            Self::Opg => write!(f, "opg"),
            Self::Cls => write!(f, "cls"),
            Self::Ioc => write!(f, "ioc"),
            Self::Fok => write!(f, "fok"),
        }
    }
}

/// Call or put designation of an option contract.
///
/// Parsing keys off the first letter, so `C`, `call` and `CALL` are all calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum OptionRight {
    /// Call option.
    Call,
    /// Put option.
    Put,
}

impl OptionRight {
    /// Single-letter code used in OCC symbols.
    #[must_use]
    pub fn code(self) -> char {
        match self {
            Self::Call => 'C',
            Self::Put => 'P',
        }
    }
}

impl FromStr for OptionRight {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('c') => Ok(Self::Call),
            Some('p') => Ok(Self::Put),
            _ => Err(Error::Validation(format!(
                "invalid option strategy: {}. Use 'call' or 'put'",
                s
            ))),
        }
    }
}

impl TryFrom<String> for OptionRight {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::fmt::Display for OptionRight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "call"),
            Self::Put => write!(f, "put"),
        }
    }
}

/// Latest price of a symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Symbol as requested.
    pub symbol: String,
    /// Asset class the price was looked up for.
    pub asset_class: AssetClass,
    /// Trade price for equities, mid quote for options.
    pub price: f64,
}

// ============================================================================
// Upstream market data shapes
// ============================================================================

/// Body of the latest-trade endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LatestTradeResponse {
    /// Latest trade, if any.
    #[serde(default)]
    pub trade: Option<Trade>,
}

/// A single trade print.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Trade {
    /// Trade price.
    #[serde(default)]
    pub p: Option<f64>,
}

/// Body of the latest-quote endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LatestQuoteResponse {
    /// Latest quote, if any.
    #[serde(default)]
    pub quote: Option<Quote>,
}

/// Best bid and offer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Quote {
    /// Ask price.
    #[serde(default)]
    pub ap: Option<f64>,
    /// Bid price.
    #[serde(default)]
    pub bp: Option<f64>,
}

impl LatestTradeResponse {
    /// Extracts the trade price.
    ///
    /// # Errors
    /// Returns [`Error::MissingField`] if the trade or its price is absent.
    pub fn price(&self) -> Result<f64, Error> {
        self.trade
            .as_ref()
            .and_then(|t| t.p)
            .ok_or(Error::MissingField("trade.p"))
    }
}

impl LatestQuoteResponse {
    /// Mid price of the quote, falling back to whichever side is present.
    ///
    /// # Errors
    /// Returns [`Error::MissingField`] if neither side is quoted.
    pub fn price(&self) -> Result<f64, Error> {
        let quote = self.quote.as_ref();
        mid_price(quote.and_then(|q| q.ap), quote.and_then(|q| q.bp))
    }
}

/// Arithmetic mean of ask and bid, or the single side that is present.
///
/// # Errors
/// Returns [`Error::MissingField`] if both sides are absent.
pub fn mid_price(ask: Option<f64>, bid: Option<f64>) -> Result<f64, Error> {
    match (ask, bid) {
        (Some(ask), Some(bid)) => Ok((ask + bid) / 2.0),
        (Some(price), None) | (None, Some(price)) => Ok(price),
        (None, None) => Err(Error::MissingField("quote.ap/quote.bp")),
    }
}
