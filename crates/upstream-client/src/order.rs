//! Order construction: validation, OCC option symbols and the upstream payload.

use crate::error::Error;
use crate::types::{AssetClass, OptionRight, OrderSide, OrderType, TimeInForce};
use chrono::NaiveDate;
use serde::Serialize;

#[cfg(test)]
mod tests;

/// Largest strike representable in the eight-digit OCC strike field, in thousandths.
const MAX_STRIKE_MILLIS: f64 = 99_999_999.0;

/// An order as requested by a gateway client.
///
/// Option orders name the underlying in `symbol` and describe the contract
/// through `strike_price`, `expiry` and `strategy`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    /// Equity symbol, or the option's underlying.
    pub symbol: String,
    /// Order side.
    pub side: OrderSide,
    /// Number of shares or contracts.
    pub quantity: i64,
    /// Order type.
    pub order_type: OrderType,
    /// Limit price, required for limit orders.
    pub limit_price: Option<f64>,
    /// Time in force.
    pub time_in_force: TimeInForce,
    /// Asset class.
    pub asset_class: AssetClass,
    /// Option strike price.
    pub strike_price: Option<f64>,
    /// Option expiry (YYYY-MM-DD).
    pub expiry: Option<String>,
    /// Option call/put designation.
    pub strategy: Option<OptionRight>,
}

impl OrderRequest {
    /// Creates a day market order for an equity.
    #[must_use]
    pub fn market(symbol: impl Into<String>, side: OrderSide, quantity: i64) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            quantity,
            order_type: OrderType::Market,
            limit_price: None,
            time_in_force: TimeInForce::Day,
            asset_class: AssetClass::Equity,
            strike_price: None,
            expiry: None,
            strategy: None,
        }
    }

    /// Turns the order into a limit order at `price`.
    #[must_use]
    pub fn with_limit(mut self, price: f64) -> Self {
        self.order_type = OrderType::Limit;
        self.limit_price = Some(price);
        self
    }

    /// Sets the time in force.
    #[must_use]
    pub fn with_time_in_force(mut self, time_in_force: TimeInForce) -> Self {
        self.time_in_force = time_in_force;
        self
    }

    /// Turns the order into an option order on `symbol` as underlying.
    #[must_use]
    pub fn with_option(
        mut self,
        expiry: impl Into<String>,
        strike_price: f64,
        strategy: OptionRight,
    ) -> Self {
        self.asset_class = AssetClass::Option;
        self.expiry = Some(expiry.into());
        self.strike_price = Some(strike_price);
        self.strategy = Some(strategy);
        self
    }

    /// Resolves the option contract for option orders.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] if an option field is missing or invalid.
    pub fn option_contract(&self) -> Result<Option<OptionContract>, Error> {
        if self.asset_class != AssetClass::Option {
            return Ok(None);
        }

        let (Some(strike), Some(expiry), Some(right)) = (
            self.strike_price,
            self.expiry.as_deref().filter(|e| !e.trim().is_empty()),
            self.strategy,
        ) else {
            return Err(Error::Validation(
                "options require strike_price, expiry, and strategy (call/put)".to_string(),
            ));
        };

        OptionContract::new(&self.symbol, expiry, strike, right).map(Some)
    }

    /// Builds the body sent to the order-creation endpoint.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] if the order is malformed.
    pub fn to_payload(&self) -> Result<OrderPayload, Error> {
        let symbol = self.symbol.trim();
        if symbol.is_empty() {
            return Err(Error::Validation("symbol is required".to_string()));
        }
        if self.quantity <= 0 {
            return Err(Error::Validation(format!(
                "quantity must be positive, got {}",
                self.quantity
            )));
        }

        let limit_price = match (self.order_type, self.limit_price) {
            (OrderType::Market, _) => None,
            (OrderType::Limit, Some(price)) if price.is_finite() && price > 0.0 => Some(price),
            (OrderType::Limit, Some(price)) => {
                return Err(Error::Validation(format!(
                    "limit_price must be positive, got {}",
                    price
                )));
            }
            (OrderType::Limit, None) => {
                return Err(Error::Validation(
                    "limit orders require limit_price".to_string(),
                ));
            }
        };

        let (symbol, asset_class) = match self.option_contract()? {
            Some(contract) => (contract.occ_symbol(), Some(AssetClass::Option)),
            None => (symbol.to_string(), None),
        };

        Ok(OrderPayload {
            symbol,
            side: self.side,
            qty: self.quantity,
            order_type: self.order_type,
            time_in_force: self.time_in_force,
            limit_price,
            asset_class,
        })
    }
}

/// A single listed option contract.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionContract {
    /// Underlying symbol, upper-cased.
    pub underlying: String,
    /// Expiration date.
    pub expiry: NaiveDate,
    /// Strike price.
    pub strike: f64,
    /// Call or put.
    pub right: OptionRight,
}

impl OptionContract {
    /// Creates a contract from an underlying, a `YYYY-MM-DD` expiry, a strike and a right.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] for an unparsable expiry or a strike that
    /// does not fit the OCC strike field.
    pub fn new(
        underlying: &str,
        expiry: &str,
        strike: f64,
        right: OptionRight,
    ) -> Result<Self, Error> {
        let underlying = underlying.trim().to_uppercase();
        if underlying.is_empty() {
            return Err(Error::Validation("option underlying is required".to_string()));
        }

        let expiry = NaiveDate::parse_from_str(expiry.trim(), "%Y-%m-%d").map_err(|_| {
            Error::Validation(format!("invalid expiry: {}. Use YYYY-MM-DD", expiry))
        })?;

        if !strike.is_finite() || strike <= 0.0 || (strike * 1000.0).round() > MAX_STRIKE_MILLIS {
            return Err(Error::Validation(format!(
                "strike_price out of range: {}",
                strike
            )));
        }

        Ok(Self {
            underlying,
            expiry,
            strike,
            right,
        })
    }

    /// Strike in thousandths of a dollar.
    #[must_use]
    pub fn strike_millis(&self) -> u64 {
        // Range checked in `new`.
        (self.strike * 1000.0).round() as u64
    }

    /// OCC-style contract symbol, e.g. `AAPL230915C00175000`.
    #[must_use]
    pub fn occ_symbol(&self) -> String {
        format!(
            "{}{}{}{:08}",
            self.underlying,
            self.expiry.format("%y%m%d"),
            self.right.code(),
            self.strike_millis()
        )
    }
}

/// JSON body of the order-creation endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderPayload {
    /// Equity symbol or OCC contract symbol.
    pub symbol: String,
    /// Order side.
    pub side: OrderSide,
    /// Quantity.
    pub qty: i64,
    /// Order type.
    #[serde(rename = "type")]
    pub order_type: OrderType,
    /// Time in force.
    pub time_in_force: TimeInForce,
    /// Limit price, limit orders only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit_price: Option<f64>,
    /// Explicit asset class marker, option orders only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_class: Option<AssetClass>,
}
