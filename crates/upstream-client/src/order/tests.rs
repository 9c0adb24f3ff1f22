//! Unit tests for order module.

use super::*;
use serde_json::json;

fn call_order() -> OrderRequest {
    OrderRequest::market("aapl", OrderSide::Buy, 1).with_option("2023-09-15", 175.0, OptionRight::Call)
}

// ============================================================================
// OCC Symbol Tests
// ============================================================================

#[test]
fn test_occ_symbol_call() {
    let contract = OptionContract::new("AAPL", "2023-09-15", 175.0, OptionRight::Call).unwrap();

    assert_eq!(contract.occ_symbol(), "AAPL230915C00175000");
}

#[test]
fn test_occ_symbol_put_fractional_strike() {
    let contract = OptionContract::new("spy", "2024-01-05", 472.5, OptionRight::Put).unwrap();

    assert_eq!(contract.occ_symbol(), "SPY240105P00472500");
}

#[test]
fn test_occ_symbol_rounds_strike() {
    let contract = OptionContract::new("F", "2025-06-20", 12.3449, OptionRight::Call).unwrap();

    assert_eq!(contract.strike_millis(), 12345);
    assert_eq!(contract.occ_symbol(), "F250620C00012345");
}

#[test]
fn test_option_contract_invalid_expiry() {
    assert!(OptionContract::new("AAPL", "2023-02-30", 175.0, OptionRight::Call).is_err());
    assert!(OptionContract::new("AAPL", "20230915", 175.0, OptionRight::Call).is_err());
}

#[test]
fn test_option_contract_invalid_strike() {
    assert!(OptionContract::new("AAPL", "2023-09-15", 0.0, OptionRight::Call).is_err());
    assert!(OptionContract::new("AAPL", "2023-09-15", -5.0, OptionRight::Put).is_err());
    assert!(OptionContract::new("AAPL", "2023-09-15", 100_000.0, OptionRight::Put).is_err());
    assert!(OptionContract::new("AAPL", "2023-09-15", f64::NAN, OptionRight::Put).is_err());
}

// ============================================================================
// Payload Tests
// ============================================================================

#[test]
fn test_equity_market_payload() {
    let payload = OrderRequest::market("AAPL", OrderSide::Sell, 10)
        .to_payload()
        .unwrap();

    assert_eq!(
        serde_json::to_value(&payload).unwrap(),
        json!({
            "symbol": "AAPL",
            "side": "sell",
            "qty": 10,
            "type": "market",
            "time_in_force": "day",
        })
    );
}

#[test]
fn test_equity_limit_payload() {
    let payload = OrderRequest::market("MSFT", OrderSide::Buy, 5)
        .with_limit(401.5)
        .with_time_in_force(TimeInForce::Gtc)
        .to_payload()
        .unwrap();

    let value = serde_json::to_value(&payload).unwrap();
    assert_eq!(value["type"], "limit");
    assert_eq!(value["limit_price"], 401.5);
    assert_eq!(value["time_in_force"], "gtc");
    assert!(value.get("asset_class").is_none());
}

#[test]
fn test_market_payload_drops_limit_price() {
    let mut order = OrderRequest::market("AAPL", OrderSide::Buy, 1);
    order.limit_price = Some(100.0);

    let payload = order.to_payload().unwrap();
    assert_eq!(payload.limit_price, None);
}

#[test]
fn test_limit_without_price_rejected() {
    let mut order = OrderRequest::market("AAPL", OrderSide::Buy, 1);
    order.order_type = OrderType::Limit;

    let err = order.to_payload().unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("limit_price"));
}

#[test]
fn test_non_positive_limit_price_rejected() {
    let order = OrderRequest::market("AAPL", OrderSide::Buy, 1).with_limit(0.0);

    assert!(order.to_payload().unwrap_err().is_validation());
}

#[test]
fn test_non_positive_quantity_rejected() {
    for qty in [0, -3] {
        let err = OrderRequest::market("AAPL", OrderSide::Buy, qty)
            .to_payload()
            .unwrap_err();
        assert!(err.is_validation());
    }
}

#[test]
fn test_empty_symbol_rejected() {
    let err = OrderRequest::market("  ", OrderSide::Buy, 1)
        .to_payload()
        .unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn test_option_market_payload() {
    let payload = call_order().to_payload().unwrap();

    assert_eq!(
        serde_json::to_value(&payload).unwrap(),
        json!({
            "symbol": "AAPL230915C00175000",
            "side": "buy",
            "qty": 1,
            "type": "market",
            "time_in_force": "day",
            "asset_class": "option",
        })
    );
}

#[test]
fn test_option_limit_payload_keeps_limit_price() {
    let payload = call_order().with_limit(3.25).to_payload().unwrap();

    assert_eq!(payload.symbol, "AAPL230915C00175000");
    assert_eq!(payload.limit_price, Some(3.25));
    assert_eq!(payload.asset_class, Some(AssetClass::Option));
}

#[test]
fn test_option_missing_fields_rejected() {
    let mut missing_strike = call_order();
    missing_strike.strike_price = None;

    let mut missing_expiry = call_order();
    missing_expiry.expiry = None;

    let mut blank_expiry = call_order();
    blank_expiry.expiry = Some(String::new());

    let mut missing_strategy = call_order();
    missing_strategy.strategy = None;

    for order in [missing_strike, missing_expiry, blank_expiry, missing_strategy] {
        let err = order.to_payload().unwrap_err();
        assert!(err.is_validation(), "unexpected error: {err}");
    }
}

#[test]
fn test_equity_order_has_no_contract() {
    let order = OrderRequest::market("AAPL", OrderSide::Buy, 1);

    assert_eq!(order.option_contract().unwrap(), None);
}
