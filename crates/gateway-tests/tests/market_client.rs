//! Market client tests against a stub brokerage.

use axum::http::Method;
use gateway_tests::{StubUpstream, TEST_KEY_ID, TEST_SECRET, market_client};
use serde_json::json;
use std::time::Duration;
use upstream_client::{AssetClass, Error, OptionRight, OrderRequest, OrderSide};

const TIMEOUT: Duration = Duration::from_secs(2);

// ============================================================================
// Latest price
// ============================================================================

#[tokio::test]
async fn test_equity_price_from_latest_trade() {
    let stub = StubUpstream::new()
        .get(
            "/v2/stocks/AAPL/trades/latest",
            json!({"symbol": "AAPL", "trade": {"p": 189.37, "s": 100, "t": "2024-01-02T15:59:59Z"}}),
        )
        .spawn()
        .await;

    let price = market_client(&stub, TIMEOUT)
        .latest_price("AAPL", AssetClass::Equity)
        .await
        .expect("Failed to get price");

    assert_eq!(price, 189.37);

    let requests = stub.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].headers["apca-api-key-id"], TEST_KEY_ID);
    assert_eq!(requests[0].headers["apca-api-secret-key"], TEST_SECRET);
    assert_eq!(requests[0].headers["content-type"], "application/json");
}

#[tokio::test]
async fn test_equity_price_missing_field() {
    let stub = StubUpstream::new()
        .get("/v2/stocks/AAPL/trades/latest", json!({"symbol": "AAPL", "trade": {}}))
        .spawn()
        .await;

    let err = market_client(&stub, TIMEOUT)
        .latest_price("AAPL", AssetClass::Equity)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::MissingField("trade.p")));
    assert!(err.is_upstream());
}

#[tokio::test]
async fn test_option_price_is_mid_quote() {
    let stub = StubUpstream::new()
        .get(
            "/v2/options/AAPL230915C00175000/quotes/latest",
            json!({"quote": {"ap": 10.0, "bp": 9.0}}),
        )
        .spawn()
        .await;

    let quote = market_client(&stub, TIMEOUT)
        .latest_quote("AAPL230915C00175000", AssetClass::Option)
        .await
        .expect("Failed to get quote");

    assert_eq!(quote.price, 9.5);
    assert_eq!(quote.asset_class, AssetClass::Option);
    assert_eq!(quote.symbol, "AAPL230915C00175000");
}

#[tokio::test]
async fn test_option_price_single_side() {
    let stub = StubUpstream::new()
        .get("/v2/options/OPT/quotes/latest", json!({"quote": {"ap": 10.0}}))
        .spawn()
        .await;

    let price = market_client(&stub, TIMEOUT)
        .latest_price("OPT", AssetClass::Option)
        .await
        .expect("Failed to get price");

    assert_eq!(price, 10.0);
}

#[tokio::test]
async fn test_option_price_no_sides() {
    let stub = StubUpstream::new()
        .get("/v2/options/OPT/quotes/latest", json!({"quote": {}}))
        .spawn()
        .await;

    let err = market_client(&stub, TIMEOUT)
        .latest_price("OPT", AssetClass::Option)
        .await
        .unwrap_err();

    assert!(err.is_upstream());
    assert!(!err.is_validation());
}

#[tokio::test]
async fn test_price_upstream_status_surfaces() {
    let stub = StubUpstream::new()
        .respond(
            Method::GET,
            "/v2/stocks/NOPE/trades/latest",
            422,
            json!({"message": "invalid symbol"}),
        )
        .spawn()
        .await;

    let err = market_client(&stub, TIMEOUT)
        .latest_price("NOPE", AssetClass::Equity)
        .await
        .unwrap_err();

    match err {
        Error::Upstream { status, body } => {
            assert_eq!(status, 422);
            assert!(body.contains("invalid symbol"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_price_timeout() {
    let stub = StubUpstream::new()
        .get("/v2/stocks/SLOW/trades/latest", json!({"trade": {"p": 1.0}}))
        .delayed(Duration::from_millis(1500))
        .spawn()
        .await;

    let err = market_client(&stub, Duration::from_millis(200))
        .latest_price("SLOW", AssetClass::Equity)
        .await
        .unwrap_err();

    assert!(err.is_timeout(), "unexpected error: {err:?}");
    assert!(err.is_upstream());
}

// ============================================================================
// Orders
// ============================================================================

#[tokio::test]
async fn test_place_equity_order() {
    let order_doc = json!({"id": "b0b6dd9d", "status": "accepted", "symbol": "AAPL"});
    let stub = StubUpstream::new()
        .respond(Method::POST, "/v2/orders", 200, order_doc.clone())
        .spawn()
        .await;

    let order = OrderRequest::market("AAPL", OrderSide::Buy, 10);
    let result = market_client(&stub, TIMEOUT)
        .place_order(&order)
        .await
        .expect("Failed to place order");

    assert_eq!(result, order_doc);

    let requests = stub.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::POST);
    assert_eq!(
        requests[0].body,
        Some(json!({
            "symbol": "AAPL",
            "side": "buy",
            "qty": 10,
            "type": "market",
            "time_in_force": "day",
        }))
    );
}

#[tokio::test]
async fn test_place_option_limit_order() {
    let stub = StubUpstream::new()
        .respond(Method::POST, "/v2/orders", 200, json!({"id": "opt-1"}))
        .spawn()
        .await;

    let order = OrderRequest::market("aapl", OrderSide::Sell, 2)
        .with_option("2023-09-15", 175.0, OptionRight::Call)
        .with_limit(4.1);
    market_client(&stub, TIMEOUT)
        .place_order(&order)
        .await
        .expect("Failed to place order");

    let body = stub.requests()[0].body.clone().expect("order body");
    assert_eq!(body["symbol"], "AAPL230915C00175000");
    assert_eq!(body["asset_class"], "option");
    assert_eq!(body["type"], "limit");
    assert_eq!(body["limit_price"], 4.1);
    assert_eq!(body["side"], "sell");
}

#[tokio::test]
async fn test_invalid_option_order_never_reaches_upstream() {
    let stub = StubUpstream::new()
        .respond(Method::POST, "/v2/orders", 200, json!({}))
        .spawn()
        .await;

    let mut order = OrderRequest::market("AAPL", OrderSide::Buy, 1)
        .with_option("2023-09-15", 175.0, OptionRight::Put);
    order.expiry = None;

    let err = market_client(&stub, TIMEOUT)
        .place_order(&order)
        .await
        .unwrap_err();

    assert!(err.is_validation());
    assert_eq!(stub.request_count(), 0);
}

#[tokio::test]
async fn test_place_order_rejected_upstream() {
    let stub = StubUpstream::new()
        .respond(
            Method::POST,
            "/v2/orders",
            403,
            json!({"code": 40310000, "message": "insufficient buying power"}),
        )
        .spawn()
        .await;

    let err = market_client(&stub, TIMEOUT)
        .place_order(&OrderRequest::market("AAPL", OrderSide::Buy, 1000))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(403));
    assert!(err.to_string().contains("insufficient buying power"));
}

// ============================================================================
// Positions & account
// ============================================================================

#[tokio::test]
async fn test_positions_and_account_passthrough() {
    let positions = json!([{"symbol": "AAPL", "qty": "10", "market_value": "1893.70"}]);
    let account = json!({"id": "acct-1", "cash": "10000", "buying_power": "20000"});
    let stub = StubUpstream::new()
        .get("/v2/positions", positions.clone())
        .get("/v2/account", account.clone())
        .spawn()
        .await;
    let client = market_client(&stub, TIMEOUT);

    assert_eq!(client.positions().await.unwrap(), positions);
    assert_eq!(client.account().await.unwrap(), account);
}

#[tokio::test]
async fn test_repeated_reads_are_identical() {
    let stub = StubUpstream::new()
        .get("/v2/positions", json!([{"symbol": "MSFT", "qty": "3"}]))
        .get("/v2/account", json!({"id": "acct-1"}))
        .spawn()
        .await;
    let client = market_client(&stub, TIMEOUT);

    assert_eq!(client.positions().await.unwrap(), client.positions().await.unwrap());
    assert_eq!(client.account().await.unwrap(), client.account().await.unwrap());
    assert_eq!(stub.request_count(), 4);
}
