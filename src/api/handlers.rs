//! API request handlers.

use crate::error::ApiError;
use crate::models::{
    HealthResponse, PortfolioResponse, PriceQuery, PriceResponse, SentimentQuery,
    SentimentResponse, TradeRequest, TradeResponse,
};
use crate::state::AppState;
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use std::sync::Arc;
use upstream_client::{AssetClass, OrderRequest};

// ============================================================================
// Health Check
// ============================================================================

/// Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "Health"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============================================================================
// Prices
// ============================================================================

/// Get the latest price of a symbol.
///
/// Equities are priced from the latest trade, options from the mid of the
/// latest quote.
#[utoipa::path(
    get,
    path = "/price",
    params(
        ("symbol" = String, Query, description = "Symbol to price"),
        ("asset_class" = Option<String>, Query, description = "equity (default) or option")
    ),
    responses(
        (status = 200, description = "Latest price", body = PriceResponse),
        (status = 400, description = "Invalid request or upstream failure", body = crate::error::ErrorResponse),
        (status = 408, description = "Upstream timeout", body = crate::error::ErrorResponse)
    ),
    tag = "Market"
)]
pub async fn get_price(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PriceQuery>, QueryRejection>,
) -> Result<Json<PriceResponse>, ApiError> {
    let Query(query) = query?;
    let asset_class: AssetClass = query.asset_class.parse()?;

    let quote = state.market.latest_quote(&query.symbol, asset_class).await?;

    Ok(Json(PriceResponse {
        symbol: quote.symbol,
        asset_class: query.asset_class,
        price: quote.price,
    }))
}

// ============================================================================
// Trading
// ============================================================================

/// Place an order.
///
/// Option orders are submitted under their OCC contract symbol.
#[utoipa::path(
    post,
    path = "/trade",
    request_body = TradeRequest,
    responses(
        (status = 200, description = "Order accepted by the brokerage", body = TradeResponse),
        (status = 400, description = "Invalid order or upstream rejection", body = crate::error::ErrorResponse),
        (status = 408, description = "Upstream timeout", body = crate::error::ErrorResponse)
    ),
    tag = "Trading"
)]
pub async fn place_trade(
    State(state): State<Arc<AppState>>,
    body: Result<Json<TradeRequest>, JsonRejection>,
) -> Result<Json<TradeResponse>, ApiError> {
    let Json(req) = body?;
    let order = OrderRequest::try_from(req)?;

    let order = state.market.place_order(&order).await?;
    Ok(Json(TradeResponse { order }))
}

// ============================================================================
// News
// ============================================================================

/// Get company news sentiment, or general market news without a symbol.
#[utoipa::path(
    get,
    path = "/sentiment",
    params(
        ("symbol" = Option<String>, Query, description = "Company symbol")
    ),
    responses(
        (status = 200, description = "News data", body = SentimentResponse),
        (status = 400, description = "Upstream failure", body = crate::error::ErrorResponse),
        (status = 408, description = "Upstream timeout", body = crate::error::ErrorResponse)
    ),
    tag = "News"
)]
pub async fn get_sentiment(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SentimentQuery>, QueryRejection>,
) -> Result<Json<SentimentResponse>, ApiError> {
    let Query(query) = query?;

    let data = match query.symbol.as_deref().map(str::trim) {
        Some(symbol) if !symbol.is_empty() => state.news.company_news_sentiment(symbol).await?,
        _ => state.news.market_news().await?,
    };

    Ok(Json(SentimentResponse { data }))
}

// ============================================================================
// Portfolio
// ============================================================================

/// Get open positions and the trading account.
#[utoipa::path(
    get,
    path = "/portfolio",
    responses(
        (status = 200, description = "Positions and account", body = PortfolioResponse),
        (status = 400, description = "Upstream failure", body = crate::error::ErrorResponse),
        (status = 408, description = "Upstream timeout", body = crate::error::ErrorResponse)
    ),
    tag = "Trading"
)]
pub async fn get_portfolio(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PortfolioResponse>, ApiError> {
    let (positions, account) = tokio::try_join!(state.market.positions(), state.market.account())?;

    Ok(Json(PortfolioResponse { positions, account }))
}
