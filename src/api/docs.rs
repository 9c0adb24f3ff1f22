//! OpenAPI documentation.

use crate::error::ErrorResponse;
use crate::models::{
    HealthResponse, PortfolioResponse, PriceResponse, SentimentResponse, TradeRequest,
    TradeResponse,
};
use utoipa::OpenApi;

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::handlers::health_check,
        crate::api::handlers::get_price,
        crate::api::handlers::place_trade,
        crate::api::handlers::get_sentiment,
        crate::api::handlers::get_portfolio,
    ),
    components(
        schemas(
            HealthResponse,
            PriceResponse,
            TradeRequest,
            TradeResponse,
            SentimentResponse,
            PortfolioResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Market", description = "Latest prices"),
        (name = "Trading", description = "Order submission, positions and account"),
        (name = "News", description = "News and sentiment"),
    ),
    info(
        title = "Trading Gateway API",
        version = "0.1.0",
        description = "REST gateway for brokerage and news-sentiment APIs",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_all_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for path in ["/health", "/price", "/trade", "/sentiment", "/portfolio"] {
            assert!(
                paths.iter().any(|p| p.as_str() == path),
                "missing path {path}"
            );
        }
    }
}
