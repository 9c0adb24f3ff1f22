//! # Trading Gateway - REST API Server
//!
//! A thin REST gateway in front of two upstream services: a brokerage API
//! (prices, orders, positions, account) and a news-sentiment API. Built with
//! [Axum](https://crates.io/crates/axum); the upstream calls live in the
//! `upstream-client` crate.
//!
//! ## Key Features
//!
//! - **Price lookup**: equities priced from the latest trade, options from
//!   the mid of the latest quote.
//!
//! - **Order shaping**: typed validation of side, order type, time in force
//!   and asset class; option orders are submitted under their OCC contract
//!   symbol with the limit price preserved.
//!
//! - **Uniform envelope**: every response is JSON, every failure a
//!   `{detail, code}` body with a status derived from the error kind.
//!
//! - **OpenAPI Documentation**: Swagger UI at `/swagger-ui/`.
//!
//! - **Stateless**: the only shared state is the immutable configuration and
//!   the HTTP connection pools.
//!
//! ## Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`api`] | Route handlers, router and OpenAPI document |
//! | [`config`] | TOML + environment configuration |
//! | [`error`] | API error types with `IntoResponse` implementation |
//! | [`models`] | Request/response DTOs with OpenAPI schemas |
//! | [`state`] | Application state |
//!
//! ## API Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/health` | Health check |
//! | GET | `/price?symbol=&asset_class=` | Latest price |
//! | POST | `/trade` | Place an order |
//! | GET | `/sentiment?symbol=` | Company sentiment, or market news without a symbol |
//! | GET | `/portfolio` | Positions and account |
//!
//! ## Example Usage
//!
//! ```bash
//! ALPACA_API_KEY=... ALPACA_API_SECRET=... FINNHUB_API_KEY=... cargo run
//!
//! curl "http://localhost:8000/price?symbol=AAPL"
//!
//! curl -X POST http://localhost:8000/trade \
//!   -H "Content-Type: application/json" \
//!   -d '{"symbol": "AAPL", "side": "buy", "quantity": 1, "asset_class": "option",
//!        "strike_price": 175, "expiry": "2023-09-15", "strategy": "call"}'
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
