//! Integration test support for the trading gateway.
//!
//! Tests run against stub upstream servers bound to a random local port. A
//! [`StubUpstream`] answers configured `(method, path)` pairs with canned JSON
//! and records every request it receives, so tests can assert both on what
//! the clients return and on what they sent.

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use trading_gateway::api::create_router;
use trading_gateway::config::Config;
use trading_gateway::state::AppState;
use upstream_client::{Credentials, MarketClient, MarketConfig, NewsClient, NewsConfig};

/// Key id the test market clients send.
pub const TEST_KEY_ID: &str = "test-key-id";

/// Secret the test market clients send.
pub const TEST_SECRET: &str = "test-secret";

/// Token the test news clients send.
pub const TEST_TOKEN: &str = "test-token";

/// A request captured by a stub upstream.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method.
    pub method: Method,
    /// Request path.
    pub path: String,
    /// Decoded query parameters.
    pub query: HashMap<String, String>,
    /// Request headers, names lower-cased.
    pub headers: HashMap<String, String>,
    /// JSON body, if any.
    pub body: Option<Value>,
}

#[derive(Debug, Clone)]
struct StubRoute {
    method: Method,
    path: String,
    status: StatusCode,
    body: Value,
    delay: Option<Duration>,
}

#[derive(Debug, Default)]
struct StubState {
    routes: Vec<StubRoute>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Builder and handle of a stub upstream server.
#[derive(Debug, Default)]
pub struct StubUpstream {
    routes: Vec<StubRoute>,
}

impl StubUpstream {
    /// Creates a stub with no routes; unknown routes answer 404.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers `method path` with `status` and `body`.
    #[must_use]
    pub fn respond(mut self, method: Method, path: &str, status: u16, body: Value) -> Self {
        self.routes.push(StubRoute {
            method,
            path: path.to_string(),
            status: StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            body,
            delay: None,
        });
        self
    }

    /// Answers `GET path` with 200 and `body`.
    #[must_use]
    pub fn get(self, path: &str, body: Value) -> Self {
        self.respond(Method::GET, path, 200, body)
    }

    /// Delays the most recently added route.
    #[must_use]
    pub fn delayed(mut self, delay: Duration) -> Self {
        if let Some(route) = self.routes.last_mut() {
            route.delay = Some(delay);
        }
        self
    }

    /// Starts the stub on a random local port.
    pub async fn spawn(self) -> RunningStub {
        let state = Arc::new(StubState {
            routes: self.routes,
            requests: Mutex::new(Vec::new()),
        });
        let router = Router::new()
            .fallback(stub_handler)
            .with_state(Arc::clone(&state));

        RunningStub {
            base_url: spawn_server(router).await,
            state,
        }
    }
}

/// A stub upstream that is accepting connections.
#[derive(Debug, Clone)]
pub struct RunningStub {
    /// Base URL, e.g. `http://127.0.0.1:41234`.
    pub base_url: String,
    state: Arc<StubState>,
}

impl RunningStub {
    /// Requests received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().clone()
    }

    /// Number of requests received so far.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.state.requests.lock().len()
    }
}

async fn stub_handler(
    State(state): State<Arc<StubState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let query = uri
        .query()
        .map(|q| {
            url_pairs(q)
                .into_iter()
                .collect::<HashMap<String, String>>()
        })
        .unwrap_or_default();
    let headers = headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();

    state.requests.lock().push(RecordedRequest {
        method: method.clone(),
        path: uri.path().to_string(),
        query,
        headers,
        body: serde_json::from_slice(&body).ok(),
    });

    let route = state
        .routes
        .iter()
        .find(|r| r.method == method && r.path == uri.path())
        .cloned();

    match route {
        Some(route) => {
            if let Some(delay) = route.delay {
                tokio::time::sleep(delay).await;
            }
            (route.status, axum::Json(route.body)).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            axum::Json(json!({"message": "route not found"})),
        )
            .into_response(),
    }
}

fn url_pairs(query: &str) -> Vec<(String, String)> {
    reqwest::Url::parse(&format!("http://stub/?{}", query))
        .map(|url| url.query_pairs().into_owned().collect())
        .unwrap_or_default()
}

/// Serves `router` on a random local port and returns its base URL.
pub async fn spawn_server(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local address");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Test server failed");
    });

    format!("http://{}", addr)
}

/// Market client pointed at `stub`: trading API at its root, data API under `/v2`.
#[must_use]
pub fn market_client(stub: &RunningStub, timeout: Duration) -> MarketClient {
    MarketClient::new(MarketConfig {
        credentials: Credentials::new(TEST_KEY_ID, TEST_SECRET),
        trading_url: stub.base_url.clone(),
        data_url: format!("{}/v2", stub.base_url),
        read_timeout: timeout,
        write_timeout: timeout,
    })
    .expect("Failed to create market client")
}

/// News client pointed at `stub` under `/api/v1`.
#[must_use]
pub fn news_client(stub: &RunningStub, timeout: Duration) -> NewsClient {
    NewsClient::new(NewsConfig {
        api_key: TEST_TOKEN.to_string(),
        base_url: format!("{}/api/v1", stub.base_url),
        timeout,
    })
    .expect("Failed to create news client")
}

/// Starts the gateway against the given stub upstreams and returns its base URL.
pub async fn spawn_gateway(brokerage: &RunningStub, news: &RunningStub) -> String {
    let mut config = Config::default();
    config.alpaca.api_key = TEST_KEY_ID.to_string();
    config.alpaca.api_secret = TEST_SECRET.to_string();
    config.alpaca.base_url = brokerage.base_url.clone();
    config.alpaca.data_url = format!("{}/v2", brokerage.base_url);
    config.alpaca.read_timeout_secs = 2;
    config.alpaca.write_timeout_secs = 2;
    config.finnhub.api_key = TEST_TOKEN.to_string();
    config.finnhub.base_url = format!("{}/api/v1", news.base_url);
    config.finnhub.timeout_secs = 2;

    let state = AppState::from_config(config).expect("Failed to create app state");
    spawn_server(create_router(Arc::new(state))).await
}
