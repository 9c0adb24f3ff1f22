//! Request/response plumbing shared by the upstream clients.

use crate::error::Error;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Parses a base URL, dropping any trailing slash.
pub(crate) fn parse_base_url(raw: &str) -> Result<Url, Error> {
    Ok(Url::parse(raw.trim_end_matches('/'))?)
}

/// Appends percent-encoded path segments to `base`.
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, Error> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Sends a request with the given timeout and decodes a successful JSON body.
pub(crate) async fn send_json<T: serde::de::DeserializeOwned>(
    request: reqwest::RequestBuilder,
    timeout: Duration,
) -> Result<T, Error> {
    let resp = request.timeout(timeout).send().await?;
    handle_response(resp).await
}

async fn handle_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, Error> {
    let status = resp.status();
    let path = resp.url().path().to_string();

    if status.is_success() {
        debug!(%status, %path, "upstream call succeeded");
        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    } else {
        let body = resp.text().await.unwrap_or_default();
        warn!(%status, %path, "upstream call failed");
        Err(Error::Upstream {
            status: status.as_u16(),
            body,
        })
    }
}
