//! Same-origin forwarding of `/api/v1/*` to the marketplace backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser bundle only ever calls relative `/api/v1/...` paths. This
//! handler replays each request (method, path, query, body, end-to-end
//! headers) against `API_UPSTREAM_URL` and returns the answer with the
//! upstream status untouched.

use axum::body::{Body, to_bytes};
use axum::extract::{Request, State};
use axum::http::header::{CONNECTION, CONTENT_LENGTH, HOST};
use axum::http::{HeaderMap, HeaderName, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::state::AppState;

/// Request bodies above this size are refused before forwarding.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Connection-scoped headers (RFC 9110 §7.6.1) that must not be relayed.
const HOP_BY_HOP: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

#[derive(Debug, thiserror::Error)]
pub enum ForwardError {
    #[error("request body unreadable: {0}")]
    Body(String),
    #[error("request body exceeds {} bytes", MAX_BODY_BYTES)]
    TooLarge,
    #[error("upstream timed out")]
    Timeout,
    #[error("upstream unreachable: {0}")]
    Unreachable(String),
}

impl From<reqwest::Error> for ForwardError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { Self::Timeout } else { Self::Unreachable(err.to_string()) }
    }
}

impl From<axum::Error> for ForwardError {
    fn from(err: axum::Error) -> Self {
        let over_limit = std::iter::successors(Some(&err as &(dyn std::error::Error + 'static)), |e| e.source())
            .any(|e| e.is::<http_body_util::LengthLimitError>());
        if over_limit { Self::TooLarge } else { Self::Body(err.to_string()) }
    }
}

impl ForwardError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Body(_) => StatusCode::BAD_REQUEST,
            Self::TooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Timeout => StatusCode::GATEWAY_TIMEOUT,
            Self::Unreachable(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ForwardError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "detail": self.to_string() });
        (self.status(), axum::Json(body)).into_response()
    }
}

/// Copy `headers`, dropping hop-by-hop headers, anything the `Connection`
/// header nominates, and the headers the client library recomputes.
pub fn end_to_end_headers(headers: &HeaderMap) -> HeaderMap {
    let nominated: Vec<String> = headers
        .get_all(CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .map(|token| token.trim().to_ascii_lowercase())
        .filter(|token| !token.is_empty())
        .collect();

    let keep = |name: &HeaderName| {
        *name != HOST
            && *name != CONTENT_LENGTH
            && !HOP_BY_HOP.contains(&name.as_str())
            && !nominated.iter().any(|n| n == name.as_str())
    };

    let mut out = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        if keep(name) {
            out.append(name.clone(), value.clone());
        }
    }
    out
}

/// `/api/v1/{*rest}` handler.
///
/// # Errors
///
/// [`ForwardError`] renders as 400 (unreadable body), 413 (body over
/// [`MAX_BODY_BYTES`]), 504 (timeout), or 502 (connection failure). Upstream 4xx/5xx responses are not errors here;
/// they pass through verbatim.
pub async fn forward(State(state): State<AppState>, request: Request) -> Result<Response, ForwardError> {
    let (parts, body) = request.into_parts();
    let path_and_query = parts.uri.path_and_query().map_or_else(|| parts.uri.path(), |pq| pq.as_str());
    let url = format!("{}{}", state.upstream, path_and_query);

    let body = to_bytes(body, MAX_BODY_BYTES).await.map_err(|e| {
        let err = ForwardError::from(e);
        tracing::warn!(error = %err, method = %parts.method, %url, "request body rejected");
        err
    })?;

    tracing::debug!(method = %parts.method, %url, bytes = body.len(), "forwarding api request");

    let upstream = state
        .http
        .request(parts.method.clone(), &url)
        .headers(end_to_end_headers(&parts.headers))
        .body(body)
        .send()
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, method = %parts.method, %url, "upstream request failed");
            ForwardError::from(e)
        })?;

    let status = upstream.status();
    let headers = end_to_end_headers(upstream.headers());
    let bytes = upstream.bytes().await?;

    tracing::debug!(%status, %url, "upstream responded");

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    Ok(response)
}

#[cfg(test)]
#[path = "api_proxy_test.rs"]
mod api_proxy_test;
