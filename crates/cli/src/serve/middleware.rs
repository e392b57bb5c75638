//! Request guards: per-IP throttling and API key checks.

use std::sync::Arc;

use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use super::json_error;
use super::state::AppState;

/// Reject requests from IPs that have spent their window quota.
pub(crate) async fn throttle(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<std::net::SocketAddr>,
    request: Request<axum::body::Body>,
    next: Next,
) -> Response {
    match state.rate_limiter.admit(addr.ip()).await {
        Ok(()) => next.run(request).await,
        Err(retry_after) => (
            StatusCode::TOO_MANY_REQUESTS,
            axum::Json(serde_json::json!({
                "error": "rate limit exceeded",
                "retry_after": retry_after,
            })),
        )
            .into_response(),
    }
}

/// The API key a request presents, if any: `Authorization: Bearer <key>`
/// takes precedence over `X-API-Key: <key>`.
fn presented_key(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .or_else(|| headers.get("x-api-key").and_then(|v| v.to_str().ok()))
}

/// Require the configured API key on every route this guard wraps.
///
/// Applied to the API sub-router only; /health is mounted outside it, so
/// the exemption follows from the router shape rather than a path check.
/// With no key configured the guard passes everything through.
pub(crate) async fn require_api_key(
    State(state): State<Arc<AppState>>,
    request: Request<axum::body::Body>,
    next: Next,
) -> Response {
    let Some(expected) = state.api_key.as_deref() else {
        return next.run(request).await;
    };

    match presented_key(request.headers()) {
        Some(key) if key == expected => next.run(request).await,
        Some(_) => json_error(StatusCode::FORBIDDEN, "invalid API key").into_response(),
        None => json_error(StatusCode::UNAUTHORIZED, "authentication required").into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(
                axum::http::HeaderName::from_bytes(name.as_bytes()).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        map
    }

    #[test]
    fn bearer_token_wins_over_x_api_key() {
        let map = headers(&[("authorization", "Bearer abc"), ("x-api-key", "def")]);
        assert_eq!(presented_key(&map), Some("abc"));
    }

    #[test]
    fn x_api_key_is_accepted_alone() {
        let map = headers(&[("x-api-key", "def")]);
        assert_eq!(presented_key(&map), Some("def"));
    }

    #[test]
    fn non_bearer_authorization_is_not_a_key() {
        let map = headers(&[("authorization", "Basic abc")]);
        assert_eq!(presented_key(&map), None);
        assert_eq!(presented_key(&HeaderMap::new()), None);
    }
}
