use axum::{
    body::Body,
    extract::{ConnectInfo, Request},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_governor::{governor::GovernorConfigBuilder, GovernorError, GovernorLayer};

use crate::error::AppError;

/// Type alias for the public governor layer (IP-based rate limiting)
pub type PublicGovernorLayer = GovernorLayer<
    tower_governor::key_extractor::PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware<governor::clock::QuantaInstant>,
    Body,
>;

/// Create a GovernorLayer for public routes (per IP address)
/// - 300 requests per minute (one token every 200ms)
/// - Bursts of up to 60 requests, enough for a listing page refreshing quotes
pub fn create_public_governor() -> PublicGovernorLayer {
    let config = Arc::new(
        GovernorConfigBuilder::default()
            .per_millisecond(200)
            .burst_size(60)
            .finish()
            .expect("rate limit period and burst size are non-zero"),
    );

    GovernorLayer::new(config).error_handler(rate_limit_error_handler)
}

/// Render governor rejections with the same JSON body as other errors
pub fn rate_limit_error_handler(error: GovernorError) -> Response<Body> {
    match error {
        GovernorError::TooManyRequests { wait_time, .. } => {
            AppError::RateLimited(wait_time).into_response()
        }
        GovernorError::UnableToExtractKey => {
            tracing::error!("Rate limiter could not determine client address");
            AppError::Internal("Unable to determine client address".to_string()).into_response()
        }
        other => {
            tracing::error!(error = ?other, "Rate limiter error");
            AppError::Internal("Rate limiter error".to_string()).into_response()
        }
    }
}

/// Log each API call with its latency and outcome.
///
/// Only the path is recorded; query strings carry addresses and coordinates.
pub async fn log_request(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    match status {
        StatusCode::TOO_MANY_REQUESTS => tracing::warn!(
            client_ip = %addr.ip(),
            %method,
            %path,
            "Client throttled by fare API rate limit"
        ),
        s if s.is_server_error() => tracing::error!(
            client_ip = %addr.ip(),
            %method,
            %path,
            status = s.as_u16(),
            elapsed_ms,
            "Fare API request failed"
        ),
        s if s.is_client_error() => tracing::warn!(
            client_ip = %addr.ip(),
            %method,
            %path,
            status = s.as_u16(),
            elapsed_ms,
            "Fare API request rejected"
        ),
        s => tracing::debug!(
            client_ip = %addr.ip(),
            %method,
            %path,
            status = s.as_u16(),
            elapsed_ms,
            "Fare API request served"
        ),
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_many_requests_maps_to_429() {
        let response = rate_limit_error_handler(GovernorError::TooManyRequests {
            wait_time: 2,
            headers: None,
        });
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[tokio::test]
    async fn test_log_request_passes_responses_through() {
        use axum::{
            extract::connect_info::MockConnectInfo, middleware, routing::get, Router,
        };
        use tower::ServiceExt;

        let app = Router::new()
            .route("/ok", get(|| async { "ok" }))
            .route("/missing", get(|| async { StatusCode::NOT_FOUND }))
            .layer(middleware::from_fn(log_request))
            .layer(MockConnectInfo(SocketAddr::from(([127, 0, 0, 1], 4000))));

        let ok = app
            .clone()
            .oneshot(axum::http::Request::builder().uri("/ok?address=Jakarta").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(ok.status(), StatusCode::OK);

        let missing = app
            .oneshot(axum::http::Request::builder().uri("/missing").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_missing_key_maps_to_500() {
        let response = rate_limit_error_handler(GovernorError::UnableToExtractKey);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
