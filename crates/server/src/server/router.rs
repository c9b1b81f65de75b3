//! Axum router construction.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use super::{handlers, middleware, state::AppState};

/// Build the application [`Router`] with all routes and middleware attached.
///
/// `max_body_bytes` caps the `POST /upload` body before any JSON parsing, so
/// a single request cannot consume unbounded memory.
pub fn build(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/public-key", get(handlers::public_key))
        .route("/upload", post(handlers::upload))
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(middleware::REQUEST_TIMEOUT))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{ServerKeyPair, DEFAULT_KEY_BITS};
    use axum::{body::Body, http::Request};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_state(dir: &tempfile::TempDir) -> AppState {
        let keys = Arc::new(ServerKeyPair::generate(DEFAULT_KEY_BITS).unwrap());
        AppState::new(keys, dir.path().to_path_buf())
    }

    #[tokio::test]
    async fn unknown_route_returns_404() {
        let dir = tempfile::tempdir().unwrap();
        let app = build(test_state(&dir), 1024);
        let req = Request::builder()
            .uri("/unknown")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn public_key_route_exists() {
        let dir = tempfile::tempdir().unwrap();
        let app = build(test_state(&dir), 1024);
        let req = Request::builder()
            .uri("/public-key")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), 200);
    }
}
