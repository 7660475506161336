//! Router assembly: HTTP endpoints, WebSocket upgrade, static files, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;
pub mod ws;

/// Build the application router with:
/// - WebSocket game session at `/ws`
/// - read-only helpers under `/api/v1/...`
/// - Static SPA (the board + sidebar) from `./static` with index fallback
/// - CORS (allow any origin/method/headers)
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    let static_service = ServeDir::new("./static")
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new("./static/index.html"));

    Router::new()
        .route("/ws", get(ws::ws_upgrade))
        .route("/api/v1/health", get(http::http_health))
        .route("/api/v1/catalog", get(http::http_get_catalog))
        .route("/api/v1/round", get(http::http_get_round))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .fallback_service(static_service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::config::AppConfig;

    fn app() -> Router {
        build_router(Arc::new(AppState::from_config(AppConfig::default())))
    }

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let res = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), 1 << 20).await.unwrap();
        let v = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, v)
    }

    #[tokio::test]
    async fn health_is_ok() {
        let (status, v) = get_json("/api/v1/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(v, serde_json::json!({"ok": true}));
    }

    #[tokio::test]
    async fn catalog_lists_seed_assets() {
        let (status, v) = get_json("/api/v1/catalog").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(v["assets"].as_array().map(Vec::len), Some(40));
        assert_eq!(v["assets"][0]["id"], "sheep");
        assert_eq!(v["assets"][0]["category"], "animals");
    }

    #[tokio::test]
    async fn round_preview_honours_query() {
        let (status, v) = get_json("/api/v1/round?mode=counting&answerCount=6").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(v["mode"], "counting");
        assert_eq!(v["options"].as_array().map(Vec::len), Some(6));
    }

    #[tokio::test]
    async fn round_preview_defaults_to_configured_game() {
        let (status, v) = get_json("/api/v1/round").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(v["mode"], "matching");
        assert_eq!(v["options"].as_array().map(Vec::len), Some(4));
    }

    #[tokio::test]
    async fn round_preview_applies_configured_category_filter() {
        let mut cfg = AppConfig::default();
        cfg.game.category_filter = Some(crate::domain::Category::Vehicles);
        let state = Arc::new(AppState::from_config(cfg));
        let vehicles: Vec<String> = state
            .catalog()
            .list_by_category(crate::domain::Category::Vehicles)
            .iter()
            .map(|a| a.id.clone())
            .collect();

        let res = build_router(state)
            .oneshot(Request::builder().uri("/api/v1/round").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let bytes = to_bytes(res.into_body(), 1 << 20).await.unwrap();
        let round: crate::domain::Round = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(round.options.len(), 4);
        assert!(round.options.iter().all(|o| vehicles.contains(&o.id)));
    }

    #[tokio::test]
    async fn round_preview_rejects_unknown_mode() {
        let (status, _) = get_json("/api/v1/round?mode=trivia").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
