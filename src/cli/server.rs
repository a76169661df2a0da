//! HTTP server mode for triggering pipeline runs

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::pipeline::{Ingestor, RunOutcome, Visualizer};

/// App state shared across handlers
struct AppState {
    config: AppConfig,
}

/// Build the router; stages are constructed per request from `config`
pub fn router(config: AppConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ingest", post(ingest))
        .route("/visualize", post(visualize))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(AppState { config }))
}

/// Start the HTTP server
pub async fn serve(config: AppConfig, port: u16) -> Result<()> {
    let app = router(config);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting HTTP server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::config(format!("Failed to bind to port {port}: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::config(format!("Server error: {e}")))?;

    Ok(())
}

fn respond(outcome: RunOutcome) -> impl IntoResponse {
    let status =
        StatusCode::from_u16(outcome.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(outcome))
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Run an ingestion; an unreadable body counts as a missing year
async fn ingest(State(state): State<Arc<AppState>>, body: Bytes) -> impl IntoResponse {
    let event: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);

    respond(Ingestor::trigger(&state.config, &event).await)
}

/// Render and upload the charts
async fn visualize(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let outcome = match Visualizer::from_config(&state.config) {
        Ok(visualizer) => visualizer.handle().await,
        Err(e) => {
            tracing::error!("Failed to set up visualization: {e}");
            RunOutcome::failure(&e)
        }
    };
    respond(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    async fn call(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn config_with_key() -> AppConfig {
        let mut config = AppConfig::default();
        config.catalog.api_key = Some("test-key".to_string());
        config
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let (status, body) = call(router(AppConfig::default()), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn test_ingest_without_year_is_bad_request() {
        let (status, body) = call(router(config_with_key()), post_json("/ingest", "{}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"statusCode": 400, "body": "Year is required."}));
    }

    #[tokio::test]
    async fn test_ingest_input_checked_before_config() {
        let (status, body) = call(router(AppConfig::default()), post_json("/ingest", "{}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"statusCode": 400, "body": "Year is required."}));
    }

    #[tokio::test]
    async fn test_ingest_with_unparseable_body_is_bad_request() {
        let (status, body) =
            call(router(config_with_key()), post_json("/ingest", "not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["body"], "Year is required.");
    }

    #[tokio::test]
    async fn test_ingest_without_credentials_fails() {
        let (status, body) = call(
            router(AppConfig::default()),
            post_json("/ingest", r#"{"year": 2023}"#),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["statusCode"], 500);
        assert!(body["body"].as_str().unwrap().contains("catalog.api_key"));
    }

    #[tokio::test]
    async fn test_visualize_missing_table_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.storage.table_url = dir.path().join("table").display().to_string();
        config.storage.charts_url = dir.path().join("charts").display().to_string();

        let (status, body) = call(router(config), post_json("/visualize", "")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["body"].as_str().unwrap().contains("top_movies.csv"));
    }
}
