//! API Module
//!
//! HTTP API layer for the delivery server.
//! Each submodule handles endpoints for a specific domain.

pub mod delivery;
pub mod error;
pub mod health;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the main API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    // Browser control panels are served from other origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/api/health", get(health::health_check))
        // Delivery endpoints
        .route("/api/delivery/start", post(delivery::start_delivery))
        .route(
            "/api/delivery/status/{delivery_id}",
            get(delivery::get_delivery_status),
        )
        .route("/api/deliveries", get(delivery::list_deliveries))
        // Add state and middleware
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::execution::testing::{FakeExecutor, FakeOutcome, wait_until_terminal};
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&body).unwrap_or(Value::Null);

        (status, json)
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
        send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
    }

    async fn start(app: Router, body: &str) -> (StatusCode, Value) {
        send(
            app,
            Request::builder()
                .method("POST")
                .uri("/api/delivery/start")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    // ========================================================================
    // Health
    // ========================================================================

    #[tokio::test]
    async fn test_health_endpoint() {
        let state = AppState::new(Arc::new(FakeExecutor::immediate(FakeOutcome::Succeed(
            String::new(),
        ))));
        let (status, body) = get(create_router(state), "/api/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "OK");
        assert_eq!(body["message"], "API is running");
    }

    // ========================================================================
    // Delivery lifecycle
    // ========================================================================

    #[tokio::test]
    async fn test_start_status_complete_flow() {
        let (executor, release) = FakeExecutor::gated(FakeOutcome::Succeed("back at base".into()));
        let executor = Arc::new(executor);
        let state = AppState::new(executor.clone());
        let app = create_router(state.clone());

        let (status, body) = start(app.clone(), r#"{"interface_name":"en7"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "accepted");
        assert_eq!(body["delivery_id"], "1");

        let (status, body) = get(app.clone(), "/api/delivery/status/1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "in_progress");
        assert_eq!(body["delivery_id"], "1");
        assert_eq!(body["message"], "Delivery 1 is in_progress");
        assert!(body.get("output").is_none());

        release.add_permits(1);
        wait_until_terminal(&state.store, 1).await;

        let (status, body) = get(app.clone(), "/api/delivery/status/1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "completed");
        assert_eq!(body["output"], "back at base");

        // The id is echoed as it was requested
        let (status, body) = get(app, "/api/delivery/status/01").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["delivery_id"], "01");
        assert_eq!(body["message"], "Delivery 01 is completed");
        assert_eq!(executor.interfaces(), vec!["en7".to_string()]);
    }

    #[tokio::test]
    async fn test_start_while_running_is_rejected() {
        let (executor, release) = FakeExecutor::gated(FakeOutcome::Succeed("ok".into()));
        let state = AppState::new(Arc::new(executor));
        let app = create_router(state.clone());

        let (_, first) = start(app.clone(), "{}").await;
        assert_eq!(first["status"], "accepted");

        let (status, second) = start(app.clone(), r#"{"interface_name":"eth0"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(second["status"], "error");
        assert!(second["delivery_id"].is_null());
        assert_eq!(
            second["message"],
            "A delivery is already in progress. Please try again later."
        );
        assert_eq!(state.store.len(), 1);

        release.add_permits(1);
        wait_until_terminal(&state.store, 1).await;

        let (_, third) = start(app, "{}").await;
        assert_eq!(third["status"], "accepted");
        assert_eq!(third["delivery_id"], "2");
        release.add_permits(1);
    }

    #[tokio::test]
    async fn test_default_interface_is_used() {
        let executor = Arc::new(FakeExecutor::immediate(FakeOutcome::Succeed("ok".into())));
        let state = AppState::new(executor.clone());

        let (_, body) = start(create_router(state.clone()), r#"{"description":null}"#).await;
        assert_eq!(body["status"], "accepted");

        wait_until_terminal(&state.store, 1).await;
        assert_eq!(executor.interfaces(), vec!["en7".to_string()]);
    }

    #[tokio::test]
    async fn test_failed_delivery_reports_error_text() {
        let executor = FakeExecutor::immediate(FakeOutcome::Fail("Robot not reachable".into()));
        let state = AppState::new(Arc::new(executor));
        let app = create_router(state.clone());

        start(app.clone(), "{}").await;
        wait_until_terminal(&state.store, 1).await;

        let (status, body) = get(app.clone(), "/api/delivery/status/1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "failed");
        assert_eq!(body["output"], "Robot not reachable");

        // A failure frees the slot for the next delivery
        let (_, body) = start(app, "{}").await;
        assert_eq!(body["status"], "accepted");
        assert_eq!(body["delivery_id"], "2");
    }

    #[tokio::test]
    async fn test_list_deliveries() {
        let executor = FakeExecutor::immediate(FakeOutcome::Succeed("ok".into()));
        let state = AppState::new(Arc::new(executor));
        let app = create_router(state.clone());

        start(app.clone(), r#"{"interface_name":"en7","description":"table 3"}"#).await;
        wait_until_terminal(&state.store, 1).await;
        start(app.clone(), r#"{"interface_name":"en8"}"#).await;
        wait_until_terminal(&state.store, 2).await;

        let (status, body) = get(app, "/api/deliveries").await;
        assert_eq!(status, StatusCode::OK);

        let entries = body.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["delivery_id"], "1");
        assert_eq!(entries[0]["description"], "table 3");
        assert_eq!(entries[0]["status"], "completed");
        assert_eq!(entries[1]["interface_name"], "en8");
    }

    // ========================================================================
    // Lookup errors
    // ========================================================================

    #[tokio::test]
    async fn test_status_unknown_delivery_is_404() {
        let state = AppState::new(Arc::new(FakeExecutor::immediate(FakeOutcome::Succeed(
            String::new(),
        ))));
        let app = create_router(state);

        let (status, body) = get(app.clone(), "/api/delivery/status/999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Delivery 999 not found");

        let (status, _) = get(app.clone(), "/api/delivery/status/-3").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        // Integers beyond the id range are still integers
        let (status, body) = get(
            app.clone(),
            "/api/delivery/status/9223372036854775808",
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Delivery 9223372036854775808 not found");

        let (status, _) = get(app, "/api/delivery/status/99999999999999999999999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_status_non_integer_id_is_400() {
        let state = AppState::new(Arc::new(FakeExecutor::immediate(FakeOutcome::Succeed(
            String::new(),
        ))));

        let (status, body) = get(create_router(state), "/api/delivery/status/abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid delivery ID format");
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let state = AppState::new(Arc::new(FakeExecutor::immediate(FakeOutcome::Succeed(
            String::new(),
        ))));

        let response = create_router(state)
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .header(header::ORIGIN, "http://panel.local")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }
}
