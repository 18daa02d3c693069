//! Health Check API Handler
//!
//! Simple health check endpoint for monitoring.

use axum::Json;
use courier_core::dto::delivery::HealthResponse;

/// GET /api/health
/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
