//! Health check HTTP route handlers
//!
//! - `GET /health` - Simple liveness check (returns 200 OK)
//! - `GET /health/ready` - Readiness check (verifies database connectivity)

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;
use sqlx::PgPool;

/// Shared state for health check handlers
#[derive(Clone)]
pub struct HealthState {
    pool: PgPool,
}

impl HealthState {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Create the health check router
pub fn health_router(state: HealthState) -> Router {
    Router::new()
        .route("/", get(simple_health))
        .route("/ready", get(readiness_probe))
        .with_state(state)
}

/// Always returns OK if the server is responding to HTTP requests
async fn simple_health() -> &'static str {
    "OK"
}

/// Verifies the database is reachable before reporting ready
async fn readiness_probe(State(state): State<HealthState>) -> impl IntoResponse {
    match sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.pool)
        .await
    {
        Ok(_) => (StatusCode::OK, Json(json!({ "status": "ready" }))),
        Err(err) => {
            tracing::warn!(error = %err, "readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable" })),
            )
        }
    }
}
