//! Liveness banner and readiness check

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use serde_json::Value;

use crate::state::AppState;

/// Plain-text banner served at `/`
pub const BANNER: &str = "Toy Village is running";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(banner))
        .route("/ready", get(readiness_check))
        .with_state(state)
}

async fn banner() -> &'static str {
    BANNER
}

/// Readiness check - pings MongoDB
async fn readiness_check(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        "mongodb",
        Box::pin(async {
            database::mongodb::ping(&state.mongo_client)
                .await
                .map_err(|e| e.to_string())
        }),
    )];

    run_health_checks(checks).await
}
