//! API routes module

pub mod health;
pub mod toys;

use axum::Router;

use crate::state::AppState;

/// All application routes. `create_router` merges them at the root.
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .merge(toys::router(state))
        .merge(health::router(state.clone()))
}
