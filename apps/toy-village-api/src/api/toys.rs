//! Wires the toys domain to MongoDB.

use axum::Router;
use domain_toys::{MongoToyRepository, ToyService, handlers};

use crate::state::AppState;

pub fn repository(state: &AppState) -> MongoToyRepository {
    MongoToyRepository::with_collection(&state.db, &state.config.toys_collection)
}

pub fn router(state: &AppState) -> Router {
    handlers::router(ToyService::new(repository(state)))
}
