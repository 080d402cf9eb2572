use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use mongodb::bson::oid::ObjectId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToyError {
    #[error("Toy not found: {0}")]
    NotFound(ObjectId),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ToyResult<T> = Result<T, ToyError>;

impl From<ToyError> for AppError {
    fn from(err: ToyError) -> Self {
        match err {
            ToyError::NotFound(id) => AppError::NotFound(format!("Toy {} not found", id.to_hex())),
            ToyError::Database(msg) => AppError::Database(msg),
            ToyError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ToyError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ToyError {
    fn from(err: mongodb::error::Error) -> Self {
        ToyError::Database(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for ToyError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        ToyError::Internal(format!("failed to encode toy: {}", err))
    }
}

impl From<mongodb::bson::de::Error> for ToyError {
    fn from(err: mongodb::bson::de::Error) -> Self {
        ToyError::Internal(format!("failed to decode toy: {}", err))
    }
}
