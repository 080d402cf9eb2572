//! ObjectId path parameter extractor.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use mongodb::bson::oid::ObjectId;

/// Extracts a single path parameter and parses it as a MongoDB [`ObjectId`].
///
/// Anything other than 24 hexadecimal characters is rejected with
/// [`AppError::InvalidObjectId`] before the handler runs.
///
/// # Example
/// ```ignore
/// use axum::{Router, routing::get};
/// use axum_helpers::extractors::ObjectIdPath;
///
/// async fn get_toy(ObjectIdPath(id): ObjectIdPath) -> String {
///     id.to_hex()
/// }
///
/// let app: Router = Router::new().route("/toyDetails/{id}", get(get_toy));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ObjectIdPath(pub ObjectId);

impl<S> FromRequestParts<S> for ObjectIdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        ObjectId::parse_str(&raw)
            .map(ObjectIdPath)
            .map_err(|_| AppError::InvalidObjectId(raw))
    }
}
