use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::error::ToyResult;
use crate::models::{DeleteAck, InsertAck, NewToy, Toy, ToyQuery, UpdateAck, UpdateToy};

/// Repository trait for toy persistence
///
/// Implementations own the ordering rules of [`ToyQuery`]; callers never
/// sort results themselves.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ToyRepository: Send + Sync {
    /// Toys matching a query, in the query's order
    async fn find(&self, query: ToyQuery) -> ToyResult<Vec<Toy>>;

    /// Get a toy by ID
    async fn get_by_id(&self, id: ObjectId) -> ToyResult<Option<Toy>>;

    /// Insert a new listing
    async fn insert(&self, toy: NewToy) -> ToyResult<InsertAck>;

    /// Overwrite the ten editable fields of a listing
    async fn overwrite(&self, id: ObjectId, update: UpdateToy) -> ToyResult<UpdateAck>;

    /// Delete a listing; a missing id is a zero-count success
    async fn delete(&self, id: ObjectId) -> ToyResult<DeleteAck>;
}
