//! Toy Service - catalog operations over a ToyRepository

use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{ToyError, ToyResult};
use crate::models::{
    CreateToy, DeleteAck, InsertAck, NewToy, PriceSort, Toy, ToyQuery, UpdateAck, UpdateToy,
};
use crate::repository::ToyRepository;

pub struct ToyService<R: ToyRepository> {
    repository: Arc<R>,
}

impl<R: ToyRepository> ToyService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Every toy, newest first
    #[instrument(skip(self))]
    pub async fn list_toys(&self) -> ToyResult<Vec<Toy>> {
        self.repository.find(ToyQuery::All).await
    }

    /// Toys whose name contains `text`, ignoring case
    #[instrument(skip(self))]
    pub async fn search_toys(&self, text: String) -> ToyResult<Vec<Toy>> {
        self.repository.find(ToyQuery::NameContains(text)).await
    }

    #[instrument(skip(self))]
    pub async fn seller_toys(
        &self,
        seller_mail: String,
        sort: Option<PriceSort>,
    ) -> ToyResult<Vec<Toy>> {
        self.repository
            .find(ToyQuery::BySeller { seller_mail, sort })
            .await
    }

    #[instrument(skip(self))]
    pub async fn toys_by_category(&self, sub_category: String) -> ToyResult<Vec<Toy>> {
        self.repository
            .find(ToyQuery::BySubCategory(sub_category))
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_toy(&self, id: ObjectId) -> ToyResult<Toy> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ToyError::NotFound(id))
    }

    /// Stamp `createdAt`, coerce the price and insert
    #[instrument(skip(self, input))]
    pub async fn create_toy(&self, input: CreateToy) -> ToyResult<InsertAck> {
        let toy = NewToy::from_input(input, Utc::now());
        if toy.price.is_nan() {
            tracing::debug!("Price is not a number, storing NaN");
        }
        self.repository.insert(toy).await
    }

    #[instrument(skip(self, update))]
    pub async fn update_toy(&self, id: ObjectId, update: UpdateToy) -> ToyResult<UpdateAck> {
        self.repository.overwrite(id, update).await
    }

    #[instrument(skip(self))]
    pub async fn delete_toy(&self, id: ObjectId) -> ToyResult<DeleteAck> {
        self.repository.delete(id).await
    }
}

impl<R: ToyRepository> Clone for ToyService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
