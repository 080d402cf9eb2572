//! MongoDB implementation of ToyRepository

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Bson, Document, doc, oid::ObjectId, to_document},
    options::{FindOptions, IndexOptions},
};
use tracing::instrument;

use crate::document::ToyDocument;
use crate::error::ToyResult;
use crate::models::{DeleteAck, InsertAck, NewToy, PriceSort, Toy, ToyQuery, UpdateAck, UpdateToy};
use crate::repository::ToyRepository;

/// Collection used when none is configured
pub const DEFAULT_COLLECTION: &str = "allToys";

/// MongoDB implementation of the ToyRepository
///
/// Reads go through raw documents so one malformed listing cannot fail a
/// whole query.
#[derive(Clone)]
pub struct MongoToyRepository {
    collection: Collection<Document>,
}

impl MongoToyRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, DEFAULT_COLLECTION)
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Document>(collection_name);
        Self { collection }
    }

    /// Create the non-unique indexes backing the catalog's read shapes
    pub async fn init_indexes(&self) -> ToyResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "createdAt": -1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_created_at".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "sellerMail": 1, "price": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_seller_price".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "subCategory": 1, "createdAt": -1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_sub_category_created_at".to_string())
                        .build(),
                )
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!(collection = %self.collection.name(), "Toy indexes created successfully");
        Ok(())
    }

    fn build_filter(query: &ToyQuery) -> Document {
        match query {
            ToyQuery::All => doc! {},
            ToyQuery::NameContains(text) => doc! {
                "name": { "$regex": regex::escape(text), "$options": "i" }
            },
            ToyQuery::BySeller { seller_mail, .. } => doc! { "sellerMail": seller_mail.as_str() },
            ToyQuery::BySubCategory(sub_category) => doc! { "subCategory": sub_category.as_str() },
        }
    }

    fn build_sort(query: &ToyQuery) -> Option<Document> {
        match query {
            ToyQuery::BySeller { sort, .. } => sort.map(|sort| match sort {
                PriceSort::Highest => doc! { "price": -1 },
                PriceSort::Lowest => doc! { "price": 1 },
            }),
            _ => Some(doc! { "createdAt": -1 }),
        }
    }
}

#[async_trait]
impl ToyRepository for MongoToyRepository {
    #[instrument(skip(self))]
    async fn find(&self, query: ToyQuery) -> ToyResult<Vec<Toy>> {
        let filter = Self::build_filter(&query);
        let options = FindOptions::builder().sort(Self::build_sort(&query)).build();

        let mut cursor = self.collection.find(filter).with_options(options).await?;
        let mut toys = Vec::new();
        while let Some(raw) = cursor.try_next().await? {
            toys.extend(decode_listing(raw));
        }

        tracing::debug!(count = toys.len(), "Toys fetched");
        Ok(toys)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: ObjectId) -> ToyResult<Option<Toy>> {
        match self.collection.find_one(doc! { "_id": id }).await? {
            Some(raw) => Ok(Some(Toy::from(ToyDocument::decode(raw)?))),
            None => Ok(None),
        }
    }

    #[instrument(skip(self, toy), fields(seller_mail = ?toy.seller_mail))]
    async fn insert(&self, toy: NewToy) -> ToyResult<InsertAck> {
        let id = ObjectId::new();
        let document = to_document(&ToyDocument::from_new(id, toy)?)?;

        let result = self.collection.insert_one(document).await?;
        let inserted_id = result.inserted_id.as_object_id().unwrap_or(id);

        tracing::info!(toy_id = %inserted_id, "Toy created successfully");
        Ok(InsertAck {
            acknowledged: true,
            inserted_id: inserted_id.to_hex(),
        })
    }

    #[instrument(skip(self, update))]
    async fn overwrite(&self, id: ObjectId, update: UpdateToy) -> ToyResult<UpdateAck> {
        let fields = to_document(&update)?;
        let result = self
            .collection
            .update_one(doc! { "_id": id }, doc! { "$set": fields })
            .await?;

        tracing::info!(
            toy_id = %id,
            matched = result.matched_count,
            modified = result.modified_count,
            "Toy overwritten"
        );
        Ok(UpdateAck {
            acknowledged: true,
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_count: u64::from(result.upserted_id.is_some()),
            upserted_id: result
                .upserted_id
                .and_then(|upserted| upserted.as_object_id())
                .map(|upserted| upserted.to_hex()),
        })
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ObjectId) -> ToyResult<DeleteAck> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;

        tracing::info!(toy_id = %id, deleted = result.deleted_count, "Toy delete processed");
        Ok(DeleteAck {
            acknowledged: true,
            deleted_count: result.deleted_count,
        })
    }
}

/// Decode one listing of a query result, skipping it when `_id` is not an ObjectId
fn decode_listing(raw: Document) -> Option<Toy> {
    let id = raw.get("_id").cloned().unwrap_or(Bson::Null);
    match ToyDocument::decode(raw) {
        Ok(document) => Some(Toy::from(document)),
        Err(e) => {
            tracing::warn!(id = %id, error = %e, "Skipping undecodable toy document");
            None
        }
    }
}
