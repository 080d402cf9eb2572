//! Toys Domain
//!
//! Catalog of toy listings stored in one MongoDB collection.
//!
//! ```text
//! handlers  ← HTTP routes (/toys, /myToys, /toyList, /toyDetails, /addToy, /toyUpdate)
//!    │
//! service   ← timestamps, price coercion, not-found mapping
//!    │
//! repository← trait + MongoDB implementation
//!    │
//! models / document ← JSON and BSON shapes
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_toys::{handlers, MongoToyRepository, ToyService};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("toyVillage");
//!
//! let repository = MongoToyRepository::new(&db);
//! repository.init_indexes().await?;
//!
//! let router: axum::Router = handlers::router(ToyService::new(repository));
//! # Ok(())
//! # }
//! ```

pub mod document;
pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{ToyError, ToyResult};
pub use handlers::ApiDoc;
pub use models::{
    CreateToy, DeleteAck, InsertAck, NewToy, PriceSort, Toy, ToyQuery, UpdateAck, UpdateToy,
};
pub use self::mongodb::MongoToyRepository;
pub use repository::ToyRepository;
pub use service::ToyService;
