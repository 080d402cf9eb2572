//! Database connectors for the catalog services
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB connection, retry and health helpers
//! - `config` - `core_config::FromEnv` support for [`mongodb::MongoConfig`]
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{MongoConfig, connect_from_config_with_retry};
//!
//! let config = MongoConfig::from_credentials("user", "pass", "cluster0.example.net");
//! let client = connect_from_config_with_retry(&config, None).await?;
//! let toys = client.database(config.database()).collection::<Document>("allToys");
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{RetryConfig, retry, retry_with_backoff};
