//! MongoDB connection management
//!
//! Config loading, connection with retry, Stable API pinning and ping-based
//! health checks.

mod config;
mod connector;
mod health;

pub use config::{DEFAULT_ATLAS_HOST, DEFAULT_DATABASE, MongoConfig};
pub use connector::{MongoError, apply_config, connect_from_config, connect_from_config_with_retry};
pub use health::ping;

pub use mongodb::{Client, Collection, Database};
