//! Shared test utilities for domain testing
//!
//! - `TestMongo`: MongoDB container with automatic cleanup
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::TestMongo;
//!
//! #[tokio::test]
//! #[ignore = "requires Docker"]
//! async fn my_mongo_test() {
//!     let mongo = TestMongo::new().await;
//!     let db = mongo.database();
//! }
//! ```

mod mongo;

pub use mongo::TestMongo;
