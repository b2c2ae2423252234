//! MongoDB backend implementation for memoria.
//!
//! This crate provides a MongoDB-based implementation of the `PostStore`
//! trait, persisting memory posts as documents in a single collection and
//! mapping entry appends and removals onto `$push`/`$pull` array updates.
//!
//! # Connection
//!
//! To use this backend, you need a MongoDB connection string. This is
//! provided through the builder pattern; the builder verifies connectivity
//! with a `ping` before handing the store out.
//!
//! # Example
//!
//! ```ignore
//! use memoria_core::store::PostStoreBuilder;
//! use memoria_mongodb::MongoDbStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = MongoDbStore::builder("mongodb://localhost:27017", "memoria")
//!         .build()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

pub mod store;

pub use store::{MongoDbStore, MongoDbStoreBuilder};
