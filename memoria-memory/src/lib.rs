//! In-memory document storage backend for memoria.
//!
//! This crate provides a thread-safe, in-memory implementation of the
//! `PostStore` trait. It uses an async-aware read-write lock for concurrent
//! access and is ideal for development and testing.
//!
//! # Features
//!
//! - **Thread-safe access** - Concurrent reads and writes using an
//!   async-aware RwLock
//! - **Insertion-ordered listing** - Posts come back in the order they were
//!   created, matching the persistent backend's natural order
//! - **No persistence** - Everything is gone when the process exits
//!
//! # Quick Start
//!
//! ```ignore
//! use memoria_core::{model::PostDraft, store::PostStore};
//! use memoria_memory::InMemoryStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = InMemoryStore::new();
//!     let post = store.insert_post(PostDraft::default()).await?;
//!     assert!(store.find_post(&post.id).await?.is_some());
//!
//!     Ok(())
//! }
//! ```

pub mod store;

pub use store::{InMemoryStore, InMemoryStoreBuilder};
