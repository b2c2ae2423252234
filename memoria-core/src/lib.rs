//! Core types for the memoria document API.
//!
//! This crate defines everything the HTTP layer and the storage backends
//! share:
//!
//! - **Domain model** ([`model`]) - Memory posts, their nested blog entries,
//!   and the caller-supplied draft types used for writes
//! - **Store abstraction** ([`store`]) - The backend trait every document
//!   store implements, plus its builder trait
//! - **Error handling** ([`error`]) - Store error and result types
//!
//! # Example
//!
//! ```ignore
//! use memoria_core::{model::PostDraft, store::PostStore};
//!
//! async fn create(store: &dyn PostStore, draft: PostDraft) {
//!     let post = store.insert_post(draft).await.unwrap();
//!     println!("created {}", post.id);
//! }
//! ```

pub mod error;
pub mod model;
pub mod store;
