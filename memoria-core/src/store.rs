//! Storage backend abstraction for memory posts.
//!
//! [`PostStore`] is the seam between the HTTP layer and a concrete document
//! store. Each method maps to a single store round-trip; the store's own
//! per-document atomicity is all the coordination the API relies on.
//!
//! # Thread Safety
//!
//! Implementations must be thread-safe (`Send + Sync`) and support
//! concurrent access from multiple async tasks. Handlers share one store
//! instance for the lifetime of the process.
//!
//! # Error Handling
//!
//! Operations return [`StoreResult<T>`](crate::error::StoreResult). A
//! missing post is not an error: reads return `Option`, deletions return
//! whether anything matched, and [`StoreError`](crate::error::StoreError)
//! is reserved for genuine backend failures.

use async_trait::async_trait;
use bson::oid::ObjectId;
use std::fmt::Debug;

use crate::{
    error::StoreResult,
    model::{EntryDraft, MemoryEntry, MemoryPost, PostDraft},
};

/// Abstract interface over the document store holding memory posts.
#[async_trait]
pub trait PostStore: Send + Sync + Debug {
    /// Returns every post in the collection, in insertion order.
    async fn list_posts(&self) -> StoreResult<Vec<MemoryPost>>;

    /// Fetches a single post by identifier.
    async fn find_post(&self, id: &ObjectId) -> StoreResult<Option<MemoryPost>>;

    /// Fetches only the entry array of a post (a projected read).
    ///
    /// Returns `None` when the post itself does not exist.
    async fn find_entries(&self, id: &ObjectId) -> StoreResult<Option<Vec<MemoryEntry>>>;

    /// Inserts a new post under a store-generated identifier.
    ///
    /// Nested entries arriving without an identifier are assigned one as
    /// well. Returns the created document.
    async fn insert_post(&self, draft: PostDraft) -> StoreResult<MemoryPost>;

    /// Overwrites all five top-level fields of a post unconditionally.
    ///
    /// Fields absent from the draft are cleared, not preserved; callers
    /// must resend everything. Returns the updated document, or `None`
    /// when no post matched.
    async fn replace_post(
        &self,
        id: &ObjectId,
        draft: PostDraft,
    ) -> StoreResult<Option<MemoryPost>>;

    /// Appends one entry to the end of a post's array, assigning it a fresh
    /// identifier when none was supplied.
    ///
    /// Returns the updated document, or `None` when no post matched.
    async fn push_entry(
        &self,
        id: &ObjectId,
        entry: EntryDraft,
    ) -> StoreResult<Option<MemoryPost>>;

    /// Deletes a post and, with it, every entry it owns.
    ///
    /// Returns whether a document was actually deleted.
    async fn delete_post(&self, id: &ObjectId) -> StoreResult<bool>;

    /// Removes one entry from a post's array by identifier.
    ///
    /// Returns whether the pull modified a document. A missing post and a
    /// missing entry are indistinguishable at this level.
    async fn pull_entry(&self, post_id: &ObjectId, entry_id: &ObjectId) -> StoreResult<bool>;
}

/// Factory trait for constructing a ready-to-use [`PostStore`].
///
/// Builders own connection parameters and perform whatever setup the
/// backend needs; a failed build is the one fatal condition at process
/// startup.
#[async_trait]
pub trait PostStoreBuilder {
    type Store: PostStore;

    async fn build(self) -> StoreResult<Self::Store>;
}
