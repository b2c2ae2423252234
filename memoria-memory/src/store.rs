//! In-memory storage implementation for memory posts.

use async_trait::async_trait;
use bson::oid::ObjectId;
use mea::rwlock::RwLock;
use std::sync::Arc;

use memoria_core::{
    error::StoreResult,
    model::{EntryDraft, MemoryEntry, MemoryPost, PostDraft},
    store::{PostStore, PostStoreBuilder},
};

/// Thread-safe in-memory post storage backend.
///
/// `InMemoryStore` is cloneable and uses an `Arc`-wrapped internal state,
/// allowing it to be safely shared across async tasks. Multiple clones of
/// the same instance share the same underlying data.
///
/// Posts are kept in a plain vector in insertion order; every operation is
/// a linear scan, which is fine for the small collections this store is
/// meant for.
#[derive(Default, Clone, Debug)]
pub struct InMemoryStore {
    posts: Arc<RwLock<Vec<MemoryPost>>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            posts: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Creates a builder for constructing an `InMemoryStore`.
    pub fn builder() -> InMemoryStoreBuilder {
        InMemoryStoreBuilder::default()
    }
}

#[async_trait]
impl PostStore for InMemoryStore {
    async fn list_posts(&self) -> StoreResult<Vec<MemoryPost>> {
        Ok(self.posts.read().await.clone())
    }

    async fn find_post(&self, id: &ObjectId) -> StoreResult<Option<MemoryPost>> {
        Ok(self
            .posts
            .read()
            .await
            .iter()
            .find(|post| post.id == *id)
            .cloned())
    }

    async fn find_entries(&self, id: &ObjectId) -> StoreResult<Option<Vec<MemoryEntry>>> {
        Ok(self
            .posts
            .read()
            .await
            .iter()
            .find(|post| post.id == *id)
            .map(|post| post.blog_array.clone()))
    }

    async fn insert_post(&self, draft: PostDraft) -> StoreResult<MemoryPost> {
        let post = draft.into_post(ObjectId::new());
        self.posts.write().await.push(post.clone());

        Ok(post)
    }

    async fn replace_post(
        &self,
        id: &ObjectId,
        draft: PostDraft,
    ) -> StoreResult<Option<MemoryPost>> {
        let mut posts = self.posts.write().await;
        let Some(post) = posts.iter_mut().find(|post| post.id == *id) else {
            return Ok(None);
        };

        *post = draft.into_post(*id);

        Ok(Some(post.clone()))
    }

    async fn push_entry(
        &self,
        id: &ObjectId,
        entry: EntryDraft,
    ) -> StoreResult<Option<MemoryPost>> {
        let mut posts = self.posts.write().await;
        let Some(post) = posts.iter_mut().find(|post| post.id == *id) else {
            return Ok(None);
        };

        post.blog_array.push(entry.into_entry());

        Ok(Some(post.clone()))
    }

    async fn delete_post(&self, id: &ObjectId) -> StoreResult<bool> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|post| post.id != *id);

        Ok(posts.len() < before)
    }

    async fn pull_entry(&self, post_id: &ObjectId, entry_id: &ObjectId) -> StoreResult<bool> {
        let mut posts = self.posts.write().await;
        // A missing post and a missing entry both report as "nothing pulled".
        let Some(post) = posts.iter_mut().find(|post| post.id == *post_id) else {
            return Ok(false);
        };

        let before = post.blog_array.len();
        post.blog_array.retain(|entry| entry.id != *entry_id);

        Ok(post.blog_array.len() < before)
    }
}

/// Builder for [`InMemoryStore`].
#[derive(Default)]
pub struct InMemoryStoreBuilder;

#[async_trait]
impl PostStoreBuilder for InMemoryStoreBuilder {
    type Store = InMemoryStore;

    async fn build(self) -> StoreResult<Self::Store> {
        Ok(InMemoryStore::new())
    }
}
