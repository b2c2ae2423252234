use async_trait::async_trait;
use bson::{doc, oid::ObjectId, ser::serialize_to_bson};
use futures::TryStreamExt;
use mongodb::{
    Client, Collection as MongoCollection,
    options::{ClientOptions, ReturnDocument},
};
use serde::Deserialize;

use memoria_core::{
    error::{StoreError, StoreResult},
    model::{EntryDraft, MemoryEntry, MemoryPost, PostDraft},
    store::{PostStore, PostStoreBuilder},
};

#[derive(Debug)]
pub struct MongoDbStore {
    client: Client,
    database: String,
}

// Shape of the projected read that fetches only the entry array.
#[derive(Debug, Deserialize)]
struct EntriesProjection {
    #[serde(rename = "blogArray", default)]
    blog_array: Vec<MemoryEntry>,
}

impl MongoDbStore {
    pub fn new(client: Client, database: String) -> Self {
        Self { client, database }
    }

    pub fn builder(dsn: &str, database: &str) -> MongoDbStoreBuilder {
        MongoDbStoreBuilder::new(dsn, database)
    }

    fn posts(&self) -> MongoCollection<MemoryPost> {
        self.client
            .database(&self.database)
            .collection(MemoryPost::collection_name())
    }
}

#[async_trait]
impl PostStore for MongoDbStore {
    async fn list_posts(&self) -> StoreResult<Vec<MemoryPost>> {
        self.posts()
            .find(doc! {})
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?
            .try_collect::<Vec<MemoryPost>>()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    async fn find_post(&self, id: &ObjectId) -> StoreResult<Option<MemoryPost>> {
        self.posts()
            .find_one(doc! { "_id": id.to_hex() })
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    async fn find_entries(&self, id: &ObjectId) -> StoreResult<Option<Vec<MemoryEntry>>> {
        Ok(self
            .posts()
            .clone_with_type::<EntriesProjection>()
            .find_one(doc! { "_id": id.to_hex() })
            .projection(doc! { "blogArray": 1 })
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?
            .map(|projected| projected.blog_array))
    }

    async fn insert_post(&self, draft: PostDraft) -> StoreResult<MemoryPost> {
        let post = draft.into_post(ObjectId::new());

        self.posts()
            .insert_one(&post)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(post)
    }

    async fn replace_post(
        &self,
        id: &ObjectId,
        draft: PostDraft,
    ) -> StoreResult<Option<MemoryPost>> {
        let entries = draft
            .blog_array
            .into_iter()
            .map(EntryDraft::into_entry)
            .collect::<Vec<MemoryEntry>>();

        self.posts()
            .find_one_and_update(
                doc! { "_id": id.to_hex() },
                doc! { "$set": {
                    "title": draft.title,
                    "image": draft.image,
                    "date": draft.date,
                    "description": draft.description,
                    "blogArray": serialize_to_bson(&entries)?,
                }},
            )
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    async fn push_entry(
        &self,
        id: &ObjectId,
        entry: EntryDraft,
    ) -> StoreResult<Option<MemoryPost>> {
        let entry = entry.into_entry();

        self.posts()
            .find_one_and_update(
                doc! { "_id": id.to_hex() },
                doc! { "$push": { "blogArray": serialize_to_bson(&entry)? } },
            )
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    async fn delete_post(&self, id: &ObjectId) -> StoreResult<bool> {
        Ok(self
            .posts()
            .find_one_and_delete(doc! { "_id": id.to_hex() })
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?
            .is_some())
    }

    async fn pull_entry(&self, post_id: &ObjectId, entry_id: &ObjectId) -> StoreResult<bool> {
        let result = self
            .posts()
            .update_one(
                doc! { "_id": post_id.to_hex() },
                doc! { "$pull": { "blogArray": { "_id": entry_id.to_hex() } } },
            )
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(result.modified_count > 0)
    }
}

pub struct MongoDbStoreBuilder {
    dsn: String,
    database: String,
}

impl MongoDbStoreBuilder {
    pub fn new(dsn: &str, database: &str) -> Self {
        Self {
            dsn: dsn.to_string(),
            database: database.to_string(),
        }
    }
}

#[async_trait]
impl PostStoreBuilder for MongoDbStoreBuilder {
    type Store = MongoDbStore;

    async fn build(self) -> StoreResult<Self::Store> {
        let client = Client::with_options(
            ClientOptions::parse(&self.dsn)
                .await
                .map_err(|e| StoreError::Initialization(e.to_string()))?,
        )
        .map_err(|e| StoreError::Initialization(e.to_string()))?;

        // The client connects lazily; ping once so an unreachable
        // deployment fails the build rather than the first request.
        client
            .database(&self.database)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| StoreError::Initialization(e.to_string()))?;

        Ok(MongoDbStore::new(client, self.database))
    }
}
