//! Domain model for memory posts and their nested blog entries.
//!
//! A [`MemoryPost`] is a top-level document with five caller-visible fields
//! and an ordered array of [`MemoryEntry`] sub-documents. Entries carry
//! arbitrary free-form fields; only their identifier is structured.
//!
//! Writes arrive as drafts ([`PostDraft`], [`EntryDraft`]) so the store can
//! assign identifiers at insertion time. Identifiers are the store's native
//! encoding, a 24-character hexadecimal [`ObjectId`], and are rendered in
//! that hex form in JSON responses and stored documents alike.

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form fields carried by a blog entry.
///
/// No schema is enforced on these beyond what the store itself rejects.
pub type EntryFields = Map<String, Value>;

/// Serde adapters rendering [`ObjectId`]s as their canonical 24-character
/// hex form.
pub mod hex_oid {
    use bson::oid::ObjectId;
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

    pub fn serialize<S>(id: &ObjectId, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&id.to_hex())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<ObjectId, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex = String::deserialize(deserializer)?;
        ObjectId::parse_str(&hex).map_err(D::Error::custom)
    }

    /// Adapter for optional identifier fields.
    pub mod option {
        use super::*;

        pub fn serialize<S>(id: &Option<ObjectId>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match id {
                Some(id) => serializer.serialize_some(&id.to_hex()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<ObjectId>, D::Error>
        where
            D: Deserializer<'de>,
        {
            match Option::<String>::deserialize(deserializer)? {
                Some(hex) => ObjectId::parse_str(&hex)
                    .map(Some)
                    .map_err(D::Error::custom),
                None => Ok(None),
            }
        }
    }
}

/// A top-level memory post document.
///
/// The identifier is assigned by the store at creation and never reassigned.
/// All other fields are replaced wholesale on update; there is no partial
/// update of a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryPost {
    #[serde(rename = "_id", with = "hex_oid")]
    pub id: ObjectId,
    pub title: Option<String>,
    pub image: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "blogArray", default)]
    pub blog_array: Vec<MemoryEntry>,
}

impl MemoryPost {
    /// Name of the collection memory posts live in.
    pub fn collection_name() -> &'static str {
        "memories"
    }

    /// Looks up an entry by identifier with a linear scan of the array.
    ///
    /// First match wins. The array is expected to stay small, so this is a
    /// plain membership search rather than an indexed lookup.
    pub fn entry(&self, entry_id: &ObjectId) -> Option<&MemoryEntry> {
        self.blog_array
            .iter()
            .find(|entry| entry.id == *entry_id)
    }
}

/// One element of a post's `blogArray`.
///
/// Entries are owned exclusively by their parent post and cannot outlive it.
/// Their identifier is unique within the parent's array; duplicate content
/// is allowed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryEntry {
    #[serde(rename = "_id", with = "hex_oid")]
    pub id: ObjectId,
    #[serde(flatten)]
    pub fields: EntryFields,
}

/// Caller-supplied top-level fields of a post, used for both create and
/// replace requests.
///
/// Every field is optional: a replace overwrites all five fields
/// unconditionally, so anything the caller leaves out is cleared rather
/// than preserved.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostDraft {
    pub title: Option<String>,
    pub image: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "blogArray", default)]
    pub blog_array: Vec<EntryDraft>,
}

impl PostDraft {
    /// Materializes a full document under the given identifier.
    pub fn into_post(self, id: ObjectId) -> MemoryPost {
        MemoryPost {
            id,
            title: self.title,
            image: self.image,
            date: self.date,
            description: self.description,
            blog_array: self
                .blog_array
                .into_iter()
                .map(EntryDraft::into_entry)
                .collect(),
        }
    }
}

/// Caller-supplied fields of a new blog entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryDraft {
    #[serde(
        rename = "_id",
        default,
        skip_serializing_if = "Option::is_none",
        with = "hex_oid::option"
    )]
    pub id: Option<ObjectId>,
    #[serde(flatten)]
    pub fields: EntryFields,
}

impl EntryDraft {
    /// Keeps the supplied identifier or generates a fresh one.
    pub fn into_entry(self) -> MemoryEntry {
        MemoryEntry {
            id: self.id.unwrap_or_else(ObjectId::new),
            fields: self.fields,
        }
    }
}
