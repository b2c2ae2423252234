//! Error types and result types for document store operations.

use bson::error::Error as BsonError;
use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// Represents all possible failures surfaced by a storage backend.
///
/// Not-found outcomes are deliberately not represented here: store methods
/// express them with `Option` and `bool` returns so the API layer can pick
/// the response status itself. `StoreError` covers the genuinely failing
/// paths only.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Serialization/deserialization error when converting between document
    /// formats (BSON, JSON).
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Error during store initialization or connection setup.
    #[error("Initialization error: {0}")]
    Initialization(String),
    /// An error reported by the underlying document store.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// A specialized `Result` type for document store operations.
pub type StoreResult<T> = Result<T, StoreError>;

impl From<BsonError> for StoreError {
    fn from(err: BsonError) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

impl From<SerdeJsonError> for StoreError {
    fn from(err: SerdeJsonError) -> Self {
        StoreError::Serialization(err.to_string())
    }
}
