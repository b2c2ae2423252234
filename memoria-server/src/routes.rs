//! Route table and request handlers.
//!
//! Each handler maps one route + method onto one store operation, checks
//! its minimal preconditions, and renders JSON. Handlers suspend only at
//! the store-call boundary; no state is shared across requests beyond the
//! store handle itself.
//!
//! Routes that do not validate identifiers up front forward malformed ones
//! as store-level failures, so those requests answer 500 with the route's
//! context message rather than 400.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use bson::oid::ObjectId;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use memoria_core::{
    model::{EntryDraft, MemoryEntry, MemoryPost, PostDraft},
    store::PostStore,
};

use crate::error::ApiError;

/// The store handle shared by every request.
pub type SharedStore = Arc<dyn PostStore>;

/// Body of an entry-append request.
#[derive(Debug, Deserialize)]
pub struct AppendEntryBody {
    #[serde(rename = "newBlog", alias = "newEntry")]
    pub new_blog: EntryDraft,
}

/// Builds the application router around a store handle.
pub fn app(store: SharedStore) -> Router {
    Router::new()
        .route("/", get(greeting))
        .route("/api/memories", get(list_posts).post(create_post))
        .route(
            "/api/memories/{post_id}",
            get(get_post).put(replace_post).delete(delete_post),
        )
        .route(
            "/api/memories/{post_id}/entries",
            get(get_entries).put(append_entry),
        )
        .route(
            "/api/memories/{post_id}/entries/{entry_id}",
            get(get_entry).delete(remove_entry),
        )
        .fallback(unknown_route)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(store)
}

async fn greeting() -> Json<&'static str> {
    Json("Hello World! This is your server!")
}

async fn unknown_route() -> StatusCode {
    StatusCode::NOT_FOUND
}

async fn list_posts(
    State(store): State<SharedStore>,
) -> Result<Json<Vec<MemoryPost>>, ApiError> {
    let posts = store
        .list_posts()
        .await
        .map_err(|e| ApiError::store("An error occurred while fetching memory posts", e))?;

    if posts.is_empty() {
        // An empty collection reports as missing, not as an empty array.
        return Err(ApiError::NoPosts("No blogs found"));
    }

    Ok(Json(posts))
}

async fn get_post(
    State(store): State<SharedStore>,
    Path(post_id): Path<String>,
) -> Result<Json<MemoryPost>, ApiError> {
    const CONTEXT: &str = "An error occurred while fetching the blog.";

    let id = ObjectId::parse_str(&post_id).map_err(|e| ApiError::store(CONTEXT, e))?;

    store
        .find_post(&id)
        .await
        .map_err(|e| ApiError::store(CONTEXT, e))?
        .map(Json)
        .ok_or(ApiError::NotFound("Blog not found"))
}

async fn get_entries(
    State(store): State<SharedStore>,
    Path(post_id): Path<String>,
) -> Result<Json<Vec<MemoryEntry>>, ApiError> {
    let Ok(id) = ObjectId::parse_str(&post_id) else {
        return Err(ApiError::InvalidId("Invalid blog ID"));
    };

    store
        .find_entries(&id)
        .await
        .map_err(|e| ApiError::store("An error occurred while fetching the blogArray.", e))?
        .map(Json)
        .ok_or(ApiError::NotFound("Blog not found"))
}

async fn get_entry(
    State(store): State<SharedStore>,
    Path((post_id, entry_id)): Path<(String, String)>,
) -> Result<Json<MemoryEntry>, ApiError> {
    let (Ok(post_id), Ok(entry_id)) =
        (ObjectId::parse_str(&post_id), ObjectId::parse_str(&entry_id))
    else {
        return Err(ApiError::InvalidId("Invalid ID"));
    };

    let entries = store
        .find_entries(&post_id)
        .await
        .map_err(|e| ApiError::store("An error occurred while fetching the blogArray.", e))?
        .ok_or(ApiError::NotFound("Blog not found"))?;

    // Plain membership scan; first match wins.
    entries
        .into_iter()
        .find(|entry| entry.id == entry_id)
        .map(Json)
        .ok_or(ApiError::NotFound("Blog array item not found"))
}

async fn create_post(
    State(store): State<SharedStore>,
    Json(draft): Json<PostDraft>,
) -> Result<(StatusCode, Json<MemoryPost>), ApiError> {
    let post = store
        .insert_post(draft)
        .await
        .map_err(|e| ApiError::store("An error occurred while creating a post.", e))?;

    Ok((StatusCode::CREATED, Json(post)))
}

async fn replace_post(
    State(store): State<SharedStore>,
    Path(post_id): Path<String>,
    Json(draft): Json<PostDraft>,
) -> Result<Json<MemoryPost>, ApiError> {
    const CONTEXT: &str = "An error occurred while updating the blog.";

    let id = ObjectId::parse_str(&post_id).map_err(|e| ApiError::store(CONTEXT, e))?;

    store
        .replace_post(&id, draft)
        .await
        .map_err(|e| ApiError::store(CONTEXT, e))?
        .map(Json)
        .ok_or(ApiError::NotFound("Blog not found"))
}

async fn append_entry(
    State(store): State<SharedStore>,
    Path(post_id): Path<String>,
    Json(body): Json<AppendEntryBody>,
) -> Result<Json<MemoryPost>, ApiError> {
    const CONTEXT: &str = "An error occurred while updating the blogArray.";

    let id = ObjectId::parse_str(&post_id).map_err(|e| ApiError::store(CONTEXT, e))?;

    store
        .push_entry(&id, body.new_blog)
        .await
        .map_err(|e| ApiError::store(CONTEXT, e))?
        .map(Json)
        .ok_or(ApiError::NotFound("Blog not found"))
}

async fn delete_post(
    State(store): State<SharedStore>,
    Path(post_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    const CONTEXT: &str = "An error occurred while deleting the blog.";

    let id = ObjectId::parse_str(&post_id).map_err(|e| ApiError::store(CONTEXT, e))?;

    if !store
        .delete_post(&id)
        .await
        .map_err(|e| ApiError::store(CONTEXT, e))?
    {
        return Err(ApiError::NotFound("Blog not found"));
    }

    Ok(Json(json!({ "message": "Blog deleted successfully" })))
}

async fn remove_entry(
    State(store): State<SharedStore>,
    Path((post_id, entry_id)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    const CONTEXT: &str = "An error occurred while deleting the blog item";

    let post_id =
        ObjectId::parse_str(&post_id).map_err(|e| ApiError::store_with_details(CONTEXT, e))?;
    let entry_id =
        ObjectId::parse_str(&entry_id).map_err(|e| ApiError::store_with_details(CONTEXT, e))?;

    if !store
        .pull_entry(&post_id, &entry_id)
        .await
        .map_err(|e| ApiError::store_with_details(CONTEXT, e))?
    {
        // A missing post and a missing entry are indistinguishable here.
        return Err(ApiError::NotFound("Blog item not found or not deleted"));
    }

    Ok(Json(json!({ "message": "Blog item deleted successfully" })))
}
