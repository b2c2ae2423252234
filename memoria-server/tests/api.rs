//! HTTP-level tests driving the full router against the in-memory store.

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
};
use bson::oid::ObjectId;
use memoria_memory::InMemoryStore;
use memoria_server::app;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

fn test_app() -> Router {
    app(Arc::new(InMemoryStore::new()))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request"),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .expect("request"),
    };

    app.clone().oneshot(request).await.expect("response")
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");

    serde_json::from_slice(&bytes).expect("json body")
}

async fn create_post(app: &Router, body: Value) -> String {
    let response = send(app, "POST", "/api/memories", Some(body)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    json_body(response).await["_id"]
        .as_str()
        .expect("id")
        .to_string()
}

#[tokio::test]
async fn root_serves_the_greeting() {
    let app = test_app();

    let response = send(&app, "GET", "/", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!("Hello World! This is your server!")
    );
}

#[tokio::test]
async fn unknown_routes_answer_an_empty_404() {
    let app = test_app();

    let response = send(&app, "GET", "/api/somewhere/else", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn listing_an_empty_collection_is_a_404() {
    let app = test_app();

    let response = send(&app, "GET", "/api/memories", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await, json!({ "message": "No blogs found" }));
}

#[tokio::test]
async fn created_posts_come_back_with_a_fresh_identifier() {
    let app = test_app();

    let response = send(
        &app,
        "POST",
        "/api/memories",
        Some(json!({
            "title": "Day 1",
            "image": "a.jpg",
            "date": "2024-01-01",
            "description": "x",
            "blogArray": [],
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = json_body(response).await;

    let id = created["_id"].as_str().expect("id");
    assert_eq!(id.len(), 24);
    assert_eq!(created["title"], json!("Day 1"));
    assert_eq!(created["image"], json!("a.jpg"));
    assert_eq!(created["date"], json!("2024-01-01"));
    assert_eq!(created["description"], json!("x"));
    assert_eq!(created["blogArray"], json!([]));

    let response = send(&app, "GET", &format!("/api/memories/{id}"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, created);

    let response = send(&app, "GET", "/api/memories", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!([created]));
}

#[tokio::test]
async fn fetching_an_absent_post_is_a_404() {
    let app = test_app();
    create_post(&app, json!({ "title": "t" })).await;

    let absent = ObjectId::new().to_hex();
    let response = send(&app, "GET", &format!("/api/memories/{absent}"), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await, json!({ "error": "Blog not found" }));
}

#[tokio::test]
async fn malformed_identifier_on_the_post_route_is_a_store_failure() {
    // Only the entry routes validate identifiers up front; here the bad id
    // travels the store path and reports as a 500.
    let app = test_app();

    let response = send(&app, "GET", "/api/memories/not-hex", None).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await,
        json!({ "error": "An error occurred while fetching the blog." })
    );
}

#[tokio::test]
async fn malformed_identifiers_fail_fast_on_entry_routes() {
    let app = test_app();

    let response = send(&app, "GET", "/api/memories/not-hex/entries", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await, json!({ "error": "Invalid blog ID" }));

    let valid = ObjectId::new().to_hex();
    let response = send(
        &app,
        "GET",
        &format!("/api/memories/{valid}/entries/123"),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await, json!({ "error": "Invalid ID" }));

    let response = send(
        &app,
        "GET",
        &format!("/api/memories/zz0123456789abcdef012345/entries/{valid}"),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await, json!({ "error": "Invalid ID" }));
}

#[tokio::test]
async fn entry_array_route_returns_only_the_array() {
    let app = test_app();
    let id = create_post(
        &app,
        json!({
            "title": "t",
            "blogArray": [{ "text": "breakfast" }, { "text": "lunch" }],
        }),
    )
    .await;

    let response = send(&app, "GET", &format!("/api/memories/{id}/entries"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let entries = json_body(response).await;
    let entries = entries.as_array().expect("array");

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["text"], json!("breakfast"));
    assert_eq!(entries[1]["text"], json!("lunch"));
    assert!(entries.iter().all(|entry| entry["_id"].is_string()));

    let absent = ObjectId::new().to_hex();
    let response = send(&app, "GET", &format!("/api/memories/{absent}/entries"), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await, json!({ "error": "Blog not found" }));
}

#[tokio::test]
async fn appending_an_entry_grows_the_array_by_one() {
    let app = test_app();
    let id = create_post(
        &app,
        json!({
            "title": "t",
            "blogArray": [{ "text": "one" }, { "text": "two" }],
        }),
    )
    .await;

    let response = send(
        &app,
        "PUT",
        &format!("/api/memories/{id}/entries"),
        Some(json!({ "newBlog": { "text": "lunch" } })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = json_body(response).await;
    let entries = updated["blogArray"].as_array().expect("array");

    assert_eq!(entries.len(), 3);
    let last = &entries[2];
    assert_eq!(last["text"], json!("lunch"));
    let entry_id = last["_id"].as_str().expect("entry id");
    assert_eq!(entry_id.len(), 24);

    // The new entry is addressable under its fresh identifier, unchanged.
    let response = send(
        &app,
        "GET",
        &format!("/api/memories/{id}/entries/{entry_id}"),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let entry = json_body(response).await;
    assert_eq!(entry["text"], json!("lunch"));
    assert_eq!(entry["_id"], json!(entry_id));

    // The alias body key is accepted as well.
    let response = send(
        &app,
        "PUT",
        &format!("/api/memories/{id}/entries"),
        Some(json!({ "newEntry": { "text": "dinner" } })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = json_body(response).await;
    assert_eq!(updated["blogArray"].as_array().expect("array").len(), 4);

    let absent = ObjectId::new().to_hex();
    let response = send(
        &app,
        "PUT",
        &format!("/api/memories/{absent}/entries"),
        Some(json!({ "newBlog": { "text": "late" } })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await, json!({ "error": "Blog not found" }));
}

#[tokio::test]
async fn single_entry_lookup_distinguishes_missing_post_from_missing_entry() {
    let app = test_app();
    let id = create_post(&app, json!({ "title": "t", "blogArray": [{ "text": "e" }] })).await;

    let absent_entry = ObjectId::new().to_hex();
    let response = send(
        &app,
        "GET",
        &format!("/api/memories/{id}/entries/{absent_entry}"),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        json_body(response).await,
        json!({ "error": "Blog array item not found" })
    );

    let absent_post = ObjectId::new().to_hex();
    let response = send(
        &app,
        "GET",
        &format!("/api/memories/{absent_post}/entries/{absent_entry}"),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await, json!({ "error": "Blog not found" }));
}

#[tokio::test]
async fn replace_overwrites_all_top_level_fields() {
    let app = test_app();
    let id = create_post(
        &app,
        json!({
            "title": "before",
            "image": "a.jpg",
            "date": "2024-01-01",
            "description": "x",
            "blogArray": [{ "text": "gone" }],
        }),
    )
    .await;

    let response = send(
        &app,
        "PUT",
        &format!("/api/memories/{id}"),
        Some(json!({ "title": "after" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = json_body(response).await;

    assert_eq!(updated["_id"], json!(id));
    assert_eq!(updated["title"], json!("after"));
    // Fields the caller left out are cleared, not preserved.
    assert_eq!(updated["image"], Value::Null);
    assert_eq!(updated["date"], Value::Null);
    assert_eq!(updated["description"], Value::Null);
    assert_eq!(updated["blogArray"], json!([]));

    let absent = ObjectId::new().to_hex();
    let response = send(
        &app,
        "PUT",
        &format!("/api/memories/{absent}"),
        Some(json!({ "title": "x" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await, json!({ "error": "Blog not found" }));
}

#[tokio::test]
async fn deleting_a_post_works_exactly_once() {
    let app = test_app();
    let id = create_post(&app, json!({ "title": "t", "blogArray": [{ "text": "e" }] })).await;

    let response = send(&app, "DELETE", &format!("/api/memories/{id}"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({ "message": "Blog deleted successfully" })
    );

    let response = send(&app, "GET", &format!("/api/memories/{id}"), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, "DELETE", &format!("/api/memories/{id}"), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await, json!({ "error": "Blog not found" }));
}

#[tokio::test]
async fn removing_entries_reports_missing_ones_as_not_deleted() {
    let app = test_app();
    let id = create_post(
        &app,
        json!({ "title": "t", "blogArray": [{ "text": "keep" }, { "text": "drop" }] }),
    )
    .await;

    let response = send(&app, "GET", &format!("/api/memories/{id}/entries"), None).await;
    let entries = json_body(response).await;
    let drop_id = entries[1]["_id"].as_str().expect("entry id").to_string();

    let absent = ObjectId::new().to_hex();
    let response = send(
        &app,
        "DELETE",
        &format!("/api/memories/{id}/entries/{absent}"),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        json_body(response).await,
        json!({ "error": "Blog item not found or not deleted" })
    );

    let response = send(
        &app,
        "DELETE",
        &format!("/api/memories/{id}/entries/{drop_id}"),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({ "message": "Blog item deleted successfully" })
    );

    let response = send(&app, "GET", &format!("/api/memories/{id}/entries"), None).await;
    let remaining = json_body(response).await;
    let remaining = remaining.as_array().expect("array");
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0]["text"], json!("keep"));
}
