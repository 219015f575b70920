//! Integration tests for the Lumina Server API

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use lumina_core::store::MemoryStore;
use lumina_server::routes::create_router;
use lumina_server::state::{AppState, Config};
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;

/// Create a test app state with in-memory storage
fn create_test_state(page_char_budget: i64) -> (AppState, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = Config {
        data_path: temp_dir.path().to_path_buf(),
        page_char_budget,
        ..Config::default()
    };

    let state = AppState::with_store(Arc::new(MemoryStore::new()), &config);
    (state, temp_dir)
}

/// Create a test server
fn create_test_server() -> (TestServer, TempDir) {
    create_test_server_with_budget(650)
}

fn create_test_server_with_budget(page_char_budget: i64) -> (TestServer, TempDir) {
    let (state, temp_dir) = create_test_state(page_char_budget);
    let app = create_router(state);
    let server = TestServer::new(app).expect("Failed to create test server");
    (server, temp_dir)
}

async fn login(server: &TestServer) -> Value {
    let response = server
        .post("/api/v1/auth/login")
        .json(&json!({ "email": "reader@example.com", "password": "secret" }))
        .await;
    response.assert_status_ok();
    response.json()
}

async fn upload_text(server: &TestServer, filename: &str, text: &str) -> Value {
    let form = MultipartForm::new().add_part(
        "file",
        Part::bytes(text.as_bytes().to_vec())
            .file_name(filename)
            .mime_type("text/plain"),
    );
    let response = server
        .post("/api/v1/publishers/lumina/library")
        .multipart(form)
        .await;
    response.assert_status_ok();
    response.json()
}

fn book_ids(body: &Value) -> Vec<String> {
    body["books"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let (server, _temp_dir) = create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_publishers_are_public() {
    let (server, _temp_dir) = create_test_server();

    let response = server.get("/api/v1/publishers").await;
    response.assert_status_ok();
    let body: Value = response.json();
    let keys: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["lumina", "blueleaf", "sunstone"]);

    let response = server.get("/api/v1/publishers/blueleaf").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["app_name"], "Blueleaf Books");

    server
        .get("/api/v1/publishers/acme")
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_storefront_requires_login() {
    let (server, _temp_dir) = create_test_server();

    for path in [
        "/api/v1/publishers/lumina/store",
        "/api/v1/publishers/lumina/library",
        "/api/v1/account",
        "/api/v1/auth/me",
    ] {
        server
            .get(path)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn test_login_delivers_push_once() {
    let (server, _temp_dir) = create_test_server();

    let body = login(&server).await;
    assert_eq!(body["user"]["name"], "Alex Doe");
    assert_eq!(body["user"]["email"], "alex.doe@example.com");
    assert_eq!(body["notification"]["id"], "announcement-3");

    let body = login(&server).await;
    assert!(body["notification"].is_null());

    let response = server.get("/api/v1/auth/me").await;
    response.assert_status_ok();

    server
        .post("/api/v1/auth/logout")
        .await
        .assert_status(StatusCode::NO_CONTENT);
    server
        .get("/api/v1/auth/me")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_unknown_publisher() {
    let (server, _temp_dir) = create_test_server();

    server
        .post("/api/v1/auth/login")
        .add_query_param("publisher", "acme")
        .json(&json!({}))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_purchase_moves_book_to_library() {
    let (server, _temp_dir) = create_test_server();
    login(&server).await;

    let store: Value = server.get("/api/v1/publishers/lumina/store").await.json();
    assert_eq!(book_ids(&store), vec!["pub-2", "pub-3", "pub-4"]);

    let response = server
        .post("/api/v1/publishers/lumina/books/pub-3/purchase")
        .json(&json!({ "method": "fonepay" }))
        .await;
    response.assert_status_ok();
    let receipt: Value = response.json();
    assert_eq!(receipt["charged"], "$9.99");
    assert_eq!(receipt["points_delta"], 100);
    assert_eq!(receipt["already_owned"], false);

    let library: Value = server.get("/api/v1/publishers/lumina/library").await.json();
    assert_eq!(book_ids(&library), vec!["pub-3", "pub-1"]);
    assert_eq!(library["total"], 2);

    let store: Value = server.get("/api/v1/publishers/lumina/store").await.json();
    assert_eq!(book_ids(&store), vec!["pub-2", "pub-4"]);

    let account: Value = server.get("/api/v1/account").await.json();
    assert_eq!(account["points"], 350);
}

#[tokio::test]
async fn test_points_purchase_rejected_without_balance() {
    let (server, _temp_dir) = create_test_server();
    login(&server).await;

    server
        .post("/api/v1/publishers/lumina/books/pub-2/purchase")
        .json(&json!({ "method": "points" }))
        .await
        .assert_status_bad_request();

    server
        .post("/api/v1/publishers/lumina/books/missing/purchase")
        .json(&json!({ "method": "card" }))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_gift() {
    let (server, _temp_dir) = create_test_server();
    login(&server).await;

    server
        .post("/api/v1/publishers/sunstone/books/ss-3/gift")
        .json(&json!({ "recipient_email": "nope", "method": "card" }))
        .await
        .assert_status_bad_request();

    let response = server
        .post("/api/v1/publishers/sunstone/books/ss-3/gift")
        .json(&json!({
            "recipient_email": "friend@example.org",
            "message": "Happy birthday",
            "method": "card"
        }))
        .await;
    response.assert_status_ok();
    let gift: Value = response.json();
    assert_eq!(gift["book_id"], "ss-3");

    let account: Value = server.get("/api/v1/account").await.json();
    assert_eq!(account["gifts"].as_array().unwrap().len(), 1);
    assert_eq!(account["gifts"][0]["recipient_email"], "friend@example.org");

    let library: Value = server.get("/api/v1/publishers/sunstone/library").await.json();
    assert_eq!(book_ids(&library), vec!["ss-1"]);
}

#[tokio::test]
async fn test_upload_text_book() {
    let (server, _temp_dir) = create_test_server();
    login(&server).await;

    let body = upload_text(&server, "Zebra Notes.md", "# Stripes").await;
    assert_eq!(body["book"]["title"], "Zebra Notes");
    assert_eq!(body["book"]["author"], "Unknown Author");
    assert_eq!(body["book"]["is_user_book"], true);

    let library: Value = server.get("/api/v1/publishers/lumina/library").await.json();
    let titles: Vec<&str> = library["books"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Moby Dick", "Zebra Notes"]);
}

#[tokio::test]
async fn test_upload_rejects_unsupported_file() {
    let (server, _temp_dir) = create_test_server();
    login(&server).await;

    let form = MultipartForm::new().add_part(
        "file",
        Part::bytes(b"%PDF-1.7".to_vec())
            .file_name("scan.pdf")
            .mime_type("application/pdf"),
    );
    server
        .post("/api/v1/publishers/lumina/library")
        .multipart(form)
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn test_upload_no_file() {
    let (server, _temp_dir) = create_test_server();
    login(&server).await;

    // POST with no file should fail
    let response = server.post("/api/v1/publishers/lumina/library").await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_reader_session_navigation() {
    let (server, _temp_dir) = create_test_server_with_budget(4);
    login(&server).await;

    let uploaded = upload_text(&server, "short.txt", "abcdefghij").await;
    let book_id = uploaded["book"]["id"].as_str().unwrap().to_string();

    let response = server
        .post(&format!("/api/v1/publishers/lumina/books/{}/read", book_id))
        .await;
    response.assert_status_ok();
    let opened: Value = response.json();
    let session = opened["session"].as_str().unwrap().to_string();
    assert_eq!(opened["view"]["total_pages"], 4);
    assert_eq!(opened["view"]["page_label"], "Pages 1-2 of 4");
    assert_eq!(opened["view"]["theme"], "sepia");

    let next: Value = server
        .post(&format!("/api/v1/reader/{}/next", session))
        .await
        .json();
    assert_eq!(next["changed"], true);
    assert_eq!(next["view"]["direction"], "forward");
    assert_eq!(next["view"]["turning"]["front"][0]["text"], "efgh");

    // Ignored while the page is turning
    let again: Value = server
        .post(&format!("/api/v1/reader/{}/next", session))
        .await
        .json();
    assert_eq!(again["changed"], false);

    let done: Value = server
        .post(&format!("/api/v1/reader/{}/complete", session))
        .await
        .json();
    assert_eq!(done["changed"], true);
    assert_eq!(done["view"]["state"]["current_left"], 2);
    assert_eq!(done["view"]["page_label"], "Pages 3-4 of 4");

    // Last spread
    let last: Value = server
        .post(&format!("/api/v1/reader/{}/next", session))
        .await
        .json();
    assert_eq!(last["changed"], false);

    let themed: Value = server
        .put(&format!("/api/v1/reader/{}/theme", session))
        .json(&json!({ "theme": "dark" }))
        .await
        .json();
    assert_eq!(themed["theme"], "dark");

    server
        .delete(&format!("/api/v1/reader/{}", session))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    server
        .get(&format!("/api/v1/reader/{}", session))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_reader_requires_owned_book() {
    let (server, _temp_dir) = create_test_server();
    login(&server).await;

    server
        .post("/api/v1/publishers/lumina/books/pub-2/read")
        .await
        .assert_status_not_found();

    let response = server
        .post("/api/v1/publishers/lumina/books/pub-1/read")
        .await;
    response.assert_status_ok();
    let opened: Value = response.json();
    assert_eq!(opened["view"]["title"], "Moby Dick");
}

#[tokio::test]
async fn test_unknown_reader_session() {
    let (server, _temp_dir) = create_test_server();
    login(&server).await;

    server
        .get("/api/v1/reader/00000000-0000-0000-0000-000000000000")
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_logout_closes_reader_sessions() {
    let (server, _temp_dir) = create_test_server();
    login(&server).await;

    let opened: Value = server
        .post("/api/v1/publishers/lumina/books/pub-1/read")
        .await
        .json();
    let session = opened["session"].as_str().unwrap().to_string();

    server
        .post("/api/v1/auth/logout")
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .get(&format!("/api/v1/reader/{}", session))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .post(&format!("/api/v1/reader/{}/next", session))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .delete(&format!("/api/v1/reader/{}", session))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    // Signing back in does not revive the old session
    login(&server).await;
    server
        .get(&format!("/api/v1/reader/{}", session))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_announcements_and_dismissal() {
    let (server, _temp_dir) = create_test_server();
    login(&server).await;

    let feed: Value = server
        .get("/api/v1/publishers/lumina/announcements")
        .await
        .json();
    assert_eq!(feed["popup"]["id"], "announcement-1");
    assert_eq!(feed["notifications"].as_array().unwrap().len(), 2);

    server
        .post("/api/v1/announcements/announcement-1/dismiss")
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let feed: Value = server
        .get("/api/v1/publishers/lumina/announcements")
        .await
        .json();
    assert!(feed["popup"].is_null());
}

#[tokio::test]
async fn test_epub_location() {
    let (server, _temp_dir) = create_test_server();
    login(&server).await;

    let body: Value = server.get("/api/v1/epub/book-7/location").await.json();
    assert!(body["location"].is_null());

    server
        .put("/api/v1/epub/book-7/location")
        .json(&json!({ "location": "epubcfi(/6/8!/4/2/10:0)" }))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let body: Value = server.get("/api/v1/epub/book-7/location").await.json();
    assert_eq!(body["book_id"], "book-7");
    assert_eq!(body["location"], "epubcfi(/6/8!/4/2/10:0)");
}

#[tokio::test]
async fn test_cors_headers() {
    let (server, _temp_dir) = create_test_server();

    // Response should succeed (CORS is configured)
    let response = server.get("/api/v1/publishers").await;
    response.assert_status_ok();
}
