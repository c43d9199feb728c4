//! Router-level tests for the `/books` resource.

mod common;

use axum::http::StatusCode;
use bookshelf_config::ServerConfig;
use bookshelf_core::HealthStatus;
use common::{StaticHealthCheck, TestApp};
use serde_json::json;
use std::sync::Arc;

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn test_create_returns_server_assigned_id() {
    let app = TestApp::new();

    let (status, body) = app
        .send("POST", "/books", Some(r#"{"id":500,"title":"Dune","author":"Herbert","year":1965}"#))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 1);
    assert_eq!(body["title"], "Dune");
    assert_eq!(body["author"], "Herbert");
    assert_eq!(body["year"], 1965);
    assert_eq!(app.publisher.messages(), vec!["New book added: Dune"]);
    assert_eq!(app.publisher.topics(), vec!["book_events"]);
}

#[tokio::test]
async fn test_create_validation_failures() {
    let app = TestApp::new();

    let cases = [
        (r#"{"title":"","author":"Herbert","year":1965}"#, "Title cannot be empty"),
        (r#"{"title":"","author":"","year":0}"#, "Title cannot be empty"),
        (r#"{"title":"Dune","author":"","year":1965}"#, "Author cannot be empty"),
        (r#"{"title":"Dune","author":"Herbert","year":0}"#, "Year must be a valid positive number"),
        (r#"{"title":"Dune","author":"Herbert","year":-1}"#, "Year must be a valid positive number"),
    ];

    for (body, message) in cases {
        let (status, json) = app.send("POST", "/books", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
        assert_eq!(json, json!({"error": message}));
    }

    assert_eq!(app.repo.count(), 0);
    assert!(app.publisher.messages().is_empty());
}

#[tokio::test]
async fn test_create_malformed_json() {
    let app = TestApp::new();

    for body in ["not json", r#"{"title":"Dune"}"#, r#"{"title":"Dune","author":"Herbert","year":"1965"}"#] {
        let (status, json) = app.send("POST", "/books", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, json!({"error": "Invalid JSON data"}));
    }
}

#[tokio::test]
async fn test_create_long_title() {
    let app = TestApp::new();
    let title = "T".repeat(300);

    let created = app.create(&title, "Herbert", 1965).await;
    assert_eq!(created["title"], title.as_str());
}

#[tokio::test]
async fn test_oversized_body_is_json_413() {
    let app = TestApp::with_server_config(&ServerConfig {
        max_body_size: 64,
        ..ServerConfig::default()
    });
    app.create("Dune", "Herbert", 1965).await;
    let body = json!({"title": "D".repeat(200), "author": "Herbert", "year": 1965}).to_string();

    for (method, uri) in [("POST", "/books"), ("PUT", "/books/1")] {
        let (status, json) = app.send(method, uri, Some(&body)).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE, "{method}");
        assert_eq!(json, json!({"error": "Request body too large"}), "{method}");
    }
    assert_eq!(app.repo.count(), 1);
}

#[tokio::test]
async fn test_create_store_failure() {
    let app = TestApp::new();
    app.repo.fail_all();

    let (status, json) = app
        .send("POST", "/books", Some(r#"{"title":"Dune","author":"Herbert","year":1965}"#))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json, json!({"error": "Failed to create book"}));
    assert!(app.publisher.messages().is_empty());
}

// ============================================================================
// List
// ============================================================================

#[tokio::test]
async fn test_list_empty() {
    let app = TestApp::new();
    let (status, json) = app.send("GET", "/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!([]));
}

#[tokio::test]
async fn test_list_includes_book_created_after_cached_list() {
    let app = TestApp::new();
    app.create("Dune", "Herbert", 1965).await;

    let (_, first) = app.send("GET", "/books", None).await;
    assert_eq!(first.as_array().unwrap().len(), 1);
    assert!(app.cache.keys().contains(&"bookshelf:cache:books:limit=10:offset=0".to_string()));

    app.create("Emma", "Austen", 1815).await;

    let (_, second) = app.send("GET", "/books", None).await;
    let titles: Vec<&str> = second
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Dune", "Emma"]);
}

#[tokio::test]
async fn test_list_pagination() {
    let app = TestApp::new();
    for title in ["A", "B", "C", "D"] {
        app.create(title, "Author", 2000).await;
    }

    let (_, page) = app.send("GET", "/books?limit=2&offset=1", None).await;
    let titles: Vec<&str> = page
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["B", "C"]);
}

#[tokio::test]
async fn test_list_bad_pagination_behaves_as_omitted() {
    let app = TestApp::new();
    for i in 1..=12 {
        app.create(&format!("Book {i}"), "Author", 2000).await;
    }

    let (_, omitted) = app.send("GET", "/books", None).await;
    assert_eq!(omitted.as_array().unwrap().len(), 10);

    for uri in [
        "/books?limit=-1",
        "/books?limit=abc",
        "/books?limit=0",
        "/books?offset=-5",
        "/books?offset=xyz",
        "/books?limit=abc&offset=-1",
    ] {
        let (status, json) = app.send("GET", uri, None).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(json, omitted, "{uri}");
    }
}

#[tokio::test]
async fn test_list_repeated_params_use_first_value() {
    let app = TestApp::new();
    for i in 1..=8 {
        app.create(&format!("Book {i}"), "Author", 2000).await;
    }

    let (_, first_limit) = app.send("GET", "/books?limit=5", None).await;
    let (status, repeated) = app.send("GET", "/books?limit=5&limit=7", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(repeated, first_limit);
    assert_eq!(repeated.as_array().unwrap().len(), 5);

    let (_, first_offset) = app.send("GET", "/books?offset=1", None).await;
    let (status, repeated) = app.send("GET", "/books?offset=1&offset=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(repeated, first_offset);
    assert_eq!(repeated[0]["title"], "Book 2");

    let (status, json) = app.send("GET", "/books?limit=%FF", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 8);
}

#[tokio::test]
async fn test_list_store_failure() {
    let app = TestApp::new();
    app.repo.fail_all();

    let (status, json) = app.send("GET", "/books", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json, json!({"error": "Failed to fetch books"}));
}

// ============================================================================
// Get
// ============================================================================

#[tokio::test]
async fn test_get_unknown_and_non_numeric_ids() {
    let app = TestApp::new();

    for uri in ["/books/999", "/books/abc", "/books/1.5"] {
        let (status, json) = app.send("GET", uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(json, json!({"error": "Book not found"}));
    }
}

#[tokio::test]
async fn test_undecodable_id_is_json_404() {
    let app = TestApp::new();
    app.create("Dune", "Herbert", 1965).await;
    let body = r#"{"title":"Dune","author":"Herbert","year":1965}"#;

    for (method, body) in [("GET", None), ("DELETE", None), ("PUT", Some(body))] {
        let (status, json) = app.send(method, "/books/%FF", body).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{method}");
        assert_eq!(json, json!({"error": "Book not found"}), "{method}");
    }
    assert_eq!(app.repo.count(), 1);
}

#[tokio::test]
async fn test_get_populates_cache() {
    let app = TestApp::new();
    let created = app.create("Dune", "Herbert", 1965).await;

    let (status, json) = app.send("GET", "/books/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, created);
    assert!(app.cache.keys().contains(&"bookshelf:cache:book:1".to_string()));
}

// ============================================================================
// Update
// ============================================================================

#[tokio::test]
async fn test_update_then_get_returns_new_values() {
    let app = TestApp::new();
    app.create("Dune", "Herbert", 1965).await;
    app.send("GET", "/books/1", None).await;
    app.send("GET", "/books", None).await;

    let (status, json) = app
        .send("PUT", "/books/1", Some(r#"{"id":77,"title":"Dune","author":"Frank Herbert","year":1966}"#))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"id": 1, "title": "Dune", "author": "Frank Herbert", "year": 1966}));

    let (_, fetched) = app.send("GET", "/books/1", None).await;
    assert_eq!(fetched["year"], 1966);
    assert_eq!(fetched["author"], "Frank Herbert");

    let (_, listed) = app.send("GET", "/books", None).await;
    assert_eq!(listed[0]["year"], 1966);

    assert_eq!(app.publisher.messages().last().unwrap(), "Book updated: Dune");
}

#[tokio::test]
async fn test_update_reads_store_once() {
    let app = TestApp::new();
    app.create("Dune", "Herbert", 1965).await;

    let reads = app.repo.reads();
    let (status, _) = app
        .send("PUT", "/books/1", Some(r#"{"title":"Dune","author":"Herbert","year":1966}"#))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.repo.reads(), reads + 1);
}

#[tokio::test]
async fn test_update_missing_book_is_404_before_body_checks() {
    let app = TestApp::new();

    for body in ["garbage", r#"{"title":"","author":"","year":0}"#] {
        let (status, json) = app.send("PUT", "/books/42", Some(body)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json, json!({"error": "Book not found"}));
    }
    assert!(app.publisher.messages().is_empty());
}

#[tokio::test]
async fn test_update_existing_book_with_bad_body() {
    let app = TestApp::new();
    app.create("Dune", "Herbert", 1965).await;

    let (status, json) = app.send("PUT", "/books/1", Some("{")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({"error": "Invalid JSON data"}));

    let (status, json) = app
        .send("PUT", "/books/1", Some(r#"{"title":"Dune","author":"Herbert","year":0}"#))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({"error": "Year must be a valid positive number"}));

    let (_, fetched) = app.send("GET", "/books/1", None).await;
    assert_eq!(fetched["year"], 1965);
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn test_delete_then_get_is_404_and_list_excludes_it() {
    let app = TestApp::new();
    app.create("Dune", "Herbert", 1965).await;
    app.create("Emma", "Austen", 1815).await;
    app.send("GET", "/books", None).await;
    app.send("GET", "/books/1", None).await;

    let (status, json) = app.send("DELETE", "/books/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"message": "Book deleted successfully"}));

    let (status, _) = app.send("GET", "/books/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, listed) = app.send("GET", "/books", None).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["title"], "Emma");

    assert_eq!(app.publisher.messages().last().unwrap(), "Book deleted: 1");
}

#[tokio::test]
async fn test_delete_missing_book() {
    let app = TestApp::new();
    let (status, json) = app.send("DELETE", "/books/8", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, json!({"error": "Book not found"}));
}

// ============================================================================
// Full scenario
// ============================================================================

#[tokio::test]
async fn test_dune_lifecycle() {
    let app = TestApp::new();

    let (status, created) = app
        .send("POST", "/books", Some(r#"{"title":"Dune","author":"Herbert","year":1965}"#))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();
    let uri = format!("/books/{id}");

    let (status, fetched) = app.send("GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, updated) = app
        .send("PUT", &uri, Some(r#"{"title":"Dune","author":"Herbert","year":1966}"#))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["year"], 1966);

    let (status, _) = app.send("DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.send("GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert_eq!(
        app.publisher.messages(),
        vec![
            "New book added: Dune".to_string(),
            "Book updated: Dune".to_string(),
            format!("Book deleted: {id}"),
        ]
    );
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_liveness() {
    let app = TestApp::new();
    let (status, _) = app.send("GET", "/live", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_health_reports_dependencies() {
    let app = TestApp::with_health_checks(vec![
        Arc::new(StaticHealthCheck {
            name: "database",
            status: HealthStatus::Healthy,
        }),
        Arc::new(StaticHealthCheck {
            name: "cache",
            status: HealthStatus::Degraded("disabled".to_string()),
        }),
    ]);

    let (status, json) = app.send("GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["database"], "healthy");
    assert_eq!(json["checks"]["cache"], "degraded");

    let (status, _) = app.send("GET", "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_not_ready_when_store_is_down() {
    let app = TestApp::with_health_checks(vec![Arc::new(StaticHealthCheck {
        name: "database",
        status: HealthStatus::Unhealthy("connection refused".to_string()),
    })]);

    let (status, _) = app.send("GET", "/ready", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (_, json) = app.send("GET", "/health", None).await;
    assert_eq!(json["status"], "unhealthy");
}
