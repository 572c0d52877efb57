use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use portfolio_backend::{
    build_router,
    infrastructure::{
        AppConfig, Collection, DatabaseManager, DocumentStore, MemoryDocumentStore, StorageError,
        StoredDocument,
    },
    AppState,
};
use serde_json::{json, Map, Value};
use tower::ServiceExt;

/// 所有操作都失败的存储，模拟数据库不可达
struct UnreachableStore;

#[async_trait]
impl DocumentStore for UnreachableStore {
    async fn insert_one(
        &self,
        _collection: Collection,
        _document: Map<String, Value>,
    ) -> Result<String, StorageError> {
        Err(StorageError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn find(
        &self,
        _collection: Collection,
        _filter: &Map<String, Value>,
        _limit: Option<u64>,
    ) -> Result<Vec<StoredDocument>, StorageError> {
        Err(StorageError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, StorageError> {
        Err(StorageError::Database(sqlx::Error::PoolTimedOut))
    }

    fn name(&self) -> &str {
        "unreachable"
    }
}

fn configured() -> AppConfig {
    AppConfig {
        database_url: Some("postgres://localhost/postgres".to_string()),
        database_name: Some("portfolio".to_string()),
        ..AppConfig::default()
    }
}

fn memory_app() -> (Router, Arc<MemoryDocumentStore>) {
    let store = Arc::new(MemoryDocumentStore::new("portfolio"));
    let db = DatabaseManager::new(store.clone());
    (build_router(AppState::new(db, &configured())), store)
}

fn unreachable_app() -> Router {
    let db = DatabaseManager::new(Arc::new(UnreachableStore));
    build_router(AppState::new(db, &configured()))
}

fn unconfigured_app() -> Router {
    build_router(AppState::new(
        DatabaseManager::unavailable(),
        &AppConfig::default(),
    ))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn sample_project(title: &str) -> Value {
    json!({
        "title": title,
        "description": "A project worth showing",
        "tech_stack": ["rust", "axum", "postgres"],
        "repo_url": "https://github.com/example/portfolio",
        "demo_url": "https://portfolio.example.com"
    })
}

fn loc_fields(body: &Value) -> Vec<String> {
    body["detail"]
        .as_array()
        .unwrap()
        .iter()
        .map(|issue| issue["loc"].as_array().unwrap().last().unwrap().as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_static_messages() {
    let (app, _) = memory_app();

    let (status, body) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Hello from FastAPI Backend!"}));

    let (status, body) = send(&app, get("/api/hello")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Hello from the backend API!"}));
}

#[tokio::test]
async fn test_create_message() {
    let (app, store) = memory_app();

    let payload = json!({
        "name": "Al",
        "email": "a@b.com",
        "subject": "Hi",
        "message": "hello there"
    });
    let (status, body) = send(&app, post_json("/api/messages", &payload)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "received");
    let id = body["id"].as_str().unwrap();
    assert!(!id.is_empty());

    let stored = store
        .find(Collection::Message, &Map::new(), None)
        .await
        .unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, id);
    assert_eq!(Value::Object(stored[0].fields.clone()), payload);
}

#[tokio::test]
async fn test_message_length_rejected_without_write() {
    let (app, store) = memory_app();

    for body_text in ["hey".to_string(), "x".repeat(5001)] {
        let payload = json!({
            "name": "Al",
            "email": "a@b.com",
            "subject": "Hi",
            "message": body_text
        });
        let (status, body) = send(&app, post_json("/api/messages", &payload)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(loc_fields(&body), vec!["message".to_string()]);
    }

    let stored = store
        .find(Collection::Message, &Map::new(), None)
        .await
        .unwrap();
    assert!(stored.is_empty());
}

#[tokio::test]
async fn test_message_lists_every_invalid_field() {
    let (app, _) = memory_app();

    let payload = json!({
        "name": "A",
        "email": "nope",
        "subject": "S",
        "message": "hi"
    });
    let (status, body) = send(&app, post_json("/api/messages", &payload)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        loc_fields(&body),
        vec!["email", "message", "name", "subject"]
    );
    assert_eq!(body["detail"][0]["loc"][0], "body");
}

#[tokio::test]
async fn test_malformed_and_incomplete_payloads() {
    let (app, _) = memory_app();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/projects")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["type"], "json_invalid");

    let (status, body) = send(&app, post_json("/api/projects", &json!({"title": "Only title"}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["loc"], json!(["body", "description"]));
    assert_eq!(body["detail"][0]["type"], "missing");

    let (status, body) = send(
        &app,
        post_json("/api/projects", &json!({"title": 1, "description": "d"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["loc"], json!(["body", "title"]));
    assert_eq!(body["detail"][0]["type"], "type_error");
}

#[tokio::test]
async fn test_empty_message_lists_every_missing_field() {
    let (app, store) = memory_app();

    let (status, body) = send(&app, post_json("/api/messages", &json!({}))).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        loc_fields(&body),
        vec!["email", "message", "name", "subject"]
    );
    for issue in body["detail"].as_array().unwrap() {
        assert_eq!(issue["type"], "missing");
    }

    let stored = store
        .find(Collection::Message, &Map::new(), None)
        .await
        .unwrap();
    assert!(stored.is_empty());
}

#[tokio::test]
async fn test_type_and_constraint_errors_reported_together() {
    let (app, _) = memory_app();

    let payload = json!({
        "title": "Mixed",
        "description": 42,
        "tech_stack": "rust",
        "repo_url": "not a url"
    });
    let (status, body) = send(&app, post_json("/api/projects", &payload)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        loc_fields(&body),
        vec!["description", "repo_url", "tech_stack"]
    );
}

#[tokio::test]
async fn test_project_round_trip() {
    let (app, _) = memory_app();

    let project = sample_project("Portfolio");
    let (status, created) = send(&app, post_json("/api/projects", &project)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["status"], "created");

    let (status, body) = send(&app, get("/api/projects?limit=100")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);

    let mut expected = project.as_object().unwrap().clone();
    expected.insert("id".to_string(), created["id"].clone());
    assert_eq!(body["items"][0], Value::Object(expected));
}

#[tokio::test]
async fn test_project_defaults_and_invalid_url() {
    let (app, _) = memory_app();

    let (status, created) = send(
        &app,
        post_json("/api/projects", &json!({"title": "Bare", "description": "No links"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, get("/api/projects")).await;
    assert_eq!(
        body["items"][0],
        json!({"id": created["id"], "title": "Bare", "description": "No links", "tech_stack": []})
    );

    let mut bad = sample_project("Bad link");
    bad["image_url"] = json!("not a url");
    let (status, body) = send(&app, post_json("/api/projects", &bad)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(loc_fields(&body), vec!["image_url".to_string()]);
}

#[tokio::test]
async fn test_non_http_links_rejected_without_write() {
    let (app, store) = memory_app();

    for link in ["javascript:alert(1)", "ftp://files.example.com/x", "mailto:a@b.com"] {
        let mut project = sample_project("Sneaky");
        project["demo_url"] = json!(link);
        let (status, body) = send(&app, post_json("/api/projects", &project)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{link}");
        assert_eq!(loc_fields(&body), vec!["demo_url".to_string()]);
    }

    let stored = store
        .find(Collection::Project, &Map::new(), None)
        .await
        .unwrap();
    assert!(stored.is_empty());
}

#[tokio::test]
async fn test_project_limit() {
    let (app, _) = memory_app();

    for i in 0..5 {
        let (status, _) = send(&app, post_json("/api/projects", &sample_project(&format!("p{i}")))).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(&app, get("/api/projects?limit=2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(body["items"].as_array().unwrap().len(), 2);

    let (_, body) = send(&app, get("/api/projects")).await;
    assert_eq!(body["count"], 5);

    let (_, body) = send(&app, get("/api/projects?limit=0")).await;
    assert_eq!(body["count"], 5);
}

#[tokio::test]
async fn test_invalid_limit() {
    let (app, _) = memory_app();

    let (status, body) = send(&app, get("/api/projects?limit=-1")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["loc"], json!(["query", "limit"]));

    let (status, body) = send(&app, get("/api/projects?limit=many")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["loc"], json!(["query"]));
}

#[tokio::test]
async fn test_repeated_reads_return_same_set() {
    let (app, _) = memory_app();

    for title in ["one", "two", "three"] {
        send(&app, post_json("/api/projects", &sample_project(title))).await;
    }

    let sorted_items = |body: &Value| {
        let mut items = body["items"].as_array().unwrap().clone();
        items.sort_by_key(|item| item["id"].as_str().unwrap().to_string());
        items
    };

    let (_, first) = send(&app, get("/api/projects")).await;
    let (_, second) = send(&app, get("/api/projects")).await;
    assert_eq!(sorted_items(&first), sorted_items(&second));
}

#[tokio::test]
async fn test_storage_failure_returns_500() {
    let app = unreachable_app();

    let (status, body) = send(&app, post_json("/api/projects", &sample_project("p"))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], sqlx::Error::PoolTimedOut.to_string());

    let (status, _) = send(&app, get("/api/projects")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_unconfigured_database_returns_500() {
    let app = unconfigured_app();

    let payload = json!({
        "name": "Al",
        "email": "a@b.com",
        "subject": "Hi",
        "message": "hello there"
    });
    let (status, body) = send(&app, post_json("/api/messages", &payload)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["detail"],
        "Database not available. Check DATABASE_URL and DATABASE_NAME environment variables."
    );
}

#[tokio::test]
async fn test_diagnostics_never_fail() {
    let (status, body) = send(&unreachable_app(), get("/test")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["backend"], "✅ Running");
    assert_eq!(body["connection_status"], "Connected");
    let database = body["database"].as_str().unwrap();
    assert!(database.starts_with("⚠️  Connected but Error: "));
    let detail = database.trim_start_matches("⚠️  Connected but Error: ");
    assert!(detail.chars().count() <= 50);

    let (status, body) = send(&unconfigured_app(), get("/test")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "⚠️  Available but not initialized");
    assert_eq!(body["database_url"], "❌ Not Set");
    assert_eq!(body["database_name"], "❌ Not Set");
    assert_eq!(body["collections"], json!([]));
}

#[tokio::test]
async fn test_diagnostics_lists_collections() {
    let (app, _) = memory_app();
    send(&app, post_json("/api/projects", &sample_project("p"))).await;

    let (status, body) = send(&app, get("/test")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "✅ Connected & Working");
    assert_eq!(body["collections"], json!(["project"]));
    assert_eq!(body["database_url"], "✅ Set");
    assert_eq!(body["database_name"], "✅ Set");
}

#[tokio::test]
async fn test_cors_allows_any_origin_with_credentials() {
    let (app, _) = memory_app();

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/projects")
        .header(header::ORIGIN, "https://portfolio.example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let headers = response.headers();

    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://portfolio.example.com"
    );
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
}
