// staff-client/tests/api_integration.rs
// Integration tests against an in-process mock of the directory API

use axum::{
    Json, Router,
    extract::{RawQuery, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
};
use serde_json::json;
use staff_client::{
    ClientConfig, ClientError, DirectoryApi, FetchAnchor, FilterQuery, ListQuery, LoginRequest,
    MemorySessionStore, NetworkDirectoryApi, SessionStore,
};
use parking_lot::Mutex;
use std::sync::Arc;

const VALID_TOKEN: &str = "token-123";
const FORBIDDEN_TOKEN: &str = "token-403";
const FAILING_TOKEN: &str = "token-500";

#[derive(Default)]
struct MockState {
    queries: Mutex<Vec<Option<String>>>,
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

async fn list_employees(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> (StatusCode, Json<serde_json::Value>) {
    state.queries.lock().push(query);
    match bearer(&headers).as_deref() {
        Some(VALID_TOKEN) => {}
        Some(FORBIDDEN_TOKEN) => {
            return (StatusCode::FORBIDDEN, Json(json!({ "error": "Unauthorized" })));
        }
        Some(FAILING_TOKEN) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Database unavailable" })),
            );
        }
        _ => return (StatusCode::OK, Json(json!({ "error": "Unauthorized" }))),
    }
    (StatusCode::OK, Json(json!({
        "employeeData": [
            { "name": "Ana", "status": "Active", "designation": "Lead", "department": "Ops", "role": "Admin" },
            { "name": "Bo", "status": "Inactive", "designation": "Dev", "department": "Ops", "role": "User" }
        ],
        "paginationData": { "currentPage": 2, "limit": 8, "total": 10, "numOfPages": 2 }
    })))
}

async fn filter_options(headers: HeaderMap) -> (StatusCode, Json<serde_json::Value>) {
    if bearer(&headers).is_none() {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Unauthorized", "statusCode": 401 })),
        );
    }
    (
        StatusCode::OK,
        Json(json!({ "designation": ["Lead", "Dev"], "department": ["Ops"] })),
    )
}

async fn login(Json(body): Json<serde_json::Value>) -> (StatusCode, Json<serde_json::Value>) {
    if body["username"] == "abc_12" && body["password"] == "a1@" {
        (StatusCode::CREATED, Json(json!({ "access_token": VALID_TOKEN })))
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid credentials" })),
        )
    }
}

async fn register(Json(body): Json<serde_json::Value>) -> (StatusCode, Json<serde_json::Value>) {
    match body["username"].as_str() {
        Some("taken") => (
            StatusCode::CONFLICT,
            Json(json!({ "message": "Username already exists" })),
        ),
        Some("broken") => (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({}))),
        _ => (StatusCode::CREATED, Json(json!({ "message": "User created" }))),
    }
}

async fn spawn_mock() -> (String, Arc<MockState>) {
    let state = Arc::new(MockState::default());
    let app = Router::new()
        .route("/employee/all", get(list_employees))
        .route("/employee/allfilter", get(filter_options))
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), state)
}

fn api(base_url: &str, session: Arc<MemorySessionStore>) -> NetworkDirectoryApi {
    NetworkDirectoryApi::new(ClientConfig::new(base_url).with_timeout(5), session).unwrap()
}

#[tokio::test]
async fn test_list_sends_bearer_and_composed_query() {
    let (base_url, state) = spawn_mock().await;
    let session = Arc::new(MemorySessionStore::with_token(VALID_TOKEN));
    let client = api(&base_url, session);

    let query = ListQuery::new(FilterQuery::new("Ops", ""), "an a", FetchAnchor::Page(2));
    let page = client.list_employees(&query).await.unwrap();

    assert_eq!(page.employee_data.len(), 2);
    assert_eq!(page.employee_data[0].name, "Ana");
    assert_eq!(page.pagination_data.current_page, 2);

    let queries = state.queries.lock();
    assert_eq!(queries.len(), 1);
    let raw = queries[0].as_deref().unwrap();
    assert!(raw.starts_with("department=Ops&name=an"), "unexpected query: {raw}");
    assert!(raw.ends_with("&page=2"), "unexpected query: {raw}");
    assert!(!raw.contains("designation"));
}

#[tokio::test]
async fn test_list_without_page_omits_parameter() {
    let (base_url, state) = spawn_mock().await;
    let client = api(&base_url, Arc::new(MemorySessionStore::with_token(VALID_TOKEN)));

    let query = ListQuery::new(FilterQuery::default(), "", FetchAnchor::ResetToFirstPage);
    client.list_employees(&query).await.unwrap();

    let queries = state.queries.lock();
    assert!(queries[0].as_deref().unwrap_or("").is_empty());
}

#[tokio::test]
async fn test_list_unauthorized_body_is_an_error() {
    let (base_url, _state) = spawn_mock().await;
    let client = api(&base_url, Arc::new(MemorySessionStore::with_token("stale")));

    let query = ListQuery::new(FilterQuery::default(), "", FetchAnchor::Page(1));
    let err = client.list_employees(&query).await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized));
}

#[tokio::test]
async fn test_list_unauthorized_body_wins_over_status() {
    let (base_url, _state) = spawn_mock().await;
    let query = ListQuery::new(FilterQuery::default(), "", FetchAnchor::Page(1));

    let client = api(&base_url, Arc::new(MemorySessionStore::with_token(FORBIDDEN_TOKEN)));
    let err = client.list_employees(&query).await.unwrap_err();
    assert!(err.is_unauthorized(), "unexpected error: {err:?}");

    let client = api(&base_url, Arc::new(MemorySessionStore::with_token(FAILING_TOKEN)));
    let err = client.list_employees(&query).await.unwrap_err();
    assert!(!err.is_unauthorized());
    assert_eq!(err.server_message(), Some("Database unavailable"));
}

#[tokio::test]
async fn test_filter_options_status_401() {
    let (base_url, _state) = spawn_mock().await;
    let client = api(&base_url, Arc::new(MemorySessionStore::new()));
    assert!(client.filter_options().await.unwrap_err().is_unauthorized());

    let client = api(&base_url, Arc::new(MemorySessionStore::with_token(VALID_TOKEN)));
    let options = client.filter_options().await.unwrap();
    assert_eq!(options.designation, vec!["Lead", "Dev"]);
    assert_eq!(options.department, vec!["Ops"]);
}

#[tokio::test]
async fn test_login_returns_access_token() {
    let (base_url, _state) = spawn_mock().await;
    let session = Arc::new(MemorySessionStore::new());
    let client = api(&base_url, session.clone());

    let response = client
        .login(&LoginRequest::new("abc_12", "a1@"))
        .await
        .unwrap();
    assert_eq!(response.access_token, VALID_TOKEN);
    // Persisting the token is the caller's job
    assert!(!session.is_authenticated());

    let err = client
        .login(&LoginRequest::new("abc_12", "wrong1@"))
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn test_register_surfaces_server_message() {
    let (base_url, _state) = spawn_mock().await;
    let client = api(&base_url, Arc::new(MemorySessionStore::new()));

    let ok = client
        .register(&LoginRequest::new("fresh", "a1@"))
        .await
        .unwrap();
    assert_eq!(ok.message.as_deref(), Some("User created"));

    let err = client
        .register(&LoginRequest::new("taken", "a1@"))
        .await
        .unwrap_err();
    assert_eq!(err.server_message(), Some("Username already exists"));

    let err = client
        .register(&LoginRequest::new("broken", "a1@"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 500, message: None }));
}

#[tokio::test]
async fn test_transport_failure_is_http_error() {
    // Nothing listens on this port
    let client = api("http://127.0.0.1:9", Arc::new(MemorySessionStore::new()));
    let err = client.filter_options().await.unwrap_err();
    assert!(matches!(err, ClientError::Http(_)));
}
