//! Real HTTP transport against an in-process axum server.

use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use qore_sdk::transport::{ApiRequest, Endpoint, HttpTransport, Method, Transport};
use qore_sdk::QoreError;
use serde_json::{json, Value};
use std::collections::HashMap;
use uuid::Uuid;

const ROWS: &str = "/orgs/org1/projects/proj1/tables/task/rows";

async fn insert_row(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    if auth != "Bearer jwt" {
        return (StatusCode::UNAUTHORIZED, Json(json!({"message": "missing token"})));
    }
    (StatusCode::OK, Json(json!({"id": Uuid::new_v4().to_string(), "echo": body})))
}

async fn get_row(Path(id): Path<String>, Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    Json(json!({"id": id, "query": query}))
}

async fn delete_row() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn broken() -> (StatusCode, Json<Value>) {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"message": "exploded"})))
}

async fn bare_failure() -> StatusCode {
    StatusCode::BAD_GATEWAY
}

async fn serve() -> String {
    let app = Router::new()
        .route(ROWS, post(insert_row))
        .route(&format!("{}/:id", ROWS), get(get_row).delete(delete_row))
        .route("/broken", get(broken))
        .route("/bare", get(bare_failure));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn posts_json_with_authorization() {
    let transport = HttpTransport::new(Endpoint::fixed(serve().await));
    let request = ApiRequest::new(Method::Post, ROWS)
        .body(json!({"title": "a"}))
        .token(Some("Bearer jwt".into()));
    let value = transport.call(request).await.unwrap();
    assert!(Uuid::parse_str(value["id"].as_str().unwrap()).is_ok());
    assert_eq!(value["echo"], json!({"title": "a"}));
}

#[tokio::test]
async fn missing_token_yields_status_and_server_message() {
    let transport = HttpTransport::new(Endpoint::fixed(serve().await));
    let err = transport
        .call(ApiRequest::new(Method::Post, ROWS).body(json!({})))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.to_string(), "missing token");
}

#[tokio::test]
async fn query_and_empty_bodies() {
    let transport = HttpTransport::new(Endpoint::fixed(serve().await));
    let row = transport
        .call(ApiRequest::new(Method::Get, format!("{}/r1", ROWS)).page(Some(5), Some(0)))
        .await
        .unwrap();
    assert_eq!(row["id"], "r1");
    assert_eq!(row["query"], json!({"limit": "5", "offset": "0"}));

    let deleted = transport
        .call(ApiRequest::new(Method::Delete, format!("{}/r1", ROWS)))
        .await
        .unwrap();
    assert_eq!(deleted, Value::Null);
}

#[tokio::test]
async fn server_errors_map_to_transport_errors() {
    let transport = HttpTransport::new(Endpoint::fixed(serve().await));
    let err = transport.call(ApiRequest::new(Method::Get, "/broken")).await.unwrap_err();
    assert!(matches!(err, QoreError::Transport { status: Some(500), ref message } if message == "exploded"));

    let err = transport.call(ApiRequest::new(Method::Get, "/bare")).await.unwrap_err();
    assert_eq!(err.to_string(), "Request failed with status code 502");
}

#[tokio::test]
async fn endpoint_change_applies_to_next_call() {
    let endpoint = Endpoint::fixed("http://127.0.0.1:1");
    let transport = HttpTransport::new(endpoint.clone());
    let err = transport.call(ApiRequest::new(Method::Get, "/bare")).await.unwrap_err();
    assert_eq!(err.status(), None);

    endpoint.set(serve().await);
    assert_eq!(transport.endpoint(), endpoint.resolve());
    let err = transport.call(ApiRequest::new(Method::Get, "/bare")).await.unwrap_err();
    assert_eq!(err.status(), Some(502));
}
