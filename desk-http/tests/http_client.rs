use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use desk_core::errors::{DeskError, ErrorKind};
use desk_core::transport::{ApiTransport, RequestConfig};
use desk_http::{ClientConfig, HttpClient};
use serde_json::{json, Value};
use std::collections::HashMap;

#[derive(Clone, Default)]
struct Hits {
    list: Arc<AtomicUsize>,
}

async fn list(
    State(hits): State<Hits>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    hits.list.fetch_add(1, Ordering::SeqCst);
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    Json(json!({
        "message": "ok",
        "data": [{"id": 1, "name": "Acme"}],
        "contentType": content_type,
        "query": query,
    }))
}

async fn create(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let trace = headers
        .get("x-trace")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    if body["name"] == "taken" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "Validation failed", "errors": {"name": ["Name already exists"]}})),
        );
    }
    (StatusCode::CREATED, Json(json!({"data": {"id": 9, "echo": body, "trace": trace}})))
}

async fn show(Path(id): Path<u64>) -> (StatusCode, Json<Value>) {
    match id {
        42 => (StatusCode::OK, Json(json!({"data": {"id": 42, "name": "Acme"}}))),
        500 => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"message": "An unexpected error occurred"})),
        ),
        _ => (StatusCode::NOT_FOUND, Json(json!({"message": "Organization not found"}))),
    }
}

async fn update(Path(id): Path<u64>, Json(body): Json<Value>) -> Json<Value> {
    Json(json!({"data": {"id": id, "echo": body}}))
}

async fn destroy(Path(_id): Path<u64>) -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn serve() -> (SocketAddr, Hits) {
    let hits = Hits::default();
    let router = Router::new()
        .route("/api/organizations", get(list).post(create))
        .route(
            "/api/organizations/{id}",
            get(show).put(update).delete(destroy),
        )
        .with_state(hits.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (addr, hits)
}

fn client_for(addr: SocketAddr) -> HttpClient {
    HttpClient::new(ClientConfig::new(&format!("http://{addr}/api")).unwrap()).unwrap()
}

fn desk(err: &anyhow::Error) -> &DeskError {
    DeskError::from_anyhow(err).expect("must be DeskError")
}

#[tokio::test]
async fn get_sends_json_content_type_and_query() {
    let (addr, _) = serve().await;
    let client = client_for(addr);

    let res = client
        .get("organizations", &[("page".to_string(), "2".to_string())])
        .await
        .unwrap();

    assert_eq!(res.status, 200);
    assert_eq!(res.body["contentType"], "application/json");
    assert_eq!(res.body["query"]["page"], "2");
    assert_eq!(res.data()[0]["name"], "Acme");
}

#[tokio::test]
async fn post_forwards_body_and_extra_headers() {
    let (addr, _) = serve().await;
    let client = client_for(addr);

    let res = client
        .post(
            "/organizations",
            &json!({"name": "Acme Inc"}),
            &RequestConfig::default().header("x-trace", "abc"),
        )
        .await
        .unwrap();

    assert_eq!(res.status, 201);
    assert_eq!(res.data()["echo"]["name"], "Acme Inc");
    assert_eq!(res.data()["trace"], "abc");
}

#[tokio::test]
async fn put_and_delete_succeed() {
    let (addr, _) = serve().await;
    let client = client_for(addr);

    let res = client
        .put("organizations/42", &json!({"name": "New"}), &RequestConfig::default())
        .await
        .unwrap();
    assert_eq!(res.data()["id"], 42);
    assert_eq!(res.data()["echo"]["name"], "New");

    let res = client.delete("organizations/42").await.unwrap();
    assert_eq!(res.status, 204);
    assert_eq!(res.body, Value::Null);
}

#[tokio::test]
async fn validation_rejection_carries_field_errors() {
    let (addr, _) = serve().await;
    let client = client_for(addr);

    let err = client
        .post("organizations", &json!({"name": "taken"}), &RequestConfig::default())
        .await
        .unwrap_err();

    let err = desk(&err);
    assert_eq!(err.kind, ErrorKind::BadRequest);
    assert!(err.is_validation());
    assert_eq!(err.field_errors()["name"], "Name already exists");
}

#[tokio::test]
async fn not_found_and_server_errors_are_classified() {
    let (addr, _) = serve().await;
    let client = client_for(addr);

    let err = client.get("organizations/7", &[]).await.unwrap_err();
    assert!(desk(&err).is_not_found());
    assert_eq!(desk(&err).message, "Organization not found");

    let err = client.get("organizations/500", &[]).await.unwrap_err();
    assert!(desk(&err).kind.is_server());
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(addr);
    let err = client.get("organizations", &[]).await.unwrap_err();
    assert_eq!(desk(&err).kind, ErrorKind::Network);
}

#[tokio::test]
async fn identical_concurrent_requests_are_not_deduplicated() {
    let (addr, hits) = serve().await;
    let client = client_for(addr);

    let (a, b) = tokio::join!(client.get("organizations", &[]), client.get("organizations", &[]));
    assert!(a.is_ok());
    assert!(b.is_ok());
    assert_eq!(hits.list.load(Ordering::SeqCst), 2);
}
