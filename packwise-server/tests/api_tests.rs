use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use packwise_server::api;
use packwise_server::store::SqliteCatalogStore;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::NamedTempFile;
use tower::ServiceExt;

async fn test_router() -> (Router, NamedTempFile) {
    let temp_file = NamedTempFile::new().expect("temp file");
    let store = SqliteCatalogStore::open(temp_file.path())
        .await
        .expect("open store");
    (api::router(Arc::new(store)), temp_file)
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(match body {
            Some(v) => Body::from(v.to_string()),
            None => Body::empty(),
        })
        .expect("request");

    let response = router.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

#[tokio::test]
async fn healthz_is_ok() {
    let (router, _guard) = test_router().await;
    let (status, _) = send(&router, "GET", "/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn add_then_list_pack_sizes() {
    let (router, _guard) = test_router().await;

    for size in [250, 1000, 500] {
        let (status, body) =
            send(&router, "POST", "/api/v1/packs", Some(json!({"size": size}))).await;
        assert_eq!(status, StatusCode::OK, "body: {body}");
    }

    let (status, body) = send(&router, "GET", "/api/v1/packs", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"sizes": [1000, 500, 250]}));
}

#[tokio::test]
async fn duplicate_add_conflicts() {
    let (router, _guard) = test_router().await;

    send(&router, "POST", "/api/v1/packs", Some(json!({"size": 250}))).await;
    let (status, body) =
        send(&router, "POST", "/api/v1/packs", Some(json!({"size": 250}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let (router, _guard) = test_router().await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/packs")
        .body(Body::from("not json"))
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (status, body) =
        send(&router, "POST", "/api/v1/packs", Some(json!({"amount": 3}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn zero_size_is_bad_request() {
    let (router, _guard) = test_router().await;

    let (status, body) =
        send(&router, "POST", "/api/v1/packs", Some(json!({"size": 0}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
}

#[tokio::test]
async fn remove_pack_size() {
    let (router, _guard) = test_router().await;

    send(&router, "POST", "/api/v1/packs", Some(json!({"size": 250}))).await;

    let (status, _) =
        send(&router, "DELETE", "/api/v1/packs", Some(json!({"size": 250}))).await;
    assert_eq!(status, StatusCode::OK);

    // removing it again is a distinguishable not-found
    let (status, body) =
        send(&router, "DELETE", "/api/v1/packs", Some(json!({"size": 250}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn calculate_requires_valid_quantity() {
    let (router, _guard) = test_router().await;

    let (status, _) = send(&router, "GET", "/api/v1/calculate", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&router, "GET", "/api/v1/calculate?quantity=-5", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&router, "GET", "/api/v1/calculate?quantity=abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_query_string_keeps_json_error_shape() {
    let (router, _guard) = test_router().await;

    // broken percent-encoding must produce the uniform error body, not a
    // plain-text extractor rejection
    let (status, body) = send(&router, "GET", "/api/v1/calculate?quantity=%zz", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(&router, "GET", "/api/v1/calculate?amount=5", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn calculate_against_seeded_catalog() {
    let (router, _guard) = test_router().await;

    for size in [250, 500, 1000, 2000, 5000] {
        send(&router, "POST", "/api/v1/packs", Some(json!({"size": size}))).await;
    }

    let (status, body) = send(&router, "GET", "/api/v1/calculate?quantity=12001", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "quantity": 12001,
            "packs": {"5000": 2, "2000": 1, "250": 1}
        })
    );

    let (status, body) = send(&router, "GET", "/api/v1/calculate?quantity=251", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["packs"], json!({"500": 1}));
}

#[tokio::test]
async fn calculate_with_empty_catalog_is_not_an_error() {
    let (router, _guard) = test_router().await;

    let (status, body) = send(&router, "GET", "/api/v1/calculate?quantity=500", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"quantity": 500, "packs": {}}));
}

#[tokio::test]
async fn calculate_with_zero_quantity_ships_nothing() {
    let (router, _guard) = test_router().await;

    send(&router, "POST", "/api/v1/packs", Some(json!({"size": 250}))).await;
    let (status, body) = send(&router, "GET", "/api/v1/calculate?quantity=0", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["packs"], json!({}));
}
