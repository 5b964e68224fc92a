//! Router tests that need no database.
//!
//! The pool points at a closed port, so anything that reaches a repository
//! fails while routing, extraction and health checks are still exercised.

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use shelf_integration_tests::{test_state, unreachable_pool};

fn app() -> axum::Router {
    shelf_admin::app(test_state(unreachable_pool()))
}

async fn send(request: Request<Body>) -> (StatusCode, String) {
    let response = app().oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("valid request")
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

#[tokio::test]
async fn test_health_is_ok() {
    let (status, body) = send(get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_readiness_reports_unreachable_database() {
    let (status, _) = send(get("/health/ready")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let (status, _) = send(get("/customers")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_numeric_product_id_is_rejected() {
    let (status, _) = send(get("/products/not-a-number")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_database_failure_hides_details() {
    let (status, body) = send(get("/products")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Internal server error");
}

#[tokio::test]
async fn test_attach_looks_up_product_first() {
    // The product lookup runs before the form is checked.
    let (status, _) = send(post_form("/products/1/tags", "tag_id=&name=")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_get_is_not_allowed_on_delete() {
    let (status, _) = send(get("/products/1/delete")).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}
