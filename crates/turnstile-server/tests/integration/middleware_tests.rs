use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use turnstile_server::routes::BODY_LIMIT_BYTES;

use crate::integration::common::{body_json, json_post, setup_served_app};

fn is_json(response: &axum::http::Response<Body>) -> bool {
    response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}

#[tokio::test]
async fn oversized_body_with_content_length_returns_json_413() {
    let app = setup_served_app(Duration::from_secs(30), 4);
    let body = vec![b'a'; BODY_LIMIT_BYTES + 36 * 1024];

    let response = app
        .oneshot(
            Request::post("/signup")
                .header("content-type", "application/json")
                .header("content-length", body.len())
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(is_json(&response));
    let json = body_json(response).await;
    assert!(!json["message"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn oversized_body_without_content_length_has_same_shape() {
    let app = setup_served_app(Duration::from_secs(30), 4);
    let body = vec![b'a'; BODY_LIMIT_BYTES + 1];

    let response = app
        .oneshot(Request::post("/login").body(Body::from(body)).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(is_json(&response));
    assert!(body_json(response).await["message"].is_string());
}

#[tokio::test]
async fn body_under_limit_is_served() {
    let app = setup_served_app(Duration::from_secs(30), 4);

    let response = app
        .oneshot(json_post(
            "/signup",
            &serde_json::json!({"email": "a@b.com", "password": "secret"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn request_timeout_returns_json_408() {
    // Cost 12 hashing runs far longer than the 1 ms budget.
    let app = setup_served_app(Duration::from_millis(1), 12);

    let response = app
        .oneshot(json_post(
            "/signup",
            &serde_json::json!({"email": "a@b.com", "password": "secret"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    assert!(is_json(&response));
    let json = body_json(response).await;
    assert_eq!(json, serde_json::json!({"message": "Request Timeout"}));
}

#[tokio::test]
async fn wrong_method_returns_json_405() {
    let app = setup_served_app(Duration::from_secs(30), 4);

    let response = app
        .oneshot(Request::get("/signup").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert!(response.headers().contains_key("allow"));
    assert!(is_json(&response));
    let json = body_json(response).await;
    assert_eq!(json, serde_json::json!({"message": "Method Not Allowed"}));
}

#[tokio::test]
async fn handler_errors_pass_through_unchanged() {
    let app = setup_served_app(Duration::from_secs(30), 4);

    let response = app
        .oneshot(json_post("/login", &serde_json::json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json, serde_json::json!({"message": "Email is missing."}));
}
