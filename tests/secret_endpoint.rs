use std::sync::Arc;

use kagi::auth::{PostBodySecretParser, SecretParsers};
use kagi::core::models::InputLengthRestrictions;
use kagi::http::encoding::post_body_secret;
use kagi::http::server::routes;
use warp::http::StatusCode;

const MAX_BODY: usize = 1024;

fn parsers() -> Arc<SecretParsers> {
    Arc::new(
        SecretParsers::new()
            .with(PostBodySecretParser::new(InputLengthRestrictions::new(100, 100))),
    )
}

fn body_json(res: &warp::http::Response<warp::hyper::body::Bytes>) -> serde_json::Value {
    serde_json::from_slice(res.body()).unwrap()
}

#[tokio::test]
async fn form_secret_is_accepted() {
    let res = warp::test::request()
        .method("POST")
        .path("/client/v1/secret")
        .header("content-type", "application/x-www-form-urlencoded")
        .body("grant_type=client_credentials&client_id=app&client_secret=pw")
        .reply(&routes(parsers(), MAX_BODY))
        .await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        body_json(&res),
        serde_json::json!({ "client_id": "app", "type": "shared_secret" })
    );
}

#[tokio::test]
async fn json_secret_is_accepted() {
    let res = warp::test::request()
        .method("POST")
        .path("/client/v1/secret")
        .header("content-type", "application/json")
        .body(r#"{"client_id":"app","client_secret":"pw"}"#)
        .reply(&routes(parsers(), MAX_BODY))
        .await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(&res)["client_id"], "app");
    assert!(!String::from_utf8_lossy(res.body()).contains("pw"));
}

#[tokio::test]
async fn missing_secret_is_invalid_client() {
    let res = warp::test::request()
        .method("POST")
        .path("/client/v1/secret")
        .header("content-type", "application/json")
        .body(r#"{"client_id":"app""#)
        .reply(&routes(parsers(), MAX_BODY))
        .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(&res)["error"], "invalid_client");
}

#[tokio::test]
async fn oversized_body_is_invalid_client() {
    let padding = "x".repeat(MAX_BODY);
    let res = warp::test::request()
        .method("POST")
        .path("/client/v1/secret")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(format!("client_id=app&client_secret=pw&padding={}", padding))
        .reply(&routes(parsers(), MAX_BODY))
        .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn filter_extracts_nothing_for_an_empty_body() {
    let found = warp::test::request()
        .method("POST")
        .body("")
        .filter(&post_body_secret(parsers(), MAX_BODY))
        .await
        .unwrap();

    assert_eq!(found, None);
}

#[tokio::test]
async fn filter_extracts_the_secret() {
    let found = warp::test::request()
        .method("POST")
        .header("content-type", "application/json")
        .body(r#"{"client_id":"app","client_secret":" pw "}"#)
        .filter(&post_body_secret(parsers(), MAX_BODY))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(found.id.0, "app");
    assert_eq!(found.credential.0, " pw ");
}
