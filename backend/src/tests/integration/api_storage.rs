use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};

use crate::tests::{
    helpers::{body_bytes, body_json, multipart_upload},
    TestContext,
};
use atelier_shared::ImageAsset;

async fn upload(ctx: &TestContext, file_name: &str, bytes: &[u8]) -> ImageAsset {
    let response = ctx.send(multipart_upload(file_name, "image/png", bytes)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    serde_json::from_value(body_json(response).await).expect("Upload response is an image asset")
}

#[tokio::test]
async fn test_upload_returns_url_and_path() {
    let ctx = TestContext::new();
    let asset = upload(&ctx, "Front.PNG", b"\x89PNG fake").await;

    let path = asset.path.clone().expect("path is stored alongside the url");
    assert!(path.starts_with("images/"));
    assert!(path.ends_with(".png"));
    assert!(asset.url.starts_with("/api/v1/storage/o/images%2F"));
    assert!(asset.url.ends_with("?alt=media"));
    assert_eq!(asset.storage_path().as_deref(), Some(path.as_str()));

    assert!(ctx.upload_dir.path().join(&path).is_file());
}

#[tokio::test]
async fn test_download_serves_uploaded_bytes() {
    let ctx = TestContext::new();
    let asset = upload(&ctx, "side.png", b"side-view").await;

    let response = ctx
        .send(Request::builder().uri(&asset.url).body(Body::empty()).unwrap())
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
    assert_eq!(body_bytes(response).await, b"side-view".to_vec());
}

#[tokio::test]
async fn test_delete_object_twice() {
    let ctx = TestContext::new();
    let asset = upload(&ctx, "back.png", b"back-view").await;
    let uri = format!("/api/v1/storage/o/{}", asset.path.clone().unwrap());

    let delete = || Request::builder().method("DELETE").uri(&uri).body(Body::empty()).unwrap();

    let response = ctx.send(delete()).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = ctx.send(delete()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_empty_upload_rejected() {
    let ctx = TestContext::new();
    let response = ctx.send(multipart_upload("empty.png", "image/png", b"")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_oversized_upload_rejected() {
    let ctx = TestContext::with_upload_limit(64);
    let response = ctx.send(multipart_upload("big.png", "image/png", &[7u8; 4096])).await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_path_traversal_rejected() {
    let ctx = TestContext::new();
    let response = ctx
        .send(
            Request::builder()
                .method("DELETE")
                .uri("/api/v1/storage/o/images%2F..%2F..%2Fsecret")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
