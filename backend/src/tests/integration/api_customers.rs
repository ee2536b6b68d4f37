use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::NaiveDate;
use serde_json::json;
use uuid::Uuid;

use atelier_shared::{Customer, ImageAsset};

use crate::tests::{helpers::body_json, TestContext};

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn fetch(ctx: &TestContext, id: &str) -> Customer {
    let response = ctx.send(get_request(&format!("/api/v1/customers/{}", id))).await;
    assert_eq!(response.status(), StatusCode::OK);
    serde_json::from_value(body_json(response).await).expect("Response is a customer")
}

#[tokio::test]
async fn test_health_endpoint() {
    let ctx = TestContext::new();
    let response = ctx
        .send(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "healthy");
}

#[tokio::test]
async fn test_malformed_identifier_rejected() {
    let ctx = TestContext::new();
    let response = ctx
        .send(
            Request::builder()
                .uri("/api/v1/customers/not%20an%20id")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_update_identifier_mismatch() {
    let ctx = TestContext::new();
    let record = json!({
        "id": "c-2",
        "customer_name": "Sami",
        "phone_number": "555-0100",
        "images": [],
        "deadline": null
    });

    let response = ctx.send(json_request("PUT", "/api/v1/customers/c-1", record)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_requires_name() {
    let ctx = TestContext::new();
    let payload = json!({
        "id": "bad id",
        "customer_name": "  ",
        "phone_number": "555-0100",
        "deadline": null
    });

    let response = ctx.send(json_request("POST", "/api/v1/customers", payload)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["details"]["customer_name"].is_array());
    assert!(body["details"]["id"].is_array());
}

#[tokio::test]
async fn test_customer_round_trip() {
    let Some(ctx) = TestContext::with_database().await else {
        return;
    };
    let id = format!("c-{}", Uuid::new_v4());

    let created = ctx
        .send(json_request(
            "POST",
            "/api/v1/customers",
            json!({
                "id": id,
                "customer_name": "Layla Haddad",
                "phone_number": "+971 50 123 4567",
                "images": [{ "url": "/api/v1/storage/o/images%2Ffront.jpg?alt=media", "path": "images/front.jpg" }],
                "deadline": "2026-12-01"
            }),
        ))
        .await;
    assert_eq!(created.status(), StatusCode::CREATED);

    let mut record = fetch(&ctx, &id).await;
    assert_eq!(record.customer_name, "Layla Haddad");
    assert_eq!(record.deadline, NaiveDate::from_ymd_opt(2026, 12, 1));
    assert_eq!(record.images, vec![ImageAsset::new("/api/v1/storage/o/images%2Ffront.jpg?alt=media", "images/front.jpg")]);

    record.images = vec![ImageAsset::new("/api/v1/storage/o/images%2Fside.jpg?alt=media", "images/side.jpg")];
    let uri = format!("/api/v1/customers/{}", id);
    let body = serde_json::to_value(&record).unwrap();

    // Repeating the same update leaves the record as it was after the first
    for _ in 0..2 {
        let updated = ctx.send(json_request("PUT", &uri, body.clone())).await;
        assert_eq!(updated.status(), StatusCode::OK);
        assert_eq!(fetch(&ctx, &id).await, record);
    }

    let listed = ctx.send(get_request("/api/v1/customers")).await;
    assert_eq!(listed.status(), StatusCode::OK);
    let listed: Vec<Customer> = serde_json::from_value(body_json(listed).await).unwrap();
    assert!(listed.contains(&record));
}

#[tokio::test]
async fn test_missing_customer_is_not_found() {
    let Some(ctx) = TestContext::with_database().await else {
        return;
    };
    let id = format!("c-{}", Uuid::new_v4());

    let response = ctx.send(get_request(&format!("/api/v1/customers/{}", id))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let record = json!({
        "id": id,
        "customer_name": "Nobody",
        "phone_number": "",
        "images": [],
        "deadline": null
    });
    let response = ctx
        .send(json_request("PUT", &format!("/api/v1/customers/{}", id), record))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_legacy_image_urls_decode_from_database() {
    let Some(ctx) = TestContext::with_database().await else {
        return;
    };
    let id = format!("c-{}", Uuid::new_v4());

    let images = json!([
        "/api/v1/storage/o/images%2Fold.jpg?alt=media",
        { "url": "/new.jpg", "path": "images/new.jpg" }
    ]);
    sqlx::query("INSERT INTO customers (id, customer_name, phone_number, images) VALUES ($1, $2, $3, $4)")
        .bind(&id)
        .bind("Omar")
        .bind("555-0100")
        .bind(sqlx::types::Json(images))
        .execute(&ctx.db_pool)
        .await
        .unwrap();

    let record = fetch(&ctx, &id).await;
    assert_eq!(record.images.len(), 2);
    assert_eq!(record.images[0].path, None);
    assert_eq!(record.images[0].storage_path().as_deref(), Some("images/old.jpg"));
    assert_eq!(record.images[1].path.as_deref(), Some("images/new.jpg"));
}
