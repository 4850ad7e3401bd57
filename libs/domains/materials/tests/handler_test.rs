//! Handler tests for the Materials domain

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_materials::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use test_utils::TestDatabase;
use tower::ServiceExt; // For oneshot()

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app(db: &TestDatabase) -> Router {
    handlers::router(MaterialService::new(PgMaterialRepository::new(db.db())))
}

fn post(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_create_material_returns_201() {
    let db = TestDatabase::new().await;
    let app = app(&db);

    let response = app
        .oneshot(post(json!({ "title": "Leather", "description": "Full grain" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let material: MaterialResponse = json_body(response.into_body()).await;
    assert_eq!(material.title, "Leather");
    assert_eq!(db.count("materials").await, 1);
}

#[tokio::test]
async fn test_create_material_requires_title() {
    let db = TestDatabase::new().await;
    let app = app(&db);

    let response = app
        .oneshot(post(json!({ "title": "", "description": "x" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(db.count("materials").await, 0);
}

#[tokio::test]
async fn test_list_materials_orders_by_creation() {
    let db = TestDatabase::new().await;
    let app = app(&db);

    for title in ["first", "second", "third"] {
        let response = app
            .clone()
            .oneshot(post(json!({ "title": title })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .clone()
        .oneshot(get("/?limit=2&sort=desc"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let page: Vec<MaterialResponse> = json_body(response.into_body()).await;
    let titles: Vec<&str> = page.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["third", "second"]);

    let response = app.oneshot(get("/?page=2&limit=2")).await.unwrap();
    let page: Vec<MaterialResponse> = json_body(response.into_body()).await;
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].title, "third");
}

#[tokio::test]
async fn test_list_materials_rejects_other_sort_fields() {
    let db = TestDatabase::new().await;
    let app = app(&db);

    let response = app.oneshot(get("/?field=title")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_materials_rejects_pages_past_the_largest_offset() {
    let db = TestDatabase::new().await;
    let app = app(&db);

    let response = app
        .oneshot(get("/?page=18446744073709551615&limit=100"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
