//! HTTP-level tests for categories and products.

mod common;

use axum::http::StatusCode;
use common::{body_json, TestApp};
use serde_json::json;

#[tokio::test]
async fn category_crud() {
    let app = TestApp::new();
    let id = app.create_category("Shoes").await;

    let fetched = app.get(&format!("/api/v1/categories/{id}/")).await;
    assert_eq!(fetched.status(), StatusCode::OK);
    assert_eq!(body_json(fetched).await["name"], "Shoes");

    let updated = app
        .put_json(
            &format!("/api/v1/categories/{id}/"),
            json!({ "name": "Footwear" }),
        )
        .await;
    assert_eq!(updated.status(), StatusCode::OK);
    assert_eq!(body_json(updated).await["name"], "Footwear");

    let deleted = app.delete(&format!("/api/v1/categories/{id}/")).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let gone = app.get(&format!("/api/v1/categories/{id}/")).await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_category_name_is_conflict() {
    let app = TestApp::new();
    app.create_category("Shoes").await;

    let response = app
        .post_json("/api/v1/categories/", json!({ "name": "Shoes" }))
        .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn blank_category_name_is_rejected() {
    let app = TestApp::new();

    let response = app
        .post_json("/api/v1/categories/", json!({ "name": "   " }))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["fields"]["name"].is_array());
}

#[tokio::test]
async fn category_list_is_paginated() {
    let app = TestApp::new();
    for name in ["A", "B", "C", "D"] {
        app.create_category(name).await;
    }

    let response = app.get("/api/v1/categories/?limit=2&offset=1").await;

    let names: Vec<_> = body_json(response)
        .await
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["B", "C"]);
}

#[tokio::test]
async fn product_create_fires_hook_and_returns_decimal_price() {
    let app = TestApp::new();
    let category_id = app.create_category("Shoes").await;

    let response = app
        .post_json(
            "/api/v1/products/",
            json!({
                "name": "Boot",
                "description": "Leather boot",
                "price": "49.90",
                "category_id": category_id,
                "image": "https://cdn.example.com/boot.png",
            }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["price"], "49.90");
    assert_eq!(json["image"], "https://cdn.example.com/boot.png");

    let created = app.hook.created.lock().unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].name, "Boot");
}

#[tokio::test]
async fn product_image_is_kept_unless_explicitly_nulled() {
    let app = TestApp::new();
    let category_id = app.create_category("Shoes").await;
    let response = app
        .post_json(
            "/api/v1/products/",
            json!({
                "name": "Boot",
                "description": "Leather boot",
                "price": "49.90",
                "category_id": category_id,
                "image": "https://cdn.example.com/boot.png",
            }),
        )
        .await;
    let id = body_json(response).await["id"].as_i64().unwrap();
    let path = format!("/api/v1/products/{id}/");

    let repriced = app.put_json(&path, json!({ "price": "39.90" })).await;
    assert_eq!(repriced.status(), StatusCode::OK);
    assert_eq!(
        body_json(repriced).await["image"],
        "https://cdn.example.com/boot.png"
    );

    let cleared = app.put_json(&path, json!({ "image": null })).await;
    assert_eq!(cleared.status(), StatusCode::OK);
    assert!(body_json(cleared).await["image"].is_null());
}

#[tokio::test]
async fn product_with_unknown_category_is_a_field_error() {
    let app = TestApp::new();

    let response = app
        .post_json(
            "/api/v1/products/",
            json!({
                "name": "Ghost",
                "description": "Nowhere",
                "price": "1.00",
                "category_id": 404,
            }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["fields"]["category_id"].is_array());
    assert!(app.hook.created.lock().unwrap().is_empty());
}

#[tokio::test]
async fn product_price_must_fit_the_column() {
    let app = TestApp::new();
    let category_id = app.create_category("Shoes").await;

    for price in ["-1.00", "1.999", "123456789.00"] {
        let response = app
            .post_json(
                "/api/v1/products/",
                json!({
                    "name": "Boot",
                    "description": "Leather boot",
                    "price": price,
                    "category_id": category_id,
                }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "price {price}");
    }
}

#[tokio::test]
async fn product_update_is_partial() {
    let app = TestApp::new();
    let category_id = app.create_category("Shoes").await;
    let id = app.create_product(category_id, "Boot").await;

    let response = app
        .put_json(&format!("/api/v1/products/{id}"), json!({ "price": "5.00" }))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["price"], "5.00");
    assert_eq!(json["name"], "Boot");
}

#[tokio::test]
async fn product_list_filters_by_category() {
    let app = TestApp::new();
    let shoes = app.create_category("Shoes").await;
    let hats = app.create_category("Hats").await;
    app.create_product(shoes, "Boot").await;
    app.create_product(hats, "Cap").await;

    let response = app
        .get(&format!("/api/v1/products/?category_id={hats}"))
        .await;

    let json = body_json(response).await;
    let products = json.as_array().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["name"], "Cap");
}

#[tokio::test]
async fn deleting_a_category_deletes_its_products() {
    let app = TestApp::new();
    let shoes = app.create_category("Shoes").await;
    let hats = app.create_category("Hats").await;
    let boot = app.create_product(shoes, "Boot").await;
    let sandal = app.create_product(shoes, "Sandal").await;
    let cap = app.create_product(hats, "Cap").await;

    let deleted = app.delete(&format!("/api/v1/categories/{shoes}/")).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    for id in [boot, sandal] {
        let response = app.get(&format!("/api/v1/products/{id}/")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["code"], "NOT_FOUND");
    }
    let kept = app.get(&format!("/api/v1/products/{cap}/")).await;
    assert_eq!(kept.status(), StatusCode::OK);
}

#[tokio::test]
async fn deleting_missing_product_is_not_found() {
    let app = TestApp::new();

    let response = app.delete("/api/v1/products/12345/").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_numeric_product_id_is_a_json_validation_error() {
    let app = TestApp::new();

    let response = app.get("/api/v1/products/abc/").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("abc"));
}

#[tokio::test]
async fn out_of_range_category_id_is_a_json_validation_error() {
    let app = TestApp::new();

    let response = app.delete("/api/v1/categories/99999999999999999999/").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn malformed_list_query_is_a_json_validation_error() {
    let app = TestApp::new();

    for uri in [
        "/api/v1/products/?limit=abc",
        "/api/v1/products/?category_id=shoes",
        "/api/v1/categories/?offset=x",
    ] {
        let response = app.get(uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR", "{uri}");
    }
}
