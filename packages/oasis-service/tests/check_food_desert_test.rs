mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{feature, features, geocoded, spawn_mapbox, test_server, SERVER_TOKEN};

#[tokio::test]
async fn test_close_source_is_not_a_food_desert() {
    let mock = spawn_mapbox(
        geocoded(-73.93, 40.73),
        features(vec![
            feature("Key Food", -73.931, 40.731, 500.0),
            feature("Met Foodmarket", -73.95, 40.74, 2000.0),
        ]),
    )
    .await;
    let server = test_server(&mock);

    let response = server
        .post("/api/checkFoodDesert")
        .json(&json!({ "latitude": 40.73, "longitude": -73.93 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["isFoodDesert"], json!(false));
    assert_eq!(body["foodSources"].as_array().unwrap().len(), 2);
    assert_eq!(body["foodSources"][0]["name"], json!("Key Food"));
    assert_eq!(body["foodSources"][1]["distance"], json!(2000.0));
}

#[tokio::test]
async fn test_only_far_source_is_a_food_desert() {
    let mock = spawn_mapbox(
        geocoded(-73.93, 40.73),
        features(vec![feature("Far Market", -73.97, 40.75, 3000.0)]),
    )
    .await;
    let server = test_server(&mock);

    let response = server
        .post("/api/checkFoodDesert")
        .json(&json!({ "latitude": 40.73, "longitude": -73.93 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["isFoodDesert"], json!(true));
    assert_eq!(body["foodSources"].as_array().unwrap().len(), 1);
    assert_eq!(body["foodSources"][0]["distance"], json!(3000.0));
}

#[tokio::test]
async fn test_search_uses_server_token_and_proximity() {
    let mock = spawn_mapbox(geocoded(-73.93, 40.73), features(vec![])).await;
    let server = test_server(&mock);

    server
        .post("/api/checkFoodDesert")
        .json(&json!({ "latitude": 40.73, "longitude": -73.93 }))
        .await;

    let requests = mock.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].is_search());
    assert_eq!(requests[0].params["access_token"], SERVER_TOKEN);
    assert_eq!(requests[0].params["proximity"], "-73.93,40.73");
    assert_eq!(requests[0].params["types"], "poi");
}

#[tokio::test]
async fn test_response_is_capped_at_five_sources() {
    let many = (0..8)
        .map(|i| feature(&format!("Store {}", i), -73.93, 40.73, 2500.0 + i as f64))
        .collect();
    let mock = spawn_mapbox(geocoded(-73.93, 40.73), features(many)).await;
    let server = test_server(&mock);

    let response = server
        .post("/api/checkFoodDesert")
        .json(&json!({ "latitude": 40.73, "longitude": -73.93 }))
        .await;

    let body = response.json::<Value>();
    assert_eq!(body["foodSources"].as_array().unwrap().len(), 5);
    assert_eq!(body["isFoodDesert"], json!(true));
}

#[tokio::test]
async fn test_missing_longitude_is_rejected_without_upstream_call() {
    let mock = spawn_mapbox(geocoded(-73.93, 40.73), features(vec![])).await;
    let server = test_server(&mock);

    let response = server
        .post("/api/checkFoodDesert")
        .json(&json!({ "latitude": 40.73 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["message"],
        json!("Latitude and longitude are required")
    );
    assert_eq!(mock.search_count(), 0);
}

#[tokio::test]
async fn test_missing_latitude_and_malformed_values_are_rejected() {
    let mock = spawn_mapbox(geocoded(-73.93, 40.73), features(vec![])).await;
    let server = test_server(&mock);

    for body in [
        json!({ "longitude": -73.93 }),
        json!({ "latitude": "north", "longitude": -73.93 }),
        json!({ "latitude": null, "longitude": -73.93 }),
        json!({}),
    ] {
        let response = server.post("/api/checkFoodDesert").json(&body).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "body: {}", body);
    }

    let response = server.post("/api/checkFoodDesert").text("not json").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_non_post_is_method_not_allowed() {
    let mock = spawn_mapbox(geocoded(-73.93, 40.73), features(vec![])).await;
    let server = test_server(&mock);

    let response = server.get("/api/checkFoodDesert").await;
    assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.json::<Value>()["message"], json!("Method Not Allowed"));

    let response = server
        .put("/api/checkFoodDesert")
        .json(&json!({ "latitude": 40.73, "longitude": -73.93 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);

    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_upstream_failure_is_internal_error_with_details() {
    let mock = spawn_mapbox(
        geocoded(-73.93, 40.73),
        (
            StatusCode::UNAUTHORIZED,
            json!({ "message": "Not Authorized - Invalid Token" }),
        ),
    )
    .await;
    let server = test_server(&mock);

    let response = server
        .post("/api/checkFoodDesert")
        .json(&json!({ "latitude": 40.73, "longitude": -73.93 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json::<Value>();
    assert_eq!(body["message"], json!("Internal Server Error"));
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("401"), "error: {}", error);
    assert!(error.contains("Invalid Token"), "error: {}", error);
}

#[tokio::test]
async fn test_health() {
    let mock = spawn_mapbox(geocoded(-73.93, 40.73), features(vec![])).await;
    let server = test_server(&mock);

    for path in ["/health", "/api/health"] {
        let response = server.get(path).await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.json::<Value>()["status"], json!("healthy"));
    }
}
