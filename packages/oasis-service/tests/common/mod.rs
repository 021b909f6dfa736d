#![allow(dead_code)]

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use axum_test::TestServer;
use serde_json::{json, Value};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use oasis_service::{
    app::{router, AppState},
    config::Config,
    libraries::food_desert::FOOD_KEYWORDS,
};

pub const SERVER_TOKEN: &str = "sk.server-token";
pub const PUBLIC_TOKEN: &str = "pk.public-token";

/// One request seen by the mock Mapbox endpoint
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub query: String,
    pub params: HashMap<String, String>,
}

impl SeenRequest {
    pub fn is_search(&self) -> bool {
        self.query == format!("{}.json", FOOD_KEYWORDS)
    }
}

#[derive(Clone)]
struct MockState {
    geocode: (StatusCode, Value),
    search: (StatusCode, Value),
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

/// Local stand-in for `mapbox.places` bound to an ephemeral port
pub struct MockMapbox {
    pub base_url: String,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl MockMapbox {
    pub fn requests(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }

    pub fn search_count(&self) -> usize {
        self.requests().iter().filter(|r| r.is_search()).count()
    }

    pub fn geocode_count(&self) -> usize {
        self.requests().iter().filter(|r| !r.is_search()).count()
    }
}

async fn places(
    State(state): State<MockState>,
    Path(query): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let request = SeenRequest { query, params };
    let response = if request.is_search() {
        state.search.clone()
    } else {
        state.geocode.clone()
    };
    state.seen.lock().unwrap().push(request);

    (response.0, Json(response.1))
}

pub async fn spawn_mapbox(geocode: (StatusCode, Value), search: (StatusCode, Value)) -> MockMapbox {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/places/:query", get(places))
        .with_state(MockState {
            geocode,
            search,
            seen: seen.clone(),
        });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockMapbox {
        base_url: format!("http://{}/places", addr),
        seen,
    }
}

pub fn feature(name: &str, lon: f64, lat: f64, distance: f64) -> Value {
    json!({
        "id": format!("poi.{}", name.len()),
        "text": name,
        "place_name": format!("{}, Queens, New York 11101, United States", name),
        "center": [lon, lat],
        "properties": { "distance": distance, "category": "grocery, supermarket" }
    })
}

pub fn features(features: Vec<Value>) -> (StatusCode, Value) {
    (
        StatusCode::OK,
        json!({ "type": "FeatureCollection", "features": features }),
    )
}

pub fn geocoded(lon: f64, lat: f64) -> (StatusCode, Value) {
    features(vec![json!({
        "text": "Main Street",
        "place_name": "1 Main Street, Queens, New York",
        "center": [lon, lat]
    })])
}

pub fn test_server(mock: &MockMapbox) -> TestServer {
    let config = Config {
        mapbox_token: SERVER_TOKEN.to_string(),
        public_mapbox_token: PUBLIC_TOKEN.to_string(),
        mapbox_api_url: mock.base_url.clone(),
        upstream_timeout_secs: 5,
        ..Default::default()
    };
    let state = AppState::new(config).unwrap();
    TestServer::new(router(state)).unwrap()
}
