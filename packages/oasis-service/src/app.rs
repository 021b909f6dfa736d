use axum::{
    routing::{get, post},
    Router,
};
use std::{sync::Arc, time::Duration};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::{
    config::Config,
    handlers::{
        check_area_page, check_food_desert, health, home, method_not_allowed, submit_check_area,
    },
    services::{
        food_desert::FoodDesertService,
        mapbox::{MapboxClient, MapboxError},
    },
};

/// Shared per-process state. Each token is bound to its own client.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Geocoding with the public token
    pub geocoder: MapboxClient,
    /// Proximity search with the server token
    pub evaluator: FoodDesertService,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, MapboxError> {
        let http = MapboxClient::http_client(Duration::from_secs(config.upstream_timeout_secs))?;

        let geocoder = MapboxClient::new(
            http.clone(),
            config.mapbox_api_url.clone(),
            config.public_mapbox_token.clone(),
        );
        let evaluator = FoodDesertService::new(MapboxClient::new(
            http,
            config.mapbox_api_url.clone(),
            config.mapbox_token.clone(),
        ));

        Ok(Self {
            config: Arc::new(config),
            geocoder,
            evaluator,
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/check-area", get(check_area_page).post(submit_check_area))
        .route(
            "/api/checkFoodDesert",
            post(check_food_desert).fallback(method_not_allowed),
        )
        .route("/health", get(health))
        .route("/api/health", get(health))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
