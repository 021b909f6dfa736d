use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::{debug, error, info};

use crate::{
    app::AppState,
    error::AppError,
    models::{CoordinateRequest, FoodDesertResult},
};

/// Classify the area around the posted coordinate.
///
/// Missing or malformed `latitude` / `longitude` is rejected before any
/// request goes out to Mapbox.
pub async fn check_food_desert(
    State(state): State<AppState>,
    payload: Result<Json<CoordinateRequest>, JsonRejection>,
) -> Result<Json<FoodDesertResult>, AppError> {
    let coordinate = payload
        .map_err(|rejection| {
            debug!("Rejected food desert request body: {}", rejection);
        })
        .ok()
        .and_then(|Json(request)| request.coordinate())
        .ok_or_else(|| AppError::Validation("Latitude and longitude are required".to_string()))?;

    info!(
        "Received request for coordinates: {}, {}",
        coordinate.latitude, coordinate.longitude
    );

    let result = state.evaluator.check(&coordinate).await.map_err(|e| {
        error!("Error checking food desert status: {}", e);
        AppError::from(e)
    })?;

    Ok(Json(result))
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
