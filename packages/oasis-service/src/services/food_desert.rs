use crate::{
    libraries::food_desert::{self, FOOD_KEYWORDS},
    models::{Coordinate, FoodDesertResult},
    services::mapbox::{MapboxClient, MapboxError},
};

/// Server-side food desert evaluation backed by the Mapbox category search
#[derive(Debug, Clone)]
pub struct FoodDesertService {
    mapbox: MapboxClient,
}

impl FoodDesertService {
    pub fn new(mapbox: MapboxClient) -> Self {
        Self { mapbox }
    }

    pub async fn check(&self, coordinate: &Coordinate) -> Result<FoodDesertResult, MapboxError> {
        let food_sources = self.mapbox.search_nearby(FOOD_KEYWORDS, coordinate).await?;
        tracing::info!("Found {} food sources", food_sources.len());

        let result = food_desert::evaluate(food_sources);
        tracing::debug!(
            "Food desert at ({}, {}): {}",
            coordinate.latitude,
            coordinate.longitude,
            result.is_food_desert
        );

        Ok(result)
    }
}
