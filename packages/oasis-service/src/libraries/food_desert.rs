use crate::models::{FoodDesertResult, FoodSource};

/// Categories searched around the query point
pub const FOOD_KEYWORDS: &str = "supermarket,grocery,food,vegetable,restaurant";

/// One mile in meters
pub const DISTANCE_THRESHOLD_METERS: f64 = 1609.34;

/// Number of food sources handed back to the caller
pub const MAX_FOOD_SOURCES: usize = 5;

/// An area is a food desert when no source is strictly closer than the threshold
pub fn is_food_desert(food_sources: &[FoodSource]) -> bool {
    !food_sources
        .iter()
        .any(|source| source.distance < DISTANCE_THRESHOLD_METERS)
}

/// Classify over every source returned, then keep the first few in upstream order
pub fn evaluate(mut food_sources: Vec<FoodSource>) -> FoodDesertResult {
    let is_food_desert = is_food_desert(&food_sources);
    food_sources.truncate(MAX_FOOD_SOURCES);

    FoodDesertResult {
        is_food_desert,
        food_sources,
    }
}
