use serde::{Deserialize, Serialize};

use super::location::Coordinate;

/// A food-related point of interest near the query point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodSource {
    pub name: String,
    pub place_name: String,
    /// Meters from the query point
    pub distance: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub coordinate: Coordinate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodDesertResult {
    pub is_food_desert: bool,
    pub food_sources: Vec<FoodSource>,
}
