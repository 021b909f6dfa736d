pub mod check_area;
pub mod check_food_desert;

use axum::{response::IntoResponse, Json};

pub use check_area::{check_area_page, home, submit_check_area};
pub use check_food_desert::{check_food_desert, method_not_allowed};

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "oasis-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
