pub mod food;
pub mod location;
pub mod requests;

// Re-export commonly used types
pub use food::{FoodDesertResult, FoodSource};
pub use location::{Coordinate, CoordinateRequest};
pub use requests::CheckAreaForm;
