pub mod food_desert;
pub mod location;
pub mod mapbox;
pub mod page_renderer;
