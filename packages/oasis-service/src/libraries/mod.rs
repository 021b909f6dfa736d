pub mod check_area_form;
pub mod food_desert;
pub mod geolocation;
