use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Create a new coordinate
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Mapbox orders positions longitude first
    pub fn from_lon_lat([longitude, latitude]: [f64; 2]) -> Self {
        Self { latitude, longitude }
    }

    /// `lon,lat` as used by the `proximity` parameter and static map paths
    pub fn lon_lat(&self) -> String {
        format!("{},{}", self.longitude, self.latitude)
    }

    /// Calculate the distance to another coordinate in meters
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        crate::services::location::calculate_distance(self, other)
    }
}

/// Body of a food desert check. Both fields are optional at the parsing
/// level so a missing one can be reported as a validation failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoordinateRequest {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl CoordinateRequest {
    pub fn coordinate(&self) -> Option<Coordinate> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinate::new(latitude, longitude)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_lon_lat_swaps_order() {
        let coordinate = Coordinate::from_lon_lat([-73.93, 40.73]);
        assert_eq!(coordinate.latitude, 40.73);
        assert_eq!(coordinate.longitude, -73.93);
        assert_eq!(coordinate.lon_lat(), "-73.93,40.73");
    }

    #[test]
    fn test_out_of_range_values_pass_through() {
        let request: CoordinateRequest =
            serde_json::from_str(r#"{"latitude": 123.0, "longitude": -500.0}"#).unwrap();
        assert_eq!(request.coordinate(), Some(Coordinate::new(123.0, -500.0)));
    }

    #[test]
    fn test_missing_field_yields_no_coordinate() {
        let request: CoordinateRequest = serde_json::from_str(r#"{"latitude": 40.73}"#).unwrap();
        assert!(request.coordinate().is_none());

        let request: CoordinateRequest =
            serde_json::from_str(r#"{"latitude": null, "longitude": -73.93}"#).unwrap();
        assert!(request.coordinate().is_none());
    }

    #[test]
    fn test_zero_is_a_present_value() {
        let request: CoordinateRequest =
            serde_json::from_str(r#"{"latitude": 0.0, "longitude": 0.0}"#).unwrap();
        assert_eq!(request.coordinate(), Some(Coordinate::new(0.0, 0.0)));
    }

    #[test]
    fn test_distance_to() {
        let a = Coordinate::new(37.7749, -122.4194);
        let b = Coordinate::new(37.7750, -122.4194);
        assert!(a.distance_to(&b) < 20.0); // ~11 meters
    }
}
