use crate::models::{CheckAreaForm, Coordinate};

/// Value the page script posts when `navigator.geolocation` is missing
pub const UNSUPPORTED_MARKER: &str = "unsupported";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeolocationError {
    #[error("Geolocation is not supported by your browser")]
    Unsupported,

    #[error("Error: {0}")]
    Failed(String),

    /// The browser has not answered yet
    #[error("Waiting for your current location")]
    Pending,
}

/// Turn the one-shot browser position answer carried by the form into a
/// coordinate or the message to show next to the form.
pub fn location_from_form(form: &CheckAreaForm) -> Result<Coordinate, GeolocationError> {
    if let Some(error) = non_blank(&form.geolocation_error) {
        return Err(if error == UNSUPPORTED_MARKER {
            GeolocationError::Unsupported
        } else {
            GeolocationError::Failed(error.to_string())
        });
    }

    let latitude = non_blank(&form.latitude).and_then(|v| v.parse::<f64>().ok());
    let longitude = non_blank(&form.longitude).and_then(|v| v.parse::<f64>().ok());

    match (latitude, longitude) {
        (Some(latitude), Some(longitude)) => Ok(Coordinate::new(latitude, longitude)),
        _ => Err(GeolocationError::Pending),
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
