use serde::{Deserialize, Serialize};

/// Fields posted by the check-area form.
///
/// `latitude`, `longitude` and `geolocation_error` are filled in by the page
/// script once the browser answers the position request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckAreaForm {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub use_location: Option<String>,
    #[serde(default)]
    pub latitude: Option<String>,
    #[serde(default)]
    pub longitude: Option<String>,
    #[serde(default)]
    pub geolocation_error: Option<String>,
}

impl CheckAreaForm {
    /// HTML checkboxes are only posted when ticked
    pub fn is_using_location(&self) -> bool {
        matches!(self.use_location.as_deref(), Some("on" | "true" | "1"))
    }
}
