use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, Url};
use serde::Deserialize;
use std::error::Error;
use std::time::Duration;

use crate::models::{Coordinate, FoodSource};

/// Same set as JavaScript's `encodeURIComponent`. `;` must not reach Mapbox
/// raw since it separates batch queries.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, thiserror::Error)]
pub enum MapboxError {
    #[error("Address is required")]
    EmptyAddress,

    #[error("Invalid Mapbox API URL: {0}")]
    InvalidUrl(String),

    #[error("Mapbox API request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Mapbox API responded with status {status}: {body}")]
    Status { status: u16, body: String },
}

/// Mapbox geocoding response structure
#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    text: String,
    #[serde(default)]
    place_name: String,
    /// `[longitude, latitude]`
    center: [f64; 2],
    #[serde(default)]
    properties: FeatureProperties,
}

#[derive(Debug, Default, Deserialize)]
struct FeatureProperties {
    distance: Option<f64>,
    category: Option<String>,
}

impl Feature {
    fn into_food_source(self, origin: &Coordinate) -> FoodSource {
        let coordinate = Coordinate::from_lon_lat(self.center);
        let distance = self
            .properties
            .distance
            .unwrap_or_else(|| origin.distance_to(&coordinate));

        FoodSource {
            name: self.text,
            place_name: self.place_name,
            distance,
            category: self.properties.category,
            coordinate,
        }
    }
}

/// Client for the Mapbox `mapbox.places` geocoding endpoint.
///
/// The same endpoint answers both forward geocoding of an address and the
/// category search used for food sources; each client instance is bound to
/// one access token.
#[derive(Debug, Clone)]
pub struct MapboxClient {
    client: Client,
    base_url: String,
    access_token: String,
}

impl MapboxClient {
    pub fn new(client: Client, base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            access_token: access_token.into(),
        }
    }

    /// Shared HTTP client with a proper User-Agent and timeout
    pub fn http_client(timeout: Duration) -> Result<Client, MapboxError> {
        Ok(Client::builder()
            .user_agent(concat!("Oasis/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?)
    }

    /// Resolve a free-text address. The first candidate wins; no candidates
    /// at all is `Ok(None)`.
    pub async fn geocode(&self, address: &str) -> Result<Option<Coordinate>, MapboxError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(MapboxError::EmptyAddress);
        }

        tracing::info!("🌍 Geocoding address ({} chars)", address.len());

        let url = self.endpoint(address)?;
        let data = self.fetch(url, &[]).await?;

        match data.features.into_iter().next() {
            Some(feature) => {
                let coordinate = Coordinate::from_lon_lat(feature.center);
                tracing::debug!(
                    "✅ Geocoded to ({}, {})",
                    coordinate.latitude,
                    coordinate.longitude
                );
                Ok(Some(coordinate))
            }
            None => {
                tracing::debug!("No geocoding candidates for address");
                Ok(None)
            }
        }
    }

    /// Points of interest matching `keywords`, biased toward `near`, in the
    /// order Mapbox returns them
    pub async fn search_nearby(
        &self,
        keywords: &str,
        near: &Coordinate,
    ) -> Result<Vec<FoodSource>, MapboxError> {
        tracing::info!(
            "🌍 Searching Mapbox for '{}' near ({}, {})",
            keywords,
            near.latitude,
            near.longitude
        );

        let url = self.endpoint(keywords)?;
        let params = [("types", "poi".to_string()), ("proximity", near.lon_lat())];
        let data = self.fetch(url, &params).await?;

        tracing::debug!("✅ Mapbox returned {} features", data.features.len());

        Ok(data
            .features
            .into_iter()
            .map(|feature| feature.into_food_source(near))
            .collect())
    }

    fn endpoint(&self, query: &str) -> Result<Url, MapboxError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| MapboxError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        if url.cannot_be_a_base() {
            return Err(MapboxError::InvalidUrl(self.base_url.clone()));
        }

        let path = format!(
            "{}/{}.json",
            url.path().trim_end_matches('/'),
            utf8_percent_encode(query, QUERY_COMPONENT)
        );
        url.set_path(&path);

        Ok(url)
    }

    async fn fetch(
        &self,
        url: Url,
        params: &[(&str, String)],
    ) -> Result<FeatureCollection, MapboxError> {
        let response = self
            .client
            .get(url)
            .query(params)
            .query(&[("access_token", self.access_token.as_str())])
            .send()
            .await
            .map_err(|e| {
                // Log full error chain for debugging
                let mut error_msg = format!("Mapbox API request failed: {}", e);
                let mut source = e.source();
                while let Some(err) = source {
                    error_msg.push_str(&format!("\n  Caused by: {}", err));
                    source = err.source();
                }
                tracing::warn!("{}", error_msg);
                MapboxError::Request(e)
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Mapbox API returned HTTP {}: {}", status, body);
            return Err(MapboxError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}
