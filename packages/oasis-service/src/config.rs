use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,

    // Server-side token for the food source proximity search
    pub mapbox_token: String,

    // Token handed to the browser side: address geocoding and map rendering
    pub public_mapbox_token: String,

    #[serde(default = "default_mapbox_api_url")]
    pub mapbox_api_url: String,

    #[serde(default = "default_mapbox_static_url")]
    pub mapbox_static_url: String,

    #[serde(default = "default_upstream_timeout_secs")]
    pub upstream_timeout_secs: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read environment: {0}")]
    Env(#[from] envy::Error),

    #[error("{0} is not set in environment variables")]
    MissingCredential(&'static str),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = envy::from_env::<Config>()?;
        config.validate()?;
        Ok(config)
    }

    /// Both tokens must be present and non-blank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mapbox_token.trim().is_empty() {
            return Err(ConfigError::MissingCredential("MAPBOX_TOKEN"));
        }
        if self.public_mapbox_token.trim().is_empty() {
            return Err(ConfigError::MissingCredential("PUBLIC_MAPBOX_TOKEN"));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            mapbox_token: String::new(), // Must be provided via environment
            public_mapbox_token: String::new(), // Must be provided via environment
            mapbox_api_url: default_mapbox_api_url(),
            mapbox_static_url: default_mapbox_static_url(),
            upstream_timeout_secs: default_upstream_timeout_secs(),
        }
    }
}

fn default_port() -> u16 {
    3000
}

fn default_mapbox_api_url() -> String {
    "https://api.mapbox.com/geocoding/v5/mapbox.places".to_string()
}

fn default_mapbox_static_url() -> String {
    "https://api.mapbox.com/styles/v1/mapbox/streets-v11/static".to_string()
}

fn default_upstream_timeout_secs() -> u64 {
    15
}
