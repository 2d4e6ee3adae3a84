//! Configuration types.

use std::net::SocketAddr;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Default Gemini model used for advice generation.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-pro";
/// Default Gemini API host.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// Default Google Maps API host.
pub const DEFAULT_PLACES_BASE_URL: &str = "https://maps.googleapis.com";
/// Default listen address.
pub const DEFAULT_ADDR: &str = "0.0.0.0:8080";

/// Generative inference endpoint configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: SecretString,
    pub model: String,
    pub base_url: String,
}

/// Places-search endpoint configuration.
#[derive(Debug, Clone)]
pub struct PlacesConfig {
    /// Absent key disables provider lookups; they resolve to an empty list.
    pub api_key: Option<SecretString>,
    pub base_url: String,
}

/// Service configuration. Every credential stays server-side.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub addr: SocketAddr,
    pub gemini: GeminiConfig,
    pub places: PlacesConfig,
}

impl AppConfig {
    /// Build configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let addr_raw = non_empty("SYMPTOM_ADVISOR_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr: SocketAddr = addr_raw.parse().map_err(|e| ConfigError::InvalidValue {
            key: "SYMPTOM_ADVISOR_ADDR".to_string(),
            message: format!("{addr_raw:?}: {e}"),
        })?;

        let gemini_key = non_empty("GEMINI_API_KEY")
            .ok_or_else(|| ConfigError::MissingEnvVar("GEMINI_API_KEY".to_string()))?;

        let gemini = GeminiConfig {
            api_key: SecretString::from(gemini_key),
            model: non_empty("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            base_url: trim_base(
                non_empty("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
            ),
        };

        let places = PlacesConfig {
            api_key: non_empty("PLACES_API_KEY").map(SecretString::from),
            base_url: trim_base(
                non_empty("PLACES_BASE_URL").unwrap_or_else(|| DEFAULT_PLACES_BASE_URL.to_string()),
            ),
        };

        Ok(Self {
            addr,
            gemini,
            places,
        })
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
