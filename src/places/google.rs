//! Google Places Nearby Search client.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::debug;

use super::model::{GeoPosition, ProviderEntry};
use super::{PlacesProvider, SearchQuery};
use crate::config::PlacesConfig;
use crate::error::PlacesError;

/// Places search client. Without an API key every search fails with
/// `PlacesError::NotConfigured`.
pub struct GooglePlacesClient {
    api_key: Option<SecretString>,
    base_url: String,
    client: reqwest::Client,
}

impl GooglePlacesClient {
    pub fn new(config: &PlacesConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint(&self) -> String {
        format!("{}/maps/api/place/nearbysearch/json", self.base_url)
    }
}

#[async_trait]
impl PlacesProvider for GooglePlacesClient {
    async fn nearby(&self, query: &SearchQuery) -> Result<Vec<ProviderEntry>, PlacesError> {
        let key = self.api_key.as_ref().ok_or(PlacesError::NotConfigured)?;
        let GeoPosition { lat, lng } = query.center;

        debug!(radius = query.radius_m, category = query.category, "Places nearby search");

        let resp = self
            .client
            .get(self.endpoint())
            .query(&[
                ("location", format!("{lat},{lng}")),
                ("radius", query.radius_m.to_string()),
                ("type", query.category.to_string()),
                ("key", key.expose_secret().to_string()),
            ])
            .send()
            .await
            .map_err(|e| PlacesError::RequestFailed(e.without_url().to_string()))?;

        if !resp.status().is_success() {
            return Err(PlacesError::Status {
                status: format!("HTTP {}", resp.status().as_u16()),
            });
        }

        let body: NearbySearchResponse = resp
            .json()
            .await
            .map_err(|e| PlacesError::RequestFailed(e.without_url().to_string()))?;

        body.into_entries()
    }
}

#[derive(Debug, Deserialize)]
struct NearbySearchResponse {
    status: String,
    #[serde(default)]
    results: Vec<ProviderEntry>,
}

impl NearbySearchResponse {
    fn into_entries(self) -> Result<Vec<ProviderEntry>, PlacesError> {
        match self.status.as_str() {
            "OK" => Ok(self.results),
            "ZERO_RESULTS" => Ok(Vec::new()),
            _ => Err(PlacesError::Status {
                status: self.status,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: serde_json::Value) -> Result<Vec<ProviderEntry>, PlacesError> {
        serde_json::from_value::<NearbySearchResponse>(json)
            .unwrap()
            .into_entries()
    }

    #[test]
    fn ok_status_yields_results_in_order() {
        let entries = parse(serde_json::json!({
            "status": "OK",
            "results": [
                {"name": "A Clinic", "vicinity": "1 High St", "rating": 4.5, "place_id": "x"},
                {"name": "B Surgery", "vicinity": "2 Low Rd"}
            ]
        }))
        .unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "A Clinic");
        assert_eq!(entries[0].rating, Some(4.5));
        assert_eq!(entries[1].rating, None);
    }

    #[test]
    fn zero_results_is_empty_not_error() {
        assert!(parse(serde_json::json!({"status": "ZERO_RESULTS"})).unwrap().is_empty());
    }

    #[test]
    fn other_status_is_an_error() {
        let err = parse(serde_json::json!({"status": "REQUEST_DENIED", "results": []})).unwrap_err();
        assert!(matches!(err, PlacesError::Status { ref status } if status == "REQUEST_DENIED"));
    }

    #[tokio::test]
    async fn missing_key_is_not_configured() {
        let client = GooglePlacesClient::new(&PlacesConfig {
            api_key: None,
            base_url: "http://127.0.0.1:1".into(),
        });
        assert!(!client.is_configured());
        let query = SearchQuery::doctors_near(GeoPosition { lat: 0.0, lng: 0.0 });
        assert!(matches!(client.nearby(&query).await, Err(PlacesError::NotConfigured)));
    }
}
