//! Nearby-provider search, gated on the device sharing its location.

pub mod google;
pub mod lookup;
pub mod model;

pub use google::GooglePlacesClient;
pub use lookup::{LocationState, ProviderLookup};
pub use model::{GeoPosition, ProviderEntry};

use async_trait::async_trait;

use crate::error::PlacesError;

/// Search radius around the device, in metres.
pub const SEARCH_RADIUS_M: u32 = 5000;
/// Places category searched for.
pub const DOCTOR_CATEGORY: &str = "doctor";
/// Providers shown at most.
pub const MAX_PROVIDERS: usize = 5;

/// A nearby-search request.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub center: GeoPosition,
    pub radius_m: u32,
    pub category: &'static str,
}

impl SearchQuery {
    pub fn doctors_near(center: GeoPosition) -> Self {
        Self {
            center,
            radius_m: SEARCH_RADIUS_M,
            category: DOCTOR_CATEGORY,
        }
    }
}

/// A places-search endpoint. Results come back in the service's own ranking.
#[async_trait]
pub trait PlacesProvider: Send + Sync {
    async fn nearby(&self, query: &SearchQuery) -> Result<Vec<ProviderEntry>, PlacesError>;
}
