//! Location-gated provider lookup.
//!
//! `Unrequested → Located → Resolved`, or `Unrequested → Unavailable`.
//! Every failure past `Unrequested` degrades to an empty provider list; none
//! of them is an application error.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::model::{GeoPosition, ProviderEntry};
use super::{MAX_PROVIDERS, PlacesProvider, SearchQuery};
use crate::error::PlacesError;

/// Where the provider lookup stands for one results view.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LocationState {
    #[default]
    Unrequested,
    Located { position: GeoPosition },
    Resolved { providers: Vec<ProviderEntry> },
    Unavailable,
}

impl LocationState {
    /// Apply the geolocation outcome. Only meaningful from `Unrequested`.
    pub fn on_position(self, position: Option<GeoPosition>) -> Self {
        match (self, position) {
            (Self::Unrequested, Some(position)) => Self::Located { position },
            (Self::Unrequested, None) => Self::Unavailable,
            (other, _) => other,
        }
    }

    /// Apply the search outcome. Only meaningful from `Located`.
    pub fn on_search(self, outcome: Result<Vec<ProviderEntry>, PlacesError>) -> Self {
        match self {
            Self::Located { .. } => {
                let providers = match outcome {
                    Ok(mut providers) => {
                        providers.truncate(MAX_PROVIDERS);
                        providers
                    }
                    Err(e) => {
                        warn!(error = %e, "Provider lookup failed; showing no providers");
                        Vec::new()
                    }
                };
                Self::Resolved { providers }
            }
            other => other,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Resolved { .. } | Self::Unavailable)
    }

    /// Providers to display; empty unless resolved with results.
    pub fn providers(&self) -> &[ProviderEntry] {
        match self {
            Self::Resolved { providers } => providers,
            _ => &[],
        }
    }

    pub fn into_providers(self) -> Vec<ProviderEntry> {
        match self {
            Self::Resolved { providers } => providers,
            _ => Vec::new(),
        }
    }
}

/// Runs the lookup state machine against a places provider.
pub struct ProviderLookup {
    places: Arc<dyn PlacesProvider>,
}

impl ProviderLookup {
    pub fn new(places: Arc<dyn PlacesProvider>) -> Self {
        Self { places }
    }

    /// Drive the state machine to a terminal state. Issues at most one search.
    pub async fn resolve(&self, position: Option<GeoPosition>) -> LocationState {
        let position = match LocationState::Unrequested.on_position(position) {
            LocationState::Located { position } => position,
            other => {
                info!("No device location; skipping provider lookup");
                return other;
            }
        };

        let outcome = self.places.nearby(&SearchQuery::doctors_near(position)).await;
        let state = LocationState::Located { position }.on_search(outcome);
        info!(providers = state.providers().len(), "Provider lookup resolved");
        state
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::places::{DOCTOR_CATEGORY, SEARCH_RADIUS_M};

    fn entries(n: usize) -> Vec<ProviderEntry> {
        (0..n)
            .map(|i| ProviderEntry {
                name: format!("Clinic {i}"),
                vicinity: format!("{i} Main St"),
                rating: None,
            })
            .collect()
    }

    struct StubPlaces {
        results: usize,
        fail: bool,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PlacesProvider for StubPlaces {
        async fn nearby(&self, query: &SearchQuery) -> Result<Vec<ProviderEntry>, PlacesError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(query.radius_m, SEARCH_RADIUS_M);
            assert_eq!(query.category, DOCTOR_CATEGORY);
            if self.fail {
                return Err(PlacesError::Status {
                    status: "OVER_QUERY_LIMIT".into(),
                });
            }
            Ok(entries(self.results))
        }
    }

    fn stub(results: usize, fail: bool) -> Arc<StubPlaces> {
        Arc::new(StubPlaces {
            results,
            fail,
            calls: AtomicUsize::new(0),
        })
    }

    const HERE: GeoPosition = GeoPosition { lat: 51.5, lng: -0.1 };

    #[test]
    fn transitions() {
        let located = LocationState::default().on_position(Some(HERE));
        assert_eq!(located, LocationState::Located { position: HERE });
        assert!(!located.is_terminal());

        let resolved = located.on_search(Ok(entries(2)));
        assert_eq!(resolved.providers().len(), 2);
        assert!(resolved.is_terminal());

        let unavailable = LocationState::Unrequested.on_position(None);
        assert_eq!(unavailable, LocationState::Unavailable);
        assert!(unavailable.is_terminal());
    }

    #[test]
    fn unavailable_is_terminal_without_retry() {
        let state = LocationState::Unavailable
            .on_position(Some(HERE))
            .on_search(Ok(entries(3)));
        assert_eq!(state, LocationState::Unavailable);
        assert!(state.providers().is_empty());
    }

    #[test]
    fn search_outcome_ignored_unless_located() {
        let state = LocationState::Unrequested.on_search(Ok(entries(3)));
        assert_eq!(state, LocationState::Unrequested);
    }

    #[test]
    fn truncates_to_five_for_any_length() {
        for n in [0, 1, 4, 5, 6, 20, 60] {
            let state = LocationState::Located { position: HERE }.on_search(Ok(entries(n)));
            let providers = state.into_providers();
            assert_eq!(providers.len(), n.min(MAX_PROVIDERS));
            // ranking preserved
            if let Some(first) = providers.first() {
                assert_eq!(first.name, "Clinic 0");
            }
        }
    }

    #[test]
    fn failure_resolves_empty() {
        let state = LocationState::Located { position: HERE }.on_search(Err(PlacesError::Status {
            status: "REQUEST_DENIED".into(),
        }));
        assert_eq!(state, LocationState::Resolved { providers: vec![] });
    }

    #[tokio::test]
    async fn denied_location_never_searches() {
        let places = stub(3, false);
        let lookup = ProviderLookup::new(places.clone());
        let state = lookup.resolve(None).await;
        assert_eq!(state, LocationState::Unavailable);
        assert_eq!(places.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn located_searches_once_and_caps() {
        let places = stub(9, false);
        let lookup = ProviderLookup::new(places.clone());
        let state = lookup.resolve(Some(HERE)).await;
        assert_eq!(state.providers().len(), MAX_PROVIDERS);
        assert_eq!(places.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_search_degrades_silently() {
        let places = stub(3, true);
        let lookup = ProviderLookup::new(places.clone());
        let state = lookup.resolve(Some(HERE)).await;
        assert!(state.is_terminal());
        assert!(state.providers().is_empty());
    }
}
