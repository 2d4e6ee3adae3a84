//! Location and provider data model.

use serde::{Deserialize, Serialize};

/// Device position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPosition {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPosition {
    /// Position if the coordinates are finite and in range.
    pub fn checked(lat: f64, lng: f64) -> Option<Self> {
        let valid = lat.is_finite()
            && lng.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lng);
        valid.then_some(Self { lat, lng })
    }

    /// Parse optional `lat`/`lng` strings as supplied by the browser.
    /// Anything missing or invalid means no position.
    pub fn from_params(lat: Option<&str>, lng: Option<&str>) -> Option<Self> {
        let lat = lat?.trim().parse().ok()?;
        let lng = lng?.trim().parse().ok()?;
        Self::checked(lat, lng)
    }
}

/// A nearby medical provider as ranked by the places service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderEntry {
    pub name: String,
    #[serde(default)]
    pub vicinity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_rejects_out_of_range() {
        assert!(GeoPosition::checked(51.5, -0.12).is_some());
        assert!(GeoPosition::checked(90.0, 180.0).is_some());
        assert!(GeoPosition::checked(90.1, 0.0).is_none());
        assert!(GeoPosition::checked(0.0, -180.5).is_none());
        assert!(GeoPosition::checked(f64::NAN, 0.0).is_none());
        assert!(GeoPosition::checked(0.0, f64::INFINITY).is_none());
    }

    #[test]
    fn from_params_requires_both() {
        assert_eq!(
            GeoPosition::from_params(Some("12.5"), Some(" 77.6 ")),
            Some(GeoPosition { lat: 12.5, lng: 77.6 })
        );
        assert!(GeoPosition::from_params(Some("12.5"), None).is_none());
        assert!(GeoPosition::from_params(None, Some("77.6")).is_none());
        assert!(GeoPosition::from_params(Some(""), Some("")).is_none());
        assert!(GeoPosition::from_params(Some("north"), Some("1")).is_none());
    }

    #[test]
    fn provider_rating_is_optional() {
        let entry: ProviderEntry =
            serde_json::from_str(r#"{"name":"Clinic","vicinity":"1 Main St"}"#).unwrap();
        assert_eq!(entry.rating, None);
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("rating").is_none());
    }
}
