//! Geocoding and distance
//!
//! Provides geocoding (address or city name to coordinates), the reference
//! point selection rules, and great-circle distance.

pub mod distance;
pub mod nominatim;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::future::Future;
use tracing::debug;

pub use distance::haversine_distance;

/// A geographic coordinate in degrees (WGS84)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    #[serde(rename = "latitude")]
    pub lat: f64,
    #[serde(rename = "longitude")]
    pub lng: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validate that coordinates are within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(Error::InvalidCoordinates(format!(
                "Latitude {} is out of range [-90, 90]",
                self.lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(Error::InvalidCoordinates(format!(
                "Longitude {} is out of range [-180, 180]",
                self.lng
            )));
        }
        Ok(())
    }
}

/// A geocoded location result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoLocation {
    pub coords: Coordinates,
    /// Display name reported by the provider
    pub display_name: String,
}

/// Trait for geocoding backends
pub trait GeoBackend: Send + Sync {
    /// Geocode a query to coordinates
    ///
    /// With `is_city` set the query is sent as a structured city lookup
    /// instead of free text. Returns `None` when the provider has no match;
    /// transport and decoding failures are errors.
    fn geocode(
        &self,
        query: &str,
        is_city: bool,
    ) -> impl Future<Output = Result<Option<GeoLocation>>> + Send;
}

/// Resolve an address or city name to coordinates
///
/// # Errors
/// - [`Error::AddressNotFound`] when the provider has no match
/// - [`Error::ResolverUnavailable`] when the provider call fails or returns
///   unusable coordinates
pub async fn resolve<G: GeoBackend>(
    backend: &G,
    query: &str,
    treat_as_city: bool,
) -> Result<Coordinates> {
    let location = backend
        .geocode(query, treat_as_city)
        .await?
        .ok_or_else(|| Error::AddressNotFound(query.to_string()))?;

    location
        .coords
        .validate()
        .map_err(|e| Error::ResolverUnavailable(e.to_string()))?;

    debug!(query, display_name = %location.display_name, "resolved reference point");
    Ok(location.coords)
}

/// The place all hotel distances are measured from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferencePoint {
    /// Free-text address
    Address(String),
    /// City name, resolved with a city-level lookup
    City(String),
}

impl ReferencePoint {
    /// Pick the reference point for an HTTP request
    ///
    /// An explicit comparison address wins; otherwise the first requested
    /// destination is used as a city.
    pub fn for_request(comparison_address: Option<&str>, destinations: &[String]) -> Result<Self> {
        if let Some(address) = comparison_address.map(str::trim).filter(|a| !a.is_empty()) {
            return Ok(Self::Address(address.to_string()));
        }

        destinations
            .iter()
            .map(|d| d.trim())
            .find(|d| !d.is_empty())
            .map(|city| Self::City(city.to_string()))
            .ok_or(Error::NoComparisonAddress)
    }

    /// Pick the reference point for a city, preferring its known landmark
    pub fn for_city(city: &str, landmarks: &HashMap<String, String>) -> Self {
        match landmarks.get(city) {
            Some(landmark) => Self::Address(landmark.clone()),
            None => Self::City(city.to_string()),
        }
    }

    /// Text sent to the geocoder
    pub fn query(&self) -> &str {
        match self {
            Self::Address(q) | Self::City(q) => q,
        }
    }

    /// Whether this point falls back to a city-level lookup
    pub fn is_city(&self) -> bool {
        matches!(self, Self::City(_))
    }

    /// Resolve this reference point with the given backend
    pub async fn resolve<G: GeoBackend>(&self, backend: &G) -> Result<Coordinates> {
        resolve(backend, self.query(), self.is_city()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedGeocoder(Option<Coordinates>);

    impl GeoBackend for FixedGeocoder {
        async fn geocode(&self, query: &str, _is_city: bool) -> Result<Option<GeoLocation>> {
            Ok(self.0.map(|coords| GeoLocation {
                coords,
                display_name: query.to_string(),
            }))
        }
    }

    struct BrokenGeocoder;

    impl GeoBackend for BrokenGeocoder {
        async fn geocode(&self, _query: &str, _is_city: bool) -> Result<Option<GeoLocation>> {
            Err(Error::ResolverUnavailable("timed out".to_string()))
        }
    }

    #[test]
    fn test_coordinates_validation() {
        assert!(Coordinates::new(41.9, 12.5).validate().is_ok());
        assert!(Coordinates::new(91.0, 0.0).validate().is_err());
        assert!(Coordinates::new(0.0, -180.5).validate().is_err());
    }

    #[test]
    fn test_coordinates_serialize_as_latitude_longitude() {
        let json = serde_json::to_value(Coordinates::new(41.9, 12.5)).unwrap();
        assert_eq!(json, serde_json::json!({"latitude": 41.9, "longitude": 12.5}));
    }

    #[tokio::test]
    async fn test_resolve_found() {
        let geocoder = FixedGeocoder(Some(Coordinates::new(41.9009, 12.4833)));
        let coords = resolve(&geocoder, "Trevi Fountain", false).await.unwrap();
        assert_eq!(coords, Coordinates::new(41.9009, 12.4833));
    }

    #[tokio::test]
    async fn test_resolve_not_found() {
        let geocoder = FixedGeocoder(None);
        let err = resolve(&geocoder, "Nowhere", false).await.unwrap_err();
        assert!(matches!(err, Error::AddressNotFound(q) if q == "Nowhere"));
    }

    #[tokio::test]
    async fn test_resolve_provider_failure() {
        let err = resolve(&BrokenGeocoder, "Rome", true).await.unwrap_err();
        assert!(matches!(err, Error::ResolverUnavailable(_)));
    }

    #[tokio::test]
    async fn test_resolve_rejects_out_of_range_coordinates() {
        let geocoder = FixedGeocoder(Some(Coordinates::new(123.0, 0.0)));
        let err = resolve(&geocoder, "Somewhere", false).await.unwrap_err();
        assert!(matches!(err, Error::ResolverUnavailable(_)));
    }

    #[test]
    fn test_reference_point_prefers_comparison_address() {
        let point =
            ReferencePoint::for_request(Some("Via del Corso 1"), &["Rome".to_string()]).unwrap();
        assert_eq!(point, ReferencePoint::Address("Via del Corso 1".to_string()));
        assert!(!point.is_city());
    }

    #[test]
    fn test_reference_point_falls_back_to_city() {
        let point = ReferencePoint::for_request(None, &["Rome".to_string()]).unwrap();
        assert_eq!(point, ReferencePoint::City("Rome".to_string()));
        assert!(point.is_city());

        let blank = ReferencePoint::for_request(Some("  "), &["Prague".to_string()]).unwrap();
        assert_eq!(blank.query(), "Prague");
    }

    #[test]
    fn test_reference_point_requires_some_location() {
        let err = ReferencePoint::for_request(None, &[]).unwrap_err();
        assert!(matches!(err, Error::NoComparisonAddress));
    }

    #[test]
    fn test_reference_point_for_city_uses_landmark() {
        let mut landmarks = HashMap::new();
        landmarks.insert("Rome".to_string(), "Trevi Fountain".to_string());

        assert_eq!(
            ReferencePoint::for_city("Rome", &landmarks),
            ReferencePoint::Address("Trevi Fountain".to_string())
        );
        assert_eq!(
            ReferencePoint::for_city("Lisbon", &landmarks),
            ReferencePoint::City("Lisbon".to_string())
        );
    }
}
