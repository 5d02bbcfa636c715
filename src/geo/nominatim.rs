//! Nominatim geocoding backend (OpenStreetMap)
//!
//! Uses the free Nominatim API for geocoding. Its usage policy asks for an
//! identifying User-Agent and at most one request per second; nothing here
//! throttles calls, so heavy use should point `geocoder.base_url` at a
//! self-hosted instance.

use crate::config::GeocoderConfig;
use crate::error::{Error, Result};
use crate::geo::{Coordinates, GeoBackend, GeoLocation};
use serde::Deserialize;
use tracing::debug;

/// Nominatim geocoding backend
#[derive(Debug, Clone)]
pub struct NominatimBackend {
    client: reqwest::Client,
    base_url: String,
}

/// Nominatim search response item
#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
    display_name: String,
}

impl NominatimBackend {
    /// Create a new Nominatim backend
    pub fn new(base_url: impl Into<String>, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build geocoder HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Create a backend from the `[geocoder]` config section
    pub fn from_config(config: &GeocoderConfig) -> Result<Self> {
        Self::new(&config.base_url, &config.user_agent)
    }

    /// Build the search URL, structured by city or free text
    fn search_url(&self, query: &str, is_city: bool) -> String {
        let field = if is_city { "city" } else { "q" };
        format!(
            "{}/search?{}={}&format=json&limit=1",
            self.base_url,
            field,
            urlencoding::encode(query)
        )
    }

    /// Parse lat/lng strings to f64
    fn parse_coords(lat: &str, lng: &str) -> Result<Coordinates> {
        let lat: f64 = lat.parse().map_err(|_| {
            Error::ResolverUnavailable(format!("Invalid latitude: {}", lat))
        })?;
        let lng: f64 = lng.parse().map_err(|_| {
            Error::ResolverUnavailable(format!("Invalid longitude: {}", lng))
        })?;
        Ok(Coordinates::new(lat, lng))
    }
}

impl GeoBackend for NominatimBackend {
    async fn geocode(&self, query: &str, is_city: bool) -> Result<Option<GeoLocation>> {
        let url = self.search_url(query, is_city);
        debug!(%url, "geocoding");

        let response = self.client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::ResolverUnavailable(format!("Nominatim request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::ResolverUnavailable(format!(
                "Nominatim returned status: {}",
                response.status()
            )));
        }

        let results: Vec<NominatimResult> = response
            .json()
            .await
            .map_err(|e| {
                Error::ResolverUnavailable(format!("Failed to parse Nominatim response: {}", e))
            })?;

        match results.into_iter().next() {
            Some(result) => Ok(Some(GeoLocation {
                coords: Self::parse_coords(&result.lat, &result.lon)?,
                display_name: result.display_name,
            })),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::api::{GEOCODER_USER_AGENT, NOMINATIM_URL};

    fn backend() -> NominatimBackend {
        NominatimBackend::new(NOMINATIM_URL, GEOCODER_USER_AGENT).unwrap()
    }

    #[test]
    fn test_parse_coords() {
        let coords = NominatimBackend::parse_coords("41.9009", "12.4833").unwrap();
        assert!((coords.lat - 41.9009).abs() < 0.0001);
        assert!((coords.lng - 12.4833).abs() < 0.0001);
    }

    #[test]
    fn test_parse_coords_invalid() {
        assert!(NominatimBackend::parse_coords("invalid", "0").is_err());
        assert!(NominatimBackend::parse_coords("0", "invalid").is_err());
    }

    #[test]
    fn test_free_text_search_url() {
        let url = backend().search_url("Trevi Fountain", false);
        assert_eq!(
            url,
            "https://nominatim.openstreetmap.org/search?q=Trevi%20Fountain&format=json&limit=1"
        );
    }

    #[test]
    fn test_city_search_url() {
        let url = backend().search_url("Rome", true);
        assert_eq!(
            url,
            "https://nominatim.openstreetmap.org/search?city=Rome&format=json&limit=1"
        );
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let backend = NominatimBackend::new("http://localhost:9000/", "test").unwrap();
        assert!(backend.search_url("x", false).starts_with("http://localhost:9000/search?"));
    }
}
