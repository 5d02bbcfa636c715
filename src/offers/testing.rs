//! Shared fixtures for unit tests

use crate::error::{Error, Result};
use crate::geo::{Coordinates, GeoBackend, GeoLocation};
use crate::offers::api::RawOffer;
use crate::offers::criteria::SearchCriteria;
use crate::offers::fetch::OfferSource;
use serde_json::json;
use std::sync::{Arc, Mutex};

/// A complete offers API record for a Rome hotel
pub fn raw_offer_json(hotel_name: &str, lat: f64, lng: f64) -> serde_json::Value {
    json!({
        "destinationData": {
            "destinationId": 19,
            "name": "רומא",
            "name_en": "Rome",
            "coordinates": {"latitude": 41.9028, "longitude": 12.4964}
        },
        "offer": {
            "offerId": format!("offer-{}", hotel_name),
            "outboundDate": "01/10/2025",
            "inboundDate": "06/10/2025",
            "price": 480,
            "packageDeeplinkUrl": format!("https://www.holidayfinder.co.il/package/{}", hotel_name),
            "currency": "USD"
        },
        "hotel": {
            "name": hotel_name,
            "board": "BB",
            "rating": 4,
            "photos": ["https://img.example/1.jpg", "https://img.example/2.jpg"],
            "coordinates": {"latitude": lat, "longitude": lng}
        },
        "flight": {
            "company_name": "El Al",
            "company_code": "LY",
            "takeoff_hour": "06:10",
            "landing_hour": "09:05"
        }
    })
}

pub fn raw_offer(hotel_name: &str, lat: f64, lng: f64) -> RawOffer {
    serde_json::from_value(raw_offer_json(hotel_name, lat, lng)).unwrap()
}

/// Geocoder answering every query with the same result
#[derive(Debug, Clone)]
pub struct StubGeocoder {
    result: Option<Coordinates>,
    calls: Arc<Mutex<Vec<(String, bool)>>>,
}

impl StubGeocoder {
    pub fn at(lat: f64, lng: f64) -> Self {
        Self {
            result: Some(Coordinates::new(lat, lng)),
            calls: Arc::default(),
        }
    }

    pub fn not_found() -> Self {
        Self {
            result: None,
            calls: Arc::default(),
        }
    }

    /// Queries seen so far, with their city flag
    pub fn calls(&self) -> Vec<(String, bool)> {
        self.calls.lock().unwrap().clone()
    }
}

impl GeoBackend for StubGeocoder {
    async fn geocode(&self, query: &str, is_city: bool) -> Result<Option<GeoLocation>> {
        self.calls.lock().unwrap().push((query.to_string(), is_city));
        Ok(self.result.map(|coords| GeoLocation {
            coords,
            display_name: query.to_string(),
        }))
    }
}

/// Offer source returning fixed offers or failing
#[derive(Debug, Clone)]
pub struct StubSource {
    offers: Option<Vec<RawOffer>>,
}

impl StubSource {
    pub fn offers(offers: Vec<RawOffer>) -> Self {
        Self {
            offers: Some(offers),
        }
    }

    pub fn unavailable() -> Self {
        Self { offers: None }
    }
}

impl OfferSource for StubSource {
    async fn fetch(&self, _criteria: &SearchCriteria) -> Result<Vec<RawOffer>> {
        self.offers
            .clone()
            .ok_or_else(|| Error::UpstreamUnavailable("connection refused".to_string()))
    }
}
