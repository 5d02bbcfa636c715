//! Output formatters
//!
//! Provides the output record shape shared by the CLI and the HTTP API and
//! trait-based formatting of ranked offer lists.

pub mod json;
pub mod text;

use crate::error::Result;
use crate::offers::RankedOffer;
use serde::{Deserialize, Serialize};

/// A ranked offer as presented to users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferRecord {
    pub name: String,
    pub url: String,
    pub rating: Option<i64>,
    pub image_url: Option<String>,
    pub google_maps_url: String,
    pub nights_amount: u32,
    pub start_date: String,
    pub end_date: String,
    /// Whole meters, truncated
    pub distance_meters: u64,
    pub price: i64,
    pub airline: String,
}

impl From<&RankedOffer> for OfferRecord {
    fn from(ranked: &RankedOffer) -> Self {
        let offer = &ranked.offer;
        Self {
            name: offer.hotel_name.clone(),
            url: offer.url.clone(),
            rating: offer.rating,
            image_url: offer.image_url.clone(),
            google_maps_url: offer.map_link.clone(),
            nights_amount: offer.nights,
            start_date: offer.outbound_date.clone(),
            end_date: offer.inbound_date.clone(),
            distance_meters: ranked.distance_meters as u64,
            price: offer.price,
            airline: offer.airline.clone(),
        }
    }
}

/// Project ranked offers to output records, keeping their order
pub fn to_records(offers: &[RankedOffer]) -> Vec<OfferRecord> {
    offers.iter().map(OfferRecord::from).collect()
}

/// Information about an output format
#[derive(Debug, Clone)]
pub struct FormatInfo {
    /// Format name
    pub name: String,
    /// Format description
    pub description: String,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Get the format name
    fn name(&self) -> &str;

    /// Get the format description
    fn description(&self) -> &str;

    /// Format a ranked list of offers
    fn format(&self, records: &[OfferRecord]) -> Result<String>;
}

/// Get a formatter by name
pub fn get_formatter(name: &str) -> Option<Box<dyn OutputFormatter>> {
    match name.to_lowercase().as_str() {
        "json" => Some(Box::new(json::JsonFormatter)),
        "text" => Some(Box::new(text::TextFormatter)),
        _ => None,
    }
}

/// List all available formatters
pub fn available_formats() -> Vec<FormatInfo> {
    [
        &json::JsonFormatter as &dyn OutputFormatter,
        &text::TextFormatter,
    ]
    .into_iter()
    .map(|f| FormatInfo {
        name: f.name().to_string(),
        description: f.description().to_string(),
    })
    .collect()
}
