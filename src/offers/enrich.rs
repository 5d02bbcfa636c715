//! Offer enrichment
//!
//! Turns a raw offer into the fields we rank and display, plus the derived
//! trip length and map link. A record missing a required field is skipped
//! with a [`SkipReason`] instead of failing the batch.

use crate::constants::geo::MAP_LINK_TEMPLATE;
use crate::geo::Coordinates;
use crate::offers::api::RawOffer;
use crate::offers::criteria::parse_date;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

/// Hotel name used when the offer has none
pub const UNKNOWN_HOTEL: &str = "Unknown Hotel";

/// Airline name used when the offer has none
pub const UNKNOWN_AIRLINE: &str = "Unknown Airline";

/// An offer with the fields we use and the derived ones
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedOffer {
    pub hotel_name: String,
    pub destination_name: Option<String>,
    pub destination_id: Option<u32>,
    pub coordinates: Coordinates,
    pub image_url: Option<String>,
    pub rating: Option<i64>,
    pub board: Option<String>,
    pub outbound_date: String,
    pub inbound_date: String,
    pub nights: u32,
    pub url: String,
    pub price: i64,
    pub airline: String,
    pub map_link: String,
}

/// Why a raw offer was left out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("missing hotel coordinates")]
    MissingCoordinates,

    #[error("malformed hotel coordinates")]
    MalformedCoordinates,

    #[error("missing travel dates")]
    MissingDates,

    #[error("missing price")]
    MissingPrice,

    #[error("missing package URL")]
    MissingUrl,
}

/// Result of enriching a batch of offers
#[derive(Debug, Clone, Default)]
pub struct Enrichment {
    pub offers: Vec<EnrichedOffer>,
    pub skipped: usize,
}

/// Nights between outbound and inbound dates (DD/MM/YYYY)
///
/// Returns 0 when either date does not parse or inbound precedes outbound.
pub fn calculate_nights(outbound_date: &str, inbound_date: &str) -> u32 {
    match (parse_date(outbound_date), parse_date(inbound_date)) {
        (Ok(outbound), Ok(inbound)) => {
            u32::try_from((inbound - outbound).num_days()).unwrap_or(0)
        }
        _ => 0,
    }
}

/// Map link for a hotel position
pub fn map_link(coords: Coordinates) -> String {
    MAP_LINK_TEMPLATE
        .replace("{lat}", &coords.lat.to_string())
        .replace("{lng}", &coords.lng.to_string())
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn hotel_coordinates(raw: &RawOffer) -> Result<Coordinates, SkipReason> {
    let coords = raw
        .hotel
        .coordinates
        .as_ref()
        .ok_or(SkipReason::MissingCoordinates)?;

    let (Some(lat), Some(lng)) = (&coords.latitude, &coords.longitude) else {
        return Err(SkipReason::MissingCoordinates);
    };

    let (Some(lat), Some(lng)) = (lat.value(), lng.value()) else {
        return Err(SkipReason::MalformedCoordinates);
    };

    let coords = Coordinates::new(lat, lng);
    coords
        .validate()
        .map_err(|_| SkipReason::MalformedCoordinates)?;
    Ok(coords)
}

/// Enrich a single raw offer
pub fn enrich(raw: &RawOffer) -> Result<EnrichedOffer, SkipReason> {
    let coordinates = hotel_coordinates(raw)?;

    let (Some(outbound_date), Some(inbound_date)) =
        (non_empty(&raw.offer.outbound_date), non_empty(&raw.offer.inbound_date))
    else {
        return Err(SkipReason::MissingDates);
    };

    let price = raw.offer.price.ok_or(SkipReason::MissingPrice)?;
    let url = non_empty(&raw.offer.package_deeplink_url).ok_or(SkipReason::MissingUrl)?;

    Ok(EnrichedOffer {
        hotel_name: non_empty(&raw.hotel.name).unwrap_or(UNKNOWN_HOTEL).to_string(),
        destination_name: raw.destination_data.name_en.clone(),
        destination_id: raw.destination_data.destination_id,
        coordinates,
        image_url: raw
            .hotel
            .photos
            .as_ref()
            .and_then(|photos| photos.first())
            .cloned(),
        rating: raw.hotel.rating,
        board: raw.hotel.board.clone(),
        outbound_date: outbound_date.to_string(),
        inbound_date: inbound_date.to_string(),
        nights: calculate_nights(outbound_date, inbound_date),
        url: url.to_string(),
        price,
        airline: non_empty(&raw.flight.company_name)
            .unwrap_or(UNKNOWN_AIRLINE)
            .to_string(),
        map_link: map_link(coordinates),
    })
}

/// Enrich every offer, dropping and counting the ones that cannot be used
pub fn enrich_all(raw: &[RawOffer]) -> Enrichment {
    let mut enrichment = Enrichment::default();

    for offer in raw {
        match enrich(offer) {
            Ok(enriched) => enrichment.offers.push(enriched),
            Err(reason) => {
                debug!(
                    offer_id = offer.offer.offer_id.as_deref().unwrap_or("?"),
                    %reason,
                    "skipping offer"
                );
                enrichment.skipped += 1;
            }
        }
    }

    if enrichment.skipped > 0 {
        warn!(
            skipped = enrichment.skipped,
            kept = enrichment.offers.len(),
            "skipped malformed offers"
        );
    }

    enrichment
}
