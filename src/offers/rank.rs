//! Ranking offers by distance from a reference point

use crate::geo::{haversine_distance, Coordinates};
use crate::offers::criteria::SearchCriteria;
use crate::offers::enrich::EnrichedOffer;
use serde::Serialize;

/// An enriched offer with its distance from the reference point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedOffer {
    #[serde(flatten)]
    pub offer: EnrichedOffer,
    pub distance_meters: f64,
}

/// Whether an offer is in one of the requested destinations
///
/// Matches destination names case-insensitively or numeric ids exactly.
/// With no requested destinations every offer matches.
pub fn matches_destination(offer: &EnrichedOffer, criteria: &SearchCriteria) -> bool {
    let ids = criteria.destination_ids.as_deref().unwrap_or_default();
    if criteria.destination_names.is_empty() && ids.is_empty() {
        return true;
    }

    let name_match = offer.destination_name.as_deref().is_some_and(|name| {
        criteria
            .destination_names
            .iter()
            .any(|wanted| wanted.trim().eq_ignore_ascii_case(name.trim()))
    });
    let id_match = offer
        .destination_id
        .is_some_and(|id| ids.contains(&id));

    name_match || id_match
}

/// Filter to the requested destinations and sort by distance, nearest first
///
/// The sort is stable so the offers API's own ordering survives among
/// offers at the same distance.
pub fn rank(
    offers: Vec<EnrichedOffer>,
    reference: Coordinates,
    criteria: &SearchCriteria,
) -> Vec<RankedOffer> {
    let mut ranked: Vec<RankedOffer> = offers
        .into_iter()
        .filter(|offer| matches_destination(offer, criteria))
        .map(|offer| RankedOffer {
            distance_meters: haversine_distance(reference, offer.coordinates),
            offer,
        })
        .collect();

    ranked.sort_by(|a, b| a.distance_meters.total_cmp(&b.distance_meters));
    ranked
}
