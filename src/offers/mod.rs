//! Holiday package offers
//!
//! This module handles:
//! - Encoding search criteria for the offers API
//! - Fetching and validating offers
//! - Enriching offers with trip length and map links
//! - Ranking offers by distance from a reference point

pub mod api;
pub mod criteria;
pub mod enrich;
pub mod fetch;
pub mod rank;
pub mod search;

#[cfg(test)]
pub(crate) mod testing;

pub use criteria::{Budget, Period, SearchCriteria, TravelWindow, Travelers};
pub use enrich::{enrich, enrich_all, EnrichedOffer, Enrichment, SkipReason};
pub use fetch::{OfferFetcher, OfferSource};
pub use rank::{rank, RankedOffer};
pub use search::{DefaultSearch, OfferSearch, SearchOutcome};
