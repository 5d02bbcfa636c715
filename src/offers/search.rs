//! The offer search pipeline
//!
//! resolve reference point ∥ fetch offers → enrich → rank

use crate::config::Config;
use crate::error::Result;
use crate::geo::nominatim::NominatimBackend;
use crate::geo::{Coordinates, GeoBackend, ReferencePoint};
use crate::offers::criteria::SearchCriteria;
use crate::offers::enrich::enrich_all;
use crate::offers::fetch::{OfferFetcher, OfferSource};
use crate::offers::rank::{rank, RankedOffer};
use tracing::info;

/// Outcome of one search
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Ranked offers, nearest first
    pub offers: Vec<RankedOffer>,
    /// Resolved reference point
    pub reference: Coordinates,
    /// Offers returned by the source
    pub fetched: usize,
    /// Offers dropped during enrichment
    pub skipped: usize,
}

/// Runs searches against a geocoder and an offer source
#[derive(Debug, Clone)]
pub struct OfferSearch<G, S> {
    geocoder: G,
    source: S,
}

/// The production pipeline: Nominatim plus the holiday finder API
pub type DefaultSearch = OfferSearch<NominatimBackend, OfferFetcher>;

impl DefaultSearch {
    /// Build the production pipeline from config
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            NominatimBackend::from_config(&config.geocoder)?,
            OfferFetcher::new(&config.upstream, config.destinations.ids.clone())?,
        ))
    }
}

impl<G: GeoBackend, S: OfferSource> OfferSearch<G, S> {
    pub fn new(geocoder: G, source: S) -> Self {
        Self { geocoder, source }
    }

    /// Run one search
    ///
    /// The reference point is resolved while the offers are fetched; a
    /// resolve failure is reported ahead of a fetch failure.
    pub async fn run(
        &self,
        criteria: &SearchCriteria,
        reference: &ReferencePoint,
    ) -> Result<SearchOutcome> {
        let (resolved, fetched) = tokio::join!(
            reference.resolve(&self.geocoder),
            self.source.fetch(criteria)
        );
        let reference_coords = resolved?;
        let raw = fetched?;

        let enrichment = enrich_all(&raw);
        let offers = rank(enrichment.offers, reference_coords, criteria);

        info!(
            reference = reference.query(),
            fetched = raw.len(),
            skipped = enrichment.skipped,
            ranked = offers.len(),
            "search complete"
        );

        Ok(SearchOutcome {
            offers,
            reference: reference_coords,
            fetched: raw.len(),
            skipped: enrichment.skipped,
        })
    }
}
