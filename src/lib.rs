//! holiday-finder: holiday package offers ranked by distance
//!
//! A library and CLI tool that fetches package holidays from the holiday
//! finder offers API and ranks the hotels by great-circle distance from a
//! reference address.
//!
//! ## Features
//!
//! - Geocoding of the reference point (Nominatim), with a city-level fallback
//! - Offer fetching with per-record validation and enrichment
//! - Stable nearest-first ranking by haversine distance
//! - Batch CLI (`search`) and HTTP API (`GET /api/offers`)
//!
//! ## Quick Start
//!
//! ```rust
//! use holiday_finder::geo::{haversine_distance, Coordinates};
//!
//! let trevi = Coordinates::new(41.9009, 12.4833);
//! let colosseum = Coordinates::new(41.8902, 12.4922);
//!
//! let meters = haversine_distance(trevi, colosseum);
//! assert!(meters > 1000.0 && meters < 2000.0);
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod format;
pub mod geo;
pub mod offers;
pub mod server;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use format::OfferRecord;
pub use geo::{Coordinates, ReferencePoint};
pub use offers::{EnrichedOffer, RankedOffer, SearchCriteria};
