//! Centralized constants for the holiday-finder crate
//!
//! This module consolidates constants that are used across multiple modules
//! to avoid duplication and ensure consistency.

/// Geographic constants
pub mod geo {
    /// Mean Earth radius in meters
    pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

    /// Map link for a hotel, `{lat}` and `{lng}` are substituted
    pub const MAP_LINK_TEMPLATE: &str = "https://www.google.com/maps/place/{lat},{lng}";
}

/// External API endpoints
pub mod api {
    /// Holiday finder offers endpoint
    pub const OFFERS_URL: &str = "https://www.holidayfinder.co.il/api_no_auth/holiday_finder/offers";

    /// OpenStreetMap Nominatim geocoding API
    pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

    /// User agent sent to Nominatim (required by its usage policy)
    pub const GEOCODER_USER_AGENT: &str = "holiday-finder/1.0 (geocoding application)";

    /// User agent sent to the offers API
    pub const OFFERS_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
}

/// Fixed values of the upstream offers query
pub mod query {
    /// Direction of the offers API "best" sort key (best first)
    pub const BEST_FIRST: i32 = -1;

    /// Page size requested from the offers API
    pub const DEFAULT_LIMIT: u32 = 1000;

    /// Offers are always requested from the first page
    pub const OFFSET: u32 = 0;

    /// Date format used by the offers API and the HTTP surface
    pub const DATE_FORMAT: &str = "%d/%m/%Y";
}
