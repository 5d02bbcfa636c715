//! Great-circle distance

use crate::constants::geo::EARTH_RADIUS_METERS;
use crate::geo::Coordinates;

/// Calculate the distance between two points in meters (Haversine formula)
///
/// # Arguments
/// * `a` - First point
/// * `b` - Second point
///
/// # Returns
/// Distance in meters, symmetric in its arguments and zero for identical points
pub fn haversine_distance(a: Coordinates, b: Coordinates) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);

    // Rounding can push h a hair outside [0, 1] near antipodes
    let c = 2.0 * h.sqrt().clamp(-1.0, 1.0).asin();

    c * EARTH_RADIUS_METERS
}
