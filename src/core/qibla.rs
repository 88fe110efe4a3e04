//! Qibla bearing calculation.
//!
//! Computes the great-circle initial bearing from an observer toward the
//! Kaaba in Mecca. This is the direction a compass needle should point when
//! the user orients for prayer.

use serde::{Deserialize, Serialize};

/// Latitude of the Kaaba in degrees north
pub const KAABA_LATITUDE: f64 = 21.4225;
/// Longitude of the Kaaba in degrees east
pub const KAABA_LONGITUDE: f64 = 39.8262;

/// A point on the globe in decimal degrees.
///
/// Latitude is expected in [-90, 90] and longitude in [-180, 180], the
/// ranges a device location service produces. Out-of-range values are not
/// rejected; they yield a mathematically defined but meaningless bearing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    /// Degrees north of the equator
    pub latitude: f64,
    /// Degrees east of the prime meridian
    pub longitude: f64,
}

/// Computes the initial great-circle bearing from the observer to the Kaaba.
///
/// The result is in degrees, measured clockwise from true north, in the
/// range [0, 360). An observer standing exactly at the Kaaba gets 0 (the
/// `atan2(0, 0)` convention) - deterministic, though directionally
/// meaningless.
#[must_use]
pub fn qibla_bearing(observer: GeoCoordinate) -> f64 {
    let kaaba_lat = KAABA_LATITUDE.to_radians();
    let kaaba_lon = KAABA_LONGITUDE.to_radians();
    let observer_lat = observer.latitude.to_radians();
    let observer_lon = observer.longitude.to_radians();

    let delta_lon = kaaba_lon - observer_lon;
    let x = kaaba_lat.cos() * delta_lon.sin();
    let y = observer_lat.cos() * kaaba_lat.sin()
        - observer_lat.sin() * kaaba_lat.cos() * delta_lon.cos();

    let mut bearing = x.atan2(y).to_degrees();
    if bearing < 0.0 {
        bearing += 360.0;
    }

    bearing
}
