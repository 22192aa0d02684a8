//! Coordinate struct for decoded route geometry.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Mean earth radius used for great-circle distances
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A point of a route shape or trip trace, in degrees.
///
/// No range check is applied: the codec is a pure numeric transform and accepts
/// latitudes outside [-90, 90] and longitudes outside [-180, 180].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
}

impl Coordinate {
    #[inline]
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Build from a `[lon, lat]` pair, the order GeoJSON and most routing
    /// engines return
    #[inline]
    #[must_use]
    pub const fn from_lon_lat(lon: f64, lat: f64) -> Self {
        Self { lat, lng: lon }
    }

    /// The `[lon, lat]` pair for GeoJSON output
    #[inline]
    #[must_use]
    pub const fn to_lon_lat(self) -> [f64; 2] {
        [self.lng, self.lat]
    }

    /// Great-circle (haversine) distance in meters
    #[must_use]
    pub fn distance_meters(&self, other: &Self) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let delta_lat = (other.lat - self.lat).to_radians();
        let delta_lng = (other.lng - self.lng).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_M * c
    }
}

impl From<(f64, f64)> for Coordinate {
    /// Interprets the tuple as `(lat, lng)`
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

impl From<Coordinate> for (f64, f64) {
    fn from(c: Coordinate) -> Self {
        (c.lat, c.lng)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}
