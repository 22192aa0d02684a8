//! Polyline representation for route shapes and trip traces.
//!
//! Coordinates are kept decoded; encoding happens at the JSON boundary through
//! [`Polyline::encode`] or the [`crate::shape`] serde adapters.

use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;
use crate::decoder::decode;
use crate::encoder::encode;
use crate::error::{EncodeError, MalformedPolylineError};

/// An ordered path of coordinates
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Coordinate>,
}

impl Polyline {
    #[must_use]
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    /// Decode an encoded polyline
    ///
    /// # Errors
    /// Returns an error if `encoded` is malformed.
    pub fn decode(encoded: &str, precision: u8) -> Result<Self, MalformedPolylineError> {
        decode(encoded, precision).map(Self::new)
    }

    /// Encode this path
    ///
    /// # Errors
    /// Returns an error if a point cannot be placed on the fixed-point grid.
    pub fn encode(&self, precision: u8) -> Result<String, EncodeError> {
        encode(&self.points, precision)
    }

    #[must_use]
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    #[must_use]
    pub fn into_points(self) -> Vec<Coordinate> {
        self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> Option<Coordinate> {
        self.points.first().copied()
    }

    #[must_use]
    pub fn last(&self) -> Option<Coordinate> {
        self.points.last().copied()
    }

    /// Stitch the next segment of a trip onto this one
    ///
    /// When `next` starts exactly where this path ends, the junction point is
    /// kept once.
    pub fn append(&mut self, next: &Polyline) {
        let skip = usize::from(self.last().is_some() && self.last() == next.first());
        self.points.extend_from_slice(&next.points[skip..]);
    }

    /// Length along the path in meters (sum of great-circle segments)
    #[must_use]
    pub fn length_meters(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| pair[0].distance_meters(&pair[1]))
            .sum()
    }

    /// Great-circle distance between the first and last point
    #[must_use]
    pub fn endpoint_distance_meters(&self) -> f64 {
        match (self.first(), self.last()) {
            (Some(a), Some(b)) => a.distance_meters(&b),
            _ => 0.0,
        }
    }
}

impl From<Vec<Coordinate>> for Polyline {
    fn from(points: Vec<Coordinate>) -> Self {
        Self::new(points)
    }
}

impl FromIterator<Coordinate> for Polyline {
    fn from_iter<I: IntoIterator<Item = Coordinate>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
