//! Serde adapters that store a coordinate list as an encoded polyline string.
//!
//! Route payloads carry geometry as a plain string field (a segment's `shape`,
//! a trip's `trace`). Annotate the field to keep it decoded in memory:
//!
//! ```
//! use serde::{Deserialize, Serialize};
//! use trackline::Coordinate;
//!
//! #[derive(Serialize, Deserialize)]
//! struct PathSegment {
//!     mode: String,
//!     #[serde(with = "trackline::shape")]
//!     shape: Vec<Coordinate>,
//! }
//!
//! let json = r#"{"mode":"walking","shape":"_p~iF~ps|U"}"#;
//! let segment: PathSegment = serde_json::from_str(json).unwrap();
//! assert_eq!(segment.shape, vec![Coordinate::new(38.5, -120.2)]);
//! assert_eq!(serde_json::to_string(&segment).unwrap(), json);
//! ```
//!
//! Use [`precision6`] for providers that emit six-digit geometry.

use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serializer};

use crate::constants::DEFAULT_PRECISION;
use crate::coordinate::Coordinate;
use crate::decoder::decode;
use crate::encoder::encode;

/// Serialize at precision 5
///
/// # Errors
/// Fails if a point cannot be encoded.
pub fn serialize<S: Serializer>(points: &[Coordinate], s: S) -> Result<S::Ok, S::Error> {
    serialize_with_precision(points, DEFAULT_PRECISION, s)
}

/// Deserialize at precision 5
///
/// # Errors
/// Fails if the field is not a string or is not a valid encoded polyline.
pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Coordinate>, D::Error> {
    deserialize_with_precision(d, DEFAULT_PRECISION)
}

/// Same adapters at precision 6
pub mod precision6 {
    use serde::{Deserializer, Serializer};

    use crate::coordinate::Coordinate;

    const PRECISION: u8 = 6;

    /// # Errors
    /// Fails if a point cannot be encoded.
    pub fn serialize<S: Serializer>(points: &[Coordinate], s: S) -> Result<S::Ok, S::Error> {
        super::serialize_with_precision(points, PRECISION, s)
    }

    /// # Errors
    /// Fails if the field is not a string or is not a valid encoded polyline.
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Coordinate>, D::Error> {
        super::deserialize_with_precision(d, PRECISION)
    }
}

fn serialize_with_precision<S: Serializer>(
    points: &[Coordinate],
    precision: u8,
    s: S,
) -> Result<S::Ok, S::Error> {
    let encoded = encode(points, precision).map_err(S::Error::custom)?;
    s.serialize_str(&encoded)
}

fn deserialize_with_precision<'de, D: Deserializer<'de>>(
    d: D,
    precision: u8,
) -> Result<Vec<Coordinate>, D::Error> {
    let encoded = String::deserialize(d)?;
    decode(&encoded, precision).map_err(D::Error::custom)
}
