//! Encoder for the encoded polyline format.

use serde::{Deserialize, Serialize};

use crate::constants::{from_fixed, scale_factor, to_fixed, DEFAULT_PRECISION};
use crate::coordinate::Coordinate;
use crate::decoder::Decoder;
use crate::error::{EncodeError, MalformedPolylineError};
use crate::varint::encode_chunk;
use crate::zigzag::zigzag_encode;

/// Typical encoded size of one coordinate at precision 5 (two 4-5 byte chunks)
const BYTES_PER_POINT_HINT: usize = 8;

/// Encode a coordinate sequence into an encoded polyline
///
/// `decode(&encode(xs, p)?, p)` reproduces `xs` within `0.5 * 10^-p` per
/// component. The same `precision` must be passed to the decoder.
///
/// # Errors
/// Returns an error if a component is not finite or does not fit the 32-bit
/// fixed-point grid at this precision.
///
/// # Example
/// ```
/// use trackline::{encode, Coordinate};
///
/// let encoded = encode(&[Coordinate::new(38.5, -120.2)], 5).unwrap();
/// assert_eq!(encoded, "_p~iF~ps|U");
/// ```
pub fn encode(coordinates: &[Coordinate], precision: u8) -> Result<String, EncodeError> {
    let mut enc = Encoder::with_capacity(precision, coordinates.len());
    enc.extend(coordinates.iter().copied())?;
    Ok(enc.into_string())
}

/// [`encode`] at [`DEFAULT_PRECISION`]
///
/// # Errors
/// See [`encode`].
pub fn encode_default(coordinates: &[Coordinate]) -> Result<String, EncodeError> {
    encode(coordinates, DEFAULT_PRECISION)
}

/// Appendable polyline encoder
///
/// Keeps the encoded text plus the last fixed-point position, so a trip trace
/// can grow one GPS fix at a time without re-encoding earlier points.
///
/// Serializes as `{ "buf", "precision" }`. Deserializing goes through
/// [`Encoder::resume`], so the running position always matches the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "EncoderState", try_from = "EncoderState")]
pub struct Encoder {
    buf: String,
    precision: u8,
    prev_lat: i32,
    prev_lng: i32,
    count: usize,
}

impl Encoder {
    #[inline]
    #[must_use]
    pub fn new(precision: u8) -> Self {
        Self {
            buf: String::new(),
            precision,
            prev_lat: 0,
            prev_lng: 0,
            count: 0,
        }
    }

    /// Create an encoder with room for roughly `points` coordinates
    #[must_use]
    pub fn with_capacity(precision: u8, points: usize) -> Self {
        let mut enc = Self::new(precision);
        enc.buf.reserve(points.saturating_mul(BYTES_PER_POINT_HINT));
        enc
    }

    /// Reopen an encoded polyline for appending
    ///
    /// The string is decoded once to recover the running position.
    ///
    /// # Errors
    /// Returns an error if `encoded` is malformed.
    pub fn resume(encoded: impl Into<String>, precision: u8) -> Result<Self, MalformedPolylineError> {
        let buf = encoded.into();
        let (count, (prev_lat, prev_lng)) = {
            let mut decoder = Decoder::new(&buf, precision);
            let mut count = 0usize;
            for point in decoder.by_ref() {
                point?;
                count += 1;
            }
            (count, decoder.fixed_position())
        };

        Ok(Self {
            buf,
            precision,
            prev_lat,
            prev_lng,
            count,
        })
    }

    /// Append one coordinate
    ///
    /// On error the encoder is left unchanged.
    ///
    /// # Errors
    /// Returns an error if a component is not finite, does not fit the
    /// fixed-point grid, or its delta from the previous point overflows.
    pub fn append(&mut self, coordinate: Coordinate) -> Result<(), EncodeError> {
        let index = self.count;
        let lat = self.to_grid(coordinate.lat, index)?;
        let lng = self.to_grid(coordinate.lng, index)?;

        let d_lat = lat
            .checked_sub(self.prev_lat)
            .ok_or(EncodeError::DeltaOverflow { index })?;
        let d_lng = lng
            .checked_sub(self.prev_lng)
            .ok_or(EncodeError::DeltaOverflow { index })?;

        encode_chunk(zigzag_encode(d_lat), &mut self.buf);
        encode_chunk(zigzag_encode(d_lng), &mut self.buf);

        // Track absolute positions, not deltas, so rounding never accumulates
        self.prev_lat = lat;
        self.prev_lng = lng;
        self.count += 1;
        Ok(())
    }

    /// Append every coordinate of `coordinates` in order
    ///
    /// Stops at the first failing coordinate; earlier ones stay appended.
    ///
    /// # Errors
    /// See [`Encoder::append`].
    pub fn extend<I>(&mut self, coordinates: I) -> Result<(), EncodeError>
    where
        I: IntoIterator<Item = Coordinate>,
    {
        for coordinate in coordinates {
            self.append(coordinate)?;
        }
        Ok(())
    }

    /// Number of coordinates encoded so far
    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Encoded size in bytes
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    #[must_use]
    pub fn precision(&self) -> u8 {
        self.precision
    }

    /// Last appended coordinate, as it will decode (i.e. after rounding)
    #[must_use]
    pub fn last(&self) -> Option<Coordinate> {
        if self.count == 0 {
            return None;
        }
        let factor = scale_factor(self.precision);
        Some(Coordinate::new(
            from_fixed(self.prev_lat, factor),
            from_fixed(self.prev_lng, factor),
        ))
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    #[inline]
    #[must_use]
    pub fn into_string(self) -> String {
        self.buf
    }

    fn to_grid(&self, value: f64, index: usize) -> Result<i32, EncodeError> {
        if !value.is_finite() {
            return Err(EncodeError::NonFinite { index, value });
        }
        to_fixed(value, scale_factor(self.precision)).ok_or(EncodeError::OutOfRange {
            index,
            value,
            precision: self.precision,
        })
    }
}

/// Persisted form of an [`Encoder`]
#[derive(Serialize, Deserialize)]
struct EncoderState {
    buf: String,
    precision: u8,
}

impl From<Encoder> for EncoderState {
    fn from(enc: Encoder) -> Self {
        Self {
            buf: enc.buf,
            precision: enc.precision,
        }
    }
}

impl TryFrom<EncoderState> for Encoder {
    type Error = MalformedPolylineError;

    fn try_from(state: EncoderState) -> Result<Self, Self::Error> {
        Self::resume(state.buf, state.precision)
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new(DEFAULT_PRECISION)
    }
}

impl AsRef<str> for Encoder {
    fn as_ref(&self) -> &str {
        &self.buf
    }
}
