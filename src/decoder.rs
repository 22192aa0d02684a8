//! Decoding functionality for encoded polylines.

use std::iter::FusedIterator;

use crate::constants::{from_fixed, scale_factor, DEFAULT_PRECISION};
use crate::coordinate::Coordinate;
use crate::error::MalformedPolylineError;
use crate::varint::ChunkReader;
use crate::zigzag::zigzag_decode;

/// Decode an encoded polyline back to coordinates
///
/// `precision` must match the one used for encoding. A mismatch is not
/// detectable here and silently rescales every coordinate by a power of ten.
///
/// # Errors
/// Returns an error if the input is truncated, contains a byte outside the
/// encoded alphabet, or describes coordinates outside the 32-bit fixed-point
/// range.
///
/// # Example
/// ```
/// use trackline::{decode, Coordinate};
///
/// let points = decode("_p~iF~ps|U_ulLnnqC_mqNvxq`@", 5).unwrap();
/// assert_eq!(points[1], Coordinate::new(40.7, -120.95));
/// ```
pub fn decode(encoded: &str, precision: u8) -> Result<Vec<Coordinate>, MalformedPolylineError> {
    Decoder::new(encoded, precision).collect()
}

/// [`decode`] at [`DEFAULT_PRECISION`]
///
/// # Errors
/// See [`decode`].
pub fn decode_default(encoded: &str) -> Result<Vec<Coordinate>, MalformedPolylineError> {
    decode(encoded, DEFAULT_PRECISION)
}

/// Streaming decoder yielding one coordinate per latitude/longitude chunk pair
///
/// Yields at most one error, after which the iterator is exhausted.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    reader: ChunkReader<'a>,
    factor: f64,
    lat: i32,
    lng: i32,
    failed: bool,
}

impl<'a> Decoder<'a> {
    #[must_use]
    pub fn new(encoded: &'a str, precision: u8) -> Self {
        Self::from_bytes(encoded.as_bytes(), precision)
    }

    /// Decode raw bytes. Bytes outside the alphabet are reported, not skipped.
    #[must_use]
    pub fn from_bytes(encoded: &'a [u8], precision: u8) -> Self {
        Self {
            reader: ChunkReader::new(encoded),
            factor: scale_factor(precision),
            lat: 0,
            lng: 0,
            failed: false,
        }
    }

    /// Byte offset of the next coordinate
    #[inline]
    #[must_use]
    pub fn position(&self) -> usize {
        self.reader.position()
    }

    /// Running fixed-point position after the last decoded coordinate
    #[inline]
    pub(crate) fn fixed_position(&self) -> (i32, i32) {
        (self.lat, self.lng)
    }

    fn next_fixed(&mut self) -> Result<(i32, i32), MalformedPolylineError> {
        let lat_offset = self.reader.position();
        let d_lat = zigzag_decode(self.reader.read_chunk()?);

        if self.reader.is_done() {
            return Err(MalformedPolylineError::MissingLongitude {
                offset: self.reader.position(),
            });
        }

        let lng_offset = self.reader.position();
        let d_lng = zigzag_decode(self.reader.read_chunk()?);

        let lat = self
            .lat
            .checked_add(d_lat)
            .ok_or(MalformedPolylineError::AccumulatorOverflow { offset: lat_offset })?;
        let lng = self
            .lng
            .checked_add(d_lng)
            .ok_or(MalformedPolylineError::AccumulatorOverflow { offset: lng_offset })?;

        self.lat = lat;
        self.lng = lng;
        Ok((lat, lng))
    }
}

impl Iterator for Decoder<'_> {
    type Item = Result<Coordinate, MalformedPolylineError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.reader.is_done() {
            return None;
        }

        match self.next_fixed() {
            Ok((lat, lng)) => Some(Ok(Coordinate::new(
                from_fixed(lat, self.factor),
                from_fixed(lng, self.factor),
            ))),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed || self.reader.is_done() {
            return (0, Some(0));
        }
        // Every coordinate takes at least two bytes
        let remaining = self.reader.remaining();
        (1, Some(remaining.div_ceil(2)))
    }
}

impl FusedIterator for Decoder<'_> {}
