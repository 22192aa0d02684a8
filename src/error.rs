//! Error types for polyline encoding and decoding operations.

use std::fmt;

/// Error returned when an encoded polyline cannot be decoded.
///
/// Every variant carries the byte offset into the input where the fault was
/// detected. A precision mismatch between encoder and decoder is NOT one of
/// these: it yields well-formed but wrongly scaled coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedPolylineError {
    /// Byte outside the printable range `?`..=`~` (63..=126)
    InvalidCharacter { offset: usize, byte: u8 },
    /// Input ended while a chunk still had its continuation bit set
    TruncatedChunk { offset: usize },
    /// Input ended after a latitude chunk with no longitude chunk following
    MissingLongitude { offset: usize },
    /// Chunk has more than 7 groups or its value does not fit in 32 bits
    ChunkTooLong { offset: usize },
    /// Running coordinate sum left the 32-bit fixed-point range
    AccumulatorOverflow { offset: usize },
}

impl MalformedPolylineError {
    /// Byte offset at which the fault was detected
    #[must_use]
    pub fn offset(&self) -> usize {
        match *self {
            Self::InvalidCharacter { offset, .. }
            | Self::TruncatedChunk { offset }
            | Self::MissingLongitude { offset }
            | Self::ChunkTooLong { offset }
            | Self::AccumulatorOverflow { offset } => offset,
        }
    }
}

/// Error returned when a coordinate cannot be placed on the fixed-point grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EncodeError {
    /// Latitude or longitude is NaN or infinite
    NonFinite { index: usize, value: f64 },
    /// Scaled component does not fit in a signed 32-bit integer
    OutOfRange { index: usize, value: f64, precision: u8 },
    /// Difference to the previous point does not fit in a signed 32-bit integer
    DeltaOverflow { index: usize },
}

impl fmt::Display for MalformedPolylineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCharacter { offset, byte } => {
                write!(f, "invalid polyline byte 0x{byte:02x} at offset {offset}")
            }
            Self::TruncatedChunk { offset } => {
                write!(f, "polyline ends inside the chunk starting at offset {offset}")
            }
            Self::MissingLongitude { offset } => {
                write!(f, "polyline ends at offset {offset} after a latitude with no longitude")
            }
            Self::ChunkTooLong { offset } => {
                write!(f, "chunk at offset {offset} exceeds 32 bits")
            }
            Self::AccumulatorOverflow { offset } => {
                write!(f, "coordinate overflows 32-bit fixed point at offset {offset}")
            }
        }
    }
}

impl std::error::Error for MalformedPolylineError {}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite { index, value } => {
                write!(f, "coordinate {index} has non-finite component {value}")
            }
            Self::OutOfRange {
                index,
                value,
                precision,
            } => {
                write!(
                    f,
                    "coordinate {index} component {value} does not fit 32-bit fixed point at precision {precision}"
                )
            }
            Self::DeltaOverflow { index } => {
                write!(f, "delta from coordinate {} to {index} exceeds 32-bit range", index.saturating_sub(1))
            }
        }
    }
}

impl std::error::Error for EncodeError {}
