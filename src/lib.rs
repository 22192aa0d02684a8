//! `trackline` - Encoded polyline codec for route shapes and trip traces
//!
//! Converts between a sequence of `(lat, lng)` coordinates and the compact ASCII
//! "encoded polyline" format used by map and routing services to ship path
//! geometry inside JSON payloads.
//!
//! # Example
//! ```
//! use trackline::{decode, encode, Coordinate};
//!
//! let path = [
//!     Coordinate::new(38.5, -120.2),
//!     Coordinate::new(40.7, -120.95),
//!     Coordinate::new(43.252, -126.453),
//! ];
//!
//! let encoded = encode(&path, 5).unwrap();
//! assert_eq!(encoded, "_p~iF~ps|U_ulLnnqC_mqNvxq`@");
//!
//! // Decode with the same precision used for encoding
//! let decoded = decode(&encoded, 5).unwrap();
//! assert_eq!(decoded, path);
//! ```
//!
//! # Precision
//!
//! Each component is multiplied by `10^precision` and rounded to an `i32`. The
//! default is 5 digits (~1.1 m); some providers use 6. The precision is not
//! stored in the string: **decoding with a different precision than encoding
//! silently scales every coordinate by a power of ten.** Round trips are exact
//! on the rounded grid, so `decode(encode(xs, p), p)` is within `0.5 * 10^-p`
//! of `xs` per component.
//!
//! # Wire Format
//!
//! No header and no separators. Each coordinate is two chunks, latitude then
//! longitude, each holding the delta from the previous coordinate (the first
//! coordinate is a delta from `(0, 0)`).
//!
//! | Step | Operation | Example (`-179.98321`) |
//! |------|-----------|-------------------------|
//! | 1 | Scale and round to `i32` | `-17998321` |
//! | 2 | Delta from previous point | (first point: unchanged) |
//! | 3 | Zigzag: `v < 0 ? !(v << 1) : v << 1` | `35996641` |
//! | 4 | Split into 5-bit groups, least significant first | `1 31 16 10 2 1` |
//! | 5 | Set `0x20` on every group but the last | `33 63 48 42 34 1` |
//! | 6 | Add 63 and emit as ASCII | `` `~oia@ `` |
//!
//! Every byte of a well-formed polyline lies in `?` (63) ..= `~` (126).
//!
//! ## Supported Ranges
//! - Fixed-point values and deltas: `i32`
//! - Chunks: up to 7 groups (a full `u32`)
//! - Latitude/longitude are not range checked
//!
//! # Errors
//!
//! Decoding never reads past the input. Truncated chunks, stray bytes, and
//! overlong chunks are reported as [`MalformedPolylineError`] with the byte
//! offset. Encoding rejects non-finite or unrepresentable values with
//! [`EncodeError`].

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]

mod constants;
mod coordinate;
mod decoder;
mod encoder;
mod error;
mod polyline;
pub mod shape;
mod varint;
mod zigzag;

#[cfg(test)]
mod tests;

// Re-export public API
pub use constants::DEFAULT_PRECISION;
pub use coordinate::Coordinate;
pub use decoder::{decode, decode_default, Decoder};
pub use encoder::{encode, encode_default, Encoder};
pub use error::{EncodeError, MalformedPolylineError};
pub use polyline::Polyline;
pub use varint::{decode_chunk, encode_chunk, ChunkReader};
pub use zigzag::{zigzag_decode, zigzag_encode};
