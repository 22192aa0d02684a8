//! Wire constants and fixed-point helpers shared by the encoder and decoder.

/// Precision used when the caller does not choose one (5 decimal digits, ~1.1 m)
pub const DEFAULT_PRECISION: u8 = 5;

/// Every encoded byte is a 6-bit group shifted up into printable ASCII
pub(crate) const ASCII_OFFSET: u8 = 63;

/// Highest byte the encoder can emit (`0x20 | 0x1f` plus the offset, i.e. `~`)
pub(crate) const MAX_ENCODED_BYTE: u8 = ASCII_OFFSET + (CONTINUATION_BIT | GROUP_MASK);

/// Set on every group of a chunk except the last
pub(crate) const CONTINUATION_BIT: u8 = 0x20;

/// Payload bits carried by one group
pub(crate) const GROUP_MASK: u8 = 0x1f;

/// Number of payload bits per group
pub(crate) const GROUP_BITS: u32 = 5;

/// A `u32` needs at most 7 five-bit groups (35 bits). Anything longer is corrupt.
pub(crate) const MAX_CHUNK_GROUPS: u32 = 7;

/// Scale factor `10^precision` converting degrees to the fixed-point domain
#[inline]
pub(crate) fn scale_factor(precision: u8) -> f64 {
    10f64.powi(i32::from(precision))
}

/// Round a scaled component to the fixed-point grid.
///
/// Returns `None` when the result is not representable as `i32`. Halves round
/// toward positive infinity (`-2.5 -> -2`, `2.5 -> 3`), the rounding used by
/// the JavaScript polyline implementations this format interoperates with.
#[inline]
pub(crate) fn to_fixed(value: f64, factor: f64) -> Option<i32> {
    let scaled = round_half_up(value * factor);
    if !scaled.is_finite() || scaled < f64::from(i32::MIN) || scaled > f64::from(i32::MAX) {
        return None;
    }
    Some(scaled as i32)
}

/// `floor(x + 0.5)` without the precision loss of adding 0.5 first
#[inline]
pub(crate) fn round_half_up(x: f64) -> f64 {
    let floor = x.floor();
    if x - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Convert a fixed-point component back to degrees.
///
/// Division (not multiplication by the reciprocal) keeps the canonical values
/// exact, e.g. `-12020000 / 1e5 == -120.2`.
#[inline]
pub(crate) fn from_fixed(value: i32, factor: f64) -> f64 {
    f64::from(value) / factor
}
