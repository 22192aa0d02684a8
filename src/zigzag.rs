//! Zigzag mapping between signed deltas and unsigned chunk values.
//!
//! Small magnitudes stay small in both directions: `0, -1, 1, -2, 2, ...` map
//! to `0, 1, 2, 3, 4, ...`. This is the same mapping as `v < 0 ? !(v << 1) : v << 1`.

/// Fold a signed delta into an unsigned value
#[inline]
#[must_use]
pub fn zigzag_encode(value: i32) -> u32 {
    ((value << 1) ^ (value >> 31)) as u32
}

/// Unfold an unsigned value back into a signed delta
#[inline]
#[must_use]
pub fn zigzag_decode(value: u32) -> i32 {
    ((value >> 1) as i32) ^ -((value & 1) as i32)
}
