//! Variable-length base-32 chunks.
//!
//! A chunk stores one `u32` as little-endian five-bit groups. Each group is
//! emitted as one byte: `group | 0x20` when more groups follow, `group` for the
//! last one, then shifted up by 63 into printable ASCII.

use crate::constants::{
    ASCII_OFFSET, CONTINUATION_BIT, GROUP_BITS, GROUP_MASK, MAX_CHUNK_GROUPS, MAX_ENCODED_BYTE,
};
use crate::error::MalformedPolylineError;

/// Append the chunk for `value` to `out`
#[inline]
pub fn encode_chunk(mut value: u32, out: &mut String) {
    let continuation = u32::from(CONTINUATION_BIT);
    while value >= continuation {
        let group = (value & u32::from(GROUP_MASK)) as u8;
        out.push(char::from((CONTINUATION_BIT | group) + ASCII_OFFSET));
        value >>= GROUP_BITS;
    }
    out.push(char::from(value as u8 + ASCII_OFFSET));
}

/// Decode the single chunk at the start of `bytes`
///
/// Returns the value and the number of bytes consumed.
///
/// # Errors
/// Returns an error if the chunk is empty, truncated, too long, or contains a
/// byte outside the encoded alphabet.
pub fn decode_chunk(bytes: &[u8]) -> Result<(u32, usize), MalformedPolylineError> {
    let mut reader = ChunkReader::new(bytes);
    let value = reader.read_chunk()?;
    Ok((value, reader.position()))
}

/// Cursor over a byte buffer of concatenated chunks
#[derive(Debug, Clone)]
pub struct ChunkReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ChunkReader<'a> {
    /// Create a reader positioned at the first byte
    #[inline]
    #[must_use]
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Byte offset of the next unread chunk
    #[inline]
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of unread bytes
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    /// True once every byte has been consumed
    #[inline]
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.pos >= self.buf.len()
    }

    /// Read the next chunk
    ///
    /// On error the cursor position is unspecified; callers stop reading.
    ///
    /// # Errors
    /// See [`decode_chunk`].
    pub fn read_chunk(&mut self) -> Result<u32, MalformedPolylineError> {
        let start = self.pos;
        let mut value = 0u64;

        for group_idx in 0..MAX_CHUNK_GROUPS {
            let Some(&byte) = self.buf.get(self.pos) else {
                return Err(MalformedPolylineError::TruncatedChunk { offset: start });
            };
            if !(ASCII_OFFSET..=MAX_ENCODED_BYTE).contains(&byte) {
                return Err(MalformedPolylineError::InvalidCharacter { offset: self.pos, byte });
            }
            self.pos += 1;

            let bits = byte - ASCII_OFFSET;
            value |= u64::from(bits & GROUP_MASK) << (group_idx * GROUP_BITS);

            if bits & CONTINUATION_BIT == 0 {
                return u32::try_from(value)
                    .map_err(|_| MalformedPolylineError::ChunkTooLong { offset: start });
            }
        }

        Err(MalformedPolylineError::ChunkTooLong { offset: start })
    }
}
