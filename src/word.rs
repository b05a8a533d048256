//! Bit-plane transpose between a chunk of up to four bytes and a 32-bit word.
//!
//! The four input bytes are read as four rows of eight bits. Nibble `k` of
//! the word holds bit `k` of byte 0, 1, 2 and 3 as its own bits 0 to 3, so
//! bit `k` of byte `b` lands at bit `k * 4 + b`.

use super::*;

/// Encode a chunk of up to four bytes into a word.
///
/// Short chunks are padded with zero bytes on the high-order side.
pub fn encode(chunk: &[u8]) -> Result<u32> {
    if chunk.len() > CHUNK_LEN {
        return Err(Error::InvalidChunkLength(chunk.len()));
    }
    let mut padded = [0; CHUNK_LEN];
    padded[..chunk.len()].copy_from_slice(chunk);
    let raw = u32::from_le_bytes(padded);

    let mut word: u32 = 0;
    for byte in 0..CHUNK_LEN {
        for bit in 0..8 {
            if raw & (1u32 << (byte * 8 + bit)) != 0 {
                word |= 1u32 << (bit * 4 + byte);
            }
        }
    }
    Ok(word)
}

/// Decode a word back into the four bytes it was built from.
///
/// Padding is kept; see [`trim_padding`].
pub fn decode(word: u32) -> [u8; CHUNK_LEN] {
    let mut raw: u32 = 0;
    for byte in 0..CHUNK_LEN {
        for bit in 0..8 {
            if word & (1u32 << (bit * 4 + byte)) != 0 {
                raw |= 1u32 << (byte * 8 + bit);
            }
        }
    }
    raw.to_le_bytes()
}

/// Strip trailing zero bytes from a decoded chunk.
///
/// Zero bytes that were part of the original payload are indistinguishable
/// from encoder padding and are dropped too.
pub fn trim_padding(chunk: &[u8; CHUNK_LEN]) -> &[u8] {
    let len = chunk.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    &chunk[..len]
}
