//! Bit-addressable octet buffer for packed constraint flags
//!
//! Codec specifications number the bits of the same byte run in opposite
//! directions, so [`BitList`] exposes both conventions side by side:
//!
//! - [`BitList::bit_set_legacy`]: 1-based, counting from the least
//!   significant bit of the most recently pushed octet (HEVC tables).
//! - [`BitList::bit_set`] / [`BitList::value`]: 0-based, counting from the
//!   most significant bit of the first pushed octet (VVC tables).
//!
//! Out-of-range reads return `false`/`0` so truncated constraint runs can
//! still be decoded.

use bytes::{BufMut, Bytes, BytesMut};
use core::fmt;

/// Append-only builder for a [`BitList`]
#[derive(Debug, Default)]
pub struct BitListBuilder {
    buf: BytesMut,
}

impl BitListBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty builder with room for `octets` bytes
    pub fn with_capacity(octets: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(octets),
        }
    }

    /// Append a value, keeping only its low 8 bits
    pub fn push(&mut self, value: u32) -> &mut Self {
        self.buf.put_u8((value & 0xff) as u8);
        self
    }

    /// Freeze the pushed octets into an immutable [`BitList`]
    pub fn finish(self) -> BitList {
        BitList {
            bytes: self.buf.freeze(),
        }
    }
}

/// Immutable octet sequence with bit-level accessors
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BitList {
    bytes: Bytes,
}

impl BitList {
    /// Build a list from raw octets, in push order
    pub fn from_octets(octets: &[u8]) -> Self {
        Self {
            bytes: Bytes::copy_from_slice(octets),
        }
    }

    /// Number of octets
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True when no octets were pushed
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Number of addressable bits
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8
    }

    /// Raw octets in push order
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Legacy convention: bit 1 is the LSB of the last octet, bit `8 * len`
    /// the MSB of the first octet. Bit 0 and anything past the end are unset.
    pub fn bit_set_legacy(&self, bit: usize) -> bool {
        if bit == 0 || bit > self.bit_len() {
            return false;
        }
        let idx = self.bytes.len() - (bit - 1) / 8 - 1;
        let shift = (bit - 1) % 8;
        self.bytes[idx] & (1 << shift) != 0
    }

    /// Canonical convention: bit 0 is the MSB of the first octet.
    pub fn bit_set(&self, bit: usize) -> bool {
        if bit >= self.bit_len() {
            return false;
        }
        let mask = 0x80u8 >> (bit % 8);
        self.bytes[bit / 8] & mask != 0
    }

    /// Read `length` canonical bits starting at `bit`, MSB first.
    ///
    /// Bits past the end read as zero. Only the last 32 bits of an overlong
    /// read survive in the result.
    pub fn value(&self, bit: usize, length: usize) -> u32 {
        (0..length).fold(0u32, |acc, i| {
            let set = bit.checked_add(i).is_some_and(|b| self.bit_set(b));
            (acc << 1) | u32::from(set)
        })
    }

    /// Lowercase, zero-padded hex of every octet in push order
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }

    /// One `0`/`1` character per bit in canonical order
    pub fn to_bit_string(&self) -> String {
        (0..self.bit_len())
            .map(|bit| if self.bit_set(bit) { '1' } else { '0' })
            .collect()
    }
}

impl fmt::Display for BitList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromIterator<u32> for BitList {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        let mut builder = BitListBuilder::new();
        for value in iter {
            builder.push(value);
        }
        builder.finish()
    }
}

/// Test bit `bit` (0 = LSB) of a 32-bit word; out-of-range bits are unset.
pub const fn bit_set_32(value: u32, bit: u32) -> bool {
    bit < 32 && value & (1 << bit) != 0
}
