//! Bit storage for padded codeword input and unstuffed output.
//!
//! Two flavors are kept separate on purpose:
//! - [`BitView`] wraps a borrowed byte region with an explicit bit length and only reads.
//! - [`BitBuffer`] owns growable storage and only grows through appends.
//!
//! Bits are numbered from 0, most-significant bit of each byte first.

use crate::error::{AztecError, Result};
use bitvec::prelude::*;
use std::fmt;

/// Largest group of bits a single [`BitView::read`] can return.
pub const MAX_READ_BITS: usize = 64;

/// Order in which a multi-bit read assembles its result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadOrder {
    /// The first bit read becomes the most significant bit of the value.
    #[default]
    MsbFirst,
    /// The first bit read becomes the least significant bit of the value.
    LsbFirst,
}

/// Read-only window over a byte region exposing an exact number of bits
#[derive(Debug, Clone, Copy)]
pub struct BitView<'a> {
    bits: &'a BitSlice<u8, Msb0>,
}

impl<'a> BitView<'a> {
    /// Wrap `bytes`, exposing exactly `bit_length` bits.
    ///
    /// Fails with [`AztecError::OutOfRange`] if `bit_length` exceeds the bit
    /// capacity of `bytes`.
    pub fn wrap(bytes: &'a [u8], bit_length: usize) -> Result<Self> {
        let bits = BitSlice::<u8, Msb0>::from_slice(bytes);
        if bit_length > bits.len() {
            return Err(AztecError::OutOfRange {
                offset: 0,
                count: bit_length,
                length: bits.len(),
            });
        }
        Ok(Self {
            bits: &bits[..bit_length],
        })
    }

    /// Number of bits visible through this view
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether the view exposes no bits
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Single bit at `index` (`true` is 1)
    pub fn bit_at(&self, index: usize) -> Result<bool> {
        self.bits
            .get(index)
            .map(|bit| *bit)
            .ok_or(AztecError::OutOfRange {
                offset: index,
                count: 1,
                length: self.bits.len(),
            })
    }

    /// Read `bit_count` bits starting at `bit_offset` as an unsigned integer.
    ///
    /// A zero-width read returns 0. Reads wider than [`MAX_READ_BITS`] are a
    /// configuration error; reads past the end of the view are out of range.
    pub fn read(&self, bit_offset: usize, bit_count: usize, order: ReadOrder) -> Result<u64> {
        if bit_count > MAX_READ_BITS {
            return Err(AztecError::Configuration(format!(
                "cannot read {} bits into a {}-bit value",
                bit_count, MAX_READ_BITS
            )));
        }

        let out_of_range = AztecError::OutOfRange {
            offset: bit_offset,
            count: bit_count,
            length: self.bits.len(),
        };
        let end = bit_offset.checked_add(bit_count).ok_or(out_of_range.clone())?;
        if end > self.bits.len() {
            return Err(out_of_range);
        }

        let window = &self.bits[bit_offset..end];
        let value = match order {
            ReadOrder::MsbFirst => window
                .iter()
                .by_vals()
                .fold(0u64, |acc, bit| (acc << 1) | bit as u64),
            ReadOrder::LsbFirst => window
                .iter()
                .by_vals()
                .enumerate()
                .fold(0u64, |acc, (i, bit)| acc | ((bit as u64) << i)),
        };
        Ok(value)
    }

    /// Underlying bit slice
    pub fn as_bitslice(&self) -> &'a BitSlice<u8, Msb0> {
        self.bits
    }
}

impl fmt::Display for BitView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_bits(self.bits, f)
    }
}

/// Append-only growable bit buffer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitBuffer {
    bits: BitVec<u8, Msb0>,
}

impl BitBuffer {
    /// Create a new empty buffer with no preset capacity
    pub fn new() -> Self {
        Self {
            bits: BitVec::new(),
        }
    }

    /// Create an empty buffer with room for `bits` bits
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bits: BitVec::with_capacity(bits),
        }
    }

    /// Append the low `bit_count` bits of `value`, most significant first.
    ///
    /// For `bit_count` above 64 the extra leading bits copy the sign bit when
    /// `sign_extend` is set and `value` is negative, and are zero otherwise.
    pub fn append(&mut self, value: i64, bit_count: usize, sign_extend: bool) {
        let fill = sign_extend && value < 0;
        self.bits.reserve(bit_count);
        for i in (0..bit_count).rev() {
            let bit = if i < 64 { (value >> i) & 1 == 1 } else { fill };
            self.bits.push(bit);
        }
    }

    /// Append a single bit
    pub fn push_bit(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Current logical bit count
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether nothing has been appended yet
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Single bit at `index` (`true` is 1)
    pub fn bit_at(&self, index: usize) -> Result<bool> {
        self.as_view().bit_at(index)
    }

    /// Read-only view over everything appended so far
    pub fn as_view(&self) -> BitView<'_> {
        BitView {
            bits: self.bits.as_bitslice(),
        }
    }

    /// Backing bytes; bits past [`len`](Self::len) in the last byte are zero.
    pub fn into_bytes(self) -> Vec<u8> {
        let mut bits = self.bits;
        bits.set_uninitialized(false);
        bits.into_vec()
    }
}

impl fmt::Display for BitBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_bits(&self.bits, f)
    }
}

fn write_bits(bits: &BitSlice<u8, Msb0>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for bit in bits.iter().by_vals() {
        f.write_str(if bit { "1" } else { "0" })?;
    }
    Ok(())
}
