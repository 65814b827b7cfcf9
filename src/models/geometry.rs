//! Word layout of padded codeword buffers and the reserved values it implies

use crate::error::{AztecError, Result};

/// Narrowest word that leaves room for a stuffing bit next to payload bits
pub const MIN_WORD_BITS: usize = 2;
/// Widest word a single read can hold
pub const MAX_WORD_BITS: usize = 64;

/// Codeword layout of a padded bit buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordGeometry {
    word_bit_count: usize,
    message_word_count: usize,
}

impl WordGeometry {
    /// Validate and build a geometry.
    ///
    /// `word_bit_count` must lie in `MIN_WORD_BITS..=MAX_WORD_BITS`.
    pub fn new(word_bit_count: usize, message_word_count: usize) -> Result<Self> {
        if !(MIN_WORD_BITS..=MAX_WORD_BITS).contains(&word_bit_count) {
            return Err(AztecError::Configuration(format!(
                "word bit count {} outside {}..={}",
                word_bit_count, MIN_WORD_BITS, MAX_WORD_BITS
            )));
        }
        Ok(Self {
            word_bit_count,
            message_word_count,
        })
    }

    /// Bit width of one codeword
    pub fn word_bit_count(&self) -> usize {
        self.word_bit_count
    }

    /// Number of leading words subject to reserved-value validation
    pub fn message_word_count(&self) -> usize {
        self.message_word_count
    }

    /// All-one codeword value
    pub fn ones(&self) -> u64 {
        u64::MAX >> (64 - self.word_bit_count)
    }

    /// All-one codeword with the lowest bit cleared
    pub fn ones_minus_one(&self) -> u64 {
        self.ones() - 1
    }

    /// Whether `value` carries a stuffing marker (`1` or `ones - 1`)
    pub fn is_stuffed(&self, value: u64) -> bool {
        value == 1 || value == self.ones_minus_one()
    }

    /// Whether `value` is the reserved all-zero or all-one pattern
    pub fn is_reserved(&self, value: u64) -> bool {
        value == 0 || value == self.ones()
    }

    /// Whether word `index` falls inside the message region
    pub fn in_message(&self, index: usize) -> bool {
        index < self.message_word_count
    }

    /// Complete words in a buffer of `total_bits` bits
    pub fn word_count(&self, total_bits: usize) -> usize {
        total_bits / self.word_bit_count
    }

    /// Trailing bits that do not form a complete word and are never processed
    pub fn tail_bits(&self, total_bits: usize) -> usize {
        total_bits % self.word_bit_count
    }

    /// Bits covered by the message region
    pub fn message_bits(&self) -> Result<usize> {
        self.message_word_count
            .checked_mul(self.word_bit_count)
            .ok_or_else(|| {
                AztecError::Configuration(format!(
                    "{} message words of {} bits overflow the addressable bit range",
                    self.message_word_count, self.word_bit_count
                ))
            })
    }
}
