//! Codeword unstuffing: strips stuffing bits from padded Aztec codewords

use crate::error::{Result, ValidationError};
use crate::models::{BitBuffer, BitView, ReadOrder, WordGeometry};

/// Unstuffed bits plus bookkeeping about how they were produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnstuffOutcome {
    /// Dense output bits
    pub bits: BitBuffer,
    /// Complete words scanned
    pub words: usize,
    /// Words that carried a stuffing marker and lost one bit
    pub stuffed_words: usize,
    /// Trailing input bits that did not form a complete word
    pub ignored_tail_bits: usize,
}

/// Converts word-aligned padded codewords into a dense bitstream
pub struct CodewordUnstuffer;

impl CodewordUnstuffer {
    /// Unstuff `input` using `word_bit_count`-bit words.
    ///
    /// The first `message_word_count` words are rejected if they carry an
    /// unstuffed all-zero or all-one value. Trailing bits that do not fill a
    /// complete word are skipped.
    pub fn unstuff_words(
        input: &BitView<'_>,
        word_bit_count: usize,
        message_word_count: usize,
    ) -> Result<BitBuffer> {
        Self::unstuff(input, WordGeometry::new(word_bit_count, message_word_count)?)
    }

    /// Unstuff `input` according to `geometry`
    pub fn unstuff(input: &BitView<'_>, geometry: WordGeometry) -> Result<BitBuffer> {
        Self::unstuff_with_stats(input, geometry).map(|outcome| outcome.bits)
    }

    /// Unstuff and report word statistics alongside the bits
    pub fn unstuff_with_stats(input: &BitView<'_>, geometry: WordGeometry) -> Result<UnstuffOutcome> {
        let width = geometry.word_bit_count();
        let words = geometry.word_count(input.len());
        let mut bits = BitBuffer::with_capacity(words * width);
        let mut stuffed_words = 0;

        for index in 0..words {
            let value = input.read(index * width, width, ReadOrder::MsbFirst)?;

            if geometry.is_stuffed(value) {
                // Payload is the top width-1 bits; the low bit is the stuffing marker.
                bits.append((value >> 1) as i64, width - 1, false);
                stuffed_words += 1;
            } else if geometry.in_message(index) && geometry.is_reserved(value) {
                return Err(ValidationError::ReservedWordInMessage { index, value }.into());
            } else {
                bits.append(value as i64, width, false);
            }
        }

        Ok(UnstuffOutcome {
            bits,
            words,
            stuffed_words,
            ignored_tail_bits: geometry.tail_bits(input.len()),
        })
    }
}
