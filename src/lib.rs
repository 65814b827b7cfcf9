//! aztec_bits - Aztec codeword unstuffing
//!
//! Turns the padded, word-aligned codewords of a detected Aztec symbol into
//! the dense payload bitstream that character decoding works on. Image
//! handling, detection and error correction happen upstream; this crate picks
//! up after Reed-Solomon correction.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Codeword decoding (unstuffing, runtime configuration)
pub mod decoder;
/// Error types
pub mod error;
/// Core data structures (BitView, BitBuffer, WordGeometry, AztecSymbol)
pub mod models;
/// Input parsing helpers for the CLI and tests
pub mod tools;

pub use decoder::unstuff::{CodewordUnstuffer, UnstuffOutcome};
pub use error::{AztecError, Result, ValidationError};
pub use models::{AztecStructure, AztecSymbol, BitBuffer, BitView, ReadOrder, WordGeometry};

use rayon::prelude::*;

/// Strip stuffing bits from `input`
///
/// # Arguments
/// * `input` - Padded codewords, word 0 first
/// * `word_bit_count` - Bit width of one codeword (at least 2)
/// * `message_word_count` - Leading words that must not carry reserved values
///
/// # Returns
/// The dense bitstream, or the first error encountered. Trailing bits that do
/// not form a complete word are ignored.
pub fn unstuff(
    input: &BitView<'_>,
    word_bit_count: usize,
    message_word_count: usize,
) -> Result<BitBuffer> {
    CodewordUnstuffer::unstuff_words(input, word_bit_count, message_word_count)
}

/// Unstuff the message words of many symbols, preserving input order
///
/// Uses the rayon pool once the batch reaches the configured size
/// (`AZTEC_PAR_MIN_BATCH`, default 64).
pub fn unstuff_batch(symbols: &[AztecSymbol]) -> Vec<Result<BitBuffer>> {
    Unstuffer::new().unstuff_batch(symbols)
}

/// Reusable unstuffing handle with batch settings
#[derive(Debug, Clone, Default)]
pub struct Unstuffer {
    /// Overrides the environment threshold for parallel batches
    par_min_batch: Option<usize>,
}

impl Unstuffer {
    /// Create an unstuffer using environment defaults
    pub fn new() -> Self {
        Self { par_min_batch: None }
    }

    /// Create an unstuffer with an explicit parallel batch threshold
    pub fn with_par_min_batch(min_batch: usize) -> Self {
        Self {
            par_min_batch: Some(min_batch.max(1)),
        }
    }

    /// Batch size at which work moves onto the rayon pool
    pub fn par_min_batch(&self) -> usize {
        self.par_min_batch
            .unwrap_or_else(decoder::config::par_min_batch)
    }

    /// Unstuff one symbol's message words
    pub fn unstuff_symbol(&self, symbol: &AztecSymbol) -> Result<BitBuffer> {
        let result = symbol.unstuff();
        match &result {
            Ok(bits) => tracing::trace!(
                layers = symbol.data_layers,
                message_words = symbol.message_word_count,
                bits = bits.len(),
                "symbol unstuffed"
            ),
            Err(err) => tracing::trace!(
                layers = symbol.data_layers,
                message_words = symbol.message_word_count,
                "symbol rejected: {}",
                err
            ),
        }
        result
    }

    /// Unstuff many symbols; each result is independent of the others
    pub fn unstuff_batch(&self, symbols: &[AztecSymbol]) -> Vec<Result<BitBuffer>> {
        let parallel = symbols.len() >= self.par_min_batch();
        let results: Vec<Result<BitBuffer>> = if parallel {
            symbols.par_iter().map(|s| self.unstuff_symbol(s)).collect()
        } else {
            symbols.iter().map(|s| self.unstuff_symbol(s)).collect()
        };

        let failed = results.iter().filter(|r| r.is_err()).count();
        tracing::debug!(
            symbols = symbols.len(),
            failed,
            parallel,
            "batch unstuffed"
        );
        results
    }
}
