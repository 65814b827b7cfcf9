//! Aztec codeword decoding
//!
//! This module turns the corrected codewords of a detected symbol into a
//! dense payload bitstream:
//! - Stuffing-bit removal and reserved-word validation
//! - Runtime tuning knobs for batch processing

pub mod config;
/// Codeword unstuffing (stuffing-bit removal)
pub mod unstuff;
