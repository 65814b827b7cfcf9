//! Input helpers shared by the CLI, tests and benchmarks.

use crate::models::{AztecStructure, AztecSymbol, BitBuffer};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Failures while turning user-supplied text or files into codeword bytes.
#[derive(Error, Debug)]
pub enum InputError {
    /// File could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Hex text was malformed.
    #[error("invalid hex input: {0}")]
    Hex(String),

    /// Bit string contained something other than `0` or `1`.
    #[error("invalid bit character {ch:?} at position {position}")]
    Bit {
        /// Offending character.
        ch: char,
        /// Character index in the input.
        position: usize,
    },

    /// Symbol fixture line was malformed.
    #[error("line {line}: {reason}")]
    Fixture {
        /// 1-based line number.
        line: usize,
        /// What was wrong.
        reason: String,
    },
}

/// Read a file of raw codeword bytes.
pub fn load_bytes<P: AsRef<Path>>(path: P) -> Result<Vec<u8>, InputError> {
    Ok(fs::read(path)?)
}

/// Parse hex text into bytes.
///
/// Whitespace, `_` separators and an optional `0x` prefix are accepted.
pub fn parse_hex(text: &str) -> Result<Vec<u8>, InputError> {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let digits: Vec<u8> = body
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .map(|c| {
            c.to_digit(16)
                .map(|d| d as u8)
                .ok_or_else(|| InputError::Hex(format!("unexpected character {:?}", c)))
        })
        .collect::<Result<_, _>>()?;

    if digits.len() % 2 != 0 {
        return Err(InputError::Hex(format!(
            "odd number of hex digits ({})",
            digits.len()
        )));
    }

    Ok(digits.chunks(2).map(|pair| (pair[0] << 4) | pair[1]).collect())
}

/// Parse a string of `0`/`1` characters into a bit buffer.
///
/// Whitespace and `_` are ignored so long inputs can be grouped by word.
pub fn parse_bit_string(text: &str) -> Result<BitBuffer, InputError> {
    let mut bits = BitBuffer::with_capacity(text.len());
    for (position, ch) in text.chars().enumerate() {
        match ch {
            '0' => bits.push_bit(false),
            '1' => bits.push_bit(true),
            c if c.is_whitespace() || c == '_' => {}
            ch => return Err(InputError::Bit { ch, position }),
        }
    }
    Ok(bits)
}

/// Pack codewords of `word_bit_count` bits into bytes, MSB first.
///
/// Each word contributes its low `word_bit_count` bits; the last byte is zero padded.
pub fn pack_words(words: &[u64], word_bit_count: usize) -> Vec<u8> {
    let mut bits = BitBuffer::with_capacity(words.len() * word_bit_count);
    for &word in words {
        bits.append(word as i64, word_bit_count, false);
    }
    bits.into_bytes()
}

/// Parse one symbol fixture line: `<compact|full> <layers> <message_words> <hex>`.
///
/// Returns `Ok(None)` for blank lines and `#` comments.
pub fn parse_symbol_line(line: &str, line_no: usize) -> Result<Option<AztecSymbol>, InputError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let fixture_err = |reason: String| InputError::Fixture {
        line: line_no,
        reason,
    };

    let mut fields = trimmed.split_whitespace();
    let structure = match fields.next() {
        Some(s) if s.eq_ignore_ascii_case("compact") => AztecStructure::Compact,
        Some(s) if s.eq_ignore_ascii_case("full") => AztecStructure::Full,
        other => return Err(fixture_err(format!("unknown structure {:?}", other))),
    };
    let layers = fields
        .next()
        .and_then(|v| v.parse::<u8>().ok())
        .ok_or_else(|| fixture_err("missing or invalid layer count".to_string()))?;
    let message_words = fields
        .next()
        .and_then(|v| v.parse::<usize>().ok())
        .ok_or_else(|| fixture_err("missing or invalid message word count".to_string()))?;
    let hex: String = fields.collect();
    let corrected = parse_hex(&hex).map_err(|e| fixture_err(e.to_string()))?;

    Ok(Some(AztecSymbol::new(structure, layers, message_words, corrected)))
}

/// Read every symbol from a fixture file.
pub fn load_symbols<P: AsRef<Path>>(path: P) -> Result<Vec<AztecSymbol>, InputError> {
    let content = fs::read_to_string(path)?;
    let mut symbols = Vec::new();
    for (i, line) in content.lines().enumerate() {
        if let Some(symbol) = parse_symbol_line(line, i + 1)? {
            symbols.push(symbol);
        }
    }
    Ok(symbols)
}
