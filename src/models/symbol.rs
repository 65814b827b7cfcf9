//! Detected Aztec symbols and the codeword width implied by their layer count

use super::{BitBuffer, BitView, WordGeometry};
use crate::decoder::unstuff::CodewordUnstuffer;
use crate::error::{AztecError, Result};

/// Aztec symbol structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AztecStructure {
    /// Compact symbol (1-4 data layers)
    Compact,
    /// Full-range symbol (1-32 data layers)
    Full,
}

impl AztecStructure {
    /// Largest data layer count this structure allows
    pub fn max_layers(&self) -> u8 {
        match self {
            AztecStructure::Compact => 4,
            AztecStructure::Full => 32,
        }
    }

    /// Codeword width in bits for a symbol with `layers` data layers
    pub fn word_bit_count(&self, layers: u8) -> Result<usize> {
        if layers == 0 || layers > self.max_layers() {
            return Err(AztecError::Configuration(format!(
                "{:?} symbol cannot have {} data layers",
                self, layers
            )));
        }
        Ok(match layers {
            1..=2 => 6,
            3..=8 => 8,
            9..=22 => 10,
            _ => 12,
        })
    }
}

/// One detected symbol as handed over by the marker detector.
///
/// `corrected` holds the error-corrected codewords packed MSB-first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AztecSymbol {
    /// Compact or full-range
    pub structure: AztecStructure,
    /// Number of data layers
    pub data_layers: u8,
    /// Number of leading words carrying payload
    pub message_word_count: usize,
    /// Corrected codeword bytes
    pub corrected: Vec<u8>,
}

impl AztecSymbol {
    /// Create a symbol description
    pub fn new(
        structure: AztecStructure,
        data_layers: u8,
        message_word_count: usize,
        corrected: Vec<u8>,
    ) -> Self {
        Self {
            structure,
            data_layers,
            message_word_count,
            corrected,
        }
    }

    /// Codeword width implied by the structure and layer count
    pub fn word_bit_count(&self) -> Result<usize> {
        self.structure.word_bit_count(self.data_layers)
    }

    /// Word geometry of the message region
    pub fn geometry(&self) -> Result<WordGeometry> {
        WordGeometry::new(self.word_bit_count()?, self.message_word_count)
    }

    /// View over exactly the message words of `corrected`
    pub fn message_bits(&self) -> Result<BitView<'_>> {
        let geometry = self.geometry()?;
        BitView::wrap(&self.corrected, geometry.message_bits()?)
    }

    /// Strip stuffing bits from the message words
    pub fn unstuff(&self) -> Result<BitBuffer> {
        CodewordUnstuffer::unstuff(&self.message_bits()?, self.geometry()?)
    }
}
