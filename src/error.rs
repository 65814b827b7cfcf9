//! Error types for bit buffer and unstuffing operations

use thiserror::Error;

/// Symbol content defects detected while unstuffing.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// An all-zero or all-one codeword appeared unstuffed inside the message region.
    #[error("reserved codeword {value:#x} at message word {index}")]
    ReservedWordInMessage {
        /// Index of the offending word (0 is the first word).
        index: usize,
        /// Raw value of the offending word.
        value: u64,
    },
}

/// Errors returned by this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AztecError {
    /// Invalid geometry or read parameters.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A read or view exceeded the available bits.
    #[error("bit range {offset}+{count} exceeds buffer length {length}")]
    OutOfRange {
        /// First bit requested.
        offset: usize,
        /// Number of bits requested.
        count: usize,
        /// Bits actually available.
        length: usize,
    },

    /// Malformed symbol content.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl AztecError {
    /// True when the error describes malformed symbol content rather than a wiring defect.
    pub fn is_validation(&self) -> bool {
        matches!(self, AztecError::Validation(_))
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AztecError>;
