pub mod bit_buffer;
pub mod geometry;
pub mod symbol;

pub use bit_buffer::{BitBuffer, BitView, ReadOrder};
pub use geometry::WordGeometry;
pub use symbol::{AztecStructure, AztecSymbol};
