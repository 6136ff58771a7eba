pub mod quantize;
pub mod table;

use thiserror::Error;

pub use table::ColorTable;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaletteError {
    #[error("Palette overflow: maximum 65536 colors supported, attempted to add color #{0}")]
    Overflow(usize),
    #[error("Invalid palette index: {index} exceeds palette size of {size}")]
    InvalidIndex { index: usize, size: usize },
    #[error("Invalid pixel data length: expected multiple of 4 bytes, got {0}")]
    InvalidPixelDataLength(usize),
}
