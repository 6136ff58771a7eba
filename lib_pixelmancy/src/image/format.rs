use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::palette::ColorTable;

pub use crate::constants::{FORMAT_VERSION, MAGIC_HEADER};

pub const MAGIC_SIZE: usize = MAGIC_HEADER.len();
pub const VERSION_SIZE: usize = std::mem::size_of::<u8>();
pub const HEADER_SIZE: usize = MAGIC_SIZE + VERSION_SIZE;

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("Invalid format or header")]
    InvalidHeader,
    #[error("Unsupported format version {0}")]
    UnsupportedVersion(u8),
    #[error("Failed to (de)serialize image body: {0}")]
    Body(#[from] bincode::Error),
    #[error("Index count {len} does not match dimensions {width}x{height}")]
    DimensionMismatch { len: usize, width: u32, height: u32 },
    #[error("Invalid palette index: {index} exceeds palette size of {size}")]
    InvalidIndex { index: usize, size: usize },
}

/// Everything after the header, as written by the encoder.
#[derive(Serialize)]
pub(crate) struct BodyRef<'a> {
    pub width: u32,
    pub height: u32,
    pub palette: &'a ColorTable,
    pub indices: &'a [u16],
}

/// Owned counterpart of [`BodyRef`] read back by the decoder.
#[derive(Deserialize)]
pub(crate) struct Body {
    pub width: u32,
    pub height: u32,
    pub palette: ColorTable,
    pub indices: Vec<u16>,
}
