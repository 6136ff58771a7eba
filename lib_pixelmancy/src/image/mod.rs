pub mod decoder;
pub mod encoder;
pub mod format;
mod indexed;
mod io;
mod transform;

use std::path::PathBuf;

use thiserror::Error;

use crate::codec::CodecError;
use crate::palette::PaletteError;

pub use decoder::decode;
pub use encoder::encode;
pub use format::FormatError;
pub use indexed::Image;

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Codec failure")]
    Codec(#[from] CodecError),
    #[error("Native format failure")]
    Format(#[from] FormatError),
    #[error(transparent)]
    Palette(#[from] PaletteError),
    #[error("Pixel ({x}, {y}) is outside the {width}x{height} image")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
    #[error("Pixel data length {len} does not match dimensions {width}x{height}")]
    DimensionMismatch { len: usize, width: u32, height: u32 },
    #[error("Palette of {0} colors does not fit 8-bit indices")]
    PaletteTooLarge(usize),
}
