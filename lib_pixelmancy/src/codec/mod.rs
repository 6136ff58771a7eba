pub mod png;

use thiserror::Error;

pub use self::png::{decode_png, encode_png, DecodedImage};

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("PNG decoding failed: {0}")]
    Decode(#[source] image::ImageError),
    #[error("PNG encoding failed: {0}")]
    Encode(#[source] image::ImageError),
    #[error("Pixel buffer length {len} does not match dimensions {width}x{height}")]
    DimensionMismatch { len: usize, width: u32, height: u32 },
}
