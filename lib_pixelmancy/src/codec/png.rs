use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageFormat};

use super::CodecError;
use crate::config::PngOptions;

/// Interleaved 8-bit RGBA pixels as produced by the decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba_data: Vec<u8>,
}

/// Decodes a PNG stream into 8-bit RGBA, converting from whatever color type
/// and bit depth the file uses.
pub fn decode_png(bytes: &[u8]) -> Result<DecodedImage, CodecError> {
    let image = image::load_from_memory_with_format(bytes, ImageFormat::Png)
        .map_err(CodecError::Decode)?
        .into_rgba8();

    let (width, height) = image.dimensions();
    Ok(DecodedImage {
        width,
        height,
        rgba_data: image.into_raw(),
    })
}

/// Encodes interleaved RGBA pixels as an 8-bit RGBA PNG.
pub fn encode_png(
    width: u32,
    height: u32,
    rgba_data: &[u8],
    options: &PngOptions,
) -> Result<Vec<u8>, CodecError> {
    let expected = width as usize * height as usize * 4;
    if rgba_data.len() != expected {
        return Err(CodecError::DimensionMismatch {
            len: rgba_data.len(),
            width,
            height,
        });
    }

    let (compression, filter) = options.encoder_settings();
    let mut buffer = Vec::new();
    PngEncoder::new_with_quality(&mut buffer, compression, filter)
        .write_image(rgba_data, width, height, ExtendedColorType::Rgba8)
        .map_err(CodecError::Encode)?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(width: u32, height: u32) -> Vec<u8> {
        (0..width * height)
            .flat_map(|i| {
                if (i % width + i / width) % 2 == 0 {
                    [255, 0, 0, 255]
                } else {
                    [0, 0, 255, 128]
                }
            })
            .collect()
    }

    #[test]
    fn test_encode_decode() {
        let rgba = checker(5, 3);
        let encoded = encode_png(5, 3, &rgba, &PngOptions::default()).unwrap();
        assert!(encoded.starts_with(b"\x89PNG"));

        let decoded = decode_png(&encoded).unwrap();
        assert_eq!(decoded.width, 5);
        assert_eq!(decoded.height, 3);
        assert_eq!(decoded.rgba_data, rgba);
    }

    #[test]
    fn test_encode_length_mismatch() {
        let result = encode_png(2, 2, &[0; 12], &PngOptions::default());
        assert!(matches!(
            result,
            Err(CodecError::DimensionMismatch {
                len: 12,
                width: 2,
                height: 2
            })
        ));
    }

    #[test]
    fn test_decode_garbage() {
        let result = decode_png(b"definitely not a png");
        assert!(matches!(result, Err(CodecError::Decode(_))));
    }

    #[test]
    fn test_decode_truncated() {
        let encoded = encode_png(4, 4, &checker(4, 4), &PngOptions::fastest()).unwrap();
        let result = decode_png(&encoded[..encoded.len() / 2]);
        assert!(result.is_err());
    }
}
