use super::format::{Body, FormatError, FORMAT_VERSION, HEADER_SIZE, MAGIC_HEADER, MAGIC_SIZE};
use super::Image;
use crate::logging::{debug, error, info, Logger};

/// Reads an image written by [`encode`](super::encode), validating that the
/// index buffer matches the dimensions and only references palette entries.
/// The decoded image reports through `logger`.
pub fn decode(encoded_data: &[u8], logger: Logger) -> Result<Image, FormatError> {
    if encoded_data.len() < HEADER_SIZE || !encoded_data.starts_with(&MAGIC_HEADER) {
        error!(logger, "Invalid format or missing magic number in header");
        return Err(FormatError::InvalidHeader);
    }
    debug!(logger, "Magic number validated successfully");

    let version = encoded_data[MAGIC_SIZE];
    if version != FORMAT_VERSION {
        error!(logger, "Unsupported format version {}", version);
        return Err(FormatError::UnsupportedVersion(version));
    }

    let body: Body = bincode::deserialize(&encoded_data[HEADER_SIZE..]).map_err(|e| {
        error!(logger, "Failed to read image body: {}", e);
        FormatError::Body(e)
    })?;
    debug!(
        logger,
        "Image dimensions read: width={} height={}, palette size {}",
        body.width,
        body.height,
        body.palette.len(),
    );

    let expected = body.width as usize * body.height as usize;
    if body.indices.len() != expected {
        return Err(FormatError::DimensionMismatch {
            len: body.indices.len(),
            width: body.width,
            height: body.height,
        });
    }

    let size = body.palette.len();
    if let Some(&index) = body.indices.iter().find(|&&i| i as usize >= size) {
        error!(logger, "Palette index {} out of range", index);
        return Err(FormatError::InvalidIndex {
            index: index as usize,
            size,
        });
    }

    // Empty images never carry a palette
    let palette = if expected == 0 {
        Default::default()
    } else {
        body.palette
    };

    info!(logger, "Decoding successful");
    Ok(Image::from_parts_unchecked(
        body.width,
        body.height,
        palette,
        body.indices,
        logger,
    ))
}
