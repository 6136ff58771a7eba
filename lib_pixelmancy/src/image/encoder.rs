use super::format::{BodyRef, FormatError, FORMAT_VERSION, MAGIC_HEADER};
use super::Image;
use crate::logging::{debug, info};

/// Serializes an image into the native indexed container: magic, version,
/// then a bincode body holding dimensions, palette and 16-bit indices.
pub fn encode(image: &Image) -> Result<Vec<u8>, FormatError> {
    let logger = image.logger();
    info!(logger, "Starting encoding");

    let mut encoded_data: Vec<u8> = Vec::new();
    encoded_data.extend_from_slice(&MAGIC_HEADER);
    encoded_data.push(FORMAT_VERSION);
    debug!(logger, "Header written: magic {:?}, version {}", MAGIC_HEADER, FORMAT_VERSION);

    let body = BodyRef {
        width: image.width(),
        height: image.height(),
        palette: image.color_palette(),
        indices: image.indices(),
    };
    bincode::serialize_into(&mut encoded_data, &body)?;
    debug!(
        logger,
        "Body written: {}x{}, {} colors, {} bytes total",
        body.width,
        body.height,
        body.palette.len(),
        encoded_data.len(),
    );

    info!(logger, "Encoding process completed successfully");
    Ok(encoded_data)
}
