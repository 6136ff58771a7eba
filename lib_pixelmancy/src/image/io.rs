use std::fs;
use std::path::Path;

use super::{decoder, encoder, Image, ImageError};
use crate::codec::{decode_png, encode_png, CodecError};
use crate::config::PngOptions;
use crate::logging::{error, info, trace, Logger};

fn read_file(path: &Path) -> Result<Vec<u8>, ImageError> {
    fs::read(path).map_err(|source| ImageError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, data: &[u8]) -> Result<(), ImageError> {
    fs::write(path, data).map_err(|source| ImageError::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl Image {
    /// Loads a PNG file, reporting through the process-wide logger.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Image, ImageError> {
        Self::load_from_file_with_logger(path, Logger::default())
    }

    pub fn load_from_file_with_logger(
        path: impl AsRef<Path>,
        logger: Logger,
    ) -> Result<Image, ImageError> {
        let path = path.as_ref();
        info!(logger, "Loading image from file: {}", path.display());

        let buffer = read_file(path)?;
        trace!(logger, "buffer.size() {}", buffer.len());

        Self::load_from_memory(&buffer, logger)
    }

    /// Decodes PNG bytes. Every pixel's color is inserted into a fresh table.
    pub fn load_from_memory(buffer: &[u8], logger: Logger) -> Result<Image, ImageError> {
        let decoded = decode_png(buffer).map_err(|e| {
            error!(logger, "decoder error: {}", e);
            e
        })?;
        trace!(logger, "Image size - width: {} height: {}", decoded.width, decoded.height);

        let image = Image::from_rgba(decoded.width, decoded.height, &decoded.rgba_data)?;
        trace!(logger, "Palette size : {}", image.palette.len());
        Ok(image.with_logger(logger))
    }

    /// Materializes every pixel and encodes the result as an RGBA PNG.
    pub fn encode_png(&self, options: &PngOptions) -> Result<Vec<u8>, CodecError> {
        encode_png(self.width, self.height, &self.to_rgba(), options).map_err(|e| {
            error!(self.logger, "encoder error: {}", e);
            e
        })
    }

    /// Writes the image as a PNG with default options.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ImageError> {
        self.save_with_options(path, &PngOptions::default())
    }

    pub fn save_with_options(
        &self,
        path: impl AsRef<Path>,
        options: &PngOptions,
    ) -> Result<(), ImageError> {
        let path = path.as_ref();
        info!(self.logger, "Saving image to file: {}", path.display());

        let encoded = self.encode_png(options)?;
        write_file(path, &encoded)
    }

    /// Writes the native indexed container, keeping palette order and
    /// full-width indices intact.
    pub fn save_indexed(&self, path: impl AsRef<Path>) -> Result<(), ImageError> {
        let path = path.as_ref();
        info!(self.logger, "Saving indexed image to file: {}", path.display());

        let encoded = encoder::encode(self)?;
        write_file(path, &encoded)
    }

    pub fn load_indexed(path: impl AsRef<Path>, logger: Logger) -> Result<Image, ImageError> {
        let path = path.as_ref();
        info!(logger, "Loading indexed image from file: {}", path.display());

        let buffer = read_file(path)?;
        Ok(decoder::decode(&buffer, logger)?)
    }
}
