use super::ImageError;
use crate::color::{Color, WHITE};
use crate::constants::MAX_EXPORT_COLORS;
use crate::logging::Logger;
use crate::palette::{ColorTable, PaletteError};

/// Raster image stored as 16-bit palette indices plus a color table.
///
/// Pixels are addressed as `(x, y)` with `x < width` and `y < height`, laid
/// out row-major. Every stored index is a valid position in the table. An
/// image with a zero dimension is empty: no pixels and an empty table.
///
/// Equality is structural. Two images that look the same but order their
/// tables differently compare unequal.
#[derive(Debug, Clone, Default)]
pub struct Image {
    pub(super) width: u32,
    pub(super) height: u32,
    pub(super) pixels: Vec<u16>,
    pub(super) palette: ColorTable,
    pub(super) logger: Logger,
}

impl Image {
    /// Image filled with white.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_background(width, height, WHITE)
    }

    /// Image filled with `background`, which becomes palette index 0.
    pub fn with_background(width: u32, height: u32, background: Color) -> Self {
        let mut image = Self {
            width,
            height,
            ..Self::default()
        };
        if image.is_empty() {
            return image;
        }

        image.palette = ColorTable::with_color(background);
        image.pixels = vec![0; image.size()];
        image
    }

    /// Builds an image from interleaved RGBA bytes, inserting each pixel's
    /// color into the table.
    pub fn from_rgba(width: u32, height: u32, rgba_data: &[u8]) -> Result<Self, ImageError> {
        let expected = width as usize * height as usize * 4;
        if rgba_data.len() != expected {
            return Err(ImageError::DimensionMismatch {
                len: rgba_data.len(),
                width,
                height,
            });
        }

        let mut image = Self {
            width,
            height,
            ..Self::default()
        };
        image.pixels = image.palette.index_rgba(rgba_data)?;
        Ok(image)
    }

    /// Assembles an image from parts already known to be consistent.
    pub(crate) fn from_parts_unchecked(
        width: u32,
        height: u32,
        palette: ColorTable,
        pixels: Vec<u16>,
        logger: Logger,
    ) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        debug_assert!(pixels.iter().all(|&i| (i as usize) < palette.len()));
        Self {
            width,
            height,
            pixels,
            palette,
            logger,
        }
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of pixels.
    pub fn size(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub(super) fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    fn checked_offset(&self, x: u32, y: u32) -> Result<usize, ImageError> {
        if x >= self.width || y >= self.height {
            return Err(ImageError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.offset(x, y))
    }

    /// Palette index of the pixel at `(x, y)`.
    pub fn index(&self, x: u32, y: u32) -> Option<u16> {
        let offset = self.checked_offset(x, y).ok()?;
        self.pixels.get(offset).copied()
    }

    /// Color of the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.index(x, y).and_then(|index| self.palette.get(index))
    }

    /// Paints `(x, y)` with `color`, adding it to the table if needed.
    /// Nothing changes on failure.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) -> Result<(), ImageError> {
        let offset = self.checked_offset(x, y)?;
        let index = self.palette.add_color(color)?;
        self.pixels[offset] = index;
        Ok(())
    }

    /// Points `(x, y)` at an existing table entry.
    pub fn set_index(&mut self, x: u32, y: u32, index: u16) -> Result<(), ImageError> {
        let offset = self.checked_offset(x, y)?;
        if index as usize >= self.palette.len() {
            return Err(PaletteError::InvalidIndex {
                index: index as usize,
                size: self.palette.len(),
            }
            .into());
        }
        self.pixels[offset] = index;
        Ok(())
    }

    /// Adds `color` to the table without painting any pixel.
    pub fn add_color(&mut self, color: Color) -> Result<u16, PaletteError> {
        self.palette.add_color(color)
    }

    /// Full-width palette indices, row-major.
    pub fn indices(&self) -> &[u16] {
        &self.pixels
    }

    pub fn color_palette(&self) -> &ColorTable {
        &self.palette
    }

    /// Moves the table out of the image. The image is left empty, as if it
    /// had been moved from, so no index is left pointing into nothing.
    pub fn take_color_palette(&mut self) -> ColorTable {
        self.width = 0;
        self.height = 0;
        self.pixels = Vec::new();
        std::mem::take(&mut self.palette)
    }

    /// Number of pixels referencing each table entry.
    pub fn histogram(&self) -> Vec<u64> {
        let mut counts = vec![0u64; self.palette.len()];
        for &index in &self.pixels {
            counts[index as usize] += 1;
        }
        counts
    }

    /// Palette indices narrowed to one byte each.
    ///
    /// # Errors
    /// - Returns `ImageError::PaletteTooLarge` if the table has more than 256
    ///   entries, since indices would not survive the narrowing
    pub fn image_data(&self) -> Result<Vec<u8>, ImageError> {
        if self.palette.len() > MAX_EXPORT_COLORS {
            return Err(ImageError::PaletteTooLarge(self.palette.len()));
        }
        Ok(self.pixels.iter().map(|&index| index as u8).collect())
    }

    /// Expands every pixel to interleaved RGBA bytes.
    pub fn to_rgba(&self) -> Vec<u8> {
        let colors = self.palette.colors();
        let mut rgba_data = Vec::with_capacity(self.pixels.len() * 4);
        for &index in &self.pixels {
            rgba_data.extend_from_slice(&colors[index as usize].to_array());
        }
        rgba_data
    }
}

impl PartialEq for Image {
    fn eq(&self, other: &Self) -> bool {
        if self.dimensions() != other.dimensions() {
            return false;
        }
        if self.is_empty() {
            return true;
        }
        self.pixels == other.pixels && self.palette == other.palette
    }
}

impl Eq for Image {}
