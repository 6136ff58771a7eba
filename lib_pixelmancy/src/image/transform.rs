use std::mem;

use ::image::Limits;

use super::Image;
use crate::logging::{debug, error};
use crate::palette::{ColorTable, PaletteError};

impl Image {
    /// Overlays `second` on `first`, both anchored at the origin.
    ///
    /// The result spans the larger width and the larger height. Where the
    /// images overlap `second` wins; area covered by neither stays white.
    /// An empty operand yields a copy of the other one.
    ///
    /// White only enters the table when some area is left uncovered, and
    /// `first` is skipped entirely when `second` hides all of it, so the
    /// merge fails only when the visible colors exceed 65536.
    ///
    /// # Errors
    /// - Returns `PaletteError::Overflow` if the visible colors do not fit
    ///   the index space
    pub fn merge_images(first: &Image, second: &Image) -> Result<Image, PaletteError> {
        match (first.is_empty(), second.is_empty()) {
            (true, true) => return Ok(Image::new(0, 0).with_logger(first.logger.clone())),
            (true, false) => return Ok(second.clone()),
            (false, true) => return Ok(first.clone()),
            (false, false) => {}
        }

        let width = first.width.max(second.width);
        let height = first.height.max(second.height);
        let logger = first.logger.clone();

        let covers = |image: &Image| image.width == width && image.height == height;
        let mut merged = if covers(first) || covers(second) {
            // Every index is overwritten by the covering operand below
            Image {
                width,
                height,
                pixels: vec![0; width as usize * height as usize],
                palette: ColorTable::new(),
                logger,
            }
        } else {
            Image::new(width, height).with_logger(logger)
        };

        let hidden = second.width >= first.width && second.height >= first.height;
        if !hidden {
            merged.paint(first)?;
        }
        merged.paint(second)?;
        Ok(merged)
    }

    /// Copies every pixel of `source` to the same coordinates in `self`.
    fn paint(&mut self, source: &Image) -> Result<(), PaletteError> {
        let source_colors = source.palette.colors();
        let mut remap: Vec<Option<u16>> = vec![None; source_colors.len()];

        for y in 0..source.height {
            for x in 0..source.width {
                let source_index = source.pixels[source.offset(x, y)] as usize;
                let index = match remap[source_index] {
                    Some(index) => index,
                    None => {
                        let index = self.palette.add_color(source_colors[source_index])?;
                        remap[source_index] = Some(index);
                        index
                    }
                };
                let offset = self.offset(x, y);
                self.pixels[offset] = index;
            }
        }

        Ok(())
    }

    /// Nearest-neighbor resize where both dimensions become
    /// `ceil(dimension * percentage)`.
    ///
    /// A scale that leaves the size untouched returns a copy. A scale that
    /// collapses either dimension to zero, is not a finite number, or needs
    /// more pixels than `image`'s default allocation limit allows logs an error and returns an
    /// empty `(0, 0)` image.
    pub fn resize(&self, percentage: f64) -> Image {
        let width = (self.width as f64 * percentage).ceil();
        let height = (self.height as f64 * percentage).ceil();

        if width == self.width as f64 && height == self.height as f64 {
            return self.clone();
        }

        let fits = |d: f64| d > 0.0 && d <= u32::MAX as f64;
        let buffer = if fits(width) && fits(height) {
            pixel_buffer(width as u32, height as u32)
        } else {
            None
        };
        let Some(mut pixels) = buffer else {
            error!(
                self.logger,
                "Invalid image dimensions after resize: {}x{} scaled by {}",
                self.width,
                self.height,
                percentage,
            );
            return Image::new(0, 0).with_logger(self.logger.clone());
        };

        let (width, height) = (width as u32, height as u32);
        let scale_x = self.width as f64 / width as f64;
        let scale_y = self.height as f64 / height as f64;

        let source_x = |x: u32| ((x as f64 * scale_x).floor() as u32).min(self.width - 1);
        let source_y = |y: u32| ((y as f64 * scale_y).floor() as u32).min(self.height - 1);

        for y in 0..height {
            let row = source_y(y);
            for x in 0..width {
                pixels.push(self.pixels[self.offset(source_x(x), row)]);
            }
        }

        Image::from_parts_unchecked(
            width,
            height,
            self.palette.clone(),
            pixels,
            self.logger.clone(),
        )
    }

    /// Forces every color to full opacity. Pixel indices are untouched.
    pub fn remove_alpha_channel(&mut self) {
        self.palette.convert_to_rgb();
    }

    /// Shifts every color towards blue. Pixel indices are untouched.
    pub fn blue_shift(&mut self) {
        self.palette.blue_shift();
    }

    /// Swaps in `palette` if it has exactly as many entries as the current
    /// table; otherwise hands it back unchanged.
    pub fn replace_color_palette(&mut self, palette: ColorTable) -> Result<(), ColorTable> {
        if palette.len() != self.palette.len() {
            debug!(
                self.logger,
                "Color palette sizes do not match: {} != {}",
                palette.len(),
                self.palette.len(),
            );
            return Err(palette);
        }
        self.palette = palette;
        Ok(())
    }

    /// Copying variant of [`replace_color_palette`](Self::replace_color_palette).
    pub fn replace_color_palette_from(&mut self, palette: &ColorTable) -> bool {
        if palette.len() != self.palette.len() {
            debug!(
                self.logger,
                "Color palette sizes do not match: {} != {}",
                palette.len(),
                self.palette.len(),
            );
            return false;
        }
        self.palette.clone_from(palette);
        true
    }

    /// Quantizes the table down to at most `target_size` colors, weighting
    /// each color by how many pixels use it, and remaps every pixel.
    ///
    /// Returns `false` without touching anything if the table already fits
    /// or `target_size` is zero.
    pub fn reduce_color_palette(&mut self, target_size: usize) -> bool {
        let weights = self.histogram();
        let Some(old_to_new) = self.palette.reduce_colors_weighted(target_size, &weights) else {
            debug!(
                self.logger,
                "Color palette already reduced: {} colors, target {}",
                self.palette.len(),
                target_size,
            );
            return false;
        };

        for index in &mut self.pixels {
            *index = old_to_new[*index as usize];
        }
        true
    }
}

/// Largest pixel count a resize may allocate: `image`'s default allocation
/// limit, expressed in 16-bit indices.
fn max_pixels() -> usize {
    let index_size = mem::size_of::<u16>();
    let bytes = Limits::default().max_alloc.unwrap_or(u64::MAX);
    let pixels = usize::try_from(bytes / index_size as u64).unwrap_or(usize::MAX);
    pixels.min(isize::MAX as usize / index_size)
}

/// Empty index buffer with room for `width * height` pixels, or `None` if
/// that count overflows, exceeds [`max_pixels`], or cannot be reserved.
fn pixel_buffer(width: u32, height: u32) -> Option<Vec<u16>> {
    let count = (width as usize)
        .checked_mul(height as usize)
        .filter(|&count| count <= max_pixels())?;
    let mut pixels = Vec::new();
    pixels.try_reserve_exact(count).ok()?;
    Some(pixels)
}
