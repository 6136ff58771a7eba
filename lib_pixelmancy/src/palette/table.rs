use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::quantize::median_cut;
use super::PaletteError;
use crate::color::Color;
use crate::constants::MAX_COLORS;

/// Ordered, deduplicated collection of colors addressed by 16-bit indices.
///
/// Positions are stable: a color keeps its index until the table is reset or
/// reduced. Equality compares the colors position by position.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Color>", into = "Vec<Color>")]
pub struct ColorTable {
    colors: Vec<Color>,
    lookup: HashMap<Color, u16>,
}

impl ColorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table holding a single color at index 0.
    pub fn with_color(color: Color) -> Self {
        let mut table = Self::new();
        table.push(color);
        table
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn get(&self, index: u16) -> Option<Color> {
        self.colors.get(index as usize).copied()
    }

    /// Position of `color`, if present.
    pub fn find(&self, color: Color) -> Option<u16> {
        self.lookup.get(&color).copied()
    }

    /// Returns the position of `color`, appending it first if it is new.
    ///
    /// # Errors
    /// - Returns `PaletteError::Overflow` if the table already holds 65536 colors
    pub fn add_color(&mut self, color: Color) -> Result<u16, PaletteError> {
        if let Some(index) = self.find(color) {
            return Ok(index);
        }
        if self.colors.len() >= MAX_COLORS {
            return Err(PaletteError::Overflow(self.colors.len() + 1));
        }
        Ok(self.push(color))
    }

    /// Appends without the capacity check. Callers guarantee room.
    fn push(&mut self, color: Color) -> u16 {
        let index = self.colors.len() as u16;
        self.colors.push(color);
        self.lookup.entry(color).or_insert(index);
        index
    }

    /// Inserts every RGBA quadruple of `pixels` and returns the index of each.
    ///
    /// Nothing is kept on failure: the table is rolled back to its prior state.
    ///
    /// # Errors
    /// - Returns `PaletteError::InvalidPixelDataLength` if input length is not a multiple of 4
    /// - Returns `PaletteError::Overflow` if the distinct colors do not fit the index space
    pub fn index_rgba(&mut self, pixels: &[u8]) -> Result<Vec<u16>, PaletteError> {
        if pixels.len() % 4 != 0 {
            return Err(PaletteError::InvalidPixelDataLength(pixels.len()));
        }

        let previous_len = self.colors.len();
        let mut indices = Vec::with_capacity(pixels.len() / 4);

        for pixel in pixels.chunks_exact(4) {
            let color = Color::new(pixel[0], pixel[1], pixel[2], pixel[3]);
            match self.add_color(color) {
                Ok(index) => indices.push(index),
                Err(e) => {
                    self.truncate(previous_len);
                    return Err(e);
                }
            }
        }

        Ok(indices)
    }

    fn truncate(&mut self, len: usize) {
        self.colors.truncate(len);
        self.rebuild_lookup();
    }

    /// Empties the table.
    pub fn reset(&mut self) {
        self.colors.clear();
        self.lookup.clear();
    }

    /// Forces every color to full opacity. Positions are untouched, so colors
    /// that only differed in alpha end up as duplicates; lookups then resolve
    /// to the first of them.
    pub fn convert_to_rgb(&mut self) {
        self.rewrite(Color::opaque);
    }

    /// Applies `Color::blue_shifted` to every color in place.
    pub fn blue_shift(&mut self) {
        self.rewrite(Color::blue_shifted);
    }

    fn rewrite(&mut self, f: impl Fn(Color) -> Color) {
        for color in &mut self.colors {
            *color = f(*color);
        }
        self.rebuild_lookup();
    }

    fn rebuild_lookup(&mut self) {
        self.lookup.clear();
        for (index, &color) in self.colors.iter().enumerate() {
            self.lookup.entry(color).or_insert(index as u16);
        }
    }

    /// Reduces the table to at most `target_size` colors, every color counting
    /// the same.
    ///
    /// Returns `None` when no change is needed (or possible); otherwise the
    /// old-to-new index map.
    pub fn reduce_colors(&mut self, target_size: usize) -> Option<Vec<u16>> {
        let weights = vec![1; self.colors.len()];
        self.reduce_colors_weighted(target_size, &weights)
    }

    /// Reduces the table to at most `target_size` colors with weighted median
    /// cut, `weights[i]` being the importance of color `i` (usually its pixel
    /// count).
    ///
    /// Returns `None` without touching the table when it already fits or when
    /// `target_size` is zero. Otherwise replaces the colors and returns a map
    /// where `map[old]` is the new position of the old color.
    pub fn reduce_colors_weighted(
        &mut self,
        target_size: usize,
        weights: &[u64],
    ) -> Option<Vec<u16>> {
        if self.colors.len() <= target_size || target_size == 0 {
            return None;
        }

        let partition = median_cut(&self.colors, weights, target_size);

        // Box representatives may coincide, route them through a fresh table
        let mut reduced = ColorTable::new();
        let box_to_new: Vec<u16> = partition
            .representatives
            .iter()
            .map(|&color| match reduced.find(color) {
                Some(index) => index,
                None => reduced.push(color),
            })
            .collect();

        let old_to_new = partition
            .assignment
            .iter()
            .map(|&box_idx| box_to_new[box_idx])
            .collect();

        *self = reduced;
        Some(old_to_new)
    }
}

impl PartialEq for ColorTable {
    fn eq(&self, other: &Self) -> bool {
        self.colors == other.colors
    }
}

impl Eq for ColorTable {}

impl TryFrom<Vec<Color>> for ColorTable {
    type Error = PaletteError;

    fn try_from(colors: Vec<Color>) -> Result<Self, Self::Error> {
        if colors.len() > MAX_COLORS {
            return Err(PaletteError::Overflow(colors.len()));
        }
        let mut table = ColorTable {
            colors,
            lookup: HashMap::new(),
        };
        table.rebuild_lookup();
        Ok(table)
    }
}

impl From<ColorTable> for Vec<Color> {
    fn from(table: ColorTable) -> Self {
        table.colors
    }
}
