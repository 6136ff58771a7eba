use image::codecs::png::{CompressionType, FilterType};
use serde::{Deserialize, Serialize};

/// Settings for the PNG encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PngOptions {
    /// 0 (smallest file) to 100 (fastest encode). Values above 100 are clamped.
    pub speed: u8,
}

impl Default for PngOptions {
    fn default() -> Self {
        Self { speed: 10 }
    }
}

impl PngOptions {
    pub fn fastest() -> Self {
        Self { speed: 100 }
    }

    pub(crate) fn encoder_settings(&self) -> (CompressionType, FilterType) {
        match self.speed.min(100) {
            0..=19 => (CompressionType::Best, FilterType::Adaptive),
            20..=39 => (CompressionType::Default, FilterType::Adaptive),
            40..=59 => (CompressionType::Default, FilterType::Paeth),
            60..=79 => (CompressionType::Default, FilterType::Avg),
            80..=89 => (CompressionType::Fast, FilterType::Avg),
            _ => (CompressionType::Fast, FilterType::NoFilter),
        }
    }
}
