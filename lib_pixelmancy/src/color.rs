use serde::{Deserialize, Serialize};

/// An RGBA color with 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

pub const WHITE: Color = Color::rgb(255, 255, 255);
pub const BLACK: Color = Color::rgb(0, 0, 0);
pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);

impl Color {
    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Fully opaque color.
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::new(red, green, blue, 255)
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }

    /// Same color with the alpha channel forced to fully opaque.
    pub const fn opaque(self) -> Self {
        Self::rgb(self.red, self.green, self.blue)
    }

    /// Moves half of the red and green intensity over to the blue channel.
    ///
    /// Red and green are halved, blue gains a quarter of the original red and
    /// a quarter of the original green (saturating at 255). Alpha is untouched.
    pub fn blue_shifted(self) -> Self {
        let blue = self.blue as u16 + self.red as u16 / 4 + self.green as u16 / 4;
        Self::new(
            self.red / 2,
            self.green / 2,
            blue.min(u8::MAX as u16) as u8,
            self.alpha,
        )
    }

    /// Squared euclidean distance over all four channels.
    pub fn distance_sq(self, other: Color) -> u32 {
        self.to_array()
            .iter()
            .zip(other.to_array().iter())
            .map(|(&a, &b)| {
                let d = a as i32 - b as i32;
                (d * d) as u32
            })
            .sum()
    }
}

impl From<[u8; 4]> for Color {
    fn from(rgba: [u8; 4]) -> Self {
        Self::new(rgba[0], rgba[1], rgba[2], rgba[3])
    }
}

impl From<Color> for [u8; 4] {
    fn from(color: Color) -> Self {
        color.to_array()
    }
}
