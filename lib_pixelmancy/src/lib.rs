pub mod codec;
pub mod color;
pub mod config;
pub mod constants;
pub mod image;
pub mod logging;
pub mod palette;

pub use crate::color::{Color, BLACK, TRANSPARENT, WHITE};
pub use crate::config::PngOptions;
pub use crate::image::{decode, encode, Image, ImageError};
pub use crate::logging::{init_logging, Logger};
pub use crate::palette::{ColorTable, PaletteError};
