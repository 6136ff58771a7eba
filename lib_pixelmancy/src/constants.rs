/// Pixel indices are 16 bits wide, so a color table holds at most this many entries.
pub const MAX_COLORS: usize = 1 << 16;
/// Largest table that survives the 8-bit index export.
pub const MAX_EXPORT_COLORS: usize = 256;

pub const FORMAT_NAME: &str = "Pixelmancy indexed image";
pub const FILE_EXT: &str = "pxm";
pub const MAGIC_HEADER: [u8; 4] = *b"PXM1";
pub const FORMAT_VERSION: u8 = 1;
