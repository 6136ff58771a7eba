#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use lib_pixelmancy::{Color, Image, Logger};
use log::{Level, Log, Metadata, Record};

/// 16x16 image where red follows x and green follows y: 256 distinct colors.
pub fn gradient() -> Image {
    let mut image = Image::new(16, 16);
    for y in 0..16u32 {
        for x in 0..16u32 {
            let color = Color::new((x * 16) as u8, (y * 16) as u8, 128, 255);
            image.set_pixel(x, y, color).unwrap();
        }
    }
    image
}

/// RGBA bytes of a checkerboard alternating opaque red and half-transparent blue.
pub fn checker_rgba(width: u32, height: u32) -> Vec<u8> {
    (0..width * height)
        .flat_map(|i| {
            if (i % width + i / width) % 2 == 0 {
                [255, 0, 0, 255]
            } else {
                [0, 0, 255, 128]
            }
        })
        .collect()
}

/// Records everything at or above debug level.
#[derive(Default)]
pub struct CaptureLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl CaptureLogger {
    pub fn install() -> (Arc<CaptureLogger>, Logger) {
        let capture = Arc::new(CaptureLogger::default());
        let logger = Logger::from_arc(capture.clone());
        (capture, logger)
    }

    pub fn messages(&self, level: Level) -> Vec<String> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, message)| message.clone())
            .collect()
    }
}

impl Log for CaptureLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Debug
    }

    fn log(&self, record: &Record) {
        self.records
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}
