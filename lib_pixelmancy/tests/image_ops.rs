mod common;

use common::{gradient, CaptureLogger};
use lib_pixelmancy::{Color, ColorTable, Image, PaletteError, BLACK, WHITE};
use log::Level;
use rstest::rstest;

fn filled(width: u32, height: u32, color: Color) -> Image {
    Image::with_background(width, height, color)
}

/// `width x height` image where every pixel is `(x, y, blue)`: all distinct.
fn all_distinct(width: u32, height: u32, blue: u8) -> Image {
    let rgba: Vec<u8> = (0..height)
        .flat_map(|y| (0..width).flat_map(move |x| [x as u8, y as u8, blue, 255]))
        .collect();
    Image::from_rgba(width, height, &rgba).unwrap()
}

#[rstest]
#[case::wider_first((5, 2), (3, 4))]
#[case::same_size((3, 3), (3, 3))]
#[case::second_contains_first((1, 1), (4, 4))]
#[case::first_contains_second((6, 5), (2, 1))]
fn test_merge_properties(#[case] first_dims: (u32, u32), #[case] second_dims: (u32, u32)) {
    let first = filled(first_dims.0, first_dims.1, Color::rgb(10, 20, 30));
    let mut second = filled(second_dims.0, second_dims.1, Color::rgb(200, 100, 0));
    second.set_pixel(0, 0, BLACK).unwrap();

    let merged = Image::merge_images(&first, &second).unwrap();

    let width = first_dims.0.max(second_dims.0);
    let height = first_dims.1.max(second_dims.1);
    assert_eq!(merged.dimensions(), (width, height));

    for y in 0..height {
        for x in 0..width {
            let expected = second
                .pixel(x, y)
                .or_else(|| first.pixel(x, y))
                .unwrap_or(WHITE);
            assert_eq!(merged.pixel(x, y), Some(expected), "pixel ({x}, {y})");
        }
    }
}

#[test]
fn test_merge_empty_operands() {
    let image = gradient();
    let empty = Image::new(0, 0);

    assert_eq!(Image::merge_images(&empty, &empty).unwrap(), Image::new(0, 0));
    assert_eq!(Image::merge_images(&image, &empty).unwrap(), image);
    assert_eq!(Image::merge_images(&empty, &image).unwrap(), image);
    // Zero width counts as empty too
    assert_eq!(Image::merge_images(&Image::new(0, 7), &image).unwrap(), image);
}

#[test]
fn test_merge_full_index_space_when_first_hidden() {
    let first = filled(256, 256, Color::rgb(1, 2, 3));
    let second = all_distinct(256, 256, 0);

    let merged = Image::merge_images(&first, &second).unwrap();

    assert_eq!(merged.color_palette().len(), 65536);
    assert_eq!(merged, second);
}

#[test]
fn test_merge_full_index_space_without_white() {
    let first = all_distinct(256, 256, 0);
    let second = all_distinct(128, 256, 0);

    let merged = Image::merge_images(&first, &second).unwrap();

    assert_eq!(merged.color_palette().len(), 65536);
    assert!(!merged.color_palette().colors().contains(&WHITE));
    assert_eq!(merged.pixel(255, 255), Some(Color::rgb(255, 255, 0)));
}

#[test]
fn test_merge_overflow() {
    let first = all_distinct(256, 256, 0);
    let second = filled(255, 255, Color::rgb(0, 0, 1));

    let result = Image::merge_images(&first, &second);

    assert_eq!(result, Err(PaletteError::Overflow(65537)));
}

#[test]
fn test_merge_and_clone_keep_first_logger() {
    let (capture, logger) = CaptureLogger::install();
    let first = filled(2, 2, BLACK).with_logger(logger);
    let second = filled(3, 1, WHITE);

    let merged = Image::merge_images(&first, &second).unwrap();
    assert_eq!(merged.resize(0.0), Image::new(0, 0));
    assert_eq!(capture.messages(Level::Error).len(), 1);

    let copy = merged.clone();
    assert_eq!(copy.resize(-1.0), Image::new(0, 0));
    assert_eq!(capture.messages(Level::Error).len(), 2);
}

#[rstest]
#[case(1.0)]
#[case(0.99)]
fn test_resize_unchanged_is_copy(#[case] percentage: f64) {
    let image = gradient();
    assert_eq!(image.resize(percentage), image);
}

#[rstest]
#[case(0.0)]
#[case(-0.5)]
#[case(f64::NEG_INFINITY)]
#[case(1e5)]
fn test_resize_degenerate_logs_error(#[case] percentage: f64) {
    let (capture, logger) = CaptureLogger::install();
    let image = gradient().with_logger(logger);

    let resized = image.resize(percentage);

    assert_eq!(resized, Image::new(0, 0));
    assert_eq!(capture.messages(Level::Error).len(), 1);
}

#[rstest]
#[case(0.5, (8, 8))]
#[case(0.25, (4, 4))]
#[case(1.5, (24, 24))]
#[case(0.01, (1, 1))]
fn test_resize_samples_source(#[case] percentage: f64, #[case] expected: (u32, u32)) {
    let image = gradient();
    let resized = image.resize(percentage);

    assert_eq!(resized.dimensions(), expected);
    let source_colors = image.color_palette().colors();
    for y in 0..expected.1 {
        for x in 0..expected.0 {
            let color = resized.pixel(x, y).unwrap();
            assert!(source_colors.contains(&color));
        }
    }
    // The origin always maps to the origin
    assert_eq!(resized.pixel(0, 0), image.pixel(0, 0));
}

#[test]
fn test_add_color_twice_same_index() {
    let mut table = ColorTable::new();
    let first = table.add_color(Color::rgb(1, 2, 3)).unwrap();
    let second = table.add_color(Color::rgb(1, 2, 3)).unwrap();
    assert_eq!(first, second);
    assert_eq!(table.len(), 1);
}

#[test]
fn test_reduce_at_or_above_size_is_noop() {
    let mut image = gradient();
    let before = image.clone();
    let size = image.color_palette().len();

    assert!(!image.reduce_color_palette(size));
    assert!(!image.reduce_color_palette(size + 1));
    assert_eq!(image, before);
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(16)]
#[case(100)]
#[case(256)]
fn test_reduce_below_size(#[case] target: usize) {
    let mut image = gradient();
    let size_before = image.color_palette().len();
    assert!(target < size_before);

    assert!(image.reduce_color_palette(target));

    let table = image.color_palette();
    assert!(table.len() <= target);
    assert!(image.indices().iter().all(|&i| (i as usize) < table.len()));
    for y in 0..image.height() {
        for x in 0..image.width() {
            let color = image.pixel(x, y).unwrap();
            assert!(table.colors().contains(&color));
        }
    }
}

#[test]
fn test_reduce_keeps_clusters_apart() {
    let mut image = filled(4, 1, Color::rgb(0, 0, 0));
    image.set_pixel(1, 0, Color::rgb(4, 4, 4)).unwrap();
    image.set_pixel(2, 0, Color::rgb(250, 250, 250)).unwrap();
    image.set_pixel(3, 0, Color::rgb(254, 254, 254)).unwrap();

    assert!(image.reduce_color_palette(2));

    assert_eq!(image.index(0, 0), image.index(1, 0));
    assert_eq!(image.index(2, 0), image.index(3, 0));
    assert_ne!(image.index(0, 0), image.index(2, 0));
    assert_eq!(image.pixel(0, 0), Some(Color::rgb(2, 2, 2)));
    assert_eq!(image.pixel(3, 0), Some(Color::rgb(252, 252, 252)));
}

#[test]
fn test_reduce_is_reproducible() {
    let mut a = gradient();
    let mut b = gradient();
    assert!(a.reduce_color_palette(10));
    assert!(b.reduce_color_palette(10));
    assert_eq!(a, b);
}

#[test]
fn test_reduce_single_surviving_color() {
    let mut image = filled(2, 2, BLACK);
    image.add_color(WHITE).unwrap();
    assert_eq!(image.color_palette().len(), 2);
    image.set_index(0, 0, 1).unwrap();

    assert!(image.reduce_color_palette(1));

    assert_eq!(image.color_palette().len(), 1);
    assert_eq!(image.index(0, 0), Some(0));
    let survivor = image.pixel(0, 0);
    for (x, y) in [(1, 0), (0, 1), (1, 1)] {
        assert_eq!(image.pixel(x, y), survivor);
    }
}

#[test]
fn test_copy_equal_and_moved_from_empty() {
    let mut original = gradient();
    let copy = original.clone();
    assert_eq!(copy, original);

    let moved = std::mem::take(&mut original);
    assert_eq!(moved, copy);
    assert_eq!(original.dimensions(), (0, 0));
    assert_eq!(original.color_palette().len(), 0);
}

#[test]
fn test_replace_palette_after_editing_copy() {
    let mut image = gradient();
    let shifted: Vec<Color> = image
        .color_palette()
        .colors()
        .iter()
        .map(|c| Color::rgb(c.blue, c.green, c.red))
        .collect();
    let table = ColorTable::try_from(shifted).unwrap();

    assert_eq!(image.replace_color_palette(table), Ok(()));
    assert_eq!(image.pixel(1, 0), Some(Color::rgb(128, 0, 16)));
}
