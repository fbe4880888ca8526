//! PNG export of generated cave maps.

use image::{ImageBuffer, Rgb, RgbImage};

use crate::regions::Region;
use crate::tilemap::{TileState, Tilemap};

const WALL_COLOR: [u8; 3] = [48, 40, 36];
const FLOOR_COLOR: [u8; 3] = [189, 172, 148];

/// Export the map as a PNG, one pixel per tile.
pub fn export_map(map: &Tilemap<TileState>, path: &str) -> Result<(), image::ImageError> {
    let mut img: RgbImage = ImageBuffer::new(map.width as u32, map.height as u32);

    for y in 0..map.height {
        for x in 0..map.width {
            let color = match map.get(x, y) {
                TileState::Wall => WALL_COLOR,
                TileState::Floor => FLOOR_COLOR,
            };
            img.put_pixel(x as u32, y as u32, Rgb(color));
        }
    }

    img.save(path)
}

/// Export a debug view with each cavern region in its own color.
///
/// Walls stay dark; region colors cycle through a golden-angle hue sweep
/// so adjacent ids stay visually distinct.
pub fn export_regions(
    map: &Tilemap<TileState>,
    regions: &[Region],
    path: &str,
) -> Result<(), image::ImageError> {
    let mut img: RgbImage = ImageBuffer::new(map.width as u32, map.height as u32);

    for y in 0..map.height {
        for x in 0..map.width {
            img.put_pixel(x as u32, y as u32, Rgb(WALL_COLOR));
        }
    }

    for region in regions {
        let color = region_color(region.id.0);
        for &(x, y) in &region.tiles {
            img.put_pixel(x as u32, y as u32, Rgb(color));
        }
    }

    img.save(path)
}

fn region_color(id: u32) -> [u8; 3] {
    let hue = (id as f32 * 137.508) % 360.0;
    hsv_to_rgb(hue, 0.65, 0.95)
}

fn hsv_to_rgb(h: f32, s: f32, v: f32) -> [u8; 3] {
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match (h / 60.0) as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    [
        ((r + m) * 255.0) as u8,
        ((g + m) * 255.0) as u8,
        ((b + m) * 255.0) as u8,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_colors_distinct_and_bright() {
        let a = region_color(0);
        let b = region_color(1);
        assert_ne!(a, b);

        // Walls are dark; region colors must not be mistaken for them
        for color in [a, b, region_color(7)] {
            assert!(color.iter().any(|&ch| ch > 100));
        }
    }
}
