use crate::synth::note::{is_black_key, KeyIndex};
use image::{Rgba, RgbaImage};

/// Generates a color map for a conventional piano layout starting on C.
///
/// White keys span the full height with a one pixel transparent gap between
/// them; black keys cover the upper three fifths, centered on the gap.
pub fn piano_color_map(key_count: usize, width: u32, height: u32) -> RgbaImage {
    let mut pixels = RgbaImage::new(width, height);
    let keys = (0..key_count.min(256)).map(|k| k as KeyIndex);
    let white_count = keys.clone().filter(|&k| !is_black_key(k)).count() as u32;
    if white_count == 0 {
        return pixels;
    }
    let white_width = width / white_count;
    let black_width = white_width * 3 / 5;
    let black_height = height * 3 / 5;

    let mut whites_before = 0;
    let mut black_keys = Vec::new();
    for key in keys {
        if is_black_key(key) {
            black_keys.push((key, whites_before * white_width));
        } else {
            let left = whites_before * white_width;
            fill(&mut pixels, key, left, left + white_width.saturating_sub(1), 0, height);
            whites_before += 1;
        }
    }
    for (key, center) in black_keys {
        let left = center.saturating_sub(black_width / 2);
        fill(&mut pixels, key, left, left + black_width, 0, black_height);
    }
    pixels
}

fn fill(pixels: &mut RgbaImage, key: KeyIndex, left: u32, right: u32, top: u32, bottom: u32) {
    let right = right.min(pixels.width());
    let bottom = bottom.min(pixels.height());
    for y in top..bottom {
        for x in left..right {
            pixels.put_pixel(x, y, Rgba([key, 0, 0, 255]));
        }
    }
}
