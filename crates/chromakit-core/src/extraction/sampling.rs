//! Turning decoded pixel buffers into extraction samples.

use crate::color::Color;

/// Packed 8-bit RGB bytes to colors. A trailing partial pixel is ignored.
pub fn pixels_from_rgb(bytes: &[u8]) -> Vec<Color> {
    bytes
        .chunks_exact(3)
        .map(|px| Color::new(px[0], px[1], px[2]))
        .collect()
}

/// Packed 8-bit RGBA bytes to colors, dropping pixels with alpha below
/// `min_alpha`. Alpha is discarded.
pub fn pixels_from_rgba(bytes: &[u8], min_alpha: u8) -> Vec<Color> {
    bytes
        .chunks_exact(4)
        .filter(|px| px[3] >= min_alpha)
        .map(|px| Color::new(px[0], px[1], px[2]))
        .collect()
}

/// Stride-sample `pixels` down to at most `max_samples` entries.
pub fn downsample(pixels: &[Color], max_samples: usize) -> Vec<Color> {
    if max_samples == 0 {
        return Vec::new();
    }
    if pixels.len() <= max_samples {
        return pixels.to_vec();
    }
    let stride = pixels.len().div_ceil(max_samples);
    pixels.iter().copied().step_by(stride).collect()
}
