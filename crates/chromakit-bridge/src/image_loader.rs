//! Image decoding for extraction requests.

use std::path::Path;

use chromakit_core::color::Color;
use chromakit_core::extraction::{downsample, pixels_from_rgba};

/// Decode an image from disk into at most `max_samples` opaque colors.
///
/// Supports the formats enabled in the `image` crate (PNG, JPEG, ...).
/// The format is sniffed from the file contents, not the extension.
/// Pixels with alpha below `min_alpha` are dropped before sampling.
pub fn load_pixels(
    path: &Path,
    max_samples: usize,
    min_alpha: u8,
) -> Result<Vec<Color>, ImageLoadError> {
    let img = image::ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
        .map_err(ImageLoadError::Decode)?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let opaque = pixels_from_rgba(rgba.as_raw(), min_alpha);
    let samples = downsample(&opaque, max_samples);
    tracing::info!(
        "Image loaded: {} ({}x{}, {} samples)",
        path.display(),
        width,
        height,
        samples.len()
    );
    Ok(samples)
}

/// Errors that can occur during image loading.
#[derive(Debug, thiserror::Error)]
pub enum ImageLoadError {
    #[error("failed to decode image: {0}")]
    Decode(image::ImageError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("chromakit-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_load_solid_png() {
        let path = temp_path("solid.png");
        image::RgbImage::from_pixel(8, 8, image::Rgb([0x33, 0x66, 0xcc]))
            .save(&path)
            .unwrap();

        let pixels = load_pixels(&path, 16, 128).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(pixels.len(), 16);
        assert!(pixels.iter().all(|&c| c == Color::new(0x33, 0x66, 0xcc)));
    }

    #[test]
    fn test_transparent_pixels_dropped() {
        let path = temp_path("alpha.png");
        let mut img = image::RgbaImage::from_pixel(2, 2, image::Rgba([255, 0, 0, 255]));
        img.put_pixel(1, 1, image::Rgba([0, 255, 0, 0]));
        img.save(&path).unwrap();

        let pixels = load_pixels(&path, 100, 128).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(pixels, vec![Color::new(255, 0, 0); 3]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_pixels(&temp_path("does-not-exist.png"), 10, 0);
        assert!(matches!(result, Err(ImageLoadError::Io(_))));
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let path = temp_path("garbage.png");
        std::fs::write(&path, b"definitely not an image").unwrap();
        let result = load_pixels(&path, 10, 0);
        let _ = std::fs::remove_file(&path);
        assert!(matches!(result, Err(ImageLoadError::Decode(_))));
    }
}
