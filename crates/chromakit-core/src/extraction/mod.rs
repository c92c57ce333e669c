//! Dominant colors of decoded image data.
//!
//! Decoding happens outside the engine; this module only sees RGB samples.
//! Large images should be [`downsample`]d first since a run costs
//! O(samples × k × iterations).

pub mod kmeans;
pub mod sampling;

pub use kmeans::{
    DominantColor, Extraction, KMeans, KMeansConfig, KMeansStep, MAX_KMEANS_ITERATIONS, extract,
    extract_cancellable, extract_with,
};
pub use sampling::{downsample, pixels_from_rgb, pixels_from_rgba};
