//! Color-wheel harmonies and tonal ramps derived from one base color.

pub mod ramps;
pub mod wheel;

pub use ramps::{MAX_RAMP_STEPS, SHADE_LABELS, Shade, shade_scale, tints_and_shades};
pub use wheel::{HarmonyKind, HarmonySet, harmonies, rotate_hue};
