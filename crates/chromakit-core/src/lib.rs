//! Chromakit Core — color science engine for palette design.
//!
//! Color model conversion, palette generation, harmonies and tonal ramps,
//! WCAG contrast scoring, deficiency simulation, dominant-color extraction
//! and catalog matching. Pure value-in/value-out functions; no I/O and no
//! UI state.

pub mod accessibility;
pub mod color;
pub mod error;
pub mod extraction;
pub mod generation;
pub mod harmony;
pub mod matching;

// Re-exports for convenience.
pub use accessibility::{ContrastResult, Deficiency, Suggestion, TextSize};
pub use color::{Color, ColorFormat, ColorValue};
pub use error::{ColorError, Result};
pub use extraction::{DominantColor, Extraction, KMeansConfig};
pub use generation::{GeneratorConfig, Palette, PaletteHistory, Slot, Strategy};
pub use harmony::{HarmonySet, Shade};
pub use matching::{CatalogEntry, DistanceMetric};
