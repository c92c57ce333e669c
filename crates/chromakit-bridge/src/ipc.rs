//! Message contracts between the UI layer and the engine host.
//!
//! One JSON object per line in each direction, adjacently tagged as
//! `{"type": ..., "data": {...}}`.

use serde::{Deserialize, Serialize};

use chromakit_core::accessibility::ContrastReport;
use chromakit_core::color::{Color, ColorFormat, ColorValue};
use chromakit_core::extraction::{Extraction, KMeansConfig};
use chromakit_core::generation::{GeneratorConfig, Swatch};
use chromakit_core::harmony::{HarmonySet, Shade};
use chromakit_core::matching::{CatalogEntry, DistanceMetric};
use chromakit_core::{Deficiency, Suggestion};

fn one() -> usize {
    1
}

/// Messages from the UI to the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum UiToEngine {
    /// Render user-typed color text in another representation.
    Convert {
        /// Hex, `rgb(...)` or `hsl(...)` text.
        color: String,
        format: ColorFormat,
    },

    /// Regenerate every unlocked swatch of the current palette.
    Generate {
        /// New palette length; the current length when omitted.
        #[serde(default)]
        count: Option<usize>,
        /// Replaces the session's generator settings when present.
        #[serde(default)]
        config: Option<GeneratorConfig>,
    },

    Undo,

    Redo,

    ToggleLock {
        index: usize,
    },

    Harmonies {
        color: Color,
    },

    TintsAndShades {
        color: Color,
        steps: usize,
    },

    ShadeScale {
        color: Color,
    },

    Contrast {
        foreground: Color,
        background: Color,
    },

    SuggestAccessible {
        foreground: Color,
        background: Color,
        target: f64,
        /// Report an unreachable target as an error.
        #[serde(default)]
        strict: bool,
    },

    Simulate {
        colors: Vec<Color>,
        deficiency: Deficiency,
    },

    /// Decode an image file and extract its dominant colors.
    ExtractFromFile {
        path: String,
        count: usize,
        #[serde(default)]
        config: Option<KMeansConfig>,
        /// Report a partial extraction as an error.
        #[serde(default)]
        strict: bool,
    },

    ExtractFromPixels {
        pixels: Vec<Color>,
        count: usize,
        #[serde(default)]
        config: Option<KMeansConfig>,
        #[serde(default)]
        strict: bool,
    },

    /// Closest entries of a caller-supplied catalog.
    Nearest {
        color: Color,
        catalog: Vec<CatalogEntry>,
        #[serde(default = "one")]
        count: usize,
        #[serde(default)]
        metric: DistanceMetric,
    },
}

/// Messages from the engine to the UI. Exactly one per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum EngineToUi {
    /// Current palette after a generate, undo, redo or lock change.
    Palette {
        swatches: Vec<Swatch>,
        can_undo: bool,
        can_redo: bool,
    },

    Converted {
        value: ColorValue,
        /// CSS-like rendering of `value`.
        text: String,
    },

    Harmonies {
        set: HarmonySet,
    },

    Colors {
        colors: Vec<Color>,
    },

    ShadeScale {
        shades: Vec<Shade>,
    },

    Contrast {
        report: ContrastReport,
        /// Black or white, whichever reads better on the background.
        best_text: Color,
    },

    Suggestion {
        suggestion: Suggestion,
    },

    Extraction {
        extraction: Extraction,
    },

    Matches {
        matches: Vec<CatalogMatch>,
    },

    /// The request failed; the session is unchanged.
    Error {
        message: String,
    },
}

/// Owned form of a catalog match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogMatch {
    pub name: String,
    pub color: Color,
    pub distance: f64,
}
