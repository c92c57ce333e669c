//! WCAG contrast scoring and color-vision deficiency simulation.

pub mod contrast;
pub mod vision;

pub use contrast::{
    ContrastReport, ContrastResult, Suggestion, TextSize, best_text_color, contrast, contrast_ratio,
    contrast_report, relative_luminance, suggest_accessible,
};
pub use vision::{Deficiency, simulate};
