//! WCAG 2.x relative luminance and contrast ratio.
//!
//! # Formula
//! ```text
//!   L     = 0.2126 × R_lin + 0.7152 × G_lin + 0.0722 × B_lin
//!   ratio = (L_lighter + 0.05) / (L_darker + 0.05)        ∈ [1, 21]
//! ```
//!
//! | level | normal text | large text |
//! |-------|-------------|------------|
//! | AA    | ≥ 4.5       | ≥ 3.0      |
//! | AAA   | ≥ 7.0       | ≥ 4.5      |

use serde::{Deserialize, Serialize};

use crate::color::transfer::{TransferFunction, WcagTransfer};
use crate::color::{Color, Hsl};
use crate::error::{ColorError, Result};

/// Rec. 709 luminance weights.
const LUMA_REC709: [f64; 3] = [0.2126, 0.7152, 0.0722];

/// Highest ratio WCAG can report (black on white).
pub const MAX_CONTRAST: f64 = 21.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextSize {
    #[default]
    Normal,
    /// 18pt regular or 14pt bold and above.
    Large,
}

impl TextSize {
    /// `(AA, AAA)` thresholds.
    pub const fn thresholds(self) -> (f64, f64) {
        match self {
            Self::Normal => (4.5, 7.0),
            Self::Large => (3.0, 4.5),
        }
    }
}

/// Contrast of one foreground/background pair for one text size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContrastResult {
    pub ratio: f64,
    pub passes_aa: bool,
    pub passes_aaa: bool,
}

/// Contrast for both text sizes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContrastReport {
    pub ratio: f64,
    pub normal: ContrastResult,
    pub large: ContrastResult,
}

/// Outcome of [`suggest_accessible`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub color: Color,
    pub ratio: f64,
    pub target: f64,
    /// `false` when `color` is only the best achievable approximation.
    pub target_met: bool,
}

impl Suggestion {
    /// Strict form: fail when the target could not be reached.
    ///
    /// # Errors
    /// [`ColorError::Unreachable`] carrying the best achievable ratio.
    pub fn into_result(self) -> Result<Color> {
        if self.target_met {
            Ok(self.color)
        } else {
            Err(ColorError::Unreachable {
                target: self.target,
                best: self.ratio,
            })
        }
    }
}

pub fn relative_luminance(color: Color) -> f64 {
    let [r, g, b] = color.to_unit();
    LUMA_REC709[0] * WcagTransfer.to_linear(r)
        + LUMA_REC709[1] * WcagTransfer.to_linear(g)
        + LUMA_REC709[2] * WcagTransfer.to_linear(b)
}

/// Symmetric contrast ratio, exactly 1 for identical colors.
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

pub fn contrast(fg: Color, bg: Color, size: TextSize) -> ContrastResult {
    classify(contrast_ratio(fg, bg), size)
}

pub fn contrast_report(fg: Color, bg: Color) -> ContrastReport {
    let ratio = contrast_ratio(fg, bg);
    ContrastReport {
        ratio,
        normal: classify(ratio, TextSize::Normal),
        large: classify(ratio, TextSize::Large),
    }
}

fn classify(ratio: f64, size: TextSize) -> ContrastResult {
    let (aa, aaa) = size.thresholds();
    ContrastResult {
        ratio,
        passes_aa: ratio >= aa,
        passes_aaa: ratio >= aaa,
    }
}

/// Black or white text, whichever contrasts more with `bg` (black on ties).
pub fn best_text_color(bg: Color) -> Color {
    if contrast_ratio(Color::WHITE, bg) > contrast_ratio(Color::BLACK, bg) {
        Color::WHITE
    } else {
        Color::BLACK
    }
}

/// Adjust the lightness of `fg` until it reaches `target` against `bg`.
///
/// Hue and saturation are held. Lightness is searched outward from its
/// current value one percentage point at a time, trying the darker and then
/// the lighter candidate at each distance, so the first hit is the smallest
/// change. When no lightness in `[0, 100]` reaches the target, the best
/// achievable candidate is returned with `target_met == false`.
///
/// # Errors
/// [`ColorError::InvalidArgument`] when `target` is outside `[1, 21]`.
pub fn suggest_accessible(fg: Color, bg: Color, target: f64) -> Result<Suggestion> {
    if !(1.0..=MAX_CONTRAST).contains(&target) {
        return Err(ColorError::InvalidArgument(format!(
            "contrast target {target} outside [1, {MAX_CONTRAST}]"
        )));
    }

    let current = contrast_ratio(fg, bg);
    if current >= target {
        return Ok(Suggestion {
            color: fg,
            ratio: current,
            target,
            target_met: true,
        });
    }

    let hsl = fg.to_hsl();
    let mut best = (fg, current);

    for step in 1..=100_u32 {
        let delta = f64::from(step);
        let mut exhausted = true;
        for l in [hsl.l - delta, hsl.l + delta] {
            if !(-1.0..=101.0).contains(&l) {
                continue;
            }
            exhausted = false;
            let candidate = Hsl::new(hsl.h, hsl.s, l.clamp(0.0, 100.0)).to_color();
            let ratio = contrast_ratio(candidate, bg);
            if ratio >= target {
                tracing::trace!("contrast {:.2} reached at lightness {:.0}", ratio, l);
                return Ok(Suggestion {
                    color: candidate,
                    ratio,
                    target,
                    target_met: true,
                });
            }
            if ratio > best.1 {
                best = (candidate, ratio);
            }
        }
        if exhausted {
            break;
        }
    }

    tracing::warn!(
        "contrast target {:.2} unreachable for {} on {}, best {:.2}",
        target,
        fg,
        bg,
        best.1
    );
    Ok(Suggestion {
        color: best.0,
        ratio: best.1,
        target,
        target_met: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_black_on_white_is_21() {
        let result = contrast(Color::BLACK, Color::WHITE, TextSize::Normal);
        assert!((result.ratio - 21.0).abs() < EPSILON);
        assert!(result.passes_aa && result.passes_aaa);
        let large = contrast(Color::BLACK, Color::WHITE, TextSize::Large);
        assert!(large.passes_aa && large.passes_aaa);
    }

    #[test]
    fn test_same_color_is_one() {
        for c in [Color::BLACK, Color::WHITE, Color::new(0x33, 0x66, 0xcc)] {
            assert_eq!(contrast_ratio(c, c), 1.0);
        }
    }

    #[test]
    fn test_ratio_is_symmetric() {
        let a = Color::new(0x33, 0x66, 0xcc);
        let b = Color::new(0xff, 0xcc, 0x00);
        assert_eq!(contrast_ratio(a, b), contrast_ratio(b, a));
    }

    #[test]
    fn test_thresholds_by_size() {
        // #767676 on white is the classic ~4.54 gray.
        let gray = Color::new(0x76, 0x76, 0x76);
        let normal = contrast(gray, Color::WHITE, TextSize::Normal);
        assert!(normal.passes_aa && !normal.passes_aaa);
        let large = contrast(gray, Color::WHITE, TextSize::Large);
        assert!(large.passes_aa && large.passes_aaa);

        let report = contrast_report(gray, Color::WHITE);
        assert_eq!(report.normal, normal);
        assert_eq!(report.large, large);
    }

    #[test]
    fn test_suggest_returns_input_when_already_passing() {
        let s = suggest_accessible(Color::BLACK, Color::WHITE, 4.5).unwrap();
        assert_eq!(s.color, Color::BLACK);
        assert!(s.target_met);
    }

    #[test]
    fn test_suggest_darkens_light_text_on_white() {
        let fg = Color::new(0x99, 0xbb, 0xff);
        let s = suggest_accessible(fg, Color::WHITE, 4.5).unwrap();
        assert!(s.target_met);
        assert!(s.ratio >= 4.5);
        assert!(s.color.to_hsl().l < fg.to_hsl().l);
        // Hue survives up to 8-bit rounding.
        assert!((s.color.to_hsl().h - fg.to_hsl().h).abs() < 3.0);
        assert_eq!(s.into_result().unwrap(), s.color);
    }

    #[test]
    fn test_suggest_is_minimal() {
        let fg = Color::new(0x99, 0xbb, 0xff);
        let s = suggest_accessible(fg, Color::WHITE, 4.5).unwrap();
        // One point less of adjustment must not reach the target.
        let hsl = fg.to_hsl();
        let l = s.color.to_hsl().l;
        let closer = Hsl::new(hsl.h, hsl.s, (l + 1.5).min(hsl.l)).to_color();
        assert!(contrast_ratio(closer, Color::WHITE) < 4.5);
    }

    #[test]
    fn test_suggest_unreachable_reports_best_effort() {
        let mid_gray = Color::new(0x76, 0x76, 0x76);
        let s = suggest_accessible(Color::new(0x80, 0x80, 0x80), mid_gray, 7.0).unwrap();
        assert!(!s.target_met);
        assert!(s.ratio > 1.0);
        assert!(matches!(s.into_result(), Err(ColorError::Unreachable { .. })));
    }

    #[test]
    fn test_suggest_rejects_bad_target() {
        assert!(suggest_accessible(Color::BLACK, Color::WHITE, 0.5).is_err());
        assert!(suggest_accessible(Color::BLACK, Color::WHITE, 22.0).is_err());
        assert!(suggest_accessible(Color::BLACK, Color::WHITE, f64::NAN).is_err());
    }

    #[test]
    fn test_best_text_color() {
        assert_eq!(best_text_color(Color::new(0x11, 0x11, 0x33)), Color::WHITE);
        assert_eq!(best_text_color(Color::new(0xff, 0xee, 0x88)), Color::BLACK);
    }
}
