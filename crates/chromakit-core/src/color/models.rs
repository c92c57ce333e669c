//! Hue-based models (HSL, HSB, HWB) and naive CMYK.
//!
//! All math runs on normalized `f64` channels; values are only rounded when
//! converting back to [`Color`] or when a caller asks for the display form
//! via `rounded()`.
//!
//! # Hue
//! Hue comes from the max-channel case split on normalized RGB:
//! ```text
//!   max == R → 60 × (((G − B) / Δ) mod 6)
//!   max == G → 60 × ((B − R) / Δ + 2)
//!   max == B → 60 × ((R − G) / Δ + 4)
//! ```
//! Gray (Δ = 0) has hue 0 and saturation 0.

use serde::{Deserialize, Serialize};

use super::{Color, wrap_hue};

/// HSL: hue in degrees, saturation and lightness in percent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

/// HSB (a.k.a. HSV): hue in degrees, saturation and brightness in percent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Hsb {
    pub h: f64,
    pub s: f64,
    pub b: f64,
}

/// HWB: hue in degrees, whiteness and blackness in percent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Hwb {
    pub h: f64,
    pub w: f64,
    pub b: f64,
}

/// Naive (non-ICC) CMYK, every component in percent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Cmyk {
    pub c: f64,
    pub m: f64,
    pub y: f64,
    pub k: f64,
}

impl Hsl {
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// Display precision: whole degrees and whole percent.
    #[must_use]
    pub fn rounded(self) -> Self {
        Self::new(round_hue(self.h), round_pct(self.s), round_pct(self.l))
    }

    pub fn to_color(self) -> Color {
        hsl_to_rgb(self)
    }
}

impl Hsb {
    pub const fn new(h: f64, s: f64, b: f64) -> Self {
        Self { h, s, b }
    }

    #[must_use]
    pub fn rounded(self) -> Self {
        Self::new(round_hue(self.h), round_pct(self.s), round_pct(self.b))
    }

    pub fn to_color(self) -> Color {
        hsb_to_rgb(self)
    }
}

impl Hwb {
    pub const fn new(h: f64, w: f64, b: f64) -> Self {
        Self { h, w, b }
    }

    #[must_use]
    pub fn rounded(self) -> Self {
        Self::new(round_hue(self.h), round_pct(self.w), round_pct(self.b))
    }

    pub fn to_color(self) -> Color {
        hwb_to_rgb(self)
    }
}

impl Cmyk {
    pub const fn new(c: f64, m: f64, y: f64, k: f64) -> Self {
        Self { c, m, y, k }
    }

    #[must_use]
    pub fn rounded(self) -> Self {
        Self::new(round_pct(self.c), round_pct(self.m), round_pct(self.y), round_pct(self.k))
    }

    pub fn to_color(self) -> Color {
        cmyk_to_rgb(self)
    }
}

// ---------------------------------------------------------------------------
// RGB → hue models
// ---------------------------------------------------------------------------

/// Shared first stage: `(hue, max, min)` on normalized channels.
fn hue_max_min(color: Color) -> (f64, f64, f64) {
    let [r, g, b] = color.to_unit();
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    if delta <= 0.0 {
        return (0.0, max, min);
    }

    #[allow(clippy::float_cmp)]
    let hue = if max == r {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };

    (wrap_hue(hue), max, min)
}

pub fn rgb_to_hsl(color: Color) -> Hsl {
    let (h, max, min) = hue_max_min(color);
    let l = (max + min) / 2.0;
    let delta = max - min;
    let s = if delta <= 0.0 {
        0.0
    } else {
        delta / (1.0 - (2.0 * l - 1.0).abs())
    };
    Hsl::new(h, (s * 100.0).clamp(0.0, 100.0), l * 100.0)
}

pub fn rgb_to_hsb(color: Color) -> Hsb {
    let (h, max, min) = hue_max_min(color);
    let s = if max <= 0.0 { 0.0 } else { (max - min) / max };
    Hsb::new(h, s * 100.0, max * 100.0)
}

pub fn rgb_to_hwb(color: Color) -> Hwb {
    let (h, max, min) = hue_max_min(color);
    Hwb::new(h, min * 100.0, (1.0 - max) * 100.0)
}

pub fn rgb_to_cmyk(color: Color) -> Cmyk {
    let [r, g, b] = color.to_unit();
    let k = 1.0 - r.max(g).max(b);
    if k >= 1.0 {
        return Cmyk::new(0.0, 0.0, 0.0, 100.0);
    }
    let scale = 1.0 - k;
    Cmyk::new(
        (1.0 - r - k) / scale * 100.0,
        (1.0 - g - k) / scale * 100.0,
        (1.0 - b - k) / scale * 100.0,
        k * 100.0,
    )
}

// ---------------------------------------------------------------------------
// Hue models → RGB
// ---------------------------------------------------------------------------

/// Place chroma `c` and secondary component `x` by 60° hue sector.
fn hue_sector(h: f64, c: f64) -> [f64; 3] {
    let hp = wrap_hue(h) / 60.0;
    let x = c * (1.0 - (hp.rem_euclid(2.0) - 1.0).abs());
    match hp {
        hp if hp < 1.0 => [c, x, 0.0],
        hp if hp < 2.0 => [x, c, 0.0],
        hp if hp < 3.0 => [0.0, c, x],
        hp if hp < 4.0 => [0.0, x, c],
        hp if hp < 5.0 => [x, 0.0, c],
        _ => [c, 0.0, x],
    }
}

fn unit_pct(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { (v / 100.0).clamp(0.0, 1.0) }
}

pub fn hsl_to_rgb(hsl: Hsl) -> Color {
    let s = unit_pct(hsl.s);
    let l = unit_pct(hsl.l);
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let m = l - c / 2.0;
    let [r, g, b] = hue_sector(hsl.h, c);
    Color::from_unit([r + m, g + m, b + m])
}

pub fn hsb_to_rgb(hsb: Hsb) -> Color {
    let s = unit_pct(hsb.s);
    let v = unit_pct(hsb.b);
    let c = v * s;
    let m = v - c;
    let [r, g, b] = hue_sector(hsb.h, c);
    Color::from_unit([r + m, g + m, b + m])
}

/// HWB with `w + b ≥ 100` collapses to the gray `w / (w + b)`.
pub fn hwb_to_rgb(hwb: Hwb) -> Color {
    let w = unit_pct(hwb.w);
    let bk = unit_pct(hwb.b);
    if w + bk >= 1.0 {
        let gray = w / (w + bk);
        return Color::from_unit([gray, gray, gray]);
    }
    let v = 1.0 - bk;
    let s = 1.0 - w / v;
    hsb_to_rgb(Hsb::new(hwb.h, s * 100.0, v * 100.0))
}

pub fn cmyk_to_rgb(cmyk: Cmyk) -> Color {
    let k = unit_pct(cmyk.k);
    Color::from_unit([
        (1.0 - unit_pct(cmyk.c)) * (1.0 - k),
        (1.0 - unit_pct(cmyk.m)) * (1.0 - k),
        (1.0 - unit_pct(cmyk.y)) * (1.0 - k),
    ])
}

fn round_hue(h: f64) -> f64 {
    wrap_hue(wrap_hue(h).round())
}

fn round_pct(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 100.0).round() + 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < EPSILON, "{a} vs {b}");
    }

    #[test]
    fn test_primary_hues() {
        assert_close(rgb_to_hsl(Color::new(255, 0, 0)).h, 0.0);
        assert_close(rgb_to_hsl(Color::new(0, 255, 0)).h, 120.0);
        assert_close(rgb_to_hsl(Color::new(0, 0, 255)).h, 240.0);
        assert_close(rgb_to_hsl(Color::new(255, 0, 255)).h, 300.0);
    }

    #[test]
    fn test_gray_has_zero_hue_and_saturation() {
        for v in [0u8, 1, 128, 254, 255] {
            let c = Color::new(v, v, v);
            let hsl = rgb_to_hsl(c);
            let hsb = rgb_to_hsb(c);
            assert_eq!(hsl.h, 0.0);
            assert_eq!(hsl.s, 0.0);
            assert_eq!(hsb.s, 0.0);
            assert!(!hsl.l.is_nan());
        }
    }

    #[test]
    fn test_hsl_known_value() {
        let hsl = rgb_to_hsl(Color::new(0x33, 0x66, 0xcc)).rounded();
        assert_eq!((hsl.h, hsl.s, hsl.l), (220.0, 60.0, 50.0));
        assert_eq!(hsl_to_rgb(Hsl::new(220.0, 60.0, 50.0)), Color::new(0x33, 0x66, 0xcc));
    }

    #[test]
    fn test_hsb_known_value() {
        let hsb = rgb_to_hsb(Color::new(0x33, 0x66, 0xcc)).rounded();
        assert_eq!((hsb.h, hsb.s, hsb.b), (220.0, 75.0, 80.0));
    }

    #[test]
    fn test_hwb_saturated_and_gray() {
        let hwb = rgb_to_hwb(Color::new(255, 0, 0));
        assert_close(hwb.w, 0.0);
        assert_close(hwb.b, 0.0);
        assert_eq!(hwb_to_rgb(Hwb::new(0.0, 60.0, 60.0)), Color::new(128, 128, 128));
    }

    #[test]
    fn test_cmyk_black_has_no_division_by_zero() {
        let cmyk = rgb_to_cmyk(Color::BLACK);
        assert_eq!(cmyk, Cmyk::new(0.0, 0.0, 0.0, 100.0));
        assert_eq!(cmyk_to_rgb(cmyk), Color::BLACK);
    }

    #[test]
    fn test_cmyk_known_value() {
        let cmyk = rgb_to_cmyk(Color::new(255, 128, 0)).rounded();
        assert_eq!((cmyk.c, cmyk.m, cmyk.y, cmyk.k), (0.0, 50.0, 100.0, 0.0));
    }

    #[test]
    fn test_out_of_range_inputs_are_clamped() {
        assert_eq!(hsl_to_rgb(Hsl::new(-120.0, 250.0, 50.0)), Color::new(0, 0, 255));
        assert_eq!(hsb_to_rgb(Hsb::new(f64::NAN, f64::NAN, 100.0)), Color::WHITE);
    }

    #[test]
    fn test_rounded_hue_wraps_to_zero() {
        assert_eq!(Hsl::new(359.7, 10.0, 10.0).rounded().h, 0.0);
    }
}
