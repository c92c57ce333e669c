//! Color values and conversions between color models.
//!
//! [`Color`] is the canonical representation: three 8-bit sRGB channels.
//! Every other model ([`Hsl`], [`Hsb`], [`Hwb`], [`Cmyk`]) converts through
//! it, so any ordered pair of representations is reachable via
//! [`ColorValue`].

pub mod format;
pub mod models;
pub mod transfer;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ColorError, Result};

pub use format::{ColorFormat, ColorValue, parse_color};
pub use models::{Cmyk, Hsb, Hsl, Hwb};

/// A single opaque sRGB color.
///
/// Two colors with equal channels are interchangeable. Serializes as a
/// `#rrggbb` string and deserializes from either a hex string or an
/// `[r, g, b]` triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "ColorRepr")]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a 3- or 6-digit hex string, `#` optional, case-insensitive.
    ///
    /// # Errors
    /// Returns [`ColorError::InvalidFormat`] for any other length or a
    /// non-hex digit.
    pub fn from_hex(hex: &str) -> Result<Self> {
        hex_to_rgb(hex)
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(self) -> String {
        rgb_to_hex(self)
    }

    /// Channels normalized to `[0, 1]`.
    pub fn to_unit(self) -> [f64; 3] {
        [
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        ]
    }

    /// Build a color from normalized channels, clamping and rounding each.
    pub fn from_unit(rgb: [f64; 3]) -> Self {
        Self::new(unit_to_channel(rgb[0]), unit_to_channel(rgb[1]), unit_to_channel(rgb[2]))
    }

    pub fn to_hsl(self) -> Hsl {
        models::rgb_to_hsl(self)
    }

    pub fn to_hsb(self) -> Hsb {
        models::rgb_to_hsb(self)
    }

    pub fn to_hwb(self) -> Hwb {
        models::rgb_to_hwb(self)
    }

    pub fn to_cmyk(self) -> Cmyk {
        models::rgb_to_cmyk(self)
    }

    /// Render this color in the requested representation.
    pub fn to_value(self, format: ColorFormat) -> ColorValue {
        ColorValue::from_color(self, format)
    }

    /// Squared Euclidean distance in RGB space.
    pub fn distance_squared(self, other: Self) -> u32 {
        let dr = i32::from(self.r) - i32::from(other.r);
        let dg = i32::from(self.g) - i32::from(other.g);
        let db = i32::from(self.b) - i32::from(other.b);
        (dr * dr + dg * dg + db * db).unsigned_abs()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self> {
        hex_to_rgb(s)
    }
}

impl From<[u8; 3]> for Color {
    fn from(rgb: [u8; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2])
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Color> for [u8; 3] {
    fn from(c: Color) -> Self {
        [c.r, c.g, c.b]
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_hex()
    }
}

/// Wire forms accepted when deserializing a [`Color`].
#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Hex(String),
    Triple([u8; 3]),
}

impl TryFrom<ColorRepr> for Color {
    type Error = ColorError;

    fn try_from(repr: ColorRepr) -> Result<Self> {
        match repr {
            ColorRepr::Hex(s) => hex_to_rgb(&s),
            ColorRepr::Triple(rgb) => Ok(rgb.into()),
        }
    }
}

/// Parse a hex color string into RGB.
///
/// Accepts `#rgb`, `#rrggbb`, with or without the `#`, in any case.
/// Shorthand digits are duplicated (`#abc` → `#aabbcc`).
///
/// # Errors
/// Returns [`ColorError::InvalidFormat`] on a bad length or digit.
pub fn hex_to_rgb(hex: &str) -> Result<Color> {
    let trimmed = hex.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
    let bytes = digits.as_bytes();

    let nibble = |c: u8| -> Result<u8> {
        match c {
            b'0'..=b'9' => Ok(c - b'0'),
            b'a'..=b'f' => Ok(c - b'a' + 10),
            b'A'..=b'F' => Ok(c - b'A' + 10),
            _ => Err(ColorError::InvalidFormat(format!(
                "'{hex}' contains a non-hex digit"
            ))),
        }
    };

    match bytes.len() {
        3 => Ok(Color::new(
            nibble(bytes[0])? * 17,
            nibble(bytes[1])? * 17,
            nibble(bytes[2])? * 17,
        )),
        6 => {
            let pair = |i: usize| -> Result<u8> { Ok((nibble(bytes[i])? << 4) | nibble(bytes[i + 1])?) };
            Ok(Color::new(pair(0)?, pair(2)?, pair(4)?))
        }
        n => Err(ColorError::InvalidFormat(format!(
            "'{hex}' has {n} hex digits, expected 3 or 6"
        ))),
    }
}

/// Serialize RGB as lowercase `#rrggbb`.
pub fn rgb_to_hex(color: Color) -> String {
    color.to_string()
}

/// Wrap any hue in degrees into `[0, 360)`.
pub fn wrap_hue(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let h = degrees.rem_euclid(360.0);
    // rem_euclid can return 360.0 for tiny negative inputs.
    if h >= 360.0 { 0.0 } else { h }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn unit_to_channel(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parses_six_digits_any_case() {
        assert_eq!(hex_to_rgb("#3366CC").unwrap(), Color::new(0x33, 0x66, 0xcc));
        assert_eq!(hex_to_rgb("3366cc").unwrap(), Color::new(0x33, 0x66, 0xcc));
    }

    #[test]
    fn test_hex_shorthand_duplicates_nibbles() {
        assert_eq!(hex_to_rgb("#abc").unwrap(), hex_to_rgb("#aabbcc").unwrap());
        assert_eq!(hex_to_rgb("F00").unwrap(), Color::new(255, 0, 0));
    }

    #[test]
    fn test_hex_rejects_bad_length_and_digits() {
        for bad in ["", "#", "#12", "#1234", "#12345", "#1234567", "#ggg", "#12345z", "rgb"] {
            assert!(
                matches!(hex_to_rgb(bad), Err(ColorError::InvalidFormat(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_hex_output_is_lowercase_with_hash() {
        assert_eq!(Color::new(0xAB, 0x0C, 0xFF).to_hex(), "#ab0cff");
    }

    #[test]
    fn test_serde_accepts_hex_and_triple() {
        let a: Color = serde_json::from_str("\"#FF8000\"").unwrap();
        let b: Color = serde_json::from_str("[255, 128, 0]").unwrap();
        assert_eq!(a, b);
        assert_eq!(serde_json::to_string(&a).unwrap(), "\"#ff8000\"");
        assert!(serde_json::from_str::<Color>("\"#zz\"").is_err());
    }

    #[test]
    fn test_wrap_hue() {
        assert_eq!(wrap_hue(360.0), 0.0);
        assert_eq!(wrap_hue(-30.0), 330.0);
        assert_eq!(wrap_hue(725.0), 5.0);
        assert_eq!(wrap_hue(f64::NAN), 0.0);
    }

    #[test]
    fn test_distance_squared() {
        assert_eq!(Color::BLACK.distance_squared(Color::WHITE), 3 * 255 * 255);
        assert_eq!(Color::new(1, 2, 3).distance_squared(Color::new(1, 2, 3)), 0);
    }
}
