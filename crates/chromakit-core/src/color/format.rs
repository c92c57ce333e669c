//! Output representations and CSS-like text forms.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::models::{Cmyk, Hsb, Hsl, Hwb};
use super::{Color, hex_to_rgb};
use crate::error::{ColorError, Result};

/// The representation a caller wants a color rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorFormat {
    #[default]
    Hex,
    Rgb,
    Hsl,
    Hsb,
    Hwb,
    Cmyk,
}

impl ColorFormat {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hex => "HEX",
            Self::Rgb => "RGB",
            Self::Hsl => "HSL",
            Self::Hsb => "HSB",
            Self::Hwb => "HWB",
            Self::Cmyk => "CMYK",
        }
    }

    pub fn all() -> &'static [Self] {
        const ALL: [ColorFormat; 6] = [
            ColorFormat::Hex,
            ColorFormat::Rgb,
            ColorFormat::Hsl,
            ColorFormat::Hsb,
            ColorFormat::Hwb,
            ColorFormat::Cmyk,
        ];
        &ALL
    }
}

/// A color in exactly one representation.
///
/// Conversions between any two representations go through [`Color`]:
/// `value.to_color().to_value(target)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "format", content = "value", rename_all = "lowercase")]
pub enum ColorValue {
    Hex(Color),
    Rgb([u8; 3]),
    Hsl(Hsl),
    Hsb(Hsb),
    Hwb(Hwb),
    Cmyk(Cmyk),
}

impl ColorValue {
    /// Render `color` in `format`, rounded to display precision.
    pub fn from_color(color: Color, format: ColorFormat) -> Self {
        match format {
            ColorFormat::Hex => Self::Hex(color),
            ColorFormat::Rgb => Self::Rgb(color.into()),
            ColorFormat::Hsl => Self::Hsl(color.to_hsl().rounded()),
            ColorFormat::Hsb => Self::Hsb(color.to_hsb().rounded()),
            ColorFormat::Hwb => Self::Hwb(color.to_hwb().rounded()),
            ColorFormat::Cmyk => Self::Cmyk(color.to_cmyk().rounded()),
        }
    }

    pub fn format(&self) -> ColorFormat {
        match self {
            Self::Hex(_) => ColorFormat::Hex,
            Self::Rgb(_) => ColorFormat::Rgb,
            Self::Hsl(_) => ColorFormat::Hsl,
            Self::Hsb(_) => ColorFormat::Hsb,
            Self::Hwb(_) => ColorFormat::Hwb,
            Self::Cmyk(_) => ColorFormat::Cmyk,
        }
    }

    pub fn to_color(&self) -> Color {
        match *self {
            Self::Hex(c) => c,
            Self::Rgb(rgb) => rgb.into(),
            Self::Hsl(v) => v.to_color(),
            Self::Hsb(v) => v.to_color(),
            Self::Hwb(v) => v.to_color(),
            Self::Cmyk(v) => v.to_color(),
        }
    }

    /// Convert into another representation.
    #[must_use]
    pub fn convert(&self, target: ColorFormat) -> Self {
        Self::from_color(self.to_color(), target)
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Hex(c) => write!(f, "{c}"),
            Self::Rgb([r, g, b]) => write!(f, "rgb({r}, {g}, {b})"),
            Self::Hsl(v) => {
                let v = v.rounded();
                write!(f, "hsl({}, {}%, {}%)", v.h, v.s, v.l)
            }
            Self::Hsb(v) => {
                let v = v.rounded();
                write!(f, "hsb({}, {}%, {}%)", v.h, v.s, v.b)
            }
            Self::Hwb(v) => {
                let v = v.rounded();
                write!(f, "hwb({} {}% {}%)", v.h, v.w, v.b)
            }
            Self::Cmyk(v) => {
                let v = v.rounded();
                write!(f, "cmyk({}%, {}%, {}%, {}%)", v.c, v.m, v.y, v.k)
            }
        }
    }
}

/// Parse user-typed color text.
///
/// Accepts hex (`#rgb`, `#rrggbb`), `rgb(r, g, b)` and `hsl(h, s%, l%)`;
/// arguments may be separated by commas or whitespace.
///
/// # Errors
/// Returns [`ColorError::InvalidFormat`] for anything else.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn parse_color(input: &str) -> Result<Color> {
    let text = input.trim();
    let lower = text.to_ascii_lowercase();

    if let Some(args) = function_args(&lower, "rgb") {
        let [r, g, b] = parse_three(args, input)?;
        let channel = |v: f64| -> Result<u8> {
            if (0.0..=255.0).contains(&v) && v.fract() == 0.0 {
                Ok(v as u8)
            } else {
                Err(invalid(input))
            }
        };
        return Ok(Color::new(channel(r)?, channel(g)?, channel(b)?));
    }

    if let Some(args) = function_args(&lower, "hsl") {
        let [h, s, l] = parse_three(args, input)?;
        if !(0.0..=100.0).contains(&s) || !(0.0..=100.0).contains(&l) {
            return Err(invalid(input));
        }
        return Ok(Hsl::new(h, s, l).to_color());
    }

    hex_to_rgb(text)
}

fn function_args<'a>(text: &'a str, name: &str) -> Option<&'a str> {
    text.strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

fn parse_three(args: &str, original: &str) -> Result<[f64; 3]> {
    let parts: Vec<&str> = args
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();
    if parts.len() != 3 {
        return Err(invalid(original));
    }
    let mut out = [0.0; 3];
    for (slot, part) in out.iter_mut().zip(parts) {
        let v: f64 = part
            .trim_end_matches('%')
            .trim_end_matches("deg")
            .parse()
            .map_err(|_| invalid(original))?;
        if !v.is_finite() {
            return Err(invalid(original));
        }
        *slot = v;
    }
    Ok(out)
}

fn invalid(input: &str) -> ColorError {
    ColorError::InvalidFormat(format!("unrecognized color '{input}'"))
}
