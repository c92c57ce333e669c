//! Hue rotations on the HSL color wheel.
//!
//! | kind                | offsets (degrees)  |
//! |---------------------|--------------------|
//! | complementary       | 180                |
//! | analogous           | −30, +30           |
//! | triadic             | 120, 240           |
//! | split-complementary | 150, 210           |
//! | tetradic            | 90, 180, 270       |
//!
//! Saturation and lightness are inherited from the base.

use serde::{Deserialize, Serialize};

use crate::color::{Color, Hsl, wrap_hue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HarmonyKind {
    Complementary,
    Analogous,
    Triadic,
    SplitComplementary,
    Tetradic,
}

impl HarmonyKind {
    pub const fn offsets(self) -> &'static [f64] {
        match self {
            Self::Complementary => &[180.0],
            Self::Analogous => &[-30.0, 30.0],
            Self::Triadic => &[120.0, 240.0],
            Self::SplitComplementary => &[150.0, 210.0],
            Self::Tetradic => &[90.0, 180.0, 270.0],
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Complementary => "Complementary",
            Self::Analogous => "Analogous",
            Self::Triadic => "Triadic",
            Self::SplitComplementary => "Split complementary",
            Self::Tetradic => "Tetradic",
        }
    }

    pub fn all() -> &'static [Self] {
        const ALL: [HarmonyKind; 5] = [
            HarmonyKind::Complementary,
            HarmonyKind::Analogous,
            HarmonyKind::Triadic,
            HarmonyKind::SplitComplementary,
            HarmonyKind::Tetradic,
        ];
        &ALL
    }

    /// Apply this harmony's offsets to `base`.
    pub fn derive(self, base: Color) -> Vec<Color> {
        let hsl = base.to_hsl();
        self.offsets()
            .iter()
            .map(|&offset| rotate_hsl(hsl, offset))
            .collect()
    }
}

/// Every harmony of one base color. Rebuilt from scratch per base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarmonySet {
    pub base: Color,
    pub complementary: Vec<Color>,
    pub analogous: Vec<Color>,
    pub triadic: Vec<Color>,
    pub split_complementary: Vec<Color>,
    pub tetradic: Vec<Color>,
}

impl HarmonySet {
    pub fn get(&self, kind: HarmonyKind) -> &[Color] {
        match kind {
            HarmonyKind::Complementary => &self.complementary,
            HarmonyKind::Analogous => &self.analogous,
            HarmonyKind::Triadic => &self.triadic,
            HarmonyKind::SplitComplementary => &self.split_complementary,
            HarmonyKind::Tetradic => &self.tetradic,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (HarmonyKind, &[Color])> {
        HarmonyKind::all().iter().map(|&kind| (kind, self.get(kind)))
    }
}

/// Compute the full harmony set for `base`.
pub fn harmonies(base: Color) -> HarmonySet {
    HarmonySet {
        base,
        complementary: HarmonyKind::Complementary.derive(base),
        analogous: HarmonyKind::Analogous.derive(base),
        triadic: HarmonyKind::Triadic.derive(base),
        split_complementary: HarmonyKind::SplitComplementary.derive(base),
        tetradic: HarmonyKind::Tetradic.derive(base),
    }
}

/// Rotate the hue of `color` by `degrees`, holding saturation and lightness.
pub fn rotate_hue(color: Color, degrees: f64) -> Color {
    rotate_hsl(color.to_hsl(), degrees)
}

fn rotate_hsl(hsl: Hsl, degrees: f64) -> Color {
    Hsl::new(
        wrap_hue(hsl.h + degrees),
        hsl.s.clamp(0.0, 100.0),
        hsl.l.clamp(0.0, 100.0),
    )
    .to_color()
}
