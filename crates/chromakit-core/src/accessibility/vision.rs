//! Color-vision deficiency simulation.
//!
//! # Algorithm
//! ```text
//!   lin  = sRGB EOTF(rgb)
//!   sim  = M_deficiency × lin          (Machado 2009, severity 1.0)
//!   out  = sRGB OETF(clamp(sim, 0, 1))
//! ```
//!
//! Achromatopsia collapses every channel to Rec. 709 luminance.

use serde::{Deserialize, Serialize};

use crate::color::transfer::{SrgbTransfer, TransferFunction};
use crate::color::{Color, unit_to_channel};

type Mat3 = [[f64; 3]; 3];

const PROTANOPIA: Mat3 = [
    [0.152_286, 1.052_583, -0.204_868],
    [0.114_503, 0.786_281, 0.099_216],
    [-0.003_882, -0.048_116, 1.051_998],
];

const DEUTERANOPIA: Mat3 = [
    [0.367_322, 0.860_646, -0.227_968],
    [0.280_085, 0.672_501, 0.047_413],
    [-0.011_820, 0.042_940, 0.968_881],
];

const TRITANOPIA: Mat3 = [
    [1.255_528, -0.076_749, -0.178_779],
    [-0.078_411, 0.930_809, 0.147_602],
    [0.004_733, 0.691_367, 0.303_900],
];

const ACHROMATOPSIA: Mat3 = [
    [0.2126, 0.7152, 0.0722],
    [0.2126, 0.7152, 0.0722],
    [0.2126, 0.7152, 0.0722],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Deficiency {
    /// No functioning L cones.
    Protanopia,
    /// No functioning M cones.
    Deuteranopia,
    /// No functioning S cones.
    Tritanopia,
    /// Monochromacy.
    Achromatopsia,
}

impl Deficiency {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Protanopia => "Protanopia",
            Self::Deuteranopia => "Deuteranopia",
            Self::Tritanopia => "Tritanopia",
            Self::Achromatopsia => "Achromatopsia",
        }
    }

    pub fn all() -> &'static [Self] {
        const ALL: [Deficiency; 4] = [
            Deficiency::Protanopia,
            Deficiency::Deuteranopia,
            Deficiency::Tritanopia,
            Deficiency::Achromatopsia,
        ];
        &ALL
    }

    const fn matrix(self) -> &'static Mat3 {
        match self {
            Self::Protanopia => &PROTANOPIA,
            Self::Deuteranopia => &DEUTERANOPIA,
            Self::Tritanopia => &TRITANOPIA,
            Self::Achromatopsia => &ACHROMATOPSIA,
        }
    }
}

/// Approximate how `color` appears to a viewer with `deficiency`.
pub fn simulate(color: Color, deficiency: Deficiency) -> Color {
    let lin = color.to_unit().map(|c| SrgbTransfer.to_linear(c));
    let m = deficiency.matrix();
    let out = m.map(|row| {
        let v = row[0] * lin[0] + row[1] * lin[1] + row[2] * lin[2];
        unit_to_channel(SrgbTransfer.to_encoded(v.clamp(0.0, 1.0)))
    });
    Color::new(out[0], out[1], out[2])
}
