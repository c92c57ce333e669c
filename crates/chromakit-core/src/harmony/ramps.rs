//! Tonal ramps: tints/shades and a Tailwind-style 50–950 scale.
//!
//! Both ramps hold hue and saturation fixed and only move HSL lightness, so
//! they stay monotonic for every input.

use serde::{Deserialize, Serialize};

use crate::color::{Color, Hsl};
use crate::error::{ColorError, Result};

/// Lightest end of [`tints_and_shades`], unless the base is lighter.
const TINT_LIGHTNESS: f64 = 95.0;
/// Darkest end of [`tints_and_shades`], unless the base is darker.
const SHADE_LIGHTNESS: f64 = 5.0;
/// Longest ramp [`tints_and_shades`] will build.
pub const MAX_RAMP_STEPS: usize = 256;

/// Scale labels, lightest first.
pub const SHADE_LABELS: [u16; 11] = [50, 100, 200, 300, 400, 500, 600, 700, 800, 900, 950];

/// Target HSL lightness per checkpoint, aligned with [`SHADE_LABELS`].
const SHADE_TARGETS: [f64; 11] = [97.0, 94.0, 86.0, 77.0, 66.0, 56.0, 46.0, 37.0, 28.0, 20.0, 12.0];

/// One entry of a [`shade_scale`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shade {
    pub label: u16,
    pub color: Color,
}

/// `steps` colors from near-white through `base` to near-black.
///
/// Lightness is interpolated piecewise-linearly: the first half runs from
/// the light end to the base lightness (reached at the midpoint position),
/// the second half from the base lightness to the dark end.
///
/// # Errors
/// [`ColorError::InvalidArgument`] when `steps` is outside
/// `[2, MAX_RAMP_STEPS]`.
#[allow(clippy::cast_precision_loss)]
pub fn tints_and_shades(base: Color, steps: usize) -> Result<Vec<Color>> {
    if !(2..=MAX_RAMP_STEPS).contains(&steps) {
        return Err(ColorError::InvalidArgument(format!(
            "tonal ramp needs 2 to {MAX_RAMP_STEPS} steps, got {steps}"
        )));
    }

    let hsl = base.to_hsl();
    let light = TINT_LIGHTNESS.max(hsl.l);
    let dark = SHADE_LIGHTNESS.min(hsl.l);
    let last = (steps - 1) as f64;
    let mid = last / 2.0;

    Ok((0..steps)
        .map(|i| {
            let i = i as f64;
            let l = if i <= mid {
                light + (hsl.l - light) * (i / mid)
            } else {
                hsl.l + (dark - hsl.l) * ((i - mid) / (last - mid))
            };
            Hsl::new(hsl.h, hsl.s, l).to_color()
        })
        .collect())
}

/// Eleven shades labelled 50 through 950, lightest first.
///
/// `base` is placed verbatim at the checkpoint whose target lightness is
/// closest to its own. Lighter checkpoints are spread between the base and
/// `max(97, L)`, darker ones between the base and `min(12, L)`, in
/// proportion to the spacing of the checkpoint targets.
pub fn shade_scale(base: Color) -> [Shade; 11] {
    let hsl = base.to_hsl();
    let anchor = closest_checkpoint(hsl.l);
    let anchor_target = SHADE_TARGETS[anchor];

    let lightest = SHADE_TARGETS[0].max(hsl.l);
    let darkest = SHADE_TARGETS[10].min(hsl.l);

    let mut scale = [Shade { label: 0, color: base }; 11];
    for (i, shade) in scale.iter_mut().enumerate() {
        let target = SHADE_TARGETS[i];
        let color = if i == anchor {
            base
        } else {
            let l = if i < anchor {
                let span = SHADE_TARGETS[0] - anchor_target;
                hsl.l + (target - anchor_target) / span * (lightest - hsl.l)
            } else {
                let span = anchor_target - SHADE_TARGETS[10];
                hsl.l - (anchor_target - target) / span * (hsl.l - darkest)
            };
            Hsl::new(hsl.h, hsl.s, l).to_color()
        };
        *shade = Shade {
            label: SHADE_LABELS[i],
            color,
        };
    }
    scale
}

fn closest_checkpoint(lightness: f64) -> usize {
    SHADE_TARGETS
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            (lightness - **a)
                .abs()
                .total_cmp(&(lightness - **b).abs())
        })
        .map_or(5, |(i, _)| i)
}
