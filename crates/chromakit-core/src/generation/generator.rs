//! Randomized palette generation with locked slots.
//!
//! Every free slot is drawn inside a "pleasant" saturation/lightness band so
//! generated palettes avoid near-white, near-black and near-gray swatches.
//! The band is only bypassed by [`Strategy::PureRandom`] when every slot is
//! free.
//!
//! The random source is injected, so a seeded RNG makes generation
//! reproducible while [`generate_random`] keeps the usual "regenerate"
//! behavior.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::palette::{MAX_PALETTE_LEN, MIN_PALETTE_LEN, Slot};
use crate::color::{Color, Hsl, wrap_hue};
use crate::error::{ColorError, Result};

/// Redraw budget for a free slot that collides with an existing color.
const MAX_REDRAWS: usize = 8;

/// How free slots are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Random hue, saturation and lightness inside the band.
    #[default]
    Pleasant,
    /// Uniform over all 2^24 colors. Only honored when nothing is locked.
    PureRandom,
    /// Hues within ±30° of the base hue.
    Analogous,
    /// Base hue with lightness spread across the band.
    Monochromatic,
    /// Alternating base and opposite hue.
    Complementary,
    /// Base hue and its two 120° rotations.
    Triadic,
}

/// Generator settings. Deserializes with defaults for missing fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub strategy: Strategy,
    /// Saturation band `[min, max]` in percent.
    pub saturation: [f64; 2],
    /// Lightness band `[min, max]` in percent.
    pub lightness: [f64; 2],
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Pleasant,
            saturation: [45.0, 90.0],
            lightness: [30.0, 75.0],
        }
    }
}

impl GeneratorConfig {
    pub fn with_strategy(strategy: Strategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }
}

/// Generate `count` colors, echoing every [`Slot::Fixed`] entry.
///
/// Entries of `locked` beyond `count` are ignored; missing entries are
/// treated as [`Slot::Free`].
///
/// # Errors
/// [`ColorError::InvalidArgument`] when `count` is outside `[2, 10]`.
pub fn generate<R: Rng + ?Sized>(
    count: usize,
    locked: &[Slot],
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<Vec<Color>> {
    if !(MIN_PALETTE_LEN..=MAX_PALETTE_LEN).contains(&count) {
        return Err(ColorError::InvalidArgument(format!(
            "palette size {count} outside [{MIN_PALETTE_LEN}, {MAX_PALETTE_LEN}]"
        )));
    }

    let slots: Vec<Slot> = (0..count)
        .map(|i| locked.get(i).copied().unwrap_or(Slot::Free))
        .collect();
    let fixed: Vec<Color> = slots.iter().filter_map(Slot::fixed).collect();

    let strategy = match config.strategy {
        Strategy::PureRandom if !fixed.is_empty() => Strategy::Pleasant,
        s => s,
    };
    let base_hue = fixed
        .first()
        .map_or_else(|| rng.gen_range(0.0..360.0), |c| c.to_hsl().h);

    let draw = Draw {
        strategy,
        base_hue,
        saturation: band(config.saturation),
        lightness: band(config.lightness),
        free_total: count - fixed.len(),
    };

    let mut colors = Vec::with_capacity(count);
    let mut ordinal = 0;
    for slot in &slots {
        let color = match *slot {
            Slot::Fixed(c) => c,
            Slot::Free => {
                let mut candidate = draw.sample(ordinal, rng);
                for _ in 0..MAX_REDRAWS {
                    if !colors.contains(&candidate) && !fixed.contains(&candidate) {
                        break;
                    }
                    candidate = draw.sample(ordinal, rng);
                }
                ordinal += 1;
                candidate
            }
        };
        colors.push(color);
    }

    tracing::debug!(
        "generated {} colors ({} fixed) with {:?}",
        count,
        fixed.len(),
        strategy
    );
    Ok(colors)
}

/// [`generate`] with the thread-local RNG.
///
/// # Errors
/// [`ColorError::InvalidArgument`] when `count` is outside `[2, 10]`.
pub fn generate_random(count: usize, locked: &[Slot], config: &GeneratorConfig) -> Result<Vec<Color>> {
    generate(count, locked, config, &mut rand::thread_rng())
}

/// Per-call sampling parameters shared by every free slot.
struct Draw {
    strategy: Strategy,
    base_hue: f64,
    saturation: [f64; 2],
    lightness: [f64; 2],
    free_total: usize,
}

impl Draw {
    /// Sample a color for the `ordinal`-th free slot.
    #[allow(clippy::cast_precision_loss)]
    fn sample<R: Rng + ?Sized>(&self, ordinal: usize, rng: &mut R) -> Color {
        let jitter = rng.gen_range(-8.0..=8.0);
        let s = rng.gen_range(self.saturation[0]..=self.saturation[1]);
        let random_l = rng.gen_range(self.lightness[0]..=self.lightness[1]);

        // Lightness spread evenly across the band, one step per free slot.
        let position = (ordinal as f64 + 0.5) / self.free_total.max(1) as f64;
        let spread_l = self.lightness[0] + (self.lightness[1] - self.lightness[0]) * position;
        let spread_l = (spread_l + jitter * 0.5).clamp(self.lightness[0], self.lightness[1]);

        let (h, l) = match self.strategy {
            Strategy::PureRandom => return Color::new(rng.r#gen(), rng.r#gen(), rng.r#gen()),
            Strategy::Pleasant => (rng.gen_range(0.0..360.0), random_l),
            Strategy::Analogous => {
                let offset = if self.free_total > 1 {
                    -30.0 + 60.0 * ordinal as f64 / (self.free_total - 1) as f64
                } else {
                    30.0
                };
                (self.base_hue + offset + jitter * 0.5, spread_l)
            }
            Strategy::Monochromatic => (self.base_hue + jitter * 0.25, spread_l),
            Strategy::Complementary => {
                let offset = if ordinal % 2 == 0 { 180.0 } else { 0.0 };
                (self.base_hue + offset + jitter, spread_l)
            }
            Strategy::Triadic => {
                let offset = 120.0 * ((ordinal + 1) % 3) as f64;
                (self.base_hue + offset + jitter, random_l)
            }
        };

        Hsl::new(wrap_hue(h), s, l).to_color()
    }
}

/// Normalize a `[min, max]` percent band.
fn band(range: [f64; 2]) -> [f64; 2] {
    let clean = |v: f64| if v.is_nan() { 0.0 } else { v.clamp(0.0, 100.0) };
    let (a, b) = (clean(range[0]), clean(range[1]));
    [a.min(b), a.max(b)]
}
