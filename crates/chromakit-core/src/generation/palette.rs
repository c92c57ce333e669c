//! Ordered palettes of 2–10 swatches with per-swatch locks.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::generator::{GeneratorConfig, generate};
use crate::color::Color;
use crate::error::{ColorError, Result};

/// Smallest palette the engine accepts.
pub const MIN_PALETTE_LEN: usize = 2;
/// Largest palette the engine accepts.
pub const MAX_PALETTE_LEN: usize = 10;

/// Generator input for one position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "color", rename_all = "lowercase")]
pub enum Slot {
    /// Echoed unchanged by the generator.
    Fixed(Color),
    /// Receives a freshly generated color.
    Free,
}

impl Slot {
    pub fn fixed(&self) -> Option<Color> {
        match *self {
            Self::Fixed(c) => Some(c),
            Self::Free => None,
        }
    }
}

/// One palette position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swatch {
    pub color: Color,
    #[serde(default)]
    pub locked: bool,
}

impl Swatch {
    pub const fn new(color: Color) -> Self {
        Self { color, locked: false }
    }

    pub fn slot(&self) -> Slot {
        if self.locked { Slot::Fixed(self.color) } else { Slot::Free }
    }
}

/// An ordered palette. Position conveys role (primary, accent, ...).
///
/// Invariant: `MIN_PALETTE_LEN <= len <= MAX_PALETTE_LEN`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Swatch>", into = "Vec<Swatch>")]
pub struct Palette {
    swatches: Vec<Swatch>,
}

impl Palette {
    /// Build an unlocked palette from colors.
    ///
    /// # Errors
    /// [`ColorError::InvalidArgument`] when the length is outside `[2, 10]`.
    pub fn new(colors: impl IntoIterator<Item = Color>) -> Result<Self> {
        Self::from_swatches(colors.into_iter().map(Swatch::new).collect())
    }

    /// # Errors
    /// [`ColorError::InvalidArgument`] when the length is outside `[2, 10]`.
    pub fn from_swatches(swatches: Vec<Swatch>) -> Result<Self> {
        check_len(swatches.len())?;
        Ok(Self { swatches })
    }

    /// Generate a fresh palette of `count` colors.
    ///
    /// # Errors
    /// [`ColorError::InvalidArgument`] when `count` is outside `[2, 10]`.
    pub fn generate<R: Rng + ?Sized>(count: usize, config: &GeneratorConfig, rng: &mut R) -> Result<Self> {
        Self::new(generate(count, &[], config, rng)?)
    }

    pub fn swatches(&self) -> &[Swatch] {
        &self.swatches
    }

    pub fn colors(&self) -> Vec<Color> {
        self.swatches.iter().map(|s| s.color).collect()
    }

    pub fn slots(&self) -> Vec<Slot> {
        self.swatches.iter().map(Swatch::slot).collect()
    }

    pub fn len(&self) -> usize {
        self.swatches.len()
    }

    /// Always `false`; a palette holds at least two swatches.
    pub fn is_empty(&self) -> bool {
        self.swatches.is_empty()
    }

    /// # Errors
    /// [`ColorError::InvalidArgument`] for an out-of-range index.
    pub fn get(&self, index: usize) -> Result<&Swatch> {
        self.swatches.get(index).ok_or_else(|| bad_index(index, self.len()))
    }

    /// # Errors
    /// [`ColorError::InvalidArgument`] for an out-of-range index.
    pub fn set_locked(&mut self, index: usize, locked: bool) -> Result<()> {
        self.swatch_mut(index)?.locked = locked;
        Ok(())
    }

    /// Flip the lock on `index`, returning the new state.
    ///
    /// # Errors
    /// [`ColorError::InvalidArgument`] for an out-of-range index.
    pub fn toggle_lock(&mut self, index: usize) -> Result<bool> {
        let swatch = self.swatch_mut(index)?;
        swatch.locked = !swatch.locked;
        Ok(swatch.locked)
    }

    /// Replace a swatch's color. Explicit edits apply to locked swatches too.
    ///
    /// # Errors
    /// [`ColorError::InvalidArgument`] for an out-of-range index.
    pub fn set_color(&mut self, index: usize, color: Color) -> Result<()> {
        self.swatch_mut(index)?.color = color;
        Ok(())
    }

    /// Append an unlocked swatch.
    ///
    /// # Errors
    /// [`ColorError::InvalidArgument`] when the palette is already full.
    pub fn push(&mut self, color: Color) -> Result<()> {
        check_len(self.len() + 1)?;
        self.swatches.push(Swatch::new(color));
        Ok(())
    }

    /// Remove and return the swatch at `index`.
    ///
    /// # Errors
    /// [`ColorError::InvalidArgument`] for an out-of-range index or when the
    /// palette would drop below two swatches.
    pub fn remove(&mut self, index: usize) -> Result<Swatch> {
        self.get(index)?;
        check_len(self.len() - 1)?;
        Ok(self.swatches.remove(index))
    }

    /// Move the swatch at `from` so it ends up at `to`.
    ///
    /// # Errors
    /// [`ColorError::InvalidArgument`] for an out-of-range index.
    pub fn move_swatch(&mut self, from: usize, to: usize) -> Result<()> {
        self.get(from)?;
        self.get(to)?;
        let swatch = self.swatches.remove(from);
        self.swatches.insert(to, swatch);
        Ok(())
    }

    /// Regenerate every unlocked swatch; locked ones keep their color.
    pub fn regenerate<R: Rng + ?Sized>(&mut self, config: &GeneratorConfig, rng: &mut R) {
        let slots = self.slots();
        // Length is within bounds by construction, so generation cannot fail.
        let Ok(colors) = generate(self.len(), &slots, config, rng) else {
            return;
        };
        for (swatch, color) in self.swatches.iter_mut().zip(colors) {
            if !swatch.locked {
                swatch.color = color;
            }
        }
    }

    fn swatch_mut(&mut self, index: usize) -> Result<&mut Swatch> {
        let len = self.len();
        self.swatches.get_mut(index).ok_or_else(|| bad_index(index, len))
    }
}

impl TryFrom<Vec<Swatch>> for Palette {
    type Error = ColorError;

    fn try_from(swatches: Vec<Swatch>) -> Result<Self> {
        Self::from_swatches(swatches)
    }
}

impl From<Palette> for Vec<Swatch> {
    fn from(p: Palette) -> Self {
        p.swatches
    }
}

fn check_len(len: usize) -> Result<()> {
    if (MIN_PALETTE_LEN..=MAX_PALETTE_LEN).contains(&len) {
        Ok(())
    } else {
        Err(ColorError::InvalidArgument(format!(
            "palette length {len} outside [{MIN_PALETTE_LEN}, {MAX_PALETTE_LEN}]"
        )))
    }
}

fn bad_index(index: usize, len: usize) -> ColorError {
    ColorError::InvalidArgument(format!("swatch index {index} out of range for {len} swatches"))
}
