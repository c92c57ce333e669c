//! Palette generation — locked slots, randomized strategies, and undo history.

pub mod generator;
pub mod history;
pub mod palette;

pub use generator::{GeneratorConfig, Strategy, generate, generate_random};
pub use history::PaletteHistory;
pub use palette::{MAX_PALETTE_LEN, MIN_PALETTE_LEN, Palette, Slot, Swatch};
