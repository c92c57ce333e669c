//! Presentation-side state: the current palette, its undo history and the
//! generator settings, plus request dispatch into the engine.

use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;

use chromakit_core::accessibility::{best_text_color, contrast_report, simulate, suggest_accessible};
use chromakit_core::color::{ColorValue, parse_color};
use chromakit_core::extraction::{Extraction, KMeansConfig, downsample, extract_with};
use chromakit_core::generation::{GeneratorConfig, Palette, PaletteHistory, Swatch, generate};
use chromakit_core::harmony::{harmonies, shade_scale, tints_and_shades};
use chromakit_core::matching::nearest_n;
use chromakit_core::Color;

use crate::config::BridgeConfig;
use crate::error::BridgeError;
use crate::image_loader;
use crate::ipc::{CatalogMatch, EngineToUi, UiToEngine};

pub struct Session {
    history: PaletteHistory,
    generator: GeneratorConfig,
    config: BridgeConfig,
    rng: StdRng,
}

impl Session {
    /// Start a session with an OS-seeded RNG and a freshly generated palette.
    pub fn new(config: BridgeConfig) -> Result<Self, BridgeError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    pub fn with_rng(config: BridgeConfig, mut rng: StdRng) -> Result<Self, BridgeError> {
        let generator = GeneratorConfig::default();
        let initial = Palette::generate(config.palette_size, &generator, &mut rng)?;
        Ok(Self {
            history: PaletteHistory::with_capacity(initial, config.history_limit),
            generator,
            config,
            rng,
        })
    }

    pub fn palette(&self) -> &Palette {
        self.history.current()
    }

    /// Parse one line of JSON and answer it. Never fails; problems become
    /// [`EngineToUi::Error`].
    pub fn handle_line(&mut self, line: &str) -> EngineToUi {
        match serde_json::from_str::<UiToEngine>(line) {
            Ok(msg) => self.handle(msg),
            Err(e) => {
                tracing::warn!("Failed to parse UI message: {e}");
                error_response(&BridgeError::Json(e))
            }
        }
    }

    pub fn handle(&mut self, msg: UiToEngine) -> EngineToUi {
        match self.dispatch(msg) {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Request failed: {e}");
                error_response(&e)
            }
        }
    }

    fn dispatch(&mut self, msg: UiToEngine) -> Result<EngineToUi, BridgeError> {
        let response = match msg {
            UiToEngine::Convert { color, format } => {
                let value = ColorValue::from_color(parse_color(&color)?, format);
                EngineToUi::Converted {
                    text: value.to_string(),
                    value,
                }
            }
            UiToEngine::Generate { count, config } => {
                if let Some(config) = config {
                    self.generator = config;
                }
                self.regenerate(count)?;
                self.palette_response()
            }
            UiToEngine::Undo => {
                if self.history.undo().is_none() {
                    tracing::debug!("Nothing to undo");
                }
                self.palette_response()
            }
            UiToEngine::Redo => {
                if self.history.redo().is_none() {
                    tracing::debug!("Nothing to redo");
                }
                self.palette_response()
            }
            UiToEngine::ToggleLock { index } => {
                let mut palette = self.history.current().clone();
                palette.toggle_lock(index)?;
                self.history.record(palette);
                self.palette_response()
            }
            UiToEngine::Harmonies { color } => EngineToUi::Harmonies {
                set: harmonies(color),
            },
            UiToEngine::TintsAndShades { color, steps } => EngineToUi::Colors {
                colors: tints_and_shades(color, steps)?,
            },
            UiToEngine::ShadeScale { color } => EngineToUi::ShadeScale {
                shades: shade_scale(color).to_vec(),
            },
            UiToEngine::Contrast {
                foreground,
                background,
            } => EngineToUi::Contrast {
                report: contrast_report(foreground, background),
                best_text: best_text_color(background),
            },
            UiToEngine::SuggestAccessible {
                foreground,
                background,
                target,
                strict,
            } => {
                let suggestion = suggest_accessible(foreground, background, target)?;
                if strict {
                    suggestion.into_result()?;
                }
                EngineToUi::Suggestion { suggestion }
            }
            UiToEngine::Simulate { colors, deficiency } => EngineToUi::Colors {
                colors: colors.into_iter().map(|c| simulate(c, deficiency)).collect(),
            },
            UiToEngine::ExtractFromFile {
                path,
                count,
                config,
                strict,
            } => {
                let pixels = image_loader::load_pixels(
                    Path::new(&path),
                    self.config.max_samples,
                    self.config.min_alpha,
                )?;
                EngineToUi::Extraction {
                    extraction: self.extract(&pixels, count, config, strict)?,
                }
            }
            UiToEngine::ExtractFromPixels {
                pixels,
                count,
                config,
                strict,
            } => {
                let pixels = downsample(&pixels, self.config.max_samples);
                EngineToUi::Extraction {
                    extraction: self.extract(&pixels, count, config, strict)?,
                }
            }
            UiToEngine::Nearest {
                color,
                catalog,
                count,
                metric,
            } => EngineToUi::Matches {
                matches: nearest_n(color, &catalog, count, metric)?
                    .into_iter()
                    .map(|m| CatalogMatch {
                        name: m.entry.name.clone(),
                        color: m.entry.color,
                        distance: m.distance,
                    })
                    .collect(),
            },
        };
        Ok(response)
    }

    /// Regenerate unlocked swatches, optionally resizing, and record the
    /// result. Locks survive for positions that still exist.
    fn regenerate(&mut self, count: Option<usize>) -> Result<(), BridgeError> {
        let current = self.history.current();
        let count = count.unwrap_or(current.len());
        let colors = generate(count, &current.slots(), &self.generator, &mut self.rng)?;
        let swatches: Vec<Swatch> = colors
            .into_iter()
            .enumerate()
            .map(|(i, color)| Swatch {
                color,
                locked: current.swatches().get(i).is_some_and(|s| s.locked),
            })
            .collect();
        let palette = Palette::from_swatches(swatches)?;
        tracing::debug!("Generated palette of {} swatches", palette.len());
        self.history.record(palette);
        Ok(())
    }

    fn extract(
        &mut self,
        pixels: &[Color],
        count: usize,
        config: Option<KMeansConfig>,
        strict: bool,
    ) -> Result<Extraction, BridgeError> {
        let config = config.unwrap_or_default();
        let extraction = extract_with(pixels, count, &config, &mut self.rng)?;
        if strict {
            Ok(extraction.require_complete()?)
        } else {
            Ok(extraction)
        }
    }

    fn palette_response(&self) -> EngineToUi {
        EngineToUi::Palette {
            swatches: self.history.current().swatches().to_vec(),
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
        }
    }
}

fn error_response(e: &BridgeError) -> EngineToUi {
    EngineToUi::Error {
        message: e.to_string(),
    }
}
