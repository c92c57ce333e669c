//! Runtime configuration for the bridge, read from the environment.

use chromakit_core::generation::history::DEFAULT_HISTORY_CAPACITY;
use chromakit_core::generation::{MAX_PALETTE_LEN, MIN_PALETTE_LEN};

/// Default cap on pixels handed to k-means.
const DEFAULT_MAX_SAMPLES: usize = 4096;
/// Default palette length at startup.
const DEFAULT_PALETTE_SIZE: usize = 5;
/// Pixels with alpha below this are ignored during extraction.
const DEFAULT_MIN_ALPHA: u8 = 128;

/// Runtime configuration for the Chromakit bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Palette snapshots kept for undo (`CHROMAKIT_HISTORY_LIMIT`).
    pub history_limit: usize,
    /// Samples kept after downsampling an image (`CHROMAKIT_MAX_SAMPLES`).
    pub max_samples: usize,
    /// Length of the startup palette (`CHROMAKIT_PALETTE_SIZE`), clamped to 2–10.
    pub palette_size: usize,
    /// Alpha cutoff for extraction (`CHROMAKIT_MIN_ALPHA`).
    pub min_alpha: u8,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

impl BridgeConfig {
    /// Build a config from an arbitrary key lookup. Unparseable values fall
    /// back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        fn parsed<T: std::str::FromStr>(
            lookup: &impl Fn(&str) -> Option<String>,
            key: &str,
            default: T,
        ) -> T {
            lookup(key)
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(default)
        }

        Self {
            history_limit: parsed(&lookup, "CHROMAKIT_HISTORY_LIMIT", DEFAULT_HISTORY_CAPACITY).max(1),
            max_samples: parsed(&lookup, "CHROMAKIT_MAX_SAMPLES", DEFAULT_MAX_SAMPLES).max(1),
            palette_size: parsed(&lookup, "CHROMAKIT_PALETTE_SIZE", DEFAULT_PALETTE_SIZE)
                .clamp(MIN_PALETTE_LEN, MAX_PALETTE_LEN),
            min_alpha: parsed(&lookup, "CHROMAKIT_MIN_ALPHA", DEFAULT_MIN_ALPHA),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let config = BridgeConfig::from_lookup(|_| None);
        assert_eq!(config.history_limit, 100);
        assert_eq!(config.max_samples, 4096);
        assert_eq!(config.palette_size, 5);
        assert_eq!(config.min_alpha, 128);
    }

    #[test]
    fn test_values_are_parsed_and_clamped() {
        let config = BridgeConfig::from_lookup(|key| match key {
            "CHROMAKIT_HISTORY_LIMIT" => Some("0".into()),
            "CHROMAKIT_MAX_SAMPLES" => Some(" 512 ".into()),
            "CHROMAKIT_PALETTE_SIZE" => Some("42".into()),
            "CHROMAKIT_MIN_ALPHA" => Some("not a number".into()),
            _ => None,
        });
        assert_eq!(config.history_limit, 1);
        assert_eq!(config.max_samples, 512);
        assert_eq!(config.palette_size, 10);
        assert_eq!(config.min_alpha, 128);
    }
}
