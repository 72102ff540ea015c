//! Engine configuration
//!
//! Tunables that the plotting engine treats as defaults rather than
//! contracts: smoothing aggressiveness, scatter opacity thresholds, curve
//! sample counts and the colour palette. Stored as JSON next to the binary.

use crate::constants;
use crate::error::Result;
use crate::palette::Palette;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Bucket count selection for the smoothing engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    /// Edge count grows as `N^exponent / divisor`
    pub exponent: f64,
    pub divisor: f64,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            exponent: constants::smoothing::DEFAULT_EXPONENT,
            divisor: constants::smoothing::DEFAULT_DIVISOR,
        }
    }
}

impl SmoothingConfig {
    /// Number of bucket edges for `points` input points
    pub fn edge_count(&self, points: usize) -> usize {
        let edges = ((points as f64).powf(self.exponent) / self.divisor).round();
        if edges.is_finite() && edges >= constants::smoothing::MIN_EDGES as f64 {
            edges as usize
        } else {
            constants::smoothing::MIN_EDGES
        }
    }
}

/// Marker opacity heuristic for dense scatter plots
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterConfig {
    pub dense_threshold: usize,
    pub very_dense_threshold: usize,
    pub dense_alpha: f32,
    pub very_dense_alpha: f32,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            dense_threshold: constants::scatter::DENSE_THRESHOLD,
            very_dense_threshold: constants::scatter::VERY_DENSE_THRESHOLD,
            dense_alpha: constants::scatter::DENSE_ALPHA,
            very_dense_alpha: constants::scatter::VERY_DENSE_ALPHA,
        }
    }
}

impl ScatterConfig {
    /// Opacity for a scatter of `points` markers
    pub fn alpha_for(&self, points: usize) -> f32 {
        if points > self.very_dense_threshold {
            self.very_dense_alpha
        } else if points > self.dense_threshold {
            self.dense_alpha
        } else {
            1.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub smoothing: SmoothingConfig,
    pub scatter: ScatterConfig,
    pub model_samples: usize,
    pub polar_fit_samples: usize,
    pub palette: Palette,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            smoothing: SmoothingConfig::default(),
            scatter: ScatterConfig::default(),
            model_samples: constants::plot::MODEL_SAMPLES,
            polar_fit_samples: constants::plot::POLAR_FIT_SAMPLES,
            palette: Palette::default(),
        }
    }
}

impl EngineConfig {
    /// Load from `path`, falling back to defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_count() {
        let config = SmoothingConfig::default();
        // 1000^(2/3) = 100, / 1.6 = 62.5 -> 63
        assert_eq!(config.edge_count(1000), 63);
        assert_eq!(config.edge_count(1), 2);
        assert_eq!(config.edge_count(0), 2);
    }

    #[test]
    fn test_alpha_thresholds() {
        let config = ScatterConfig::default();
        assert_eq!(config.alpha_for(10), 1.0);
        assert_eq!(config.alpha_for(50), 1.0);
        assert_eq!(config.alpha_for(51), 0.7);
        assert_eq!(config.alpha_for(301), 0.15);
    }

    #[test]
    fn test_round_trip_and_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(constants::config::CONFIG_FILE);

        assert_eq!(EngineConfig::load_or_default(&path).unwrap(), EngineConfig::default());

        let mut config = EngineConfig::default();
        config.smoothing.exponent = 7.0 / 8.0;
        config.scatter.dense_threshold = 80;
        config.save(&path).unwrap();

        let loaded = EngineConfig::load_or_default(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.json");
        std::fs::write(&path, r#"{"model_samples": 500}"#).unwrap();

        let loaded = EngineConfig::load_or_default(&path).unwrap();
        assert_eq!(loaded.model_samples, 500);
        assert_eq!(loaded.smoothing, SmoothingConfig::default());
    }

    #[test]
    fn test_malformed_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(EngineConfig::load_or_default(&path).is_err());
    }
}
