//! Viewer configuration read from the environment.

use std::env;
use std::path::PathBuf;

use crate::types::{RenderMode, CHUNK_SIZE, TREES_PER_CHUNK};

/// Default tree model, relative to the working directory.
pub const DEFAULT_MODEL_PATH: &str = "models/pine_tree.json";

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub model_path: PathBuf,
    pub trees: usize,
    pub area_size: f32,
    /// `None` seeds from OS entropy.
    pub seed: Option<u64>,
    pub mode: RenderMode,
    pub log_path: Option<PathBuf>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            trees: TREES_PER_CHUNK,
            area_size: CHUNK_SIZE,
            seed: None,
            mode: RenderMode::default(),
            log_path: None,
        }
    }
}

impl ViewerConfig {
    /// Read `ASCII_GROVE_*` variables. Missing or unparsable values fall back
    /// to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ViewerConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) })
        };

        let model_path = non_empty("ASCII_GROVE_MODEL_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.model_path);

        let trees = non_empty("ASCII_GROVE_TREES")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.trees);

        let area_size = non_empty("ASCII_GROVE_AREA")
            .and_then(|s| s.parse::<f32>().ok())
            .filter(|a| a.is_finite() && *a > 0.0)
            .unwrap_or(defaults.area_size);

        let seed = non_empty("ASCII_GROVE_SEED").and_then(|s| s.parse().ok());

        let mode = non_empty("ASCII_GROVE_MODE")
            .and_then(|s| RenderMode::from_str(&s))
            .unwrap_or(defaults.mode);

        let log_path = non_empty("ASCII_GROVE_LOG_PATH").map(PathBuf::from);

        Self {
            model_path,
            trees,
            area_size,
            seed,
            mode,
            log_path,
        }
    }
}
