//! Coach configuration.
//!
//! Loaded from `sage.toml`; every field has a default so a missing or
//! partial file still yields a working coach.

use crate::matcher::DEFAULT_MIN_CONFIDENCE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "sage.toml";

fn default_nutrition_path() -> PathBuf {
    PathBuf::from("data/nutrition_storage.json")
}

fn default_min_confidence() -> u32 {
    DEFAULT_MIN_CONFIDENCE
}

fn default_max_recipes() -> usize {
    3
}

fn default_search_enabled() -> bool {
    true
}

fn default_search_endpoint() -> String {
    "http://www.recipepuppy.com/api/".to_string()
}

fn default_search_timeout() -> u64 {
    10
}

fn default_search_max_results() -> usize {
    4
}

/// External recipe-search settings. The call is best-effort; disabling
/// it skips the network entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_search_enabled")]
    pub enabled: bool,

    #[serde(default = "default_search_endpoint")]
    pub endpoint: String,

    /// Hard bound on the whole request; no retries on expiry.
    #[serde(default = "default_search_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_search_max_results")]
    pub max_results: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            enabled: default_search_enabled(),
            endpoint: default_search_endpoint(),
            timeout_secs: default_search_timeout(),
            max_results: default_search_max_results(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachConfig {
    /// Nutrition/storage dataset. A missing file loads an empty table.
    #[serde(default = "default_nutrition_path")]
    pub nutrition_data_path: PathBuf,

    /// Confidence floor for fuzzy table lookups and recipe comparison.
    #[serde(default = "default_min_confidence")]
    pub min_confidence: u32,

    /// How many ranked recipes a chat reply carries.
    #[serde(default = "default_max_recipes")]
    pub max_recipes: usize,

    /// Pin the randomness seed for reproducible replies.
    #[serde(default)]
    pub rng_seed: Option<u64>,

    #[serde(default)]
    pub search: SearchSettings,
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            nutrition_data_path: default_nutrition_path(),
            min_confidence: default_min_confidence(),
            max_recipes: default_max_recipes(),
            rng_seed: None,
            search: SearchSettings::default(),
        }
    }
}

impl CoachConfig {
    /// Load from a TOML file, falling back to defaults when the file is
    /// absent or malformed. Never fails: a bad config degrades, it does
    /// not stop the coach.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Invalid config {}: {e}; using defaults", path.display());
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Load from `sage.toml` in the working directory.
    pub fn load_default() -> Self {
        Self::load(Path::new(CONFIG_FILE))
    }
}
