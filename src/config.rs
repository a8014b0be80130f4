use serde::{ Deserialize, Serialize };
use std::fs;
use std::path::{ Path, PathBuf };

use crate::implementations::config::{ ConfigError, GeminiConfig };
use crate::models::common::{ Backend, ModelVariant };

/// Configuration for the Flipper system
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlipperConfig {
    /// JSON file backing the key-value store
    pub storage_path: PathBuf,
    /// Live Gemini calls or the offline mock
    pub backend: Backend,
    /// Model used until the user picks another
    pub default_model: ModelVariant,
    /// Artificial latency of the mock backend, in milliseconds
    pub mock_delay_ms: u64,
    pub gemini: GeminiConfig,
}

impl Default for FlipperConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from(".flipper").join("storage.json"),
            backend: Backend::default(),
            default_model: ModelVariant::default(),
            mock_delay_ms: 1000,
            gemini: GeminiConfig::default(),
        }
    }
}

impl FlipperConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: FlipperConfig = serde_yaml::from_str(&contents)?;
        Ok(config)
    }
}
