//! Configuration management for churnd.
//!
//! Loads settings from /etc/churnd/config.toml or uses defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Config file path
pub const CONFIG_PATH: &str = "/etc/churnd/config.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChurndConfig {
    /// Address the HTTP server binds to
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Path to the serialized model artifact
    #[serde(default = "default_model_path")]
    pub model_path: String,
}

fn default_bind_addr() -> String {
    // Localhost only; fronting infrastructure handles exposure.
    "127.0.0.1:8000".to_string()
}

fn default_model_path() -> String {
    "/var/lib/churnd/model.json".to_string()
}

impl Default for ChurndConfig {
    fn default() -> Self {
        ChurndConfig {
            bind_addr: default_bind_addr(),
            model_path: default_model_path(),
        }
    }
}

impl ChurndConfig {
    /// Load from the standard path, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_PATH))
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    warn!("Invalid config at {}: {} - using defaults", path.display(), e);
                    ChurndConfig::default()
                }
            },
            Err(_) => {
                warn!("No config at {} - using defaults", path.display());
                ChurndConfig::default()
            }
        }
    }
}
