use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use super::step::DEFAULT_THEME;
use crate::error::Result;
use crate::services::navigation::DEFAULT_RANGE;

/// Starting values for newly authored modules and navigation views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDefaults {
    #[serde(default)]
    pub title: String,

    #[serde(default = "default_min_score")]
    pub min_score: f64,

    #[serde(default = "default_estimated_time")]
    pub estimated_time: f64,

    #[serde(default = "default_allowed_attempts")]
    pub allowed_attempts: f64,

    /// Aspect ratio, `16_9` or `4_3`
    #[serde(default = "default_format")]
    pub format: String,

    #[serde(default = "default_theme")]
    pub theme: String,

    /// Width of the navigation window
    #[serde(default = "default_window_range")]
    pub window_range: usize,
}

fn default_min_score() -> f64 {
    60.0
}

fn default_estimated_time() -> f64 {
    30.0 // minutes
}

fn default_allowed_attempts() -> f64 {
    3.0
}

fn default_format() -> String {
    "16_9".to_string()
}

fn default_theme() -> String {
    DEFAULT_THEME.to_string()
}

fn default_window_range() -> usize {
    DEFAULT_RANGE
}

impl Default for ModelDefaults {
    fn default() -> Self {
        Self {
            title: String::new(),
            min_score: default_min_score(),
            estimated_time: default_estimated_time(),
            allowed_attempts: default_allowed_attempts(),
            format: default_format(),
            theme: default_theme(),
            window_range: default_window_range(),
        }
    }
}

impl ModelDefaults {
    /// Load defaults from the user config directory, falling back to built-ins.
    pub fn load() -> Self {
        Self::load_from(&Self::get_config_path())
    }

    /// Load defaults from `path`. A missing or unreadable file yields the built-ins.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(defaults) => defaults,
                Err(e) => {
                    warn!("Failed to parse {}: {}. Using defaults.", path.display(), e);
                    Self::default()
                }
            },
            // File doesn't exist, use defaults
            Err(_) => Self::default(),
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;

        Ok(())
    }

    /// Get config file path (cross-platform)
    pub fn get_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("klaus");
        path.push("defaults.json");
        path
    }
}
