//! Preview window configuration, persisted as JSON.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Settings for the SDL preview: emulated panel dimensions, integer
/// window scale, and the initial rotation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewConfig {
    pub width: i16,
    pub height: i16,
    #[serde(default = "default_scale")]
    pub scale: u32,
    #[serde(default)]
    pub rotation: u8,
}

fn default_scale() -> u32 {
    2
}

impl PreviewConfig {
    /// Save configuration to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), String> {
        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(path, json).map_err(|e| e.to_string())
    }

    /// Load configuration from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let json = fs::read_to_string(path).map_err(|e| e.to_string())?;
        serde_json::from_str(&json).map_err(|e| e.to_string())
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            width: 320,
            height: 240,
            scale: default_scale(),
            rotation: 0,
        }
    }
}
