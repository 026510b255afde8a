// src/config.rs

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Display/overlay tuning. Everything has a sensible default, so the
/// config file is optional and may be partial.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub display: DisplayConfig,
    pub overlay: OverlayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub window_title: String,
    /// Frames are scaled down to this width before processing.
    pub target_width: i32,
    /// Settle time for live camera exposure before the first frame.
    pub camera_warmup_ms: u64,
    pub poll_timeout_ms: i32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            window_title: "Frame".to_string(),
            target_width: 500,
            camera_warmup_ms: 1000,
            poll_timeout_ms: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub box_thickness: i32,
    pub font_scale: f64,
    pub line_spacing: i32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            box_thickness: 2,
            font_scale: 0.6,
            line_spacing: 20,
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: AppConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("malformed config {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_loop() {
        let config = AppConfig::default();
        assert_eq!(config.display.target_width, 500);
        assert_eq!(config.display.window_title, "Frame");
        assert_eq!(config.overlay.box_thickness, 2);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: AppConfig = serde_yaml::from_str("display:\n  target_width: 640\n").unwrap();
        assert_eq!(config.display.target_width, 640);
        assert_eq!(config.display.window_title, "Frame");
        assert_eq!(config.overlay.line_spacing, 20);
    }
}
