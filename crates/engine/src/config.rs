use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrimError};

/// Host-facing settings for one trim viewer.
///
/// The viewer height doubles as the thumbnail cell size. Circle sizes and
/// `show_duration` only matter to whoever paints the strip.
///
/// # Example
/// ```
/// use trim_engine::TrimConfig;
///
/// let config = TrimConfig::from_json_str(r#"{ "viewer_width_px": 320.0 }"#)
///     .expect("config should parse");
/// assert_eq!(config.viewer_height_px, 50.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrimConfig {
    pub viewer_width_px: f64,
    pub viewer_height_px: f64,
    pub circle_size: f64,
    pub circle_size_on_drag: f64,
    pub thumbnail_quality: u8,
    pub show_duration: bool,
    pub initial_end_ms: Option<u64>,
}

impl Default for TrimConfig {
    fn default() -> Self {
        Self {
            viewer_width_px: 360.0,
            viewer_height_px: 50.0,
            circle_size: 5.0,
            circle_size_on_drag: 8.0,
            thumbnail_quality: 75,
            show_duration: true,
            initial_end_ms: None,
        }
    }
}

impl TrimConfig {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)
            .map_err(|source| TrimError::ConfigSerialization { path: None, source })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| TrimError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self =
            serde_json::from_str(&raw).map_err(|source| TrimError::ConfigSerialization {
                path: Some(path.to_path_buf()),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values no viewer can use. Geometry is checked separately
    /// when a session starts.
    pub fn validate(&self) -> Result<()> {
        let sizes = [
            ("viewer_width_px", self.viewer_width_px),
            ("viewer_height_px", self.viewer_height_px),
            ("circle_size", self.circle_size),
            ("circle_size_on_drag", self.circle_size_on_drag),
        ];
        for (name, value) in sizes {
            if !value.is_finite() {
                return Err(TrimError::InvalidConfig {
                    reason: format!("{name} must be finite, got {value}"),
                });
            }
        }

        if !(1..=100).contains(&self.thumbnail_quality) {
            return Err(TrimError::InvalidConfig {
                reason: format!(
                    "thumbnail_quality must be within 1..=100, got {}",
                    self.thumbnail_quality
                ),
            });
        }

        if self.initial_end_ms == Some(0) {
            return Err(TrimError::InvalidConfig {
                reason: "initial_end_ms must be positive".to_string(),
            });
        }

        Ok(())
    }
}
