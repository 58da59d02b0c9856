//! JSON configuration shared by the hosts.
//!
//! Every field has a default, so `{}` is a valid config file.
//!
//! ```json
//! {
//!   "display_duration_ms": 750,
//!   "easing": "ease_out_cubic",
//!   "overlay": { "outline_width": 2.0, "show_labels": true, "fill": true },
//!   "thresholds": { "warn_ms": 16, "error_ms": 33 }
//! }
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fade::Easing;
use crate::overlay::OverlayStyle;
use crate::registry::{DEFAULT_DISPLAY_DURATION, RegistryConfig};
use crate::severity::{ERROR_BUDGET, RenderThresholds, WARN_BUDGET};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("display_duration_ms must be greater than zero")]
    ZeroDisplayDuration,
    #[error("thresholds.warn_ms ({warn_ms}) must be below thresholds.error_ms ({error_ms})")]
    ThresholdOrder { warn_ms: u64, error_ms: u64 },
    #[error("overlay.outline_width must be a positive number, got {0}")]
    OutlineWidth(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThresholdConfig {
    pub warn_ms: u64,
    pub error_ms: u64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            warn_ms: duration_ms(WARN_BUDGET),
            error_ms: duration_ms(ERROR_BUDGET),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaintflashConfig {
    pub display_duration_ms: u64,
    pub easing: Easing,
    pub overlay: OverlayStyle,
    pub thresholds: ThresholdConfig,
}

impl Default for PaintflashConfig {
    fn default() -> Self {
        Self {
            display_duration_ms: duration_ms(DEFAULT_DISPLAY_DURATION),
            easing: Easing::default(),
            overlay: OverlayStyle::default(),
            thresholds: ThresholdConfig::default(),
        }
    }
}

impl PaintflashConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.display_duration_ms == 0 {
            return Err(ConfigError::ZeroDisplayDuration);
        }
        let ThresholdConfig { warn_ms, error_ms } = self.thresholds;
        if warn_ms >= error_ms {
            return Err(ConfigError::ThresholdOrder { warn_ms, error_ms });
        }
        let width = self.overlay.outline_width;
        if !width.is_finite() || width <= 0.0 {
            return Err(ConfigError::OutlineWidth(width));
        }
        Ok(())
    }

    pub fn display_duration(&self) -> Duration {
        Duration::from_millis(self.display_duration_ms)
    }

    pub fn registry_config(&self) -> RegistryConfig {
        RegistryConfig {
            display_duration: self.display_duration(),
            easing: self.easing,
        }
    }

    pub fn render_thresholds(&self) -> RenderThresholds {
        RenderThresholds {
            warn: Duration::from_millis(self.thresholds.warn_ms),
            error: Duration::from_millis(self.thresholds.error_ms),
        }
    }
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_all_defaults() {
        let config = PaintflashConfig::from_json("{}");
        assert!(matches!(config, Ok(ref c) if *c == PaintflashConfig::default()));
        let config = PaintflashConfig::default();
        assert_eq!(config.display_duration(), Duration::from_millis(750));
        assert_eq!(config.render_thresholds(), RenderThresholds::default());
        assert_eq!(config.registry_config(), RegistryConfig::default());
    }

    #[test]
    fn partial_override() {
        let Ok(config) = PaintflashConfig::from_json(
            r#"{ "display_duration_ms": 1200, "easing": "ease_out_cubic", "overlay": { "show_labels": false } }"#,
        ) else {
            unreachable!("config should parse");
        };
        assert_eq!(config.display_duration(), Duration::from_millis(1200));
        assert_eq!(config.easing, Easing::EaseOutCubic);
        assert!(!config.overlay.show_labels);
        assert!((config.overlay.outline_width - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(matches!(
            PaintflashConfig::from_json(r#"{ "display_duration_ms": 0 }"#),
            Err(ConfigError::ZeroDisplayDuration)
        ));
        assert!(matches!(
            PaintflashConfig::from_json(r#"{ "thresholds": { "warn_ms": 40, "error_ms": 33 } }"#),
            Err(ConfigError::ThresholdOrder {
                warn_ms: 40,
                error_ms: 33
            })
        ));
        assert!(matches!(
            PaintflashConfig::from_json(r#"{ "overlay": { "outline_width": -1.0 } }"#),
            Err(ConfigError::OutlineWidth(_))
        ));
    }

    #[test]
    fn rejects_unknown_keys_and_bad_json() {
        assert!(matches!(
            PaintflashConfig::from_json(r#"{ "display_ms": 10 }"#),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            PaintflashConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = PaintflashConfig::load(Path::new("/definitely/not/here.json"));
        let Err(ConfigError::Io { path, .. }) = err else {
            unreachable!("expected an I/O error");
        };
        assert_eq!(path, PathBuf::from("/definitely/not/here.json"));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paintflash.json");
        std::fs::write(&path, r#"{ "thresholds": { "warn_ms": 8, "error_ms": 16 } }"#).unwrap();

        let config = PaintflashConfig::load(&path).unwrap();
        assert_eq!(
            config.render_thresholds(),
            RenderThresholds {
                warn: Duration::from_millis(8),
                error: Duration::from_millis(16),
            }
        );
    }
}
