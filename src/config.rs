use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::marquee::MarqueeSettings;

/// Window geometry the layout is tuned for: wide enough for a 36-char
/// marquee plus art, short enough to crop cleanly in an overlay
pub const DEFAULT_WINDOW_SIZE: [f32; 2] = [760.0, 290.0];

/// Album art edge length in logical pixels
pub const DEFAULT_ART_SIZE: u32 = 86;

/// How often the monitor thread re-reads the media session
pub const DEFAULT_POLL_MS: u64 = 500;

/// Application configuration (user settings)
///
/// Loaded once at startup, owned by the GUI thread, saved on exit.
/// Every field carries a serde default so configs written by older
/// builds keep loading.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    // === Window Settings ===
    /// Inner window size in logical pixels
    pub window_size: [f32; 2],

    /// Last outer window position, if we have seen one
    pub window_position: Option<[f32; 2]>,

    /// Keep the window above all others so the overlay always finds it
    pub always_on_top: bool,

    /// Hide the mouse cursor while it is over this window (less VR clutter)
    pub hide_cursor: bool,

    // === Media Settings ===
    /// Media session poll interval (milliseconds)
    pub poll_interval_ms: u64,

    /// Album art edge length (pixels)
    pub art_size: u32,

    // === Marquee Settings ===
    pub marquee: MarqueeSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            window_position: None,
            always_on_top: true,
            hide_cursor: true,
            poll_interval_ms: DEFAULT_POLL_MS,
            art_size: DEFAULT_ART_SIZE,
            marquee: MarqueeSettings::default(),
        }
    }
}

impl AppConfig {
    /// Load from the platform config dir. Any failure (missing file, bad
    /// JSON) falls back to defaults -- a broken config should never stop
    /// the remote from coming up.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            tracing::warn!("[Config] No usable config directory, using defaults");
            return Self::default();
        };

        match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(config) => {
                    tracing::info!("[Config] Loaded {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("[Config] Failed to parse {}: {} (using defaults)", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                // First run
                tracing::info!("[Config] No config at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Write the config back out. Errors are reported to the caller so the
    /// exit path can log them; nothing here is fatal.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path().context("no usable config directory")?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }

        let raw = serde_json::to_string_pretty(self).context("serializing config")?;
        fs::write(&path, raw).with_context(|| format!("writing {}", path.display()))?;

        tracing::info!("[Config] Saved {}", path.display());
        Ok(())
    }

    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "VRemote").map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Directory for the log file, next to the config
    pub fn log_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "VRemote").map(|dirs| dirs.data_local_dir().join("logs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_layout_constants() {
        let config = AppConfig::default();
        assert_eq!(config.window_size, [760.0, 290.0]);
        assert_eq!(config.art_size, 86);
        assert_eq!(config.poll_interval_ms, 500);
        assert!(config.always_on_top);
        assert!(config.hide_cursor);
        assert!(config.marquee.enabled);
        assert_eq!(config.marquee.window_chars, 36);
    }

    #[test]
    fn test_round_trip() {
        let mut config = AppConfig::default();
        config.window_position = Some([120.0, 64.0]);
        config.marquee.step_ms = 200;

        let raw = serde_json::to_string(&config).unwrap();
        let back: AppConfig = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        // A config written by an older build that only knew two fields
        let raw = r#"{ "always_on_top": false, "poll_interval_ms": 1000 }"#;
        let config: AppConfig = serde_json::from_str(raw).unwrap();

        assert!(!config.always_on_top);
        assert_eq!(config.poll_interval_ms, 1000);
        // Everything else defaulted
        assert_eq!(config.window_size, DEFAULT_WINDOW_SIZE);
        assert_eq!(config.marquee, MarqueeSettings::default());
    }

    #[test]
    fn test_garbage_rejected_by_parser() {
        assert!(serde_json::from_str::<AppConfig>("not json").is_err());
    }
}
