//! Persisted application settings
//!
//! Amplitude and UI preferences survive restarts. Key bindings are
//! deliberately session-only and never written to disk.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::audio::{AMPLITUDE_DEFAULT, AMPLITUDE_MAX};
use crate::DialtoneApp;

/// Returns the path to the settings file: `~/.config/dialtone-rs/settings.json`
fn settings_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("dialtone-rs");
    path.push("settings.json");
    path
}

/// Persisted application settings.
///
/// Serialized as JSON to the platform config directory.
/// Fields use `#[serde(default)]` so that adding new settings
/// won't break existing config files.
#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub amplitude: u32,
    pub show_waveform: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            amplitude: AMPLITUDE_DEFAULT,
            show_waveform: true,
        }
    }
}

impl AppSettings {
    /// Load settings from disk, falling back to defaults on any error.
    pub fn load() -> Self {
        let path = settings_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<Self>(&contents) {
                Ok(mut settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings.amplitude = settings.amplitude.min(AMPLITUDE_MAX);
                    settings
                }
                Err(e) => {
                    log::warn!("Failed to parse settings ({}), using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                log::info!("No settings file found ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Save settings to disk as pretty JSON.
    pub fn save(&self) {
        let path = settings_path();
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                log::warn!("Failed to create config directory: {}", e);
                return;
            }
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    log::warn!("Failed to write settings: {}", e);
                }
            }
            Err(e) => {
                log::warn!("Failed to serialize settings: {}", e);
            }
        }
    }

    /// Extract current settings from the running application.
    pub fn from_app(app: &DialtoneApp) -> Self {
        Self {
            amplitude: app.amplitude,
            show_waveform: app.show_waveform,
        }
    }

    /// Apply loaded settings to the running application.
    pub fn apply(&self, app: &mut DialtoneApp) {
        app.amplitude = self.amplitude.min(AMPLITUDE_MAX);
        app.state.set_amplitude(app.amplitude);
        app.show_waveform = self.show_waveform;
    }
}
