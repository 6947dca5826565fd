use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::browser::{
    ControllerSettings, OrientationSettings, DEFAULT_OPEN_COMMAND, DEFAULT_SENSITIVITY,
    DEFAULT_ZOOM, DEFAULT_ZOOM_STEP, MAX_ZOOM, MIN_ZOOM,
};

/// Default margin for panel content (in virtual units, scaled by ui_scale)
pub const DEFAULT_PANEL_MARGIN: f32 = 8.0;

/// Scroll distance (egui points) that counts as one wheel notch
pub const DEFAULT_POINTS_PER_NOTCH: f32 = 50.0;

pub const MIN_UI_SCALE: f32 = 0.75;
pub const MAX_UI_SCALE: f32 = 2.0;
const UI_SCALE_STEP: f32 = 0.25;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// App configuration stored on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub ui_scale: f32,
    /// Command name that opens the browser, typed as `::<name>`
    pub open_command: String,
    pub rotation_sensitivity: i32,
    pub zoom_step: i32,
    pub min_zoom: i32,
    pub max_zoom: i32,
    pub default_zoom: i32,
    pub wheel_points_per_notch: f32,
    pub invert_horizontal_drag: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            ui_scale: 1.0,
            open_command: DEFAULT_OPEN_COMMAND.to_string(),
            rotation_sensitivity: DEFAULT_SENSITIVITY,
            zoom_step: DEFAULT_ZOOM_STEP,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            default_zoom: DEFAULT_ZOOM,
            wheel_points_per_notch: DEFAULT_POINTS_PER_NOTCH,
            invert_horizontal_drag: false,
        }
    }
}

impl ViewerConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("APPDATA").ok().map(|appdata| {
                PathBuf::from(appdata)
                    .join("CacheViewer")
                    .join("config.json")
            })
        }
        #[cfg(not(target_os = "windows"))]
        {
            std::env::var("HOME").ok().map(|home| {
                PathBuf::from(home)
                    .join(".config")
                    .join("cache-viewer")
                    .join("config.json")
            })
        }
    }

    /// Load from the default location. Missing or broken files give the defaults.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        Self::load_from(&path).unwrap_or_else(|err| {
            warn!("{err}; using default config");
            Self::default()
        })
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self) {
        if let Some(path) = Self::config_path() {
            if let Err(err) = self.save_to(&path) {
                warn!("{err}");
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(io_err)
    }

    pub fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings {
            orientation: OrientationSettings {
                sensitivity: self.rotation_sensitivity,
                zoom_step: self.zoom_step,
                min_zoom: self.min_zoom,
                max_zoom: self.max_zoom,
                default_zoom: self.default_zoom,
            }
            .normalized(),
            invert_horizontal_drag: self.invert_horizontal_drag,
        }
    }

    /// Nudge `ui_scale` up (positive) or down (negative) one step within bounds.
    /// Returns whether the value changed.
    pub fn step_ui_scale(&mut self, direction: i32) -> bool {
        let next = match direction.signum() {
            1 => (self.ui_scale + UI_SCALE_STEP).min(MAX_UI_SCALE),
            -1 => (self.ui_scale - UI_SCALE_STEP).max(MIN_UI_SCALE),
            _ => return false,
        };
        if next == self.ui_scale {
            return false;
        }
        self.ui_scale = next;
        true
    }

    pub fn reset_ui_scale(&mut self) -> bool {
        if self.ui_scale == 1.0 {
            return false;
        }
        self.ui_scale = 1.0;
        true
    }

    pub fn points_per_notch(&self) -> f32 {
        if self.wheel_points_per_notch > 0.0 {
            self.wheel_points_per_notch
        } else {
            DEFAULT_POINTS_PER_NOTCH
        }
    }
}
