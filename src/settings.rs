//! Client settings persisted as JSON.
//!
//! Settings live at `<config dir>/worldhost/settings.json`. A missing or
//! unreadable file yields the defaults so the client always starts.

use crate::constants::{
    CAMERA_SPEED_PRESETS, DEFAULT_SCENE_EXPORT_PATH, DEFAULT_WORLD_SCALE, DRAG_THRESHOLD,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid settings file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("No configuration directory on this platform")]
    NoConfigDir,
}

pub type SettingsResult<T> = Result<T, SettingsError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Length of one world-scale unit
    pub world_scale: f64,
    /// Camera speed multipliers for the 1, 2 and 3 keys
    pub camera_speed_presets: [f64; 3],
    pub scene_export_path: PathBuf,
    pub scene_import_path: PathBuf,
    /// Pointer travel before a press turns into a drag
    pub drag_threshold: f32,
    /// `tracing` filter directive used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            world_scale: DEFAULT_WORLD_SCALE,
            camera_speed_presets: CAMERA_SPEED_PRESETS,
            scene_export_path: PathBuf::from(DEFAULT_SCENE_EXPORT_PATH),
            scene_import_path: PathBuf::from(DEFAULT_SCENE_EXPORT_PATH),
            drag_threshold: DRAG_THRESHOLD,
            log_filter: "worldhost=info".to_string(),
        }
    }
}

impl ClientSettings {
    pub fn from_file(path: &Path) -> SettingsResult<Self> {
        let text = fs::read_to_string(path)?;
        let mut settings: ClientSettings = serde_json::from_str(&text)?;
        settings.sanitize();
        Ok(settings)
    }

    /// Load from `path`, falling back to defaults.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::from_file(path) {
            Ok(settings) => settings,
            Err(SettingsError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no settings file, using defaults");
                Self::default()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring settings file");
                Self::default()
            }
        }
    }

    /// Load from the default location.
    pub fn load() -> Self {
        match default_settings_path() {
            Some(path) => Self::load_or_default(&path),
            None => Self::default(),
        }
    }

    pub fn save(&self, path: &Path) -> SettingsResult<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn save_default(&self) -> SettingsResult<PathBuf> {
        let path = default_settings_path().ok_or(SettingsError::NoConfigDir)?;
        self.save(&path)?;
        Ok(path)
    }

    fn sanitize(&mut self) {
        if !(self.world_scale.is_finite() && self.world_scale > 0.0) {
            warn!(world_scale = self.world_scale, "invalid world scale, using default");
            self.world_scale = DEFAULT_WORLD_SCALE;
        }
        if self.camera_speed_presets.iter().any(|s| !s.is_finite() || *s <= 0.0) {
            warn!("invalid camera speed presets, using defaults");
            self.camera_speed_presets = CAMERA_SPEED_PRESETS;
        }
        self.drag_threshold = self.drag_threshold.max(0.0);
    }
}

/// `<config dir>/worldhost/settings.json`, if the platform has a config dir.
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("worldhost").join("settings.json"))
}
