//! Settings Persistence System
//!
//! Provides persistent editor settings with:
//! - Atomic file writes (temp file + rename)
//! - Defaults for every missing field
//! - Normalization of out-of-range values instead of load failures
//!
//! Storage location: {settings_dir}/settings.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::core::{commands::DuplicatePlacement, timeline::Zoom, CoreResult};

/// Settings schema version for migration support
pub const SETTINGS_VERSION: u32 = 1;

/// Settings file name
pub const SETTINGS_FILE: &str = "settings.json";

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    /// Schema version for migrations
    #[serde(default = "default_version")]
    pub version: u32,

    /// Timeline editor settings
    #[serde(default)]
    pub editor: EditorSettings,
}

fn default_version() -> u32 {
    SETTINGS_VERSION
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            editor: EditorSettings::default(),
        }
    }
}

impl AppSettings {
    /// Normalizes and clamps settings so persisted state is always valid.
    ///
    /// Bad values are corrected instead of rejected, so an old or hand-edited
    /// file never prevents the editor from starting.
    pub fn normalize(&mut self) {
        self.version = SETTINGS_VERSION;
        self.editor.normalize();
    }
}

/// Timeline editor settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EditorSettings {
    /// Zoom applied to a freshly opened timeline (1.0 = 100%)
    #[serde(default = "default_zoom")]
    pub default_zoom: f64,

    /// Lowest zoom the UI may reach
    #[serde(default = "default_min_zoom")]
    pub min_zoom: f64,

    /// Highest zoom the UI may reach
    #[serde(default = "default_max_zoom")]
    pub max_zoom: f64,

    /// Increment used by zoom in/out
    #[serde(default = "default_zoom_step")]
    pub zoom_step: f64,

    /// Where duplicated clips are placed
    #[serde(default)]
    pub duplicate_placement: DuplicatePlacement,

    /// Volume used when unmuting a track with no remembered volume
    #[serde(default = "default_restore_volume")]
    pub restore_volume: f32,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            default_zoom: default_zoom(),
            min_zoom: default_min_zoom(),
            max_zoom: default_max_zoom(),
            zoom_step: default_zoom_step(),
            duplicate_placement: DuplicatePlacement::default(),
            restore_volume: default_restore_volume(),
        }
    }
}

impl EditorSettings {
    pub fn normalize(&mut self) {
        self.min_zoom = clamp_f64(self.min_zoom, 0.01, 100.0);
        self.max_zoom = clamp_f64(self.max_zoom, 0.01, 100.0);
        if self.min_zoom > self.max_zoom {
            std::mem::swap(&mut self.min_zoom, &mut self.max_zoom);
        }
        self.default_zoom = clamp_f64(self.default_zoom, self.min_zoom, self.max_zoom);
        self.zoom_step = clamp_f64(self.zoom_step, 0.01, 1.0);
        self.restore_volume = if self.restore_volume.is_finite() {
            self.restore_volume.clamp(0.01, 2.0)
        } else {
            default_restore_volume()
        };
    }

    /// Clamps a requested zoom into the configured bounds
    pub fn clamp_zoom(&self, value: f64) -> Zoom {
        Zoom::clamped(value, self.min_zoom, self.max_zoom)
    }

    /// Zoom for a freshly opened timeline
    pub fn initial_zoom(&self) -> Zoom {
        self.clamp_zoom(self.default_zoom)
    }
}

fn default_zoom() -> f64 {
    1.0
}

fn default_min_zoom() -> f64 {
    crate::core::timeline::geometry::DEFAULT_MIN_ZOOM
}

fn default_max_zoom() -> f64 {
    crate::core::timeline::geometry::DEFAULT_MAX_ZOOM
}

fn default_zoom_step() -> f64 {
    0.1
}

fn default_restore_volume() -> f32 {
    1.0
}

fn clamp_f64(value: f64, min: f64, max: f64) -> f64 {
    if !value.is_finite() {
        return min;
    }
    value.clamp(min, max)
}

// =============================================================================
// Settings Manager
// =============================================================================

/// Loads and saves `settings.json` in a directory
#[derive(Debug, Clone)]
pub struct SettingsManager {
    settings_dir: PathBuf,
}

impl SettingsManager {
    pub fn new(settings_dir: PathBuf) -> Self {
        Self { settings_dir }
    }

    /// Full path of the settings file
    pub fn settings_path(&self) -> PathBuf {
        self.settings_dir.join(SETTINGS_FILE)
    }

    /// Loads settings, falling back to defaults when the file is missing.
    ///
    /// A file that exists but is not valid JSON is an error.
    pub fn load(&self) -> CoreResult<AppSettings> {
        Self::load_from(&self.settings_path())
    }

    /// Loads settings from an explicit file path
    pub fn load_from(path: &Path) -> CoreResult<AppSettings> {
        if !path.exists() {
            info!(path = %path.display(), "Settings file not found, using defaults");
            return Ok(AppSettings::default());
        }

        let content = fs::read_to_string(path)?;
        let mut settings: AppSettings = serde_json::from_str(&content)?;
        if settings.version > SETTINGS_VERSION {
            warn!(
                version = settings.version,
                supported = SETTINGS_VERSION,
                "Settings written by a newer version; unknown fields are ignored"
            );
        }
        settings.normalize();

        info!(path = %path.display(), "Loaded settings");
        Ok(settings)
    }

    /// Saves settings atomically (temp file + rename)
    pub fn save(&self, settings: &AppSettings) -> CoreResult<()> {
        fs::create_dir_all(&self.settings_dir)?;

        let mut normalized = settings.clone();
        normalized.normalize();
        let json = serde_json::to_string_pretty(&normalized)?;

        let path = self.settings_path();
        let tmp_path = path.with_extension("json.tmp");
        {
            let mut file = fs::File::create(&tmp_path)?;
            file.write_all(json.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, &path)?;

        info!(path = %path.display(), "Saved settings");
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
