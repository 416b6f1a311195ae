// SPDX-License-Identifier: MIT OR Apache-2.0
//! Editor settings.
//!
//! Settings live in a RON file next to the projects (`motionspec.ron`).
//! Every field has a default, so a partial file or no file at all is fine.

use motionspec_timeline::{ScaleOptions, MAX_IDLE_VISUAL};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Current settings format version
pub const SETTINGS_FORMAT_VERSION: u32 = 1;

/// Settings file name
pub const SETTINGS_FILE_NAME: &str = "motionspec.ron";

/// Settings errors
#[derive(Debug, Error)]
pub enum SettingsError {
    /// File could not be read or written
    #[error("I/O error reading {path:?}: {source}")]
    Io {
        /// Settings file
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// RON parse error
    #[error("Invalid settings file: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// RON serialization error
    #[error("Serialization error: {0}")]
    Serialize(#[from] ron::Error),

    /// File written by a newer version
    #[error("Settings version {found} is newer than supported version {supported}")]
    UnsupportedVersion {
        /// Version in the file
        found: u32,
        /// Newest version this build reads
        supported: u32,
    },
}

/// Timeline scale settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineSettings {
    /// Visual cap for idle gaps
    pub max_idle_visual: f64,
}

impl Default for TimelineSettings {
    fn default() -> Self {
        Self {
            max_idle_visual: MAX_IDLE_VISUAL,
        }
    }
}

impl TimelineSettings {
    /// Scale options for these settings
    pub fn scale_options(&self) -> ScaleOptions {
        ScaleOptions {
            max_idle_visual: self.max_idle_visual,
        }
    }
}

/// Text renderer settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Width of the bar area in characters
    pub bar_width: usize,
    /// Width of the label column in characters
    pub label_width: usize,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            bar_width: 60,
            label_width: 32,
        }
    }
}

/// Complete editor settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Settings format version
    pub version: u32,
    /// Timeline scale settings
    pub timeline: TimelineSettings,
    /// Text renderer settings
    pub render: RenderSettings,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            version: SETTINGS_FORMAT_VERSION,
            timeline: TimelineSettings::default(),
            render: RenderSettings::default(),
            log_filter: "motionspec_editor=info,motionspec_timeline=warn".to_string(),
        }
    }
}

impl EditorSettings {
    /// Parse settings from RON
    pub fn from_ron(s: &str) -> Result<Self, SettingsError> {
        let settings: EditorSettings = ron::from_str(s)?;

        if settings.version > SETTINGS_FORMAT_VERSION {
            return Err(SettingsError::UnsupportedVersion {
                found: settings.version,
                supported: SETTINGS_FORMAT_VERSION,
            });
        }

        Ok(settings)
    }

    /// Serialize settings to RON
    pub fn to_ron(&self) -> Result<String, SettingsError> {
        let config = ron::ser::PrettyConfig::default().struct_names(true);
        Ok(ron::ser::to_string_pretty(self, config)?)
    }

    /// Load settings from a file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&content)
    }

    /// Load settings.
    ///
    /// An explicit path must exist. Without one, `motionspec.ron` in the
    /// working directory is used if present, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, SettingsError> {
        if let Some(path) = path {
            return Self::load(path);
        }

        let default_path = Path::new(SETTINGS_FILE_NAME);
        if default_path.exists() {
            Self::load(default_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save settings to a file
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let content = self.to_ron()?;
        std::fs::write(path, content).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = EditorSettings::default();
        assert_eq!(settings.version, SETTINGS_FORMAT_VERSION);
        assert_eq!(settings.timeline.scale_options(), ScaleOptions::default());
        assert_eq!(settings.render.bar_width, 60);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let settings = EditorSettings::from_ron("(timeline: (max_idle_visual: 25.0))").unwrap();
        assert_eq!(settings.timeline.max_idle_visual, 25.0);
        assert_eq!(settings.render.label_width, 32);
        assert_eq!(settings.version, SETTINGS_FORMAT_VERSION);
    }

    #[test]
    fn test_serialization() {
        let mut settings = EditorSettings::default();
        settings.render.bar_width = 80;
        let ron_str = settings.to_ron().unwrap();
        let loaded = EditorSettings::from_ron(&ron_str).unwrap();
        assert_eq!(loaded.render.bar_width, 80);
        assert_eq!(loaded.log_filter, settings.log_filter);
    }

    #[test]
    fn test_newer_version_rejected() {
        let result = EditorSettings::from_ron("(version: 99)");
        assert!(matches!(result, Err(SettingsError::UnsupportedVersion { found: 99, .. })));
    }

    #[test]
    fn test_missing_explicit_file() {
        let path = std::env::temp_dir().join("motionspec-missing-settings.ron");
        let result = EditorSettings::load_or_default(Some(&path));
        assert!(matches!(result, Err(SettingsError::Io { .. })));
    }
}
