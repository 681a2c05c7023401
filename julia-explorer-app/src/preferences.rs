use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use julia_explorer_core::DEFAULT_MAX_ITERATIONS;
use julia_explorer_render::{builtin_palette, DEFAULT_PALETTE_KEY};

use crate::navigator::{NAVIGATOR_HEIGHT, NAVIGATOR_MAX_ITERATIONS, NAVIGATOR_WIDTH};
use crate::scheduler::DEFAULT_DEBOUNCE_MS;

const FILE_NAME: &str = "preferences.json";

// ---------------------------------------------------------------------------
// Application preferences
// ---------------------------------------------------------------------------

/// Settings read at startup. The current view is never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppPreferences {
    /// Size of the main render (and of exported PNGs).
    #[serde(default = "default_output_width")]
    pub output_width: u32,
    #[serde(default = "default_output_height")]
    pub output_height: u32,
    #[serde(default = "default_max_iterations")]
    pub default_max_iterations: u32,
    /// Key of the builtin palette selected at startup.
    #[serde(default = "default_palette")]
    pub default_palette: String,
    /// Quiet period before a scheduled render runs.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    #[serde(default = "default_navigator_width")]
    pub navigator_width: u32,
    #[serde(default = "default_navigator_height")]
    pub navigator_height: u32,
    #[serde(default = "default_navigator_max_iterations")]
    pub navigator_max_iterations: u32,

    /// Custom images directory. When empty, the OS data directory is used.
    #[serde(default)]
    pub images_dir: String,
    /// Preset selected at startup, by name.
    #[serde(default)]
    pub startup_preset: Option<String>,
}

fn default_output_width() -> u32 {
    1280
}
fn default_output_height() -> u32 {
    960
}
fn default_max_iterations() -> u32 {
    DEFAULT_MAX_ITERATIONS
}
fn default_palette() -> String {
    DEFAULT_PALETTE_KEY.to_string()
}
fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}
fn default_navigator_width() -> u32 {
    NAVIGATOR_WIDTH
}
fn default_navigator_height() -> u32 {
    NAVIGATOR_HEIGHT
}
fn default_navigator_max_iterations() -> u32 {
    NAVIGATOR_MAX_ITERATIONS
}

impl Default for AppPreferences {
    fn default() -> Self {
        Self {
            output_width: default_output_width(),
            output_height: default_output_height(),
            default_max_iterations: default_max_iterations(),
            default_palette: default_palette(),
            debounce_ms: default_debounce_ms(),
            navigator_width: default_navigator_width(),
            navigator_height: default_navigator_height(),
            navigator_max_iterations: default_navigator_max_iterations(),
            images_dir: String::new(),
            startup_preset: None,
        }
    }
}

impl AppPreferences {
    /// Load preferences from the OS config directory, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    /// Load from an explicit path, falling back to defaults on any failure.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            debug!("No preferences file at {}", path.display());
            return Self::default();
        }
        match Self::read(path) {
            Ok(prefs) => {
                info!("Loaded preferences from {}", path.display());
                prefs.sanitized()
            }
            Err(e) => {
                error!("Failed to load preferences from {}: {e}", path.display());
                Self::default()
            }
        }
    }

    fn read(path: &Path) -> crate::Result<Self> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Persist preferences to the OS config directory.
    pub fn save(&self) {
        let path = config_path();
        if let Err(e) = self.save_to(&path) {
            error!("Failed to write preferences: {e}");
        }
    }

    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        debug!("Saved preferences to {}", path.display());
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Where exports and generated images are written.
    pub fn images_directory(&self) -> PathBuf {
        if self.images_dir.is_empty() {
            crate::app_dir::images_directory()
        } else {
            PathBuf::from(&self.images_dir)
        }
    }

    /// Replace values the explorer cannot use with their defaults.
    fn sanitized(mut self) -> Self {
        if builtin_palette(&self.default_palette).is_none() {
            warn!(
                "Unknown default palette '{}', using {DEFAULT_PALETTE_KEY}",
                self.default_palette
            );
            self.default_palette = default_palette();
        }
        if self.navigator_width == 0 || self.navigator_height == 0 {
            warn!(
                "Navigator size {}x{} is empty, using default",
                self.navigator_width, self.navigator_height
            );
            self.navigator_width = default_navigator_width();
            self.navigator_height = default_navigator_height();
        }
        self
    }
}

fn config_path() -> PathBuf {
    crate::app_dir::config_directory().join(FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str) -> (PathBuf, PathBuf) {
        let dir = std::env::temp_dir().join(format!("julia_explorer_prefs_{name}"));
        let _ = fs::remove_dir_all(&dir);
        let path = dir.join(FILE_NAME);
        (dir, path)
    }

    #[test]
    fn defaults_match_explorer_defaults() {
        let prefs = AppPreferences::default();
        assert_eq!(prefs.default_max_iterations, 200);
        assert_eq!(prefs.default_palette, "crimson-night");
        assert_eq!(prefs.debounce(), Duration::from_millis(16));
        assert_eq!((prefs.navigator_width, prefs.navigator_height), (300, 240));
        assert_eq!(prefs.navigator_max_iterations, 100);
        assert!(prefs.startup_preset.is_none());
    }

    #[test]
    fn missing_fields_take_defaults() {
        let prefs: AppPreferences =
            serde_json::from_str(r#"{ "output_width": 640, "startup_preset": "Star" }"#).unwrap();
        assert_eq!(prefs.output_width, 640);
        assert_eq!(prefs.output_height, 960);
        assert_eq!(prefs.startup_preset.as_deref(), Some("Star"));
        assert_eq!(prefs.default_palette, DEFAULT_PALETTE_KEY);
    }

    #[test]
    fn save_then_load_round_trips() {
        let (dir, path) = temp_file("round_trip");
        let prefs = AppPreferences {
            output_width: 800,
            output_height: 600,
            default_palette: "gold-vein".into(),
            images_dir: "/tmp/julia".into(),
            ..AppPreferences::default()
        };
        prefs.save_to(&path).unwrap();
        assert_eq!(AppPreferences::load_from(&path), prefs);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn unreadable_file_falls_back_to_defaults() {
        let (dir, path) = temp_file("corrupt");
        fs::create_dir_all(&dir).unwrap();
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(AppPreferences::load_from(&path), AppPreferences::default());
        assert_eq!(
            AppPreferences::load_from(&dir.join("absent.json")),
            AppPreferences::default()
        );
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn unknown_palette_is_replaced() {
        let (dir, path) = temp_file("palette");
        fs::create_dir_all(&dir).unwrap();
        fs::write(&path, r#"{ "default_palette": "sepia", "navigator_width": 0 }"#).unwrap();
        let prefs = AppPreferences::load_from(&path);
        assert_eq!(prefs.default_palette, DEFAULT_PALETTE_KEY);
        assert_eq!(prefs.navigator_width, NAVIGATOR_WIDTH);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn explicit_images_dir_wins() {
        let prefs = AppPreferences {
            images_dir: "/srv/fractals".into(),
            ..AppPreferences::default()
        };
        assert_eq!(prefs.images_directory(), PathBuf::from("/srv/fractals"));
    }
}
