//! Editor settings, read from `~/.config/tagsmith/config.yaml` if present.
//!
//! The app only ever reads this file. Every key is optional.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::template::DEFAULT_PREFIX;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// First running number handed out by `\kd`.
    pub start_index: u32,
    /// Zero-padding width of the running number.
    pub digits: usize,
    /// Marker prefix for templates. Empty string = bare keys.
    pub marker_prefix: String,
    /// Extension of files picked up from a folder.
    pub audio_extension: String,
    /// Initial playback volume, 0.0..=1.0.
    pub volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            start_index: 1,
            digits: 2,
            marker_prefix: DEFAULT_PREFIX.to_string(),
            audio_extension: "mp3".to_string(),
            volume: 0.8,
        }
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
        .join("tagsmith")
        .join("config.yaml")
}

/// Load settings from a YAML file.
///
/// Missing file => defaults. Unparsable file => warning + defaults.
pub fn load_config(path: &Path) -> Settings {
    if !path.exists() {
        log::info!("load_config: {} not found, using defaults", path.display());
        return Settings::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match serde_yaml::from_str::<Settings>(&contents) {
            Ok(settings) => {
                log::info!("load_config: loaded {}", path.display());
                settings.sanitized()
            }
            Err(e) => {
                log::warn!("load_config: failed to parse config: {e}, using defaults");
                Settings::default()
            }
        },
        Err(e) => {
            log::warn!("load_config: failed to read config: {e}, using defaults");
            Settings::default()
        }
    }
}

impl Settings {
    fn sanitized(mut self) -> Self {
        self.volume = self.volume.clamp(0.0, 1.0);
        self.digits = self.digits.min(12);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let s = load_config(&dir.path().join("config.yaml"));
        assert_eq!(s, Settings::default());
        assert_eq!(s.marker_prefix, r"\k");
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "digits: 3\nmarker_prefix: \"\"\nvolume: 4.0\n").unwrap();

        let s = load_config(&path);
        assert_eq!(s.digits, 3);
        assert_eq!(s.marker_prefix, "");
        assert_eq!(s.start_index, 1);
        assert_eq!(s.volume, 1.0);
    }

    #[test]
    fn garbage_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "digits: [not, a, number").unwrap();
        assert_eq!(load_config(&path), Settings::default());
    }

    #[test]
    fn default_path_ends_in_app_folder() {
        let p = default_config_path();
        assert!(p.ends_with("tagsmith/config.yaml"));
    }
}
