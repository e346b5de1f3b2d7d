// Configuration - user settings persisted as TOML

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default configuration file name, looked up in the working directory
const CONFIG_FILE: &str = "famicore.toml";

/// User-configurable settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Video settings
    pub video: VideoConfig,

    /// Audio settings
    pub audio: AudioConfig,
}

/// Video configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoConfig {
    /// Integer window scale (1-8)
    pub scale: u32,

    /// Target frame rate
    pub fps: u32,
}

/// Audio configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Enable audio output
    pub enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            video: VideoConfig { scale: 3, fps: 60 },
            audio: AudioConfig { enabled: true },
        }
    }
}

impl Config {
    /// Load the configuration file, falling back to defaults
    ///
    /// A missing file is normal (first run); a malformed file is
    /// reported and replaced by defaults rather than aborting.
    pub fn load_or_default() -> Self {
        Self::load_from(CONFIG_FILE)
    }

    /// Load from a specific path, falling back to defaults
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(text) => match toml::from_str(&text) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!(
                        "malformed config {}: {}; using defaults",
                        path.as_ref().display(),
                        e
                    );
                    Config::default()
                }
            },
            Err(_) => Config::default(),
        }
    }

    /// Persist the configuration
    pub fn save(&self) -> std::io::Result<()> {
        self.save_to(CONFIG_FILE)
    }

    /// Persist to a specific path
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let text = toml::to_string_pretty(self).expect("config always serializes");
        fs::write(path, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.video.scale, 3);
        assert_eq!(config.video.fps, 60);
        assert!(config.audio.enabled);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = Config::load_from("definitely_missing_config.toml");
        assert_eq!(config.video.scale, 3);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.video.scale, config.video.scale);
        assert_eq!(parsed.audio.enabled, config.audio.enabled);
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let path = std::env::temp_dir().join("famicore_bad_config.toml");
        fs::write(&path, "video = \"not a table\"").unwrap();

        let config = Config::load_from(&path);
        assert_eq!(config.video.fps, 60, "bad config degrades to defaults");

        let _ = fs::remove_file(&path);
    }
}
