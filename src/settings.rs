//! Host settings
//!
//! Natively loaded from a JSON file, in the browser from LocalStorage.
//! Nothing here changes game difficulty.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::TICK_HZ;

/// Highest frame rate the native timer accepts
const MAX_TICK_HZ: u32 = 240;

/// Error loading settings
#[derive(Debug)]
pub enum SettingsError {
    /// Settings file could not be read
    Io(std::io::Error),
    /// Settings JSON is malformed
    Parse(serde_json::Error),
    /// A field is out of range
    Invalid(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "cannot read settings: {e}"),
            SettingsError::Parse(e) => write!(f, "malformed settings: {e}"),
            SettingsError::Invalid(msg) => write!(f, "invalid settings: {msg}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
            SettingsError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed RNG seed; the host clock seeds when unset
    pub seed: Option<u64>,
    /// Native frame rate
    pub tick_hz: u32,
    /// Log filter ("error", "warn", "info", "debug", "trace")
    pub log_level: String,

    // === Native demo ===
    /// Print snapshots as JSON lines on stdout
    pub publish_snapshots: bool,
    /// Print every Nth snapshot
    pub snapshot_every: u32,
    /// Stop after this many seconds (0 = run until game over)
    pub demo_seconds: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            tick_hz: TICK_HZ,
            log_level: "info".to_string(),
            publish_snapshots: false,
            snapshot_every: 60,
            demo_seconds: 30,
        }
    }
}

impl Settings {
    /// Environment variable naming the native settings file
    pub const PATH_ENV: &'static str = "NOVA_STRIKE_SETTINGS";
    /// Native settings file used when the variable is unset
    pub const DEFAULT_PATH: &'static str = "nova_strike.json";
    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "nova_strike_settings";

    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(1..=MAX_TICK_HZ).contains(&self.tick_hz) {
            return Err(SettingsError::Invalid(format!(
                "tick_hz must be 1..={MAX_TICK_HZ}, got {}",
                self.tick_hz
            )));
        }
        if self.snapshot_every == 0 {
            return Err(SettingsError::Invalid(
                "snapshot_every must be at least 1".to_string(),
            ));
        }
        if self.log_level.parse::<log::LevelFilter>().is_err() {
            return Err(SettingsError::Invalid(format!(
                "unknown log_level {:?}",
                self.log_level
            )));
        }
        Ok(())
    }

    /// Log filter, falling back to info
    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }

    /// Frames the native demo may run (None = unlimited)
    pub fn demo_tick_limit(&self) -> Option<u64> {
        (self.demo_seconds > 0).then(|| self.demo_seconds as u64 * self.tick_hz as u64)
    }

    /// Load from a file; a missing file yields defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, SettingsError> {
        match std::fs::read_to_string(path) {
            Ok(json) => Self::from_json(&json),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Load from `$NOVA_STRIKE_SETTINGS` or `nova_strike.json`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_env() -> Result<Self, SettingsError> {
        let path = std::env::var_os(Self::PATH_ENV)
            .map(std::path::PathBuf::from)
            .unwrap_or_else(|| std::path::PathBuf::from(Self::DEFAULT_PATH));
        Self::load_from_path(&path)
    }

    /// Load settings from LocalStorage (WASM only). `None` when nothing is stored.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Result<Option<Self>, SettingsError> {
        let stored = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .and_then(|storage| storage.get_item(Self::STORAGE_KEY).ok())
            .flatten();

        stored.map(|json| Self::from_json(&json)).transpose()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.tick_hz, 60);
        assert_eq!(settings.level_filter(), log::LevelFilter::Info);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 7, "log_level": "debug" }"#).unwrap();
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.level_filter(), log::LevelFilter::Debug);
        assert_eq!(settings.tick_hz, TICK_HZ);
    }

    #[test]
    fn test_rejects_out_of_range() {
        let err = Settings::from_json(r#"{ "tick_hz": 0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));

        let err = Settings::from_json(r#"{ "log_level": "loud" }"#).unwrap_err();
        assert!(err.to_string().contains("loud"));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Settings::from_json("{ tick_hz: ").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_demo_tick_limit() {
        let mut settings = Settings::default();
        settings.demo_seconds = 2;
        assert_eq!(settings.demo_tick_limit(), Some(120));
        settings.demo_seconds = 0;
        assert_eq!(settings.demo_tick_limit(), None);
    }

    #[test]
    fn test_missing_file_means_defaults() {
        let path = std::path::Path::new("definitely/not/here/nova_strike.json");
        assert_eq!(Settings::load_from_path(path).unwrap(), Settings::default());
    }

    #[test]
    fn test_round_trip_through_file() {
        let path = std::env::temp_dir().join(format!("nova_strike_{}.json", std::process::id()));
        let settings = Settings {
            seed: Some(11),
            demo_seconds: 5,
            ..Default::default()
        };
        std::fs::write(&path, serde_json::to_string(&settings).unwrap()).unwrap();
        let loaded = Settings::load_from_path(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }
}
