//! Configuration file parser for ~/.config/reel/config.toml.
//!
//! The config file is optional — a missing file yields `Config::default()`.
//! Unknown keys are silently ignored by serde (with `deny_unknown_fields`
//! off), though we log a warning when the file contains potential typos.
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Feed Tuning
// ============================================================================

/// Tunable feed-navigation parameters.
///
/// The defaults (wheel/swipe 50, cool-down 500 ms, prompt at index 4) are
/// the product's shipped behavior, but none of them is an invariant — all
/// four are honored from config.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FeedTuning {
    /// Accumulated wheel delta required for one navigation step.
    pub wheel_threshold: u16,
    /// Vertical drag distance required for one navigation step.
    pub swipe_threshold: u16,
    /// Cool-down after an accepted step during which intents are dropped.
    pub nav_cooldown_ms: u64,
    /// Feed index at which the one-shot download prompt fires.
    pub prompt_after: usize,
}

impl Default for FeedTuning {
    fn default() -> Self {
        Self {
            wheel_threshold: 50,
            swipe_threshold: 50,
            nav_cooldown_ms: 500,
            prompt_after: 4,
        }
    }
}

// ============================================================================
// Configuration Struct
// ============================================================================

/// Top-level application configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be
/// specified. Missing keys fall back to `Default::default()`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Theme variant name ("dark" or "light").
    pub theme: String,

    /// Remote listing endpoint. When unset, `--listings FILE` is required.
    pub api_url: Option<String>,

    /// Local listings JSON file (overridden by --listings on the CLI).
    pub listings_file: Option<String>,

    /// Feed navigation tuning parameters.
    pub feed: FeedTuning,

    /// Custom keybinding overrides. Keys are action names, values are key
    /// strings ("Ctrl+q", "F5", "j").
    pub keybindings: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            api_url: None,
            listings_file: None,
            feed: FeedTuning::default(),
            keybindings: HashMap::new(),
        }
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → silently accepted, logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        // Check file size before reading to avoid slurping a corrupted or
        // maliciously large file into memory.
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Race: file deleted between metadata and read
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        // Parse as a raw table first to flag probable typos
        if let Ok(raw) = content.parse::<toml::Table>() {
            let known_keys = ["theme", "api_url", "listings_file", "feed", "keybindings"];
            for key in raw.keys() {
                if !known_keys.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(&content)?;
        tracing::info!(path = %path.display(), theme = %config.theme, "Loaded configuration");
        Ok(config)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme, "dark");
        assert!(config.api_url.is_none());
        assert!(config.listings_file.is_none());
        assert_eq!(config.feed, FeedTuning::default());
        assert!(config.keybindings.is_empty());
    }

    #[test]
    fn test_default_feed_tuning_matches_shipped_behavior() {
        let tuning = FeedTuning::default();
        assert_eq!(tuning.wheel_threshold, 50);
        assert_eq!(tuning.swipe_threshold, 50);
        assert_eq!(tuning.nav_cooldown_ms, 500);
        assert_eq!(tuning.prompt_after, 4);
    }

    #[test]
    fn test_missing_file_returns_default() {
        let path = Path::new("/tmp/reel_test_nonexistent_config.toml");
        let config = Config::load(path).unwrap();
        assert_eq!(config.theme, "dark");
    }

    #[test]
    fn test_empty_file_returns_default() {
        let dir = std::env::temp_dir().join("reel_config_test_empty");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.theme, "dark");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_partial_config_uses_defaults_for_missing() {
        let dir = std::env::temp_dir().join("reel_config_test_partial");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "theme = \"light\"\n\n[feed]\nnav_cooldown_ms = 250\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.theme, "light");
        assert_eq!(config.feed.nav_cooldown_ms, 250);
        assert_eq!(config.feed.wheel_threshold, 50); // default
        assert_eq!(config.feed.prompt_after, 4); // default

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_full_config() {
        let dir = std::env::temp_dir().join("reel_config_test_full");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");

        let content = r#"
theme = "light"
api_url = "https://api.example.com/listings"
listings_file = "/var/lib/reel/listings.json"

[feed]
wheel_threshold = 80
swipe_threshold = 30
nav_cooldown_ms = 400
prompt_after = 6

[keybindings]
quit = "Ctrl+q"
contact = "Enter"
"#;
        std::fs::write(&path, content).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.theme, "light");
        assert_eq!(
            config.api_url.as_deref(),
            Some("https://api.example.com/listings")
        );
        assert_eq!(
            config.listings_file.as_deref(),
            Some("/var/lib/reel/listings.json")
        );
        assert_eq!(config.feed.wheel_threshold, 80);
        assert_eq!(config.feed.swipe_threshold, 30);
        assert_eq!(config.feed.nav_cooldown_ms, 400);
        assert_eq!(config.feed.prompt_after, 6);
        assert_eq!(
            config.keybindings.get("quit").map(String::as_str),
            Some("Ctrl+q")
        );

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let dir = std::env::temp_dir().join("reel_config_test_invalid");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "this is not [valid toml").unwrap();

        let result = Config::load(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_unknown_keys_accepted() {
        let dir = std::env::temp_dir().join("reel_config_test_unknown");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "theme = \"dark\"\ntotally_fake_key = 42\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.theme, "dark");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_wrong_type_returns_error() {
        let dir = std::env::temp_dir().join("reel_config_test_wrongtype");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        // wheel_threshold should be an integer
        std::fs::write(&path, "[feed]\nwheel_threshold = \"fifty\"\n").unwrap();

        assert!(Config::load(&path).is_err());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_too_large_file_rejected() {
        let dir = std::env::temp_dir().join("reel_config_test_too_large");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "a".repeat(1_048_577)).unwrap();

        let result = Config::load(&path);
        assert!(matches!(result, Err(ConfigError::TooLarge(_))));

        std::fs::remove_dir_all(&dir).ok();
    }
}
