//! Application configuration.
//!
//! Two layers feed the [`RunConfig`] that every component receives:
//!
//! * the command line (program, `-o`, `-op`), see [`cli`](crate::cli);
//! * an optional JSON [`Settings`] file at
//!   `$XDG_CONFIG_HOME/focus/config.json`.
//!
//! # Example
//!
//! ```json
//! {
//!   "cache_ttl_secs": 600,
//!   "cache_file": "/tmp/focus-cache.json",
//!   "cache_enabled": true
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default lifetime of a cached window record.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Contents of the optional settings file.
///
/// Every field is optional; a minimal `{}` file is valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// How long a resolved window may be reused, in seconds.
    pub cache_ttl_secs: u64,
    /// Where the window cache lives.  Defaults to
    /// `$XDG_CONFIG_HOME/focus/simplecache.json`.
    pub cache_file: Option<PathBuf>,
    /// Set to `false` to query every window on each run and never write the
    /// cache file.
    pub cache_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cache_ttl_secs: DEFAULT_CACHE_TTL.as_secs(),
            cache_file: None,
            cache_enabled: true,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        let settings: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))?;
        Ok(settings)
    }
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);

/// Everything a single run needs to know.  Built once in `main`, read-only
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Program to focus; matched against `pgrep` and window classes.
    pub program: String,
    /// Launch the program when no window is found.
    pub open: bool,
    /// Command used to launch the program instead of its name.
    pub open_command: Option<String>,
    pub cache_file: PathBuf,
    pub cache_ttl: Duration,
    pub cache_enabled: bool,
}

impl RunConfig {
    /// Combine command-line values with `settings`.
    pub fn new(
        program: impl Into<String>,
        open: bool,
        open_command: Option<String>,
        settings: Settings,
    ) -> Self {
        Self {
            program: program.into(),
            open,
            open_command: open_command.filter(|c| !c.trim().is_empty()),
            cache_file: settings
                .cache_file
                .unwrap_or_else(|| config_dir().join("simplecache.json")),
            cache_ttl: Duration::from_secs(settings.cache_ttl_secs),
            cache_enabled: settings.cache_enabled,
        }
    }

    /// The command to run when the program has to be launched.
    pub fn launch_command(&self) -> &str {
        self.open_command.as_deref().unwrap_or(&self.program)
    }
}

/// Resolve the config directory (`$XDG_CONFIG_HOME/focus`).
pub fn config_dir() -> PathBuf {
    let base = dirs::config_dir().unwrap_or_else(|| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        PathBuf::from(home).join(".config")
    });
    base.join("focus")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn deserialize_full_settings() {
        let json = r#"{
            "cache_ttl_secs": 60,
            "cache_file": "/tmp/cache.json",
            "cache_enabled": false
        }"#;
        let s: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(s.cache_ttl_secs, 60);
        assert_eq!(s.cache_file, Some(PathBuf::from("/tmp/cache.json")));
        assert!(!s.cache_enabled);
    }

    #[test]
    fn deserialize_empty_uses_defaults() {
        let s: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(s.cache_ttl_secs, 300);
        assert_eq!(s.cache_file, None);
        assert!(s.cache_enabled);
    }

    #[test]
    fn unknown_keys_ignored() {
        let _s: Settings = serde_json::from_str(r#"{ "future": 1 }"#).unwrap();
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = Settings::load(&dir.path().join("config.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn load_reports_bad_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "[1, 2").unwrap();
        let err = Settings::load(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse"));
    }

    #[test]
    fn run_config_defaults() {
        let cfg = RunConfig::new("firefox", false, None, Settings::default());
        assert_eq!(cfg.cache_ttl, DEFAULT_CACHE_TTL);
        assert!(cfg.cache_file.ends_with("focus/simplecache.json"));
        assert_eq!(cfg.launch_command(), "firefox");
    }

    #[test]
    fn explicit_open_command_wins() {
        let cfg = RunConfig::new("code", true, Some("code --new-window".into()), Settings::default());
        assert_eq!(cfg.launch_command(), "code --new-window");

        let blank = RunConfig::new("code", true, Some("  ".into()), Settings::default());
        assert_eq!(blank.launch_command(), "code");
    }

    #[test]
    fn settings_override_cache_location() {
        let settings = Settings {
            cache_ttl_secs: 5,
            cache_file: Some(PathBuf::from("/var/tmp/c.json")),
            cache_enabled: true,
        };
        let cfg = RunConfig::new("x", false, None, settings);
        assert_eq!(cfg.cache_file, PathBuf::from("/var/tmp/c.json"));
        assert_eq!(cfg.cache_ttl, Duration::from_secs(5));
    }
}
