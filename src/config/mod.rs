use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Backend base URL used when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Backend timestamps are nanoseconds; the formatter expects milliseconds.
pub const DEFAULT_TIME_UNIT: i64 = 1_000_000;

/// Runtime configuration handed to the ledger client and every view
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the ledger backend
    pub api_url: String,

    /// Backend timestamp ticks per millisecond
    pub time_unit: i64,

    /// Re-fetch the pending pool this often while it is on screen
    pub pool_poll_secs: Option<u64>,

    /// Per-request timeout; requests wait indefinitely when unset
    pub request_timeout_secs: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            time_unit: DEFAULT_TIME_UNIT,
            pool_poll_secs: None,
            request_timeout_secs: None,
        }
    }
}

/// Values supplied on the command line; each one wins over the file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub time_unit: Option<i64>,
}

impl AppConfig {
    pub fn with_overrides(mut self, overrides: Overrides) -> Result<Self> {
        if let Some(url) = overrides
            .api_url
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
        {
            self.api_url = url;
        }
        if let Some(unit) = overrides.time_unit {
            self.time_unit = unit;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.time_unit <= 0 {
            anyhow::bail!("time_unit must be positive, got {}", self.time_unit);
        }
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            anyhow::bail!("api_url must be an http(s) URL, got {:?}", self.api_url);
        }
        Ok(())
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }

    pub fn pool_poll_interval(&self) -> Option<Duration> {
        self.pool_poll_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

/// Load the config file, falling back to defaults when there is none.
///
/// A file that exists but does not parse is an error rather than a silent
/// fallback.
pub fn load() -> Result<AppConfig> {
    let Some(path) = config_path() else {
        return Ok(AppConfig::default());
    };
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    load_from(&path)
}

pub fn load_from(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    parse(&content).with_context(|| format!("parsing config {}", path.display()))
}

pub fn parse(content: &str) -> Result<AppConfig> {
    Ok(toml::from_str::<AppConfig>(content)?)
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("PYCHAIN_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("pychain").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("pychain").join("config.toml"));
    }

    directories::ProjectDirs::from("io", "pychain", "pychain")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

pub fn data_dir() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME").map(PathBuf::from) {
        return Some(xdg.join("pychain"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".local").join("share").join("pychain"));
    }
    directories::ProjectDirs::from("io", "pychain", "pychain")
        .map(|dirs| dirs.data_dir().to_path_buf())
}

pub fn log_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("pychain.log"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.base_url(), "http://localhost:5000");
        assert_eq!(config.time_unit, 1_000_000);
        assert!(config.pool_poll_interval().is_none());
        assert!(config.request_timeout().is_none());
    }

    #[test]
    fn test_parse_file() {
        let config = parse(
            r#"
            api_url = "http://127.0.0.1:5001/"
            time_unit = 1
            pool_poll_secs = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.base_url(), "http://127.0.0.1:5001");
        assert_eq!(config.time_unit, 1);
        assert_eq!(config.pool_poll_interval(), Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_overrides_win() {
        let config = AppConfig::default()
            .with_overrides(Overrides {
                api_url: Some("https://ledger.example".to_string()),
                time_unit: Some(1_000),
            })
            .unwrap();
        assert_eq!(config.api_url, "https://ledger.example");
        assert_eq!(config.time_unit, 1_000);
    }

    #[test]
    fn test_blank_override_is_ignored() {
        let config = AppConfig::default()
            .with_overrides(Overrides {
                api_url: Some("   ".to_string()),
                time_unit: None,
            })
            .unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let zero_unit = AppConfig {
            time_unit: 0,
            ..AppConfig::default()
        };
        assert!(zero_unit.validate().is_err());

        let bad_url = AppConfig::default().with_overrides(Overrides {
            api_url: Some("localhost:5000".to_string()),
            time_unit: None,
        });
        assert!(bad_url.is_err());
    }
}
