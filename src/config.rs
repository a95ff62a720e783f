use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

const DEFAULT_CONFIG_PATH: &str = "/etc/skanowl.conf";
const DEFAULT_CAPTURE_WINDOW_MS: u64 = 1000;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Runtime configuration.
///
/// Sources, lowest precedence first: built-in defaults, the config file,
/// `SKANOWL_*` environment variables. The binary applies CLI flags last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub interface: Option<String>,
    pub capture_window: Duration,
    pub known_file: Option<PathBuf>,
    pub unknown_file: Option<PathBuf>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interface: None,
            capture_window: Duration::from_millis(DEFAULT_CAPTURE_WINDOW_MS),
            known_file: None,
            unknown_file: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = std::env::var("SKANOWL_CONFIG")
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let mut config = Config::default();
        if Path::new(&config_path).exists() {
            let content = std::fs::read_to_string(&config_path)?;
            config.apply_file(&content)?;
        }

        config.apply_env()?;
        Ok(config)
    }

    /// Apply `key = value` lines. Blank lines and `#` comments are skipped,
    /// unknown keys ignored.
    pub fn apply_file(&mut self, content: &str) -> Result<(), ConfigError> {
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                let value = value.trim();
                match key {
                    "interface" => self.interface = non_empty(value),
                    "capture_window_ms" => self.capture_window = parse_window(key, value)?,
                    "known_file" => self.known_file = non_empty(value).map(PathBuf::from),
                    "unknown_file" => self.unknown_file = non_empty(value).map(PathBuf::from),
                    "log_level" => self.log_level = value.to_string(),
                    _ => {}
                }
            }
        }
        Ok(())
    }

    fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("SKANOWL_INTERFACE") {
            self.interface = non_empty(&val);
        }
        if let Ok(val) = std::env::var("SKANOWL_CAPTURE_WINDOW_MS") {
            self.capture_window = parse_window("SKANOWL_CAPTURE_WINDOW_MS", &val)?;
        }
        if let Ok(val) = std::env::var("SKANOWL_KNOWN_FILE") {
            self.known_file = non_empty(&val).map(PathBuf::from);
        }
        if let Ok(val) = std::env::var("SKANOWL_UNKNOWN_FILE") {
            self.unknown_file = non_empty(&val).map(PathBuf::from);
        }
        if let Ok(val) = std::env::var("SKANOWL_LOG") {
            self.log_level = val;
        }
        Ok(())
    }

    /// Default directive for the tracing `EnvFilter`.
    pub fn tracing_filter(&self) -> &str {
        &self.log_level
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn parse_window(key: &str, value: &str) -> Result<Duration, ConfigError> {
    let ms: u64 = value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("Invalid {}: {}", key, value)))?;
    if ms == 0 {
        return Err(ConfigError::Invalid(format!("{} must be greater than 0", key)));
    }
    Ok(Duration::from_millis(ms))
}
