//! Configuration file management.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset};

use climadash_core::{DEFAULT_API_URL, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT};

/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "CLIMADASH_API_URL";

/// Configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// API base URL
    #[serde(default)]
    pub api_url: Option<String>,

    /// Rows per table page
    #[serde(default)]
    pub page_size: Option<u32>,

    /// Year used for month queries
    #[serde(default)]
    pub year: Option<i32>,

    /// Offset from UTC in whole hours, used for day grouping and display
    #[serde(default)]
    pub utc_offset_hours: Option<i8>,

    /// Request timeout in seconds
    #[serde(default)]
    pub timeout: Option<u64>,

    /// Default output format
    #[serde(default)]
    pub format: Option<String>,

    /// Disable colored output
    #[serde(default)]
    pub no_color: bool,

    /// Use Fahrenheit for temperature
    #[serde(default)]
    pub fahrenheit: bool,
}

impl Config {
    /// Get the config file path
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("climadash")
            .join("config.toml")
    }

    /// Load config from file, or return default if not found
    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    /// Load config from `path`. Unreadable or malformed files produce a
    /// warning and the default configuration.
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config: {}", e);
                    }
                },
                Err(e) => {
                    eprintln!("Warning: Failed to read config: {}", e);
                }
            }
        }
        Self::default()
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path())
    }

    /// Save config to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }
}

// ==========================================================================
// Value validation
// ==========================================================================

/// Validate an API base URL.
pub fn parse_api_url(value: &str) -> Result<String> {
    let value = value.trim();
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        bail!("API URL must start with http:// or https://, got '{}'", value);
    }
    Ok(value.trim_end_matches('/').to_string())
}

/// Validate a page size (1-1000).
pub fn parse_page_size(value: &str) -> Result<u32> {
    let size: u32 = value
        .trim()
        .parse()
        .with_context(|| format!("'{}' is not a valid page size", value))?;
    if !(1..=1000).contains(&size) {
        bail!("Page size must be between 1 and 1000, got {}", size);
    }
    Ok(size)
}

/// Validate a year (1970-9999).
pub fn parse_year(value: &str) -> Result<i32> {
    let year: i32 = value
        .trim()
        .parse()
        .with_context(|| format!("'{}' is not a valid year", value))?;
    if !(1970..=9999).contains(&year) {
        bail!("Year must be between 1970 and 9999, got {}", year);
    }
    Ok(year)
}

/// Validate a UTC offset in hours (-12 to +14).
pub fn parse_utc_offset_hours(value: &str) -> Result<i8> {
    let hours: i8 = value
        .trim()
        .trim_start_matches('+')
        .parse()
        .with_context(|| format!("'{}' is not a valid UTC offset", value))?;
    if !(-12..=14).contains(&hours) {
        bail!("UTC offset must be between -12 and +14 hours, got {}", hours);
    }
    Ok(hours)
}

/// Validate a timeout in seconds (1-300).
pub fn parse_timeout(value: &str) -> Result<u64> {
    let secs: u64 = value
        .trim()
        .parse()
        .with_context(|| format!("'{}' is not a valid timeout", value))?;
    if !(1..=300).contains(&secs) {
        bail!("Timeout must be between 1 and 300 seconds, got {}", secs);
    }
    Ok(secs)
}

/// Validate an output format name.
pub fn parse_format(value: &str) -> Result<String> {
    let format = value.trim().to_lowercase();
    match format.as_str() {
        "text" | "json" | "csv" => Ok(format),
        _ => bail!("Unknown format '{}'. Use: text, json, csv", value),
    }
}

/// Parse a boolean with flexible input.
pub fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => bail!(
            "Invalid boolean value '{}'. Use: true/false, yes/no, on/off, 1/0",
            value
        ),
    }
}

// ==========================================================================
// Resolution (flag > environment > config file > default)
// ==========================================================================

/// Resolve the API base URL. `flag` carries the command-line or environment
/// value when present.
pub fn resolve_api_url(flag: Option<&str>, config: &Config) -> String {
    flag.map(str::to_string)
        .or_else(|| config.api_url.clone())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

/// Resolve the table page size.
pub fn resolve_page_size(flag: Option<u32>, config: &Config) -> u32 {
    flag.or(config.page_size)
        .filter(|&size| size > 0)
        .unwrap_or(DEFAULT_PAGE_SIZE)
}

/// Resolve the year for month queries, defaulting to the current year.
pub fn resolve_year(flag: Option<i32>, config: &Config) -> i32 {
    flag.or(config.year)
        .unwrap_or_else(|| OffsetDateTime::now_utc().year())
}

/// Resolve the display and grouping offset.
pub fn resolve_offset(config: &Config) -> Result<UtcOffset> {
    let hours = config.utc_offset_hours.unwrap_or(0);
    UtcOffset::from_hms(hours, 0, 0)
        .with_context(|| format!("Invalid utc_offset_hours in config: {}", hours))
}

/// Resolve the request timeout.
pub fn resolve_timeout(config: &Config) -> Duration {
    config
        .timeout
        .filter(|&secs| secs > 0)
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_TIMEOUT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_api_url_prefers_flag() {
        let config = Config {
            api_url: Some("http://config:1".to_string()),
            ..Default::default()
        };
        assert_eq!(
            resolve_api_url(Some("http://flag:2"), &config),
            "http://flag:2"
        );
        assert_eq!(resolve_api_url(None, &config), "http://config:1");
        assert_eq!(resolve_api_url(None, &Config::default()), DEFAULT_API_URL);
    }

    #[test]
    fn test_resolve_page_size() {
        let config = Config {
            page_size: Some(25),
            ..Default::default()
        };
        assert_eq!(resolve_page_size(Some(5), &config), 5);
        assert_eq!(resolve_page_size(None, &config), 25);
        assert_eq!(resolve_page_size(None, &Config::default()), 15);

        let zero = Config {
            page_size: Some(0),
            ..Default::default()
        };
        assert_eq!(resolve_page_size(None, &zero), 15);
    }

    #[test]
    fn test_resolve_year() {
        let config = Config {
            year: Some(2024),
            ..Default::default()
        };
        assert_eq!(resolve_year(Some(2023), &config), 2023);
        assert_eq!(resolve_year(None, &config), 2024);
        assert_eq!(
            resolve_year(None, &Config::default()),
            OffsetDateTime::now_utc().year()
        );
    }

    #[test]
    fn test_resolve_offset() {
        assert_eq!(resolve_offset(&Config::default()).unwrap(), UtcOffset::UTC);

        let config = Config {
            utc_offset_hours: Some(-3),
            ..Default::default()
        };
        assert_eq!(resolve_offset(&config).unwrap().whole_hours(), -3);
    }

    #[test]
    fn test_resolve_timeout() {
        assert_eq!(resolve_timeout(&Config::default()), DEFAULT_TIMEOUT);

        let config = Config {
            timeout: Some(3),
            ..Default::default()
        };
        assert_eq!(resolve_timeout(&config), Duration::from_secs(3));
    }

    #[test]
    fn test_value_parsers() {
        assert_eq!(
            parse_api_url("https://example.com/").unwrap(),
            "https://example.com"
        );
        assert!(parse_api_url("example.com").is_err());

        assert_eq!(parse_page_size("20").unwrap(), 20);
        assert!(parse_page_size("0").is_err());
        assert!(parse_page_size("abc").is_err());

        assert_eq!(parse_year("2024").unwrap(), 2024);
        assert!(parse_year("24").is_err());

        assert_eq!(parse_utc_offset_hours("+2").unwrap(), 2);
        assert_eq!(parse_utc_offset_hours("-5").unwrap(), -5);
        assert!(parse_utc_offset_hours("15").is_err());

        assert_eq!(parse_timeout("10").unwrap(), 10);
        assert!(parse_timeout("0").is_err());

        assert_eq!(parse_format("CSV").unwrap(), "csv");
        assert!(parse_format("xml").is_err());

        assert!(parse_bool("yes").unwrap());
        assert!(!parse_bool("off").unwrap());
        assert!(parse_bool("maybe").is_err());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config {
            api_url: Some("http://localhost:3000".to_string()),
            page_size: Some(20),
            year: Some(2024),
            utc_offset_hours: Some(2),
            timeout: Some(5),
            format: Some("json".to_string()),
            no_color: true,
            fahrenheit: true,
        };
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path), config);
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("missing.toml"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_malformed_file_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "page_size = \"lots\"\n[[[").unwrap();

        assert_eq!(Config::load_from(&path), Config::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "fahrenheit = true\n").unwrap();

        let config = Config::load_from(&path);
        assert!(config.fahrenheit);
        assert!(config.api_url.is_none());
        assert!(!config.no_color);
    }
}
