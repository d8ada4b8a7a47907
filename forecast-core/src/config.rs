use anyhow::{Context, Result, anyhow, bail};
use directories::ProjectDirs;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Base URL of the forecast cache service when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8081/api/weather-cache";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// base_url = "http://localhost:8081/api/weather-cache"
/// default_city = "Pune"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Forecast service base URL, without the `/forecast` suffix.
    pub base_url: Option<String>,

    /// City used by `forecast show` when none is given.
    pub default_city: Option<String>,
}

impl Config {
    /// Configured base URL, or [`DEFAULT_BASE_URL`].
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Validate and store the base URL. Trailing slashes are dropped.
    pub fn set_base_url(&mut self, raw: &str) -> Result<()> {
        let trimmed = raw.trim().trim_end_matches('/');

        let url = Url::parse(trimmed).with_context(|| format!("Invalid base URL '{raw}'"))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("Base URL must use http or https, got '{}'", url.scheme());
        }

        self.base_url = Some(trimmed.to_string());
        Ok(())
    }

    pub fn default_city(&self) -> Option<&str> {
        self.default_city.as_deref()
    }

    /// Store the default city; a blank value clears it.
    pub fn set_default_city(&mut self, city: &str) {
        let city = city.trim();
        self.default_city = (!city.is_empty()).then(|| city.to_string());
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "forecast", "forecast-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
