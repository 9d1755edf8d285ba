use anyhow::{Context, Result, anyhow, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

const DEFAULT_FACTS: &[&str] = &[
    "Lightning strikes the Earth about 100 times every second.",
    "The highest temperature ever recorded was 56.7°C in Death Valley.",
    "A single cumulus cloud can weigh more than a million kilograms.",
    "Snowflakes always have six sides.",
    "Wind speed is measured with an instrument called an anemometer.",
    "Antarctica is the driest continent on Earth.",
];

/// Settings for the rotating fact banner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BannerConfig {
    /// How long each fact stays on screen.
    pub fact_interval_ms: u64,
    /// Tick of the progress bar; must be shorter than `fact_interval_ms`.
    pub progress_interval_ms: u64,
    /// Percent added to the progress bar per tick.
    pub progress_step: u8,
    pub facts: Vec<String>,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            fact_interval_ms: 5000,
            progress_interval_ms: 50,
            progress_step: 1,
            facts: DEFAULT_FACTS.iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl BannerConfig {
    pub fn fact_interval(&self) -> Duration {
        Duration::from_millis(self.fact_interval_ms)
    }

    pub fn progress_interval(&self) -> Duration {
        Duration::from_millis(self.progress_interval_ms)
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// suggestion_count = 10
/// request_timeout_secs = 15
///
/// [banner]
/// fact_interval_ms = 8000
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub geocoding_url: String,
    pub forecast_url: String,
    /// Maximum number of geocoding matches requested while typing.
    pub suggestion_count: u32,
    /// Inputs shorter than this (in characters) never hit the network.
    pub min_query_len: usize,
    /// No timeout unless set.
    pub request_timeout_secs: Option<u64>,
    pub banner: BannerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
            suggestion_count: 10,
            min_query_len: 2,
            request_timeout_secs: None,
            banner: BannerConfig::default(),
        }
    }
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, use defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        cfg.validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml = self.to_toml()?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-dashboard", "weather-dashboard")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn validate(&self) -> Result<()> {
        if self.suggestion_count == 0 {
            bail!("suggestion_count must be at least 1");
        }
        if self.geocoding_url.trim().is_empty() || self.forecast_url.trim().is_empty() {
            bail!("geocoding_url and forecast_url must not be empty");
        }

        let banner = &self.banner;
        if banner.fact_interval_ms == 0 || banner.progress_interval_ms == 0 {
            bail!("banner intervals must be greater than zero");
        }
        if banner.progress_interval_ms >= banner.fact_interval_ms {
            bail!(
                "banner.progress_interval_ms ({}) must be shorter than banner.fact_interval_ms ({})",
                banner.progress_interval_ms,
                banner.fact_interval_ms
            );
        }

        Ok(())
    }
}
