use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::model::ForecastRequest;

/// A stored default location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HomePlace {
    pub latitude: f64,
    pub longitude: f64,
    /// Optional display name, e.g. "Berlin".
    pub label: Option<String>,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Coordinates used when `show` is called without --latitude/--longitude.
    pub location: Option<HomePlace>,

    /// Forecast horizon in days. Open-Meteo serves at most 16.
    pub forecast_days: Option<u8>,

    /// Override for the Open-Meteo endpoint, e.g. a self-hosted instance.
    pub api_base: Option<String>,
}

impl Config {
    /// Return the stored location, or a hint to configure one.
    pub fn place(&self) -> Result<&HomePlace> {
        self.location.as_ref().ok_or_else(|| {
            anyhow!(
                "No location configured.\n\
                 Hint: run `forecast configure` first, or pass --latitude and --longitude."
            )
        })
    }

    /// Validate and store the default location.
    pub fn set_location(
        &mut self,
        latitude: f64,
        longitude: f64,
        label: Option<String>,
    ) -> Result<()> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(anyhow!("Latitude {latitude} is outside the valid range -90..=90."));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(anyhow!("Longitude {longitude} is outside the valid range -180..=180."));
        }

        self.location = Some(HomePlace { latitude, longitude, label });
        Ok(())
    }

    /// Forecast horizon to request, falling back to the built-in default.
    pub fn horizon_days(&self) -> u8 {
        self.forecast_days.unwrap_or(ForecastRequest::DEFAULT_FORECAST_DAYS)
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
        let dirs = ProjectDirs::from("dev", "forecast-app", "forecast-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
