use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{
    city::City,
    fetch::{ClientSettings, DEFAULT_ENDPOINT, DEFAULT_SERVICE_KEY, DEFAULT_USER_AGENT},
    route::{TransportRoute, default_routes},
};

/// Top-level configuration stored on disk. Every field is optional; unset
/// fields fall back to the built-in defaults.
///
/// Example TOML:
/// ```toml
/// service_key = "..."
/// default_city = "suwon"
///
/// [[routes]]
/// name = "direct"
/// template = { style = "direct" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    pub service_key: Option<String>,
    /// City name or slug used when none is given on the command line.
    pub default_city: Option<String>,
    pub endpoint: Option<String>,
    pub user_agent: Option<String>,
    pub timeout_secs: Option<u64>,
    /// Replaces the built-in relay list when non-empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<TransportRoute>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "gyeonggi-forecast", "forecast-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// The configured default city, if one is set.
    pub fn default_city(&self) -> Result<Option<City>> {
        self.default_city
            .as_deref()
            .map(|name| {
                City::try_from(name).with_context(|| {
                    "Invalid default_city in config.\n\
                     Hint: run `forecast configure` to pick one of the supported cities."
                })
            })
            .transpose()
    }

    pub fn set_default_city(&mut self, city: City) {
        self.default_city = Some(city.slug().to_string());
    }

    /// Set or clear the service key. Blank input clears it.
    pub fn set_service_key(&mut self, key: &str) {
        let key = key.trim();
        self.service_key = (!key.is_empty()).then(|| key.to_string());
    }

    /// Returns the service key in effect.
    pub fn service_key(&self) -> &str {
        self.service_key.as_deref().unwrap_or(DEFAULT_SERVICE_KEY)
    }

    pub fn routes(&self) -> Vec<TransportRoute> {
        if self.routes.is_empty() {
            default_routes()
        } else {
            self.routes.clone()
        }
    }

    /// Resolve the effective client settings.
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            endpoint: self.endpoint.clone().unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            service_key: self.service_key().to_string(),
            user_agent: self
                .user_agent
                .clone()
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            timeout: self.timeout_secs.map(Duration::from_secs),
            routes: self.routes(),
        }
    }
}
