use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use querydeck_types::{ConnectionConfig, Driver};

/// A saved connection profile.
///
/// The password is deliberately absent: it is supplied per invocation (flag
/// or `QUERYDECK_PASSWORD`) and never written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedConnection {
    pub driver: String,
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub username: String,
    pub database: String,
}

impl SavedConnection {
    pub fn from_config(config: &ConnectionConfig) -> Self {
        Self {
            driver: config.driver.as_str().to_string(),
            host: config.host.clone(),
            port: config.port,
            username: config.username.clone(),
            database: config.database.clone(),
        }
    }

    /// Rehydrate a full connection config, attaching the password the caller
    /// obtained out of band.
    pub fn to_config(&self, password: &str) -> Result<ConnectionConfig> {
        let driver: Driver = self.driver.parse()?;
        Ok(ConnectionConfig {
            driver,
            host: self.host.clone(),
            port: self.port,
            username: self.username.clone(),
            password: password.to_string(),
            database: self.database.clone(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub backend_url: Option<String>,
    #[serde(default)]
    pub connection: Option<SavedConnection>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::default_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn default_path() -> Result<PathBuf> {
        if let Some(config_dir) = dirs::config_dir() {
            return Ok(config_dir.join("querydeck").join("config.toml"));
        }
        if let Some(home) = std::env::var_os("HOME") {
            return Ok(PathBuf::from(home).join(".querydeck").join("config.toml"));
        }
        Err(Error::Config(
            "could not determine config path: no HOME or XDG config directory found".to_string(),
        ))
    }

    pub fn remember(&mut self, config: &ConnectionConfig) {
        self.connection = Some(SavedConnection::from_config(config));
    }
}
