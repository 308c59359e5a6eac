use std::path::{
    Path,
    PathBuf,
};

use thiserror::Error;

use super::interpolation::{
    interpolate_toml,
    InterpolationError,
};
use super::schema::MetricsListConfig;

pub const CONFIG_PATH_ENV: &str = "METRICS_LIST_CONFIG_PATH";

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Environment variable interpolation failed: {0}")]
    InterpolationError(#[from] InterpolationError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type ConfigLoadResult<T> = Result<T, ConfigLoadError>;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Picks the config file to read: an explicit path, then
    /// `METRICS_LIST_CONFIG_PATH`, then the per-user config file if it
    /// exists. `None` means run on defaults.
    pub fn discover_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            tracing::debug!("Using config path from command line: {}", path.display());
            return Some(path.to_path_buf());
        }

        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            tracing::debug!("Using config path from {}: {}", CONFIG_PATH_ENV, path);
            return Some(PathBuf::from(path));
        }

        let path = dirs::config_dir()?.join("metrics-list").join("config.toml");
        if path.exists() {
            tracing::debug!("Using user config path: {}", path.display());
            return Some(path);
        }

        tracing::debug!("No config file found, using defaults");
        None
    }

    pub fn load_or_default(explicit: Option<&Path>) -> ConfigLoadResult<MetricsListConfig> {
        match Self::discover_config_path(explicit) {
            Some(path) => Self::load(&path),
            None => Ok(MetricsListConfig::default()),
        }
    }

    pub fn load(path: &Path) -> ConfigLoadResult<MetricsListConfig> {
        if !path.exists() {
            return Err(ConfigLoadError::FileNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> ConfigLoadResult<MetricsListConfig> {
        let mut value: toml::Value = toml::from_str(content)?;

        interpolate_toml(&mut value)?;

        let config: MetricsListConfig = value.try_into().map_err(|e| {
            ConfigLoadError::InvalidConfig(format!("Failed to deserialize config: {}", e))
        })?;

        let errors = config.validate();
        if !errors.is_empty() {
            return Err(ConfigLoadError::InvalidConfig(errors.join(", ")));
        }

        tracing::debug!(
            endpoint = %config.catalog.endpoint,
            page_size = ?config.catalog.page_size,
            "Loaded config"
        );

        Ok(config)
    }
}
