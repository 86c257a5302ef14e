use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid value in config file at {config_path}: {message}")]
    ConfigValueError {
        config_path: PathBuf,
        message: String,
    },
}

/// User defaults for document generation. Every field is optional in the
/// file; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Named page size (`A0`..`A6`, `Letter`, `Legal`, `Tabloid`, `Custom`).
    pub page_size: String,
    pub orientation: String,
    pub font_family: String,
    /// Base font size in points.
    pub font_size: f32,
    /// Custom page width in points, used with `page_size = "Custom"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_height: Option<f32>,
    /// Where generated documents go when no output path is given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: "A4".to_string(),
            orientation: "portrait".to_string(),
            font_family: "helvetica".to_string(),
            font_size: 12.0,
            custom_width: None,
            custom_height: None,
            output_dir: None,
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        if !(config.font_size.is_finite() && config.font_size > 0.0) {
            return Err(ConfigError::ConfigValueError {
                config_path: config_path.to_path_buf(),
                message: format!("font_size must be positive, got {}", config.font_size),
            });
        }

        // Expand shell variables and tilde in the output directory
        config.output_dir = config
            .output_dir
            .map(|dir| Self::expand_path(&dir).unwrap_or(dir));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// Loads the config file, falling back to defaults when there is none.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        Ok(Self::load()?.unwrap_or_default())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/deltapress");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
