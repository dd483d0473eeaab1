//! Configuration discovery and validation for the CLI.
//!
//! A TOML file is looked up in a fixed order (see [`load_config`]) and the
//! resulting [`AppConfig`] is checked before any BPMN input is read, so a bad
//! scale or color is reported against the configuration rather than halfway
//! through a conversion.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use flowdeck::{FlowdeckError, config::AppConfig};

/// Relative path checked before the platform configuration directory.
const LOCAL_CONFIG: &str = "flowdeck/config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Invalid configuration: {0}")]
    Validation(String),
}

impl From<ConfigError> for FlowdeckError {
    fn from(err: ConfigError) -> Self {
        FlowdeckError::Config(err.to_string())
    }
}

/// Where a configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ConfigSource {
    Explicit(PathBuf),
    Local(PathBuf),
    System(PathBuf),
    Default,
}

/// Loads and validates the configuration.
///
/// Search order:
/// 1. `explicit_path` (`--config`), which must exist
/// 2. `flowdeck/config.toml` in the working directory
/// 3. `config.toml` in the platform config directory
/// 4. built-in defaults
///
/// # Errors
///
/// Returns `FlowdeckError::Config` if the explicit file is missing, a file
/// is not valid TOML, or the values fail [`validate`].
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, FlowdeckError> {
    let source = find_config(explicit_path.as_ref().map(|path| -> &Path { path.as_ref() }));

    let config = match &source {
        ConfigSource::Explicit(path) | ConfigSource::Local(path) | ConfigSource::System(path) => {
            info!(source:?; "Loading configuration");
            read_config_file(path)?
        }
        ConfigSource::Default => {
            debug!("No configuration file found, using default configuration");
            AppConfig::default()
        }
    };

    validate(&config)?;
    Ok(config)
}

fn find_config(explicit_path: Option<&Path>) -> ConfigSource {
    if let Some(path) = explicit_path {
        return ConfigSource::Explicit(path.to_path_buf());
    }

    let local = PathBuf::from(LOCAL_CONFIG);
    if local.exists() {
        return ConfigSource::Local(local);
    }

    match ProjectDirs::from("com", "flowdeck", "flowdeck") {
        Some(dirs) => {
            let system = dirs.config_dir().join("config.toml");
            if system.exists() {
                return ConfigSource::System(system);
            }
            debug!(path = system.display().to_string(); "System configuration file not found");
        }
        None => debug!("Could not determine platform-specific config directory"),
    }

    ConfigSource::Default
}

fn read_config_file(path: &Path) -> Result<AppConfig, FlowdeckError> {
    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config = toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    Ok(config)
}

/// Checks the values a TOML file can get wrong but serde cannot reject.
///
/// # Errors
///
/// Returns [`ConfigError::Validation`] naming the first offending field.
pub fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    let scale = config.geometry().scale();
    if !(scale.is_finite() && scale > 0.0) {
        return Err(ConfigError::Validation(format!(
            "geometry.scale must be a positive number, got {scale}"
        )));
    }

    require_finite("layout.gateway_offset", config.layout().gateway_offset())?;
    require_finite("template.page_offset", config.template().page_offset())?;

    let style = config.style();
    if !(style.font_size().is_finite() && style.font_size() > 0.0) {
        return Err(ConfigError::Validation(format!(
            "style.font_size must be a positive number, got {}",
            style.font_size()
        )));
    }
    require_non_negative("style.line_width", style.line_width())?;
    require_non_negative("style.connector_width", style.connector_width())?;

    style.label_style().map_err(ConfigError::Validation)?;
    style.fill_color().map_err(ConfigError::Validation)?;
    style.outline().map_err(ConfigError::Validation)?;
    style.connector_stroke().map_err(ConfigError::Validation)?;

    Ok(())
}

fn require_finite(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!(
            "{field} must be a finite number, got {value}"
        )))
    }
}

fn require_non_negative(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!(
            "{field} must not be negative, got {value}"
        )))
    }
}
