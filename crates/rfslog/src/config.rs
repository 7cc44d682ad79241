//! Configuration management for rfslog.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::decoder::DecodeOptions;
use crate::error::{Error, Result};
use crate::sink::OutputPaths;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Directory name under the platform config dir.
const APP_DIR_NAME: &str = "rfslog";

/// Environment variable prefix.
const ENV_PREFIX: &str = "RFSLOG_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `RFSLOG_`, sections split on `__`)
/// 2. TOML config file at `~/.config/rfslog/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input configuration.
    pub input: InputConfig,
    /// Output configuration.
    pub output: OutputConfig,
    /// Decoder diagnostics.
    pub decode: DecodeConfig,
}

/// Where the dump comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Path to the flash dump.
    pub path: PathBuf,
}

/// Where the logs go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the three logs are written to.
    pub directory: PathBuf,
    /// Telemetry log file name.
    pub telemetry_file: String,
    /// GPS log file name.
    pub gps_file: String,
    /// State log file name.
    pub state_file: String,
    /// Line format.
    pub format: OutputFormat,
}

/// Line format of the output logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Tab-separated text lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Decoder diagnostic settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
    /// Log unknown field ids as warnings.
    pub warn_unknown_ids: bool,
    /// Log out-of-range state values as warnings.
    pub warn_invalid_states: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("FLASH.DMP"),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            telemetry_file: "AV TELEMETRY.log".to_string(),
            gps_file: "AV GPS.log".to_string(),
            state_file: "AV STATUS.log".to_string(),
            format: OutputFormat::Text,
        }
    }
}

impl Default for DecodeConfig {
    fn default() -> Self {
        let options = DecodeOptions::default();
        Self {
            warn_unknown_ids: options.warn_unknown_ids,
            warn_invalid_states: options.warn_invalid_states,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(APP_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a log file name is empty or two logs share a name.
    pub fn validate(&self) -> Result<()> {
        let names = [
            ("telemetry_file", &self.output.telemetry_file),
            ("gps_file", &self.output.gps_file),
            ("state_file", &self.output.state_file),
        ];

        for (key, name) in names {
            if name.trim().is_empty() {
                return Err(Error::config_validation(format!(
                    "output.{key} must not be empty"
                )));
            }
        }

        for (i, (key_a, a)) in names.iter().enumerate() {
            for (key_b, b) in &names[i + 1..] {
                if a == b {
                    return Err(Error::config_validation(format!(
                        "output.{key_a} and output.{key_b} are both \"{a}\""
                    )));
                }
            }
        }

        Ok(())
    }

    /// Resolve the three log paths, optionally under a different directory.
    #[must_use]
    pub fn output_paths(&self, directory: Option<&Path>) -> OutputPaths {
        OutputPaths::in_dir(
            directory.unwrap_or(&self.output.directory),
            &self.output.telemetry_file,
            &self.output.gps_file,
            &self.output.state_file,
        )
    }

    /// Decoder diagnostic switches.
    #[must_use]
    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            warn_unknown_ids: self.decode.warn_unknown_ids,
            warn_invalid_states: self.decode.warn_invalid_states,
        }
    }
}
