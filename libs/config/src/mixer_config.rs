//! Application configuration
//!
//! Loads from a TOML file with environment-variable overrides. Every
//! section has full defaults, so a missing file is not an error; a broken
//! file is.

use anyhow::{Context, Result};
use config_crate::{Config, Environment, File};
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use types::MixSettings;

/// Default location of the user configuration file
pub static DEFAULT_CONFIG_PATH: Lazy<PathBuf> =
    Lazy::new(|| PathBuf::from(shellexpand::tilde("~/.config/mixlab/config.toml").into_owned()));

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MixerConfig {
    /// Where the recipe file lives
    pub data: DataConfig,

    /// Logging settings
    pub log: LogConfig,

    /// Solver tolerances
    pub tolerances: ToleranceConfig,

    /// Optional replacement for the built-in default mix settings
    pub defaults: Option<MixSettings>,
}

/// Data directory settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("~/.local/share/mixlab"),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Solver tolerance overrides.
///
/// Defaults match the values the solver has always used; see
/// `mixlab_blend::SolverTolerances` for their meaning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToleranceConfig {
    pub negative_volume_ml: Decimal,
    pub ratio_degeneracy: Decimal,
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            negative_volume_ml: dec!(0.01),
            ratio_degeneracy: dec!(0.001),
        }
    }
}

impl MixerConfig {
    /// Load configuration from a file with environment overrides.
    ///
    /// An explicit `path` must exist; the default path may be absent, in
    /// which case the built-in defaults apply. Environment variables use
    /// the `MIXLAB_` prefix, e.g. `MIXLAB_LOG_LEVEL=debug`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        builder = match path {
            Some(explicit) => builder.add_source(File::from(explicit).required(true)),
            None => builder.add_source(File::from(DEFAULT_CONFIG_PATH.as_path()).required(false)),
        };

        builder = builder.add_source(
            Environment::with_prefix("MIXLAB")
                .separator("_")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .context("failed to build configuration")?;

        let mut config: Self = config
            .try_deserialize()
            .context("failed to deserialize configuration")?;
        config.expand_paths()?;

        debug!(data_dir = %config.data.dir.display(), "configuration loaded");
        Ok(config)
    }

    /// Expand `~` and environment variables in the data directory.
    fn expand_paths(&mut self) -> Result<()> {
        let raw = self.data.dir.to_string_lossy().into_owned();
        let expanded = shellexpand::full(&raw).context("failed to expand data directory")?;
        self.data.dir = PathBuf::from(expanded.into_owned());
        Ok(())
    }

    /// Path of the recipe file inside the data directory.
    pub fn recipes_path(&self) -> PathBuf {
        self.data.dir.join("recipes.json")
    }
}

/// Convenience wrapper used by the CLI.
pub fn load_config(path: Option<&Path>) -> Result<MixerConfig> {
    MixerConfig::load(path)
}
