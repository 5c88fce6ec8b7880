//! # MixLab Centralized Configuration
//!
//! Configuration loading for the MixLab CLI and services: data directory,
//! log level, solver tolerances and optional default settings, from a TOML
//! file with `MIXLAB_`-prefixed environment overrides.

pub mod mixer_config;

pub use mixer_config::{load_config, DataConfig, LogConfig, MixerConfig, ToleranceConfig};
