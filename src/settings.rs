//! Settings for embedding applications, read with the `config` crate.
//!
//! Sources are layered: built-in defaults, then an optional `framelogic.{toml,json,yaml}`
//! file in the working directory, then `FRAMELOGIC_*` environment variables.
//! The engine itself never installs a subscriber; [`init_tracing`] is there for
//! applications and tests that want its events printed.

use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use config::builder::DefaultState;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use crate::error::{FramelogicError, Result};

pub const CONFIG_FILE: &str = "framelogic";
pub const ENV_PREFIX: &str = "FRAMELOGIC";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// An `EnvFilter` directive, such as `info` or `framelogic=trace`.
    pub log_filter: String,
    pub log_ansi: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_filter: String::from("info"),
            log_ansi: true,
        }
    }
}

impl Settings {
    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        let defaults = Settings::default();
        Ok(Config::builder()
            .set_default("log_filter", defaults.log_filter)?
            .set_default("log_ansi", defaults.log_ansi)?)
    }
    /// Defaults, overridden by the optional config file, overridden by the environment.
    pub fn load() -> Result<Self> {
        let settings = Self::defaults()?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
    /// Defaults overridden by the given TOML document.
    pub fn from_toml(toml: &str) -> Result<Self> {
        let settings = Self::defaults()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
    pub fn env_filter(&self) -> Result<EnvFilter> {
        EnvFilter::try_new(&self.log_filter).map_err(|e| FramelogicError::Config(e.to_string()))
    }
}

/// Installs a global fmt subscriber. Fails if the filter does not parse or if a
/// global subscriber is already in place.
pub fn init_tracing(settings: &Settings) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(settings.env_filter()?)
        .with_ansi(settings.log_ansi)
        .try_init()
        .map_err(|e| FramelogicError::Config(e.to_string()))
}
