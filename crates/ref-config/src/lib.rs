//! # ref-config
//!
//! Layered configuration loading for refkeep using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`REFKEEP_*` prefix, `__` as separator)
//! 2. Project-level `.refkeep/config.toml`
//! 3. User-level `~/.config/refkeep/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `REFKEEP_MATCHING__TITLE_JACCARD` -> `matching.title_jaccard`,
//! `REFKEEP_LIBRARY__PATH` -> `library.path`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use ref_config::RefConfig;
//!
//! let config = RefConfig::load_with_dotenv().expect("config");
//! println!("library at {}", config.library.path.display());
//! ```

mod error;
mod general;
mod library;
mod matching;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use library::LibraryConfig;
pub use matching::MatchingConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Env var prefix for configuration overrides.
pub const ENV_PREFIX: &str = "REFKEEP_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RefConfig {
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub library: LibraryConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl RefConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration after reading `.env` from the current directory.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        // A missing .env is not an error.
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate from an arbitrary provider chain.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".refkeep/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.matching.validate()
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("refkeep").join("config.toml"))
    }
}
