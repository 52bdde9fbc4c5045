//! Layered runtime settings.
//!
//! Settings are merged from built-in defaults, an optional `amcdesk.toml`
//! in the working directory, an optional file named by `AMCDESK_CONFIG`,
//! and finally `AMCDESK_*` environment variables. Nested keys use `__` in
//! variable names, so `AMCDESK_AMC__EXPIRING_WINDOW_DAYS=14` sets
//! `amc.expiring_window_days`.

use crate::identity::adapters::file::DEFAULT_SESSION_FILE;
use crate::location::domain::DEFAULT_NEAREST_LIMIT;
use crate::location::services::{CatalogPolicy, DEFAULT_EXPIRING_WINDOW_DAYS};
use camino::{Utf8Path, Utf8PathBuf};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming an extra configuration file.
pub const CONFIG_PATH_ENV: &str = "AMCDESK_CONFIG";

/// Prefix of environment variable overrides.
pub const ENV_PREFIX: &str = "AMCDESK_";

/// Configuration file read from the working directory when present.
pub const LOCAL_CONFIG_FILE: &str = "amcdesk.toml";

/// Errors returned while loading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A provider failed or a value has the wrong shape.
    #[error(transparent)]
    Figment(#[from] Box<figment::Error>),
    /// A value parsed but is not usable.
    #[error("invalid setting {key}: {reason}")]
    Invalid {
        /// Dotted setting key.
        key: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

/// Application settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Session persistence.
    #[serde(default)]
    pub session: SessionSettings,
    /// Nearest-location auto-assignment.
    #[serde(default)]
    pub assignment: AssignmentSettings,
    /// AMC contract alerts.
    #[serde(default)]
    pub amc: AmcSettings,
    /// Log output.
    #[serde(default)]
    pub log: LogSettings,
}

/// Where the session blob is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Directory holding the session file.
    pub dir: Utf8PathBuf,
    /// Session file name inside `dir`.
    pub file_name: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            dir: Utf8PathBuf::from(".amcdesk"),
            file_name: DEFAULT_SESSION_FILE.to_owned(),
        }
    }
}

/// Auto-assignment tunables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentSettings {
    /// Neighbours added around the chosen centre.
    pub nearest_limit: usize,
}

impl Default for AssignmentSettings {
    fn default() -> Self {
        Self {
            nearest_limit: DEFAULT_NEAREST_LIMIT,
        }
    }
}

/// AMC alert tunables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmcSettings {
    /// Days before the contract end that count as expiring.
    pub expiring_window_days: u32,
}

impl Default for AmcSettings {
    fn default() -> Self {
        Self {
            expiring_window_days: DEFAULT_EXPIRING_WINDOW_DAYS,
        }
    }
}

/// Log output tunables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSettings {
    /// `tracing-subscriber` filter directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_owned(),
        }
    }
}

impl Settings {
    /// Builds the standard provider stack.
    ///
    /// `config_path` is merged after `amcdesk.toml` and before the
    /// environment.
    #[must_use]
    pub fn figment(config_path: Option<&Utf8Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(LOCAL_CONFIG_FILE));
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path.as_std_path()));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Loads settings using `AMCDESK_CONFIG` as the extra file, if set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when extraction or validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = std::env::var(CONFIG_PATH_ENV).ok().map(Utf8PathBuf::from);
        Self::from_figment(&Self::figment(config_path.as_deref()))
    }

    /// Extracts and validates settings from a provider stack.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when extraction fails or
    /// [`ConfigError::Invalid`] for unusable values.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let settings: Self = figment.extract().map_err(Box::new)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Returns the catalog policy these settings describe.
    #[must_use]
    pub const fn catalog_policy(&self) -> CatalogPolicy {
        CatalogPolicy {
            nearest_limit: self.assignment.nearest_limit,
            expiring_window_days: self.amc.expiring_window_days,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.session.file_name.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "session.file_name",
                reason: "must not be empty",
            });
        }
        if self.assignment.nearest_limit == 0 {
            return Err(ConfigError::Invalid {
                key: "assignment.nearest_limit",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}
