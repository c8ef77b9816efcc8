//! Application configuration.
//!
//! # Responsibility
//! - Layer defaults, an optional TOML file and `QUICKNOTE_*` environment
//!   variables into one `AppConfig`.
//!
//! # Invariants
//! - Later layers override earlier ones: defaults < file < environment.
//! - A config file that was asked for must exist.

use crate::logging::default_log_level;
use crate::model::route::RouteGuardPolicy;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Prefix of environment variables read into `AppConfig`.
pub const CONFIG_ENV_PREFIX: &str = "QUICKNOTE_";

const DEFAULT_STORAGE_FILE_NAME: &str = "quicknote.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// SQLite file backing local storage.
    pub storage_path: PathBuf,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute directory for rolling logs; logging stays off when unset.
    pub log_dir: Option<PathBuf>,
    pub route_guard: RouteGuardPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_path: std::env::temp_dir().join(DEFAULT_STORAGE_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
            route_guard: RouteGuardPolicy::default(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Figment(Box<figment::Error>),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Figment(err) => write!(f, "invalid configuration: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Figment(err) => Some(err.as_ref()),
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(value: figment::Error) -> Self {
        Self::Figment(Box::new(value))
    }
}

/// Builds the layered provider chain without extracting it.
pub fn config_figment(config_file: Option<&Path>) -> Figment {
    let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));
    if let Some(path) = config_file {
        figment = figment.merge(Toml::file_exact(path));
    }
    figment.merge(Env::prefixed(CONFIG_ENV_PREFIX))
}

/// Loads `AppConfig` from defaults, `config_file` and the environment.
pub fn load_config(config_file: Option<&Path>) -> Result<AppConfig, ConfigError> {
    Ok(config_figment(config_file).extract()?)
}

#[cfg(test)]
mod tests {
    use super::{load_config, AppConfig};
    use crate::model::route::RouteGuardPolicy;
    use figment::Jail;
    use std::path::{Path, PathBuf};

    #[test]
    fn defaults_apply_without_file_or_env() {
        Jail::expect_with(|_jail| {
            let config = load_config(None).expect("defaults should load");
            assert_eq!(config, AppConfig::default());
            assert_eq!(config.route_guard, RouteGuardPolicy::Unguarded);
            assert!(config.log_dir.is_none());
            Ok(())
        });
    }

    #[test]
    fn file_then_env_override_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "quicknote.toml",
                r#"
                storage_path = "/var/lib/quicknote/storage.sqlite3"
                route_guard = "guarded"
                log_level = "warn"
                "#,
            )?;
            jail.set_env("QUICKNOTE_LOG_LEVEL", "error");

            let config = load_config(Some(Path::new("quicknote.toml"))).expect("config loads");
            assert_eq!(
                config.storage_path,
                PathBuf::from("/var/lib/quicknote/storage.sqlite3")
            );
            assert_eq!(config.route_guard, RouteGuardPolicy::Guarded);
            assert_eq!(config.log_level, "error");
            Ok(())
        });
    }

    #[test]
    fn missing_config_file_is_an_error() {
        Jail::expect_with(|_jail| {
            assert!(load_config(Some(Path::new("absent.toml"))).is_err());
            Ok(())
        });
    }

    #[test]
    fn unknown_guard_policy_is_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("QUICKNOTE_ROUTE_GUARD", "sometimes");
            assert!(load_config(None).is_err());
            Ok(())
        });
    }
}
