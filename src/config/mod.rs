mod basic;
mod database;

pub use basic::BasicConfig;
pub use database::DatabaseConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, sync::LazyLock};

/// Application configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Core server configuration (see `basic` table in config.toml).
    #[serde(default)]
    pub basic: BasicConfig,

    /// SQLite pool settings (see `database` table in config.toml).
    #[serde(default)]
    pub database: DatabaseConfig,
}

const DEFAULT_CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "ITEMDESK_";

impl Config {
    /// Builds a Figment that merges defaults, `config.toml` if present, then `ITEMDESK_*`
    /// environment variables (`__` separates tables, e.g. `ITEMDESK_BASIC__DATABASE_URL`).
    pub fn figment() -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        if PathBuf::from(DEFAULT_CONFIG_FILE).is_file() {
            figment = figment.merge(Toml::file(DEFAULT_CONFIG_FILE));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Loads configuration from every source and rejects values the server cannot run with.
    pub fn load() -> Result<Self, figment::Error> {
        let cfg: Self = Self::figment().extract()?;
        if cfg.basic.database_url.trim().is_empty() {
            return Err(figment::Error::from(
                "basic.database_url must be set and non-empty".to_string(),
            ));
        }
        if cfg.database.max_connections == 0 {
            return Err(figment::Error::from(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        Ok(cfg)
    }

    fn from_sources() -> Self {
        Self::load().unwrap_or_else(|err| panic!("failed to load configuration: {err}"))
    }
}

/// Global, lazily-initialized configuration instance.
pub static CONFIG: LazyLock<Config> = LazyLock::new(Config::from_sources);
