use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::PollError;

/// Prefix for environment overrides, e.g. `POLLBOX_DATABASE_URL`.
pub const ENV_PREFIX: &str = "POLLBOX_";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub loglevel: String,
    pub min_connections: u32,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    /// Extra attempts made when the first pool connection fails.
    pub connect_retries: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:pollbox.sqlite".to_string(),
            listen_addr: "0.0.0.0:8000".to_string(),
            loglevel: "info".to_string(),
            min_connections: 1,
            max_connections: 10,
            acquire_timeout_secs: 30,
            connect_retries: 3,
        }
    }
}

impl Config {
    /// Defaults, overridden by `POLLBOX_*` environment variables.
    pub fn load() -> Result<Self, PollError> {
        Self::from_figment(
            Figment::from(Serialized::defaults(Config::default())).merge(Env::prefixed(ENV_PREFIX)),
        )
    }

    pub fn from_figment(figment: Figment) -> Result<Self, PollError> {
        let cfg: Config = figment.extract()?;
        Ok(cfg.normalized())
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    // The pool needs at least one connection and `min <= max`.
    fn normalized(mut self) -> Self {
        self.max_connections = self.max_connections.max(1);
        self.min_connections = self.min_connections.min(self.max_connections);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
    }

    #[test]
    fn defaults_match_pool_bounds() {
        let cfg = Config::from_figment(defaults()).unwrap();
        assert_eq!(cfg.min_connections, 1);
        assert_eq!(cfg.max_connections, 10);
        assert_eq!(cfg.acquire_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn later_providers_override_defaults() {
        let cfg = Config::from_figment(
            defaults()
                .merge(("database_url", "sqlite::memory:"))
                .merge(("max_connections", 4)),
        )
        .unwrap();
        assert_eq!(cfg.database_url, "sqlite::memory:");
        assert_eq!(cfg.max_connections, 4);
        assert_eq!(cfg.listen_addr, "0.0.0.0:8000");
    }

    #[test]
    fn pool_bounds_are_clamped() {
        let cfg = Config::from_figment(
            defaults()
                .merge(("min_connections", 8))
                .merge(("max_connections", 0)),
        )
        .unwrap();
        assert_eq!(cfg.max_connections, 1);
        assert_eq!(cfg.min_connections, 1);
    }

    #[test]
    fn environment_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("POLLBOX_DATABASE_URL", "sqlite:jail.sqlite");
            jail.set_env("POLLBOX_MAX_CONNECTIONS", "3");
            let cfg = Config::load().expect("valid environment");
            assert_eq!(cfg.database_url, "sqlite:jail.sqlite");
            assert_eq!(cfg.max_connections, 3);
            assert_eq!(cfg.loglevel, "info");
            Ok(())
        });
    }

    #[test]
    fn unparsable_environment_is_returned_not_panicked() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("POLLBOX_MAX_CONNECTIONS", "many");
            assert!(matches!(Config::load(), Err(PollError::Config(_))));
            Ok(())
        });
    }

    #[test]
    fn malformed_value_is_a_config_error() {
        let err = Config::from_figment(defaults().merge(("max_connections", "many"))).unwrap_err();
        assert!(matches!(err, PollError::Config(_)));
    }
}
