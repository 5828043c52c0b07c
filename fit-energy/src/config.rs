use std::{env, path::PathBuf, time::Duration};

use dotenv::dotenv;
use log::debug;

const STORE_URL: &str = "HEALTH_STORE_URL";
const REFRESH_INTERVAL: &str = "FIT_REFRESH_INTERVAL_SECS";
const LOG_CONFIG: &str = "FIT_LOG_CONFIG";

const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 60;
const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("invalid value {value:?} for {name}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub store_url: String,
    pub refresh_interval: Duration,
    pub log_config: PathBuf,
}

impl Config {
    /// Reads the environment, after loading `.env` if there is one.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let store_url = lookup(STORE_URL)
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::Missing(STORE_URL))?;

        let refresh_interval = match lookup(REFRESH_INTERVAL) {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::Invalid {
                        name: REFRESH_INTERVAL,
                        value,
                    })
                }
            },
            None => Duration::from_secs(DEFAULT_REFRESH_INTERVAL_SECS),
        };

        let log_config = lookup(LOG_CONFIG)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_CONFIG));

        debug!("Health store at {}", store_url);
        Ok(Self {
            store_url,
            refresh_interval,
            log_config,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn applies_defaults() {
        let config = Config::from_lookup(lookup_in(&[(STORE_URL, "http://localhost:8080")]));

        assert_eq!(
            config,
            Ok(Config {
                store_url: "http://localhost:8080".to_string(),
                refresh_interval: Duration::from_secs(60),
                log_config: PathBuf::from("log4rs.yml"),
            })
        );
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup_in(&[
            (STORE_URL, "http://health.local/"),
            (REFRESH_INTERVAL, "300"),
            (LOG_CONFIG, "/etc/fit/log4rs.yml"),
        ]))
        .unwrap();

        assert_eq!(config.refresh_interval, Duration::from_secs(300));
        assert_eq!(config.log_config, PathBuf::from("/etc/fit/log4rs.yml"));
    }

    #[test]
    fn store_url_is_required() {
        assert_eq!(
            Config::from_lookup(lookup_in(&[])),
            Err(ConfigError::Missing(STORE_URL))
        );
        assert_eq!(
            Config::from_lookup(lookup_in(&[(STORE_URL, " ")])),
            Err(ConfigError::Missing(STORE_URL))
        );
    }

    #[test]
    fn refresh_interval_must_be_positive() {
        for value in ["0", "-5", "soon"] {
            assert_eq!(
                Config::from_lookup(lookup_in(&[
                    (STORE_URL, "http://localhost:8080"),
                    (REFRESH_INTERVAL, value),
                ])),
                Err(ConfigError::Invalid {
                    name: REFRESH_INTERVAL,
                    value: value.to_string(),
                })
            );
        }
    }
}
