use std::time::Duration;

use thiserror::Error;

/// Environment variable holding the record store API key.
pub const ENV_API_KEY: &str = "AIRTABLE_API_KEY";
/// Environment variable holding the record store base identifier.
pub const ENV_BASE_ID: &str = "AIRTABLE_BASE_ID";
/// Optional override for the inter-record delay, in whole seconds.
pub const ENV_PACE_SECS: &str = "VALIDATOR_PACE_SECS";

const DEFAULT_PACE: Duration = Duration::from_secs(1);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set in environment")]
    MissingVar(&'static str),
    #[error("{0} must be a whole number of seconds")]
    InvalidPace(&'static str),
}

/// Startup configuration, resolved once before any store or network call.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub base_id: String,
    pub pace: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Environment access goes through `lookup` so tests can feed plain maps.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = require(&lookup, ENV_API_KEY)?;
        let base_id = require(&lookup, ENV_BASE_ID)?;

        let pace = match lookup(ENV_PACE_SECS) {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidPace(ENV_PACE_SECS))?;
                Duration::from_secs(secs)
            }
            None => DEFAULT_PACE,
        };

        Ok(Self {
            api_key,
            base_id,
            pace,
        })
    }
}

fn require(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<String, ConfigError> {
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::MissingVar(key))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn from_map(map: &HashMap<String, String>) -> Result<Config, ConfigError> {
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn both_credentials_required() {
        let missing_key = env(&[(ENV_BASE_ID, "appBase1")]);
        assert_eq!(
            from_map(&missing_key).unwrap_err(),
            ConfigError::MissingVar(ENV_API_KEY)
        );

        let missing_base = env(&[(ENV_API_KEY, "key1")]);
        assert_eq!(
            from_map(&missing_base).unwrap_err(),
            ConfigError::MissingVar(ENV_BASE_ID)
        );

        let blank_key = env(&[(ENV_API_KEY, "   "), (ENV_BASE_ID, "appBase1")]);
        assert_eq!(
            from_map(&blank_key).unwrap_err(),
            ConfigError::MissingVar(ENV_API_KEY)
        );
    }

    #[test]
    fn pace_defaults_to_one_second() {
        let config = from_map(&env(&[(ENV_API_KEY, "key1"), (ENV_BASE_ID, "appBase1")])).unwrap();
        assert_eq!(config.api_key, "key1");
        assert_eq!(config.base_id, "appBase1");
        assert_eq!(config.pace, Duration::from_secs(1));
    }

    #[test]
    fn pace_override_is_parsed() {
        let config = from_map(&env(&[
            (ENV_API_KEY, "key1"),
            (ENV_BASE_ID, "appBase1"),
            (ENV_PACE_SECS, "3"),
        ]))
        .unwrap();
        assert_eq!(config.pace, Duration::from_secs(3));
    }

    #[test]
    fn bad_pace_is_a_config_error() {
        let result = from_map(&env(&[
            (ENV_API_KEY, "key1"),
            (ENV_BASE_ID, "appBase1"),
            (ENV_PACE_SECS, "fast"),
        ]));
        assert_eq!(result.unwrap_err(), ConfigError::InvalidPace(ENV_PACE_SECS));
    }
}
