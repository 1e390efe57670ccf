//! Settings for fetching a quote page.
//!
//! Every field has a default matching onvista.de; `from_env` lets a `.env` file or
//! the process environment override them.

use crate::error::ConfigError;
use crate::headers::UserAgentPolicy;
use dotenv::var;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_URL_TEMPLATE: &str = "https://www.onvista.de/aktien/{isin}";
pub const ISIN_PLACEHOLDER: &str = "{isin}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Target URL; `{isin}` is replaced verbatim with the identifier.
    pub url_template: String,
    /// Total GET attempts including the first (default: 3)
    pub max_attempts: u32,
    /// Per-attempt timeout in seconds (default: 15)
    pub timeout_secs: u64,
    /// Wait before retry `n` is `backoff_base * 2^n` (default: 1s)
    pub backoff_base: Duration,
    pub user_agent: UserAgentPolicy,
}

impl FetchConfig {
    /// Reads overrides from `KENNZAHL_URL_TEMPLATE`, `KENNZAHL_MAX_ATTEMPTS`,
    /// `KENNZAHL_TIMEOUT_SECS`, `KENNZAHL_BACKOFF_MS` and `USER_AGENT`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(template) = var("KENNZAHL_URL_TEMPLATE") {
            config.url_template = template;
        }
        if let Some(attempts) = parse_var("KENNZAHL_MAX_ATTEMPTS")? {
            config.max_attempts = attempts;
        }
        if let Some(secs) = parse_var("KENNZAHL_TIMEOUT_SECS")? {
            config.timeout_secs = secs;
        }
        if let Some(ms) = parse_var::<u64>("KENNZAHL_BACKOFF_MS")? {
            config.backoff_base = Duration::from_millis(ms);
        }
        if let Ok(ua) = var("USER_AGENT") {
            config.user_agent = UserAgentPolicy::Fixed(ua);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::NoAttempts);
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if !self.url_template.contains(ISIN_PLACEHOLDER) {
            return Err(ConfigError::MissingPlaceholder(self.url_template.clone()));
        }
        if matches!(&self.user_agent, UserAgentPolicy::Rotate(pool) if pool.is_empty()) {
            return Err(ConfigError::EmptyUserAgentPool);
        }
        Ok(())
    }

    pub fn url_for(&self, identifier: &str) -> String {
        self.url_template.replace(ISIN_PLACEHOLDER, identifier)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            url_template: DEFAULT_URL_TEMPLATE.to_string(),
            max_attempts: 3,
            timeout_secs: 15,
            backoff_base: Duration::from_secs(1),
            user_agent: UserAgentPolicy::default(),
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Result<Option<T>, ConfigError> {
    match var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv {
                var: name.to_string(),
                value,
            }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_config_defaults() {
        let config = FetchConfig::default();
        assert_eq!(config.url_template, "https://www.onvista.de/aktien/{isin}");
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.timeout_secs, 15);
        assert_eq!(config.backoff_base, Duration::from_secs(1));
        assert_eq!(config.user_agent, UserAgentPolicy::chrome());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_url_substitutes_verbatim() {
        let config = FetchConfig::default();
        assert_eq!(
            config.url_for("DE000BASF111"),
            "https://www.onvista.de/aktien/DE000BASF111"
        );
        // no validation or escaping of the identifier
        assert_eq!(
            config.url_for("not an isin"),
            "https://www.onvista.de/aktien/not an isin"
        );
    }

    #[test]
    fn test_fetch_config_validation() {
        let mut config = FetchConfig::default();

        config.max_attempts = 0;
        assert_eq!(config.validate(), Err(ConfigError::NoAttempts));

        config.max_attempts = 1;
        config.timeout_secs = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroTimeout));

        config.timeout_secs = 15;
        config.url_template = "https://www.onvista.de/aktien/".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingPlaceholder(_))
        ));

        config.url_template = DEFAULT_URL_TEMPLATE.to_string();
        config.user_agent = UserAgentPolicy::Rotate(vec![]);
        assert_eq!(config.validate(), Err(ConfigError::EmptyUserAgentPool));
    }

    #[test]
    fn test_parse_var_rejects_garbage() {
        std::env::set_var("KENNZAHL_TEST_PARSE_VAR", "three");
        let parsed = parse_var::<u32>("KENNZAHL_TEST_PARSE_VAR");
        std::env::remove_var("KENNZAHL_TEST_PARSE_VAR");
        assert_eq!(
            parsed,
            Err(ConfigError::InvalidEnv {
                var: "KENNZAHL_TEST_PARSE_VAR".to_string(),
                value: "three".to_string(),
            })
        );
        assert_eq!(parse_var::<u32>("KENNZAHL_TEST_UNSET_VAR"), Ok(None));
    }
}
