//! Client configuration shared by the web front end and the tester.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::load::RetryPolicy;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Prefix for game-server endpoints.
    pub api_base: String,
    /// Deployment base path stripped from and re-added to browser locations.
    pub router_base: Option<String>,
    pub pin: Option<String>,
    pub disable_user_errors: bool,
    pub max_load_attempts: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: String::from("/api"),
            router_base: None,
            pin: None,
            disable_user_errors: false,
            max_load_attempts: RetryPolicy::DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl ClientConfig {
    /// Parse and validate a JSON config document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or describes an unusable config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns an error when no load attempt would ever be allowed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_load_attempts == 0 {
            return Err(ConfigError::Invalid(String::from(
                "max_load_attempts must be at least 1",
            )));
        }
        Ok(())
    }

    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_load_attempts)
    }

    /// Endpoint serving the snapshot of game `id`.
    #[must_use]
    pub fn game_url(&self, id: &str, pin: Option<&str>) -> String {
        let base = self.api_base.trim_end_matches('/');
        match pin {
            Some(pin) => format!("{base}/game/{id}?pin={pin}"),
            None => format!("{base}/game/{id}"),
        }
    }
}
