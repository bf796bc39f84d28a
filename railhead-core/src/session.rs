use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;

/// Signed-in player as far as view selection cares.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
}

/// Per-render context supplied by the user/session layer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: Option<User>,
    /// Asset pin forwarded with game load requests.
    pub pin: Option<String>,
    pub disable_user_errors: bool,
}

impl Session {
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            user: None,
            pin: config.pin.clone(),
            disable_user_errors: config.disable_user_errors,
        }
    }

    #[must_use]
    pub fn with_user(mut self, user: User) -> Self {
        self.user = Some(user);
        self
    }
}
