use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("route must not be empty")]
    Empty,
    #[error("no game id in route `{0}`")]
    Malformed(String),
}

/// Why the game-data provider could not produce a payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadFailure {
    #[error("game server unavailable: {0}")]
    Unavailable(String),
    #[error("game server answered with status {status}")]
    Http { status: u16 },
    #[error("game payload could not be decoded: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("browser history is unavailable")]
    Unavailable,
    #[error("failed to push history entry for `{route}`: {reason}")]
    Push { route: String, reason: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
