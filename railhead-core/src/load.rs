//! Lifecycle of the game a route asks for: absent, loading, loaded.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::LoadFailure;
use crate::route::GameKey;

/// Server-defined game snapshot.
///
/// Only the `loaded`/`loading` flags are interpreted here; every other field
/// is carried verbatim so it survives a trip through a history entry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GamePayload {
    #[serde(default)]
    pub loaded: bool,
    #[serde(default)]
    pub loading: bool,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl GamePayload {
    /// A fully received snapshot with no extra fields.
    #[must_use]
    pub fn ready() -> Self {
        Self {
            loaded: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Decode a history state value. `null` and `{}` carry no game.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) if map.is_empty() => None,
            Value::Object(_) => serde_json::from_value(value)
                .map_err(|err| log::warn!("ignoring undecodable history state: {err}"))
                .ok(),
            _ => None,
        }
    }

    #[must_use]
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Snapshot received but neither populated nor still populating.
    #[must_use]
    pub const fn needs_reentry(&self) -> bool {
        !self.loaded && !self.loading
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum GameLoadState {
    #[default]
    Absent,
    Loading {
        key: GameKey,
    },
    Loaded {
        key: GameKey,
        payload: GamePayload,
    },
}

impl GameLoadState {
    #[must_use]
    pub const fn key(&self) -> Option<&GameKey> {
        match self {
            Self::Absent => None,
            Self::Loading { key } | Self::Loaded { key, .. } => Some(key),
        }
    }

    #[must_use]
    pub const fn payload(&self) -> Option<&GamePayload> {
        match self {
            Self::Loaded { payload, .. } => Some(payload),
            Self::Absent | Self::Loading { .. } => None,
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Loading { .. } => "loading",
            Self::Loaded { .. } => "loaded",
        }
    }
}

/// One request handed to the game-data provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadRequest {
    pub key: GameKey,
    pub pin: Option<String>,
}

/// What a provider resolution did to the machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    Loaded,
    Failed(LoadFailure),
    /// The resolution named a game that is no longer current.
    Stale,
}

/// Bounds how many times one game is requested before giving up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    pub max_attempts: u32,
}

impl RetryPolicy {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

    #[must_use]
    pub const fn new(max_attempts: u32) -> Self {
        Self { max_attempts }
    }

    /// Single attempt, no retries.
    #[must_use]
    pub const fn once() -> Self {
        Self::new(1)
    }

    #[must_use]
    pub const fn allows(self, attempts_made: u32) -> bool {
        attempts_made < self.max_attempts
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_ATTEMPTS)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Attempts {
    key: GameKey,
    count: u32,
    last_failure: Option<LoadFailure>,
}

#[derive(Clone, Debug, Default)]
pub struct GameLoadStateMachine {
    state: GameLoadState,
    attempts: Option<Attempts>,
}

impl GameLoadStateMachine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> &GameLoadState {
        &self.state
    }

    /// Requests already issued for `key` since it last loaded successfully.
    #[must_use]
    pub fn attempts_for(&self, key: &GameKey) -> u32 {
        self.attempts
            .as_ref()
            .filter(|attempts| &attempts.key == key)
            .map_or(0, |attempts| attempts.count)
    }

    #[must_use]
    pub fn last_failure(&self, key: &GameKey) -> Option<&LoadFailure> {
        self.attempts
            .as_ref()
            .filter(|attempts| &attempts.key == key)
            .and_then(|attempts| attempts.last_failure.as_ref())
    }

    /// Move to `Loading` for `key` and hand back the request to issue.
    ///
    /// Returns `None` when `key` is already loading or loaded, so repeated
    /// renders never issue duplicate requests.
    pub fn request(&mut self, key: &GameKey, pin: Option<&str>) -> Option<LoadRequest> {
        if self.state.key() == Some(key) {
            return None;
        }
        if let Some(previous) = self.state.key() {
            log::debug!("discarding {previous} in favour of {key}");
        }
        Some(self.begin(key.clone(), pin))
    }

    /// Re-request a loaded snapshot that was never entered.
    pub fn reenter(&mut self, pin: Option<&str>) -> Option<LoadRequest> {
        let key = match &self.state {
            GameLoadState::Loaded { key, payload } if payload.needs_reentry() => key.clone(),
            _ => return None,
        };
        Some(self.begin(key, pin))
    }

    fn begin(&mut self, key: GameKey, pin: Option<&str>) -> LoadRequest {
        match self.attempts.as_mut() {
            Some(attempts) if attempts.key == key => attempts.count += 1,
            _ => {
                self.attempts = Some(Attempts {
                    key: key.clone(),
                    count: 1,
                    last_failure: None,
                });
            }
        }
        log::debug!("loading game {key}");
        self.state = GameLoadState::Loading { key: key.clone() };
        LoadRequest {
            key,
            pin: pin.map(str::to_string),
        }
    }

    /// Feed a provider completion into the machine.
    pub fn resolve(
        &mut self,
        key: &GameKey,
        outcome: Result<GamePayload, LoadFailure>,
    ) -> Resolution {
        if self.state.key() != Some(key) {
            log::debug!("ignoring stale resolution for {key}");
            return Resolution::Stale;
        }
        match outcome {
            Ok(payload) => {
                if payload.loaded {
                    self.attempts = None;
                }
                self.state = GameLoadState::Loaded {
                    key: key.clone(),
                    payload,
                };
                Resolution::Loaded
            }
            Err(failure) => {
                log::warn!("loading game {key} failed: {failure}");
                if let Some(attempts) = self.attempts.as_mut().filter(|a| &a.key == key) {
                    attempts.last_failure = Some(failure.clone());
                }
                self.state = GameLoadState::Absent;
                Resolution::Failed(failure)
            }
        }
    }

    /// Drop state that belongs to a game the route no longer names.
    ///
    /// Returns `true` when something was discarded.
    pub fn retain(&mut self, current: Option<&GameKey>) -> bool {
        if self
            .attempts
            .as_ref()
            .is_some_and(|attempts| Some(&attempts.key) != current)
        {
            self.attempts = None;
        }
        match self.state.key() {
            Some(key) if Some(key) != current => {
                log::debug!("route left game {key}");
                self.state = GameLoadState::Absent;
                true
            }
            _ => false,
        }
    }

    /// Adopt a snapshot carried by a history entry without requesting it.
    pub fn restore(&mut self, key: GameKey, payload: GamePayload) {
        log::debug!("restoring game {key} from history");
        self.state = GameLoadState::Loaded { key, payload };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::GameMode;
    use serde_json::json;

    fn key(id: &str) -> GameKey {
        GameKey::new(id, GameMode::Multiplayer)
    }

    #[test]
    fn request_then_resolve_reaches_loaded() {
        let mut machine = GameLoadStateMachine::new();
        let request = machine.request(&key("7"), Some("abc")).expect("first request");
        assert_eq!(request.key, key("7"));
        assert_eq!(request.pin.as_deref(), Some("abc"));
        assert_eq!(machine.state(), &GameLoadState::Loading { key: key("7") });

        assert_eq!(
            machine.resolve(&key("7"), Ok(GamePayload::ready())),
            Resolution::Loaded
        );
        assert_eq!(machine.state().payload(), Some(&GamePayload::ready()));
        assert_eq!(machine.attempts_for(&key("7")), 0);
    }

    #[test]
    fn duplicate_requests_are_suppressed() {
        let mut machine = GameLoadStateMachine::new();
        assert!(machine.request(&key("7"), None).is_some());
        assert!(machine.request(&key("7"), None).is_none());
        machine.resolve(&key("7"), Ok(GamePayload::ready()));
        assert!(machine.request(&key("7"), None).is_none());
    }

    #[test]
    fn resolution_for_replaced_game_is_stale() {
        let mut machine = GameLoadStateMachine::new();
        machine.request(&key("1"), None);
        machine.retain(Some(&key("2")));
        machine.request(&key("2"), None);

        assert_eq!(
            machine.resolve(&key("1"), Ok(GamePayload::ready())),
            Resolution::Stale
        );
        assert_eq!(machine.state(), &GameLoadState::Loading { key: key("2") });
    }

    #[test]
    fn resolve_without_request_never_loads() {
        let mut machine = GameLoadStateMachine::new();
        assert_eq!(
            machine.resolve(&key("3"), Ok(GamePayload::ready())),
            Resolution::Stale
        );
        assert_eq!(machine.state(), &GameLoadState::Absent);
    }

    #[test]
    fn failure_returns_to_absent_and_counts_attempts() {
        let mut machine = GameLoadStateMachine::new();
        machine.request(&key("9"), None);
        let failure = LoadFailure::Http { status: 503 };
        assert_eq!(
            machine.resolve(&key("9"), Err(failure.clone())),
            Resolution::Failed(failure.clone())
        );
        assert_eq!(machine.state(), &GameLoadState::Absent);
        assert_eq!(machine.attempts_for(&key("9")), 1);
        assert_eq!(machine.last_failure(&key("9")), Some(&failure));

        machine.request(&key("9"), None);
        assert_eq!(machine.attempts_for(&key("9")), 2);
        assert_eq!(machine.attempts_for(&key("10")), 0);
    }

    #[test]
    fn retain_discards_other_games_and_their_attempts() {
        let mut machine = GameLoadStateMachine::new();
        machine.restore(key("4"), GamePayload::ready());
        assert!(!machine.retain(Some(&key("4"))));
        assert!(machine.retain(None));
        assert_eq!(machine.state(), &GameLoadState::Absent);

        machine.request(&key("5"), None);
        machine.resolve(&key("5"), Err(LoadFailure::Decode(String::from("bad"))));
        machine.retain(None);
        assert_eq!(machine.attempts_for(&key("5")), 0);
    }

    #[test]
    fn unentered_snapshot_is_requested_again() {
        let mut machine = GameLoadStateMachine::new();
        machine.request(&key("8"), None);
        machine.resolve(&key("8"), Ok(GamePayload::default()));
        assert!(machine.state().payload().is_some_and(GamePayload::needs_reentry));

        let again = machine.reenter(None).expect("re-entry request");
        assert_eq!(again.key, key("8"));
        assert_eq!(machine.attempts_for(&key("8")), 2);
        assert!(machine.reenter(None).is_none());
    }

    #[test]
    fn payload_keeps_unknown_fields() {
        let value = json!({"loaded": true, "title": "1889", "players": [1, 2]});
        let payload = GamePayload::from_value(value.clone()).expect("payload");
        assert!(payload.loaded);
        assert!(!payload.loading);
        assert_eq!(payload.fields.get("title"), Some(&json!("1889")));
        assert_eq!(payload.to_value(), json!({"loaded": true, "loading": false, "title": "1889", "players": [1, 2]}));
    }

    #[test]
    fn empty_history_states_carry_no_payload() {
        assert_eq!(GamePayload::from_value(Value::Null), None);
        assert_eq!(GamePayload::from_value(json!({})), None);
        assert_eq!(GamePayload::from_value(json!("text")), None);
        assert_eq!(GamePayload::from_value(json!({"loaded": "yes"})), None);
    }

    #[test]
    fn retry_policy_bounds_attempts() {
        let policy = RetryPolicy::default();
        assert!(policy.allows(0));
        assert!(policy.allows(2));
        assert!(!policy.allows(3));
        assert!(!RetryPolicy::once().allows(1));
    }
}
