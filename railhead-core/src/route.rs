//! Route matching.
//!
//! A [`Route`] is the browser location (`pathname + hash + search`) kept as an
//! opaque string. [`match_route`] turns it into a [`RouteMatch`] by running an
//! ordered table of substring patterns; the first pattern that fires decides
//! the view and anything left over falls back to [`ViewKind::Home`].

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::RouteError;

/// Identifier used for tutorial games whose route carries no numeric id.
pub const TUTORIAL_GAME_ID: &str = "tutorial";

static GAME_ID_PATTERN: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"(hotseat|game)/((hs.*_)?\d+)").ok());

/// Browser location used to select a view. Never empty.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Route(String);

impl Route {
    /// Wrap a raw location string.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::Empty`] when `raw` is empty.
    pub fn new(raw: impl Into<String>) -> Result<Self, RouteError> {
        let raw = raw.into();
        if raw.is_empty() {
            Err(RouteError::Empty)
        } else {
            Ok(Self(raw))
        }
    }

    #[must_use]
    pub fn home() -> Self {
        Self(String::from("/"))
    }

    /// Like [`Route::new`], but an empty location becomes the home route.
    #[must_use]
    pub fn or_home(raw: impl Into<String>) -> Self {
        Self::new(raw).unwrap_or_else(|_| Self::home())
    }

    /// Canonical location for a game.
    #[must_use]
    pub fn for_game(key: &GameKey) -> Self {
        match key.mode {
            GameMode::Multiplayer => Self(format!("/game/{}", key.id)),
            GameMode::Hotseat => Self(format!("/hotseat/{}", key.id)),
            GameMode::Tutorial if key.id == TUTORIAL_GAME_ID => Self(String::from("/tutorial")),
            GameMode::Tutorial => Self(format!("/tutorial?game/{}", key.id)),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.0.contains(needle)
    }
}

impl TryFrom<String> for Route {
    type Error = RouteError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Route {
    type Error = RouteError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Route> for String {
    fn from(route: Route) -> Self {
        route.0
    }
}

impl AsRef<str> for Route {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    NewGame,
    Game,
    Signup,
    Login,
    Profile,
    Forgot,
    Reset,
    About,
    Tiles,
    Map,
    Home,
}

impl ViewKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NewGame => "new_game",
            Self::Game => "game",
            Self::Signup => "signup",
            Self::Login => "login",
            Self::Profile => "profile",
            Self::Forgot => "forgot",
            Self::Reset => "reset",
            Self::About => "about",
            Self::Tiles => "tiles",
            Self::Map => "map",
            Self::Home => "home",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    #[default]
    Multiplayer,
    Hotseat,
    Tutorial,
}

impl GameMode {
    /// Games that live only in the browser and never touch the server.
    #[must_use]
    pub const fn is_local(self) -> bool {
        matches!(self, Self::Hotseat | Self::Tutorial)
    }
}

/// Identity of the game a route refers to.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameKey {
    pub id: String,
    pub mode: GameMode,
}

impl GameKey {
    #[must_use]
    pub fn new(id: impl Into<String>, mode: GameMode) -> Self {
        Self {
            id: id.into(),
            mode,
        }
    }
}

impl fmt::Display for GameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:?}", self.id, self.mode)
    }
}

/// Decision of which view to render and with what parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteMatch {
    pub view: ViewKind,
    pub game_id: Option<String>,
    pub mode: GameMode,
}

impl RouteMatch {
    const fn view_only(view: ViewKind) -> Self {
        Self {
            view,
            game_id: None,
            mode: GameMode::Multiplayer,
        }
    }

    #[must_use]
    pub const fn home() -> Self {
        Self::view_only(ViewKind::Home)
    }

    #[must_use]
    pub fn is_game(&self) -> bool {
        self.view == ViewKind::Game
    }

    /// Key of the game this match names, if any.
    #[must_use]
    pub fn game_key(&self) -> Option<GameKey> {
        if !self.is_game() {
            return None;
        }
        let id = match (&self.game_id, self.mode) {
            (Some(id), _) => id.clone(),
            (None, GameMode::Tutorial) => TUTORIAL_GAME_ID.to_string(),
            (None, _) => return None,
        };
        Some(GameKey::new(id, self.mode))
    }
}

struct Pattern {
    test: fn(&str) -> bool,
    build: fn(&str) -> Result<RouteMatch, RouteError>,
}

const fn plain(view: ViewKind) -> Result<RouteMatch, RouteError> {
    Ok(RouteMatch::view_only(view))
}

// Priority order matters: `new_game` also contains `game`.
const PATTERNS: &[Pattern] = &[
    Pattern {
        test: |r| r.contains("new_game"),
        build: |_| plain(ViewKind::NewGame),
    },
    Pattern {
        test: |r| r.contains("game") || r.contains("hotseat") || r.contains("tutorial"),
        build: game_match,
    },
    Pattern {
        test: |r| r.contains("signup"),
        build: |_| plain(ViewKind::Signup),
    },
    Pattern {
        test: |r| r.contains("login"),
        build: |_| plain(ViewKind::Login),
    },
    Pattern {
        test: |r| r.contains("profile"),
        build: |_| plain(ViewKind::Profile),
    },
    Pattern {
        test: |r| r.contains("forgot"),
        build: |_| plain(ViewKind::Forgot),
    },
    Pattern {
        test: |r| r.contains("reset"),
        build: |_| plain(ViewKind::Reset),
    },
    Pattern {
        test: |r| r.contains("about"),
        build: |_| plain(ViewKind::About),
    },
    Pattern {
        test: |r| r.contains("tiles"),
        build: |_| plain(ViewKind::Tiles),
    },
    Pattern {
        test: |r| r.contains("map"),
        build: |_| plain(ViewKind::Map),
    },
];

fn game_match(route: &str) -> Result<RouteMatch, RouteError> {
    let pattern = GAME_ID_PATTERN.as_ref();
    if pattern.is_none() {
        log::error!("game id pattern failed to compile; no game id read from `{route}`");
    }
    let captures = pattern.and_then(|pattern| pattern.captures(route));
    let tutorial = route.contains("tutorial");
    let game_id = captures
        .as_ref()
        .and_then(|caps| caps.get(2))
        .map(|m| m.as_str().to_string());

    let mode = if tutorial {
        GameMode::Tutorial
    } else {
        match captures.as_ref().and_then(|caps| caps.get(1)).map(|m| m.as_str()) {
            Some("game") => GameMode::Multiplayer,
            Some(_) => GameMode::Hotseat,
            None => return Err(RouteError::Malformed(route.to_string())),
        }
    };

    Ok(RouteMatch {
        view: ViewKind::Game,
        game_id,
        mode,
    })
}

/// Run the ordered pattern table against `route`.
///
/// # Errors
///
/// Returns [`RouteError::Malformed`] when a parameterised view claims the
/// route but its parameters cannot be extracted.
pub fn try_match_route(route: &Route) -> Result<RouteMatch, RouteError> {
    let raw = route.as_str();
    PATTERNS
        .iter()
        .find(|pattern| (pattern.test)(raw))
        .map_or_else(|| Ok(RouteMatch::home()), |pattern| (pattern.build)(raw))
}

/// Total version of [`try_match_route`]: malformed routes render Home.
#[must_use]
pub fn match_route(route: &Route) -> RouteMatch {
    try_match_route(route).unwrap_or_else(|err| {
        log::debug!("route {route} treated as home: {err}");
        RouteMatch::home()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched(raw: &str) -> RouteMatch {
        match_route(&Route::new(raw).expect("non-empty route"))
    }

    #[test]
    fn multiplayer_game_route_extracts_id() {
        assert_eq!(
            matched("/game/42"),
            RouteMatch {
                view: ViewKind::Game,
                game_id: Some(String::from("42")),
                mode: GameMode::Multiplayer,
            }
        );
    }

    #[test]
    fn hotseat_route_keeps_prefixed_id() {
        let m = matched("/hotseat/hs_abc_7");
        assert_eq!(m.view, ViewKind::Game);
        assert_eq!(m.game_id.as_deref(), Some("hs_abc_7"));
        assert_eq!(m.mode, GameMode::Hotseat);
    }

    #[test]
    fn tutorial_wins_over_captured_prefix() {
        let m = matched("/game/12?tutorial");
        assert_eq!(m.mode, GameMode::Tutorial);
        assert_eq!(m.game_id.as_deref(), Some("12"));

        let bare = matched("/tutorial");
        assert_eq!(bare.view, ViewKind::Game);
        assert_eq!(bare.mode, GameMode::Tutorial);
        assert_eq!(bare.game_id, None);
        assert_eq!(
            bare.game_key(),
            Some(GameKey::new(TUTORIAL_GAME_ID, GameMode::Tutorial))
        );
    }

    #[test]
    fn new_game_outranks_game() {
        assert_eq!(matched("/new_game").view, ViewKind::NewGame);
    }

    #[test]
    fn static_pages_follow_priority_order() {
        assert_eq!(matched("/signup").view, ViewKind::Signup);
        assert_eq!(matched("/login").view, ViewKind::Login);
        assert_eq!(matched("/profile").view, ViewKind::Profile);
        assert_eq!(matched("/forgot").view, ViewKind::Forgot);
        assert_eq!(matched("/reset?hash=abc").view, ViewKind::Reset);
        assert_eq!(matched("/about").view, ViewKind::About);
        assert_eq!(matched("/tiles/1889").view, ViewKind::Tiles);
        assert_eq!(matched("/map/1830").view, ViewKind::Map);
        // signup is tested before login
        assert_eq!(matched("/signup?then=login").view, ViewKind::Signup);
    }

    #[test]
    fn unmatched_and_malformed_routes_render_home() {
        assert_eq!(matched("/unknown/xyz"), RouteMatch::home());
        assert_eq!(matched("/"), RouteMatch::home());
        assert_eq!(matched("/game/abc"), RouteMatch::home());

        let malformed = try_match_route(&Route::new("/game/abc").expect("route"));
        assert!(matches!(malformed, Err(RouteError::Malformed(_))));
    }

    #[test]
    fn game_id_pattern_compiles() {
        assert!(GAME_ID_PATTERN.is_some());
    }

    #[test]
    fn route_rejects_empty_strings() {
        assert_eq!(Route::new(""), Err(RouteError::Empty));
        assert!(serde_json::from_str::<Route>("\"\"").is_err());
        assert_eq!(Route::or_home(""), Route::home());
        assert_eq!(Route::or_home("/about").as_str(), "/about");
    }

    #[test]
    fn canonical_game_routes_match_back_to_their_key() {
        for key in [
            GameKey::new("42", GameMode::Multiplayer),
            GameKey::new("hs_abc_3", GameMode::Hotseat),
            GameKey::new(TUTORIAL_GAME_ID, GameMode::Tutorial),
        ] {
            assert_eq!(match_route(&Route::for_game(&key)).game_key(), Some(key));
        }
    }
}
