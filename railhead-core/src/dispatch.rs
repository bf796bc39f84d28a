//! Root view selection.
//!
//! [`RootDispatcher::apply`] folds events into the [`NavigationState`] in
//! arrival order and never touches history. [`RootDispatcher::dispatch`] is
//! the render path: it matches the route, drives the game loader, picks a
//! [`ViewSelection`] and finally reconciles the browser history.

use serde::Serialize;

use crate::event::AppEvent;
use crate::history::{BrowserHistory, HistorySynchronizer, NavigationSink};
use crate::load::{GameLoadState, GameLoadStateMachine, GamePayload, Resolution, RetryPolicy};
use crate::provider::GameDataProvider;
use crate::route::{GameKey, Route, RouteMatch, ViewKind, match_route};
use crate::session::{Session, User};

/// Route and cached game owned by the root view.
#[derive(Clone, Debug)]
pub struct NavigationState {
    route: Route,
    games: GameLoadStateMachine,
}

impl NavigationState {
    #[must_use]
    pub fn new(route: Route) -> Self {
        Self {
            route,
            games: GameLoadStateMachine::new(),
        }
    }

    #[must_use]
    pub const fn route(&self) -> &Route {
        &self.route
    }

    #[must_use]
    pub const fn games(&self) -> &GameLoadStateMachine {
        &self.games
    }

    #[must_use]
    pub const fn game_state(&self) -> &GameLoadState {
        self.games.state()
    }

    fn set_route(&mut self, route: Route, payload: Option<GamePayload>) {
        if route != self.route {
            log::debug!("route {} -> {route}", self.route);
        }
        self.route = route;
        let key = match_route(&self.route).game_key();
        // Leaving a game discards it now, so a late result for it is stale.
        self.games.retain(key.as_ref());
        let Some(payload) = payload else {
            return;
        };
        match key {
            Some(key) => self.games.restore(key, payload),
            None => log::debug!("dropping game state carried to {}", self.route),
        }
    }
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new(Route::home())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UserPage {
    Signup,
    Login,
    Profile,
}

/// What the rendering layer should show.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ViewSelection {
    CreateGame,
    Game { key: GameKey, user: Option<User> },
    LoadingGame { key: GameKey },
    /// Every allowed attempt failed; `reason` describes the last failure.
    GameUnavailable {
        key: GameKey,
        reason: Option<String>,
    },
    User { page: UserPage, user: Option<User> },
    Forgot { user: Option<User> },
    Reset { user: Option<User> },
    About,
    Tiles { route: Route },
    Map { route: Route },
    Home { user: Option<User> },
}

impl ViewSelection {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::CreateGame => "create_game",
            Self::Game { .. } => "game",
            Self::LoadingGame { .. } => "loading_game",
            Self::GameUnavailable { .. } => "game_unavailable",
            Self::User { page, .. } => match page {
                UserPage::Signup => "signup",
                UserPage::Login => "login",
                UserPage::Profile => "profile",
            },
            Self::Forgot { .. } => "forgot",
            Self::Reset { .. } => "reset",
            Self::About => "about",
            Self::Tiles { .. } => "tiles",
            Self::Map { .. } => "map",
            Self::Home { .. } => "home",
        }
    }
}

/// Result of one render-path invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub view: ViewSelection,
    pub route_match: RouteMatch,
    pub history_pushed: bool,
}

enum GameStep {
    Request,
    Reenter,
    Wait,
    Show,
}

pub struct RootDispatcher<H: BrowserHistory, P: GameDataProvider> {
    history: HistorySynchronizer<H>,
    provider: P,
    retry: RetryPolicy,
    sink: NavigationSink,
}

impl<H: BrowserHistory, P: GameDataProvider> RootDispatcher<H, P> {
    /// `sink` receives back/forward signals once the history listener is
    /// installed; it should feed them back into [`Self::apply`].
    pub fn new(history: H, provider: P, retry: RetryPolicy, sink: NavigationSink) -> Self {
        Self {
            history: HistorySynchronizer::new(history),
            provider,
            retry,
            sink,
        }
    }

    pub const fn history(&self) -> &HistorySynchronizer<H> {
        &self.history
    }

    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Install the navigation listener if needed and record the location.
    pub fn ensure_initialized(&mut self, state: &mut NavigationState) {
        if self.history.is_installed() {
            return;
        }
        match self.history.initialize(self.sink.clone()) {
            Ok(Some(route)) => state.route = route,
            Ok(None) => {}
            Err(err) => log::warn!("navigation listener unavailable: {err}"),
        }
    }

    /// Fold one event into `state`. Returns whether a render is needed.
    pub fn apply(&mut self, state: &mut NavigationState, event: AppEvent) -> bool {
        log::debug!("applying {} event", event.label());
        match event {
            AppEvent::NavigationOccurred(signal) => {
                let update = self.history.inbound(signal);
                match update.route {
                    Some(route) => state.set_route(route, update.payload),
                    None => log::debug!("ignoring navigation to an empty location"),
                }
                true
            }
            AppEvent::LoadResolved { key, outcome } => {
                !matches!(state.games.resolve(&key, outcome), Resolution::Stale)
            }
            AppEvent::Navigate { route, payload } => {
                state.set_route(route, payload);
                true
            }
            AppEvent::RenderRequested => true,
        }
    }

    /// Render path: pick the view for `state` and reconcile history.
    pub fn dispatch(&mut self, state: &mut NavigationState, session: &Session) -> Frame {
        self.ensure_initialized(state);

        let route_match = match_route(&state.route);
        let key = route_match.game_key();
        state.games.retain(key.as_ref());

        let user = session.user.clone();
        let view = match (route_match.view, key) {
            (ViewKind::NewGame, _) => ViewSelection::CreateGame,
            (ViewKind::Game, Some(key)) => self.drive_game(state, key, session),
            (ViewKind::Signup, _) => ViewSelection::User {
                page: UserPage::Signup,
                user,
            },
            (ViewKind::Login, _) => ViewSelection::User {
                page: UserPage::Login,
                user,
            },
            (ViewKind::Profile, _) => ViewSelection::User {
                page: UserPage::Profile,
                user,
            },
            (ViewKind::Forgot, _) => ViewSelection::Forgot { user },
            (ViewKind::Reset, _) => ViewSelection::Reset { user },
            (ViewKind::About, _) => ViewSelection::About,
            (ViewKind::Tiles, _) => ViewSelection::Tiles {
                route: state.route.clone(),
            },
            (ViewKind::Map, _) => ViewSelection::Map {
                route: state.route.clone(),
            },
            (ViewKind::Game | ViewKind::Home, _) => ViewSelection::Home { user },
        };

        let history_pushed = self
            .history
            .outbound(&state.route, state.games.state().payload())
            .unwrap_or_else(|err| {
                log::warn!("history push failed: {err}");
                false
            });

        Frame {
            view,
            route_match,
            history_pushed,
        }
    }

    fn drive_game(
        &mut self,
        state: &mut NavigationState,
        key: GameKey,
        session: &Session,
    ) -> ViewSelection {
        let attempts = state.games.attempts_for(&key);
        let step = match state.games.state() {
            GameLoadState::Absent => GameStep::Request,
            GameLoadState::Loading { .. } => GameStep::Wait,
            GameLoadState::Loaded { payload, .. } if payload.needs_reentry() => GameStep::Reenter,
            GameLoadState::Loaded { payload, .. } if payload.loaded => GameStep::Show,
            GameLoadState::Loaded { .. } => GameStep::Wait,
        };

        let pin = session.pin.as_deref();
        match step {
            GameStep::Request | GameStep::Reenter if !self.retry.allows(attempts) => {
                log::warn!("giving up on game {key} after {attempts} attempts");
                let reason = state.games.last_failure(&key).map(ToString::to_string);
                ViewSelection::GameUnavailable { key, reason }
            }
            GameStep::Request => {
                if let Some(request) = state.games.request(&key, pin) {
                    self.provider.request(request);
                }
                ViewSelection::LoadingGame { key }
            }
            GameStep::Reenter => {
                if let Some(request) = state.games.reenter(pin) {
                    self.provider.request(request);
                }
                ViewSelection::LoadingGame { key }
            }
            GameStep::Wait => ViewSelection::LoadingGame { key },
            GameStep::Show => ViewSelection::Game {
                key,
                user: session.user.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadFailure;
    use crate::event::EventQueue;
    use crate::history::MemoryHistory;
    use crate::provider::QueuedProvider;
    use crate::route::GameMode;

    struct Harness {
        history: MemoryHistory,
        provider: QueuedProvider,
        queue: EventQueue,
        dispatcher: RootDispatcher<MemoryHistory, QueuedProvider>,
        state: NavigationState,
    }

    impl Harness {
        fn at(location: &str) -> Self {
            Self::with_retry(location, RetryPolicy::default())
        }

        fn with_retry(location: &str, retry: RetryPolicy) -> Self {
            let history = MemoryHistory::new(Route::new(location).expect("route"));
            let provider = QueuedProvider::new();
            let queue = EventQueue::new();
            let dispatcher = RootDispatcher::new(
                history.clone(),
                provider.clone(),
                retry,
                queue.navigation_sink(),
            );
            Self {
                history,
                provider,
                queue,
                dispatcher,
                state: NavigationState::default(),
            }
        }

        fn render(&mut self) -> Frame {
            while let Some(event) = self.queue.pop() {
                self.dispatcher.apply(&mut self.state, event);
            }
            self.dispatcher.dispatch(&mut self.state, &Session::default())
        }

        fn resolve(&mut self, id: &str, outcome: Result<GamePayload, LoadFailure>) -> bool {
            let request = self.provider.take_for(id).expect("pending request");
            self.dispatcher.apply(
                &mut self.state,
                AppEvent::LoadResolved {
                    key: request.key,
                    outcome,
                },
            )
        }

        fn navigate(&mut self, location: &str) {
            self.queue.push(AppEvent::Navigate {
                route: Route::new(location).expect("route"),
                payload: None,
            });
        }
    }

    fn key(id: &str) -> GameKey {
        GameKey::new(id, GameMode::Multiplayer)
    }

    #[test]
    fn first_dispatch_records_location_without_pushing() {
        let mut harness = Harness::at("/about");
        let frame = harness.render();
        assert_eq!(frame.view, ViewSelection::About);
        assert!(!frame.history_pushed);
        assert_eq!(harness.state.route().as_str(), "/about");
        assert_eq!(harness.history.len(), 1);
        assert_eq!(harness.history.listener_count(), 1);
    }

    #[test]
    fn game_route_requests_once_then_shows_game() {
        let mut harness = Harness::at("/game/7");
        assert_eq!(
            harness.render().view,
            ViewSelection::LoadingGame { key: key("7") }
        );
        assert_eq!(harness.render().view, ViewSelection::LoadingGame { key: key("7") });
        assert_eq!(harness.provider.issued(), 1);
        assert_eq!(
            harness.state.game_state(),
            &GameLoadState::Loading { key: key("7") }
        );

        assert!(harness.resolve("7", Ok(GamePayload::ready())));
        assert_eq!(
            harness.render().view,
            ViewSelection::Game {
                key: key("7"),
                user: None
            }
        );
        assert_eq!(harness.provider.issued(), 1);
    }

    #[test]
    fn navigating_away_pushes_history_with_game_payload() {
        let mut harness = Harness::at("/game/7");
        harness.render();
        harness.resolve("7", Ok(GamePayload::ready()));
        harness.render();

        harness.navigate("/about");
        let frame = harness.render();
        assert!(frame.history_pushed);
        assert_eq!(harness.state.game_state(), &GameLoadState::Absent);
        assert_eq!(harness.history.location(), "/about");
        assert!(!harness.render().history_pushed);
    }

    #[test]
    fn back_navigation_restores_payload_without_request() {
        let mut harness = Harness::at("/");
        harness.render();
        let payload = GamePayload::ready().with_field("title", "1889");
        harness.queue.push(AppEvent::Navigate {
            route: Route::new("/game/7").expect("route"),
            payload: Some(payload.clone()),
        });
        let entered = harness.render();
        assert!(matches!(entered.view, ViewSelection::Game { .. }));
        assert!(entered.history_pushed);
        harness.navigate("/about");
        harness.render();

        assert!(harness.history.back());
        let frame = harness.render();
        assert!(matches!(frame.view, ViewSelection::Game { .. }));
        assert!(!frame.history_pushed);
        assert_eq!(harness.provider.issued(), 0);
        assert_eq!(harness.state.game_state().payload(), Some(&payload));
    }

    #[test]
    fn back_to_entry_without_state_loads_again() {
        let mut harness = Harness::at("/game/7");
        harness.render();
        harness.resolve("7", Ok(GamePayload::ready()));
        harness.navigate("/about");
        harness.render();

        assert!(harness.history.back());
        assert_eq!(
            harness.render().view,
            ViewSelection::LoadingGame { key: key("7") }
        );
        assert_eq!(harness.provider.issued(), 2);
    }

    #[test]
    fn stale_resolution_is_ignored() {
        let mut harness = Harness::at("/game/1");
        harness.render();
        harness.navigate("/game/2");
        harness.render();

        assert!(!harness.resolve("1", Ok(GamePayload::ready())));
        assert_eq!(
            harness.state.game_state(),
            &GameLoadState::Loading { key: key("2") }
        );
        assert_eq!(harness.render().view, ViewSelection::LoadingGame { key: key("2") });
    }

    #[test]
    fn failures_retry_until_policy_is_exhausted() {
        let mut harness = Harness::with_retry("/game/4", RetryPolicy::new(2));
        harness.render();
        harness.resolve("4", Err(LoadFailure::Http { status: 500 }));
        assert_eq!(harness.render().view, ViewSelection::LoadingGame { key: key("4") });
        assert_eq!(harness.provider.issued(), 2);

        harness.resolve("4", Err(LoadFailure::Http { status: 500 }));
        assert_eq!(
            harness.render().view,
            ViewSelection::GameUnavailable {
                key: key("4"),
                reason: Some(String::from("game server answered with status 500")),
            }
        );
        assert_eq!(harness.provider.issued(), 2);
    }

    #[test]
    fn unentered_snapshot_is_requested_again() {
        let mut harness = Harness::at("/hotseat/hs_abc_3");
        harness.render();
        harness.resolve("hs_abc_3", Ok(GamePayload::default()));
        let frame = harness.render();
        assert!(matches!(frame.view, ViewSelection::LoadingGame { .. }));
        assert_eq!(harness.provider.issued(), 2);

        let populating = GamePayload {
            loading: true,
            ..GamePayload::default()
        };
        harness.resolve("hs_abc_3", Ok(populating));
        assert!(matches!(harness.render().view, ViewSelection::LoadingGame { .. }));
        assert_eq!(harness.provider.issued(), 2);
    }

    #[test]
    fn static_views_carry_session_user() {
        let mut harness = Harness::at("/login");
        let session = Session::default().with_user(User {
            id: 1,
            name: String::from("tobymao"),
        });
        let frame = harness.dispatcher.dispatch(&mut harness.state, &session);
        assert_eq!(
            frame.view,
            ViewSelection::User {
                page: UserPage::Login,
                user: session.user.clone()
            }
        );
        assert_eq!(frame.view.label(), "login");
    }
}
