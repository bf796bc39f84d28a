//! Railhead client core
//!
//! Platform-agnostic route and history synchronization for the Railhead
//! board-game client. This crate decides which top-level view to show for a
//! browser location, tracks the requested game's load state and keeps the
//! browser history in step, without any UI or browser dependencies.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod history;
pub mod load;
pub mod provider;
pub mod route;
pub mod session;

// Re-export commonly used types
pub use config::ClientConfig;
pub use dispatch::{Frame, NavigationState, RootDispatcher, UserPage, ViewSelection};
pub use error::{ConfigError, HistoryError, LoadFailure, RouteError};
pub use event::{AppEvent, EventQueue};
pub use history::{
    BrowserHistory, HistoryEntry, HistorySynchronizer, InboundUpdate, MemoryHistory,
    MemorySubscription, NavigationSignal, NavigationSink,
};
pub use load::{
    GameLoadState, GameLoadStateMachine, GamePayload, LoadRequest, Resolution, RetryPolicy,
};
pub use provider::{GameDataProvider, QueuedProvider};
pub use route::{
    GameKey, GameMode, Route, RouteMatch, TUTORIAL_GAME_ID, ViewKind, match_route,
    try_match_route,
};
pub use session::{Session, User};
