//! Bridge between the internal route and the browser navigation history.
//!
//! Inbound, a back/forward navigation arrives as a [`NavigationSignal`] on the
//! sink handed to [`HistorySynchronizer::initialize`]. Outbound, every render
//! calls [`HistorySynchronizer::outbound`], which pushes an entry only when the
//! computed route differs from the visible location. The inbound path never
//! pushes.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::error::HistoryError;
use crate::load::GamePayload;
use crate::route::Route;

/// A back/forward navigation reported by the browser.
#[derive(Clone, Debug, PartialEq)]
pub struct NavigationSignal {
    pub state: Option<GamePayload>,
    pub location: String,
}

pub type NavigationSink = Rc<dyn Fn(NavigationSignal)>;

/// Browser primitives the synchronizer needs.
pub trait BrowserHistory {
    /// Keeps the navigation listener alive; dropping it unsubscribes.
    type Subscription;

    /// Current `pathname + hash + search`.
    fn location(&self) -> String;

    /// Push `(state, route)` as a new entry and make `route` the visible location.
    ///
    /// # Errors
    ///
    /// Returns an error if the browser refuses the entry.
    fn push_entry(&self, state: Option<&GamePayload>, route: &Route) -> Result<(), HistoryError>;

    /// Register `sink` for back/forward navigation.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be installed.
    fn subscribe(&self, sink: NavigationSink) -> Result<Self::Subscription, HistoryError>;
}

/// Route and payload to apply after an inbound navigation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InboundUpdate {
    pub route: Option<Route>,
    pub payload: Option<GamePayload>,
}

pub struct HistorySynchronizer<H: BrowserHistory> {
    history: H,
    subscription: Option<H::Subscription>,
}

impl<H: BrowserHistory> HistorySynchronizer<H> {
    pub const fn new(history: H) -> Self {
        Self {
            history,
            subscription: None,
        }
    }

    pub const fn history(&self) -> &H {
        &self.history
    }

    pub const fn is_installed(&self) -> bool {
        self.subscription.is_some()
    }

    /// Subscribe once and report the location to record as the route.
    ///
    /// Later calls return `Ok(None)` without touching the browser. Nothing is
    /// pushed; the location is already the current entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the navigation listener cannot be installed.
    pub fn initialize(&mut self, sink: NavigationSink) -> Result<Option<Route>, HistoryError> {
        if self.subscription.is_some() {
            return Ok(None);
        }
        self.subscription = Some(self.history.subscribe(sink)?);
        let location = self.history.location();
        log::debug!("history listener installed at {location:?}");
        Ok(Route::new(location).ok())
    }

    /// Translate a navigation signal into the state to apply.
    #[must_use]
    pub fn inbound(&self, signal: NavigationSignal) -> InboundUpdate {
        InboundUpdate {
            route: Route::new(signal.location).ok(),
            payload: signal.state,
        }
    }

    /// Push `(payload, route)` when `route` is not the visible location.
    ///
    /// Returns whether an entry was pushed.
    ///
    /// # Errors
    ///
    /// Returns an error if the browser refuses the entry.
    pub fn outbound(
        &self,
        route: &Route,
        payload: Option<&GamePayload>,
    ) -> Result<bool, HistoryError> {
        if self.history.location() == route.as_str() {
            return Ok(false);
        }
        log::debug!("pushing history entry {route}");
        self.history.push_entry(payload, route)?;
        Ok(true)
    }
}

impl<H: BrowserHistory> fmt::Debug for HistorySynchronizer<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistorySynchronizer")
            .field("installed", &self.is_installed())
            .finish_non_exhaustive()
    }
}

/// One `(location, state)` pair of the history stack.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryEntry {
    pub route: Route,
    pub state: Option<GamePayload>,
}

#[derive(Default)]
struct MemoryInner {
    entries: Vec<HistoryEntry>,
    index: usize,
    listeners: Vec<(u64, NavigationSink)>,
    next_token: u64,
}

/// In-memory history stack with browser back/forward semantics.
///
/// Cloning yields another handle onto the same stack.
#[derive(Clone)]
pub struct MemoryHistory {
    inner: Rc<RefCell<MemoryInner>>,
}

impl MemoryHistory {
    #[must_use]
    pub fn new(initial: Route) -> Self {
        let inner = MemoryInner {
            entries: vec![HistoryEntry {
                route: initial,
                state: None,
            }],
            ..MemoryInner::default()
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().entries.is_empty()
    }

    #[must_use]
    pub fn current(&self) -> Option<HistoryEntry> {
        let inner = self.inner.borrow();
        inner.entries.get(inner.index).cloned()
    }

    #[must_use]
    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.inner.borrow().entries.clone()
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Step back one entry and notify listeners. Returns `false` at the start.
    pub fn back(&self) -> bool {
        self.traverse(-1)
    }

    /// Step forward one entry and notify listeners. Returns `false` at the end.
    pub fn forward(&self) -> bool {
        self.traverse(1)
    }

    fn traverse(&self, delta: isize) -> bool {
        let (entry, listeners) = {
            let mut inner = self.inner.borrow_mut();
            let Some(target) = inner.index.checked_add_signed(delta) else {
                return false;
            };
            let Some(entry) = inner.entries.get(target).cloned() else {
                return false;
            };
            inner.index = target;
            let listeners: Vec<NavigationSink> =
                inner.listeners.iter().map(|(_, sink)| sink.clone()).collect();
            (entry, listeners)
        };
        let signal = NavigationSignal {
            state: entry.state,
            location: entry.route.to_string(),
        };
        for listener in listeners {
            listener(signal.clone());
        }
        true
    }
}

impl fmt::Debug for MemoryHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("MemoryHistory")
            .field("entries", &inner.entries)
            .field("index", &inner.index)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

/// Listener registration on a [`MemoryHistory`]; removed on drop.
pub struct MemorySubscription {
    inner: Weak<RefCell<MemoryInner>>,
    token: u64,
}

impl Drop for MemorySubscription {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            inner
                .borrow_mut()
                .listeners
                .retain(|(token, _)| *token != self.token);
        }
    }
}

impl BrowserHistory for MemoryHistory {
    type Subscription = MemorySubscription;

    fn location(&self) -> String {
        self.current()
            .map(|entry| entry.route.to_string())
            .unwrap_or_default()
    }

    fn push_entry(&self, state: Option<&GamePayload>, route: &Route) -> Result<(), HistoryError> {
        let mut inner = self.inner.borrow_mut();
        let keep = inner.index + 1;
        inner.entries.truncate(keep);
        inner.entries.push(HistoryEntry {
            route: route.clone(),
            state: state.cloned(),
        });
        inner.index = inner.entries.len() - 1;
        Ok(())
    }

    fn subscribe(&self, sink: NavigationSink) -> Result<Self::Subscription, HistoryError> {
        let mut inner = self.inner.borrow_mut();
        let token = inner.next_token;
        inner.next_token += 1;
        inner.listeners.push((token, sink));
        Ok(MemorySubscription {
            inner: Rc::downgrade(&self.inner),
            token,
        })
    }
}
