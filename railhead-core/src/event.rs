use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::error::LoadFailure;
use crate::history::{NavigationSignal, NavigationSink};
use crate::load::GamePayload;
use crate::route::{GameKey, Route};

/// Everything that can change what the root view should show.
#[derive(Clone, Debug, PartialEq)]
pub enum AppEvent {
    /// Browser back/forward.
    NavigationOccurred(NavigationSignal),
    /// Provider finished loading `key`.
    LoadResolved {
        key: GameKey,
        outcome: Result<GamePayload, LoadFailure>,
    },
    /// In-app navigation such as entering a game; `payload` is set when the
    /// snapshot is already known.
    Navigate {
        route: Route,
        payload: Option<GamePayload>,
    },
    RenderRequested,
}

impl AppEvent {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::NavigationOccurred(_) => "navigation",
            Self::LoadResolved { .. } => "load-resolved",
            Self::Navigate { .. } => "navigate",
            Self::RenderRequested => "render",
        }
    }
}

/// FIFO of pending events shared between producers and the dispatcher loop.
#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    events: Rc<RefCell<VecDeque<AppEvent>>>,
}

impl EventQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: AppEvent) {
        self.events.borrow_mut().push_back(event);
    }

    pub fn pop(&self) -> Option<AppEvent> {
        self.events.borrow_mut().pop_front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Sink that enqueues navigation signals as [`AppEvent::NavigationOccurred`].
    #[must_use]
    pub fn navigation_sink(&self) -> NavigationSink {
        let queue = self.clone();
        Rc::new(move |signal| queue.push(AppEvent::NavigationOccurred(signal)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sink_enqueues_in_arrival_order() {
        let queue = EventQueue::new();
        let sink = queue.navigation_sink();
        sink(NavigationSignal {
            state: None,
            location: String::from("/a"),
        });
        queue.push(AppEvent::RenderRequested);

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop().map(|event| event.label()), Some("navigation"));
        assert_eq!(queue.pop(), Some(AppEvent::RenderRequested));
        assert!(queue.is_empty());
    }
}
