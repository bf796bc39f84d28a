use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::load::LoadRequest;

/// Source of game snapshots.
///
/// `request` must not block: implementations start the load and later post
/// [`AppEvent::LoadResolved`](crate::event::AppEvent::LoadResolved) with the
/// outcome for the same key.
pub trait GameDataProvider {
    fn request(&mut self, request: LoadRequest);
}

/// Provider that only records requests; the caller resolves them by hand.
///
/// Cloning yields another handle onto the same queue.
#[derive(Clone, Debug, Default)]
pub struct QueuedProvider {
    pending: Rc<RefCell<VecDeque<LoadRequest>>>,
    issued: Rc<RefCell<usize>>,
}

impl QueuedProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total requests received since creation.
    #[must_use]
    pub fn issued(&self) -> usize {
        *self.issued.borrow()
    }

    #[must_use]
    pub fn pending(&self) -> Vec<LoadRequest> {
        self.pending.borrow().iter().cloned().collect()
    }

    /// Oldest unanswered request.
    pub fn next_request(&self) -> Option<LoadRequest> {
        self.pending.borrow_mut().pop_front()
    }

    /// Remove and return the oldest unanswered request for `id`.
    pub fn take_for(&self, id: &str) -> Option<LoadRequest> {
        let mut pending = self.pending.borrow_mut();
        let position = pending.iter().position(|request| request.key.id == id)?;
        pending.remove(position)
    }
}

impl GameDataProvider for QueuedProvider {
    fn request(&mut self, request: LoadRequest) {
        *self.issued.borrow_mut() += 1;
        self.pending.borrow_mut().push_back(request);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::{GameKey, GameMode};

    fn request(id: &str) -> LoadRequest {
        LoadRequest {
            key: GameKey::new(id, GameMode::Multiplayer),
            pin: None,
        }
    }

    #[test]
    fn queued_provider_shares_queue_between_handles() {
        let provider = QueuedProvider::new();
        let mut handle = provider.clone();
        handle.request(request("1"));
        handle.request(request("2"));

        assert_eq!(provider.issued(), 2);
        assert_eq!(provider.take_for("2"), Some(request("2")));
        assert_eq!(provider.next_request(), Some(request("1")));
        assert_eq!(provider.next_request(), None);
        assert_eq!(provider.issued(), 2);
    }
}
