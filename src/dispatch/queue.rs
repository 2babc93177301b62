//! FIFO queue of pending transitions.

use super::transition::{PendingTransition, TransitionStatus};
use crate::core::{History, HistoryStore, Location};
use std::collections::VecDeque;

/// Ordered queue of transitions waiting to be applied.
///
/// The head is the only entry that may ever be `InProgress`.
#[derive(Debug)]
pub(crate) struct TransitionQueue<L: Location> {
    pending: VecDeque<PendingTransition<L>>,
}

impl<L: Location> TransitionQueue<L> {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Target of the most recently queued transition.
    pub fn last_target(&self) -> Option<&History<L>> {
        self.pending.back().map(PendingTransition::target)
    }

    /// The head transition, only if it is waiting to be dispatched.
    pub(crate) fn startable_head(&mut self) -> Option<&mut PendingTransition<L>> {
        self.pending
            .front_mut()
            .filter(|head| head.status() == TransitionStatus::Enqueued)
    }

    /// The head transition, only if it has been dispatched.
    pub(crate) fn in_progress_head(&self) -> Option<&PendingTransition<L>> {
        self.pending
            .front()
            .filter(|head| head.status() == TransitionStatus::InProgress)
    }

    pub(crate) fn in_progress_head_mut(&mut self) -> Option<&mut PendingTransition<L>> {
        self.pending
            .front_mut()
            .filter(|head| head.status() == TransitionStatus::InProgress)
    }

    pub(crate) fn push(&mut self, transition: PendingTransition<L>) {
        self.pending.push_back(transition);
    }

    pub(crate) fn pop(&mut self) -> Option<PendingTransition<L>> {
        self.pending.pop_front()
    }
}

/// History the next request should build on.
///
/// Precedence: the target of the last queued transition, else the committed
/// store when it holds anything, else the initial history. This lets
/// chained requests compose before any of them has completed.
pub(crate) fn effective_history<L: Location>(
    store: &HistoryStore<L>,
    queue: &TransitionQueue<L>,
    initial: &History<L>,
) -> History<L> {
    if let Some(target) = queue.last_target() {
        target.clone()
    } else if !store.is_empty() {
        store.current()
    } else {
        initial.clone()
    }
}
