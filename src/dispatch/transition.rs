//! Transition records: queued requests and the descriptors handed to handlers.

use crate::core::{Direction, History, Location};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// Unique identifier of a single transition request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransitionId(Uuid);

impl TransitionId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for TransitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Lifecycle of a pending transition.
///
/// Status only ever moves forward: `Enqueued` → `InProgress` → `Completed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum TransitionStatus {
    /// Waiting in the queue
    Enqueued,
    /// Handed to the handler, completion not yet received
    InProgress,
    /// Applied to the history store
    Completed,
}

/// Immutable description of one transition, given to the handler and to
/// completion listeners.
///
/// `previous` is empty for the initializing transition. Both histories are
/// snapshots, so later changes to the machine never alter a descriptor
/// that has already been handed out.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "L: Serialize",
    deserialize = "L: Deserialize<'de>"
))]
pub struct TransitionDescriptor<L: Location> {
    id: TransitionId,
    previous: History<L>,
    new: History<L>,
    direction: Direction,
}

impl<L: Location> TransitionDescriptor<L> {
    pub fn id(&self) -> TransitionId {
        self.id
    }

    /// History before the transition.
    pub fn previous(&self) -> &History<L> {
        &self.previous
    }

    /// History after the transition.
    pub fn new_history(&self) -> &History<L> {
        &self.new
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Top of the previous history, if any.
    pub fn previous_top(&self) -> Option<&L> {
        self.previous.top()
    }

    /// Top of the new history, if any.
    pub fn new_top(&self) -> Option<&L> {
        self.new.top()
    }
}

/// A queued request to move to `target`.
#[derive(Debug)]
pub(crate) struct PendingTransition<L: Location> {
    id: TransitionId,
    target: History<L>,
    direction: Direction,
    initializing: bool,
    status: TransitionStatus,
    abandoned: bool,
    enqueued_at: DateTime<Utc>,
    descriptor: Option<TransitionDescriptor<L>>,
}

impl<L: Location> PendingTransition<L> {
    pub(crate) fn new(target: History<L>, direction: Direction, initializing: bool) -> Self {
        Self {
            id: TransitionId::new(),
            target,
            direction,
            initializing,
            status: TransitionStatus::Enqueued,
            abandoned: false,
            enqueued_at: Utc::now(),
            descriptor: None,
        }
    }

    pub fn id(&self) -> TransitionId {
        self.id
    }

    pub fn target(&self) -> &History<L> {
        &self.target
    }

    pub fn status(&self) -> TransitionStatus {
        self.status
    }

    /// Whether the handler dropped this transition's token without
    /// completing it.
    pub fn is_abandoned(&self) -> bool {
        self.abandoned
    }

    /// Time since the request was enqueued (pure apart from reading the clock).
    pub fn elapsed(&self) -> Duration {
        Utc::now()
            .signed_duration_since(self.enqueued_at)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }

    /// Descriptor issued when this transition was dispatched.
    pub fn descriptor(&self) -> Option<&TransitionDescriptor<L>> {
        self.descriptor.as_ref()
    }

    /// Mark the transition in progress and build its descriptor.
    ///
    /// `current` is the committed history at dispatch time. It becomes the
    /// descriptor's previous history unless this is the initializing
    /// transition.
    pub(crate) fn begin(&mut self, current: History<L>) -> TransitionDescriptor<L> {
        debug_assert_eq!(self.status, TransitionStatus::Enqueued);
        self.status = TransitionStatus::InProgress;

        let previous = if self.initializing {
            History::empty()
        } else {
            current
        };
        let descriptor = TransitionDescriptor {
            id: self.id,
            previous,
            new: self.target.clone(),
            direction: self.direction,
        };
        self.descriptor = Some(descriptor.clone());
        descriptor
    }

    pub(crate) fn abandon(&mut self) {
        debug_assert_eq!(self.status, TransitionStatus::InProgress);
        self.abandoned = true;
    }

    pub(crate) fn complete(&mut self) {
        debug_assert_eq!(self.status, TransitionStatus::InProgress);
        self.status = TransitionStatus::Completed;
    }
}
