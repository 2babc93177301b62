//! Navigation-history machine that serializes transitions through a handler.

use super::error::NavigationError;
use super::handler::{Completion, RegisterMode, TransitionHandler};
use super::listener::{notify_all, CompletionListener, ListenerRegistry};
use super::queue::{effective_history, TransitionQueue};
use super::transition::{PendingTransition, TransitionDescriptor, TransitionId};
use crate::builder::{BackstackBuilder, BuildError};
use crate::core::{Direction, History, HistoryStore, Location};
use parking_lot::Mutex;
use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

type SharedHandler<L> = Arc<dyn TransitionHandler<L>>;
type SharedListener<L> = Arc<dyn CompletionListener<L>>;
type Notification<L> = (TransitionDescriptor<L>, Vec<SharedListener<L>>);

/// Navigation history plus the queue of transitions waiting to be applied.
///
/// `Backstack` is a cheap handle: clones refer to the same machine. Every
/// request returns immediately. The registered [`TransitionHandler`]
/// receives one [`TransitionDescriptor`] at a time and the history only
/// changes once the handler calls [`Completion::complete`].
///
/// # Example
///
/// ```rust
/// use navstack::{Backstack, Completion, RegisterMode, TransitionDescriptor};
///
/// let backstack = Backstack::new(vec!["inbox"]).unwrap();
///
/// backstack.register_handler(
///     |descriptor: TransitionDescriptor<&'static str>, completion: Completion<&'static str>| {
///         // A view layer would swap screens here.
///         let _ = descriptor.new_top();
///         completion.complete().unwrap();
///     },
///     RegisterMode::Initialize,
/// );
///
/// backstack.go_to("message");
/// assert_eq!(backstack.current_history().as_slice(), &["inbox", "message"]);
///
/// assert!(backstack.go_back());
/// assert_eq!(backstack.current_history().as_slice(), &["inbox"]);
/// ```
pub struct Backstack<L: Location> {
    shared: Arc<Mutex<Inner<L>>>,
}

struct Inner<L: Location> {
    initial: History<L>,
    store: HistoryStore<L>,
    queue: TransitionQueue<L>,
    handler: Option<SharedHandler<L>>,
    listeners: ListenerRegistry<L>,
    force_executed: HashSet<TransitionId>,
    notifications: VecDeque<Notification<L>>,
    notifying: bool,
}

impl<L: Location> Inner<L> {
    fn effective_history(&self) -> History<L> {
        effective_history(&self.store, &self.queue, &self.initial)
    }

    fn enqueue(&mut self, target: History<L>, direction: Direction, initializing: bool) {
        let transition = PendingTransition::new(target, direction, initializing);
        debug!(
            transition = %transition.id(),
            %direction,
            initializing,
            target_len = transition.target().len(),
            queued = self.queue.len() + 1,
            "transition enqueued"
        );
        self.queue.push(transition);
    }

    /// Move the head to `InProgress` if dispatch is possible.
    ///
    /// Nothing is dispatched while completion notifications are still
    /// being delivered.
    fn begin_next(&mut self) -> Option<(SharedHandler<L>, TransitionDescriptor<L>)> {
        if self.notifying || !self.notifications.is_empty() {
            return None;
        }
        let handler = Arc::clone(self.handler.as_ref()?);
        let current = self.store.current();
        let head = self.queue.startable_head()?;
        let descriptor = head.begin(current);
        debug!(
            transition = %descriptor.id(),
            direction = %descriptor.direction(),
            previous_len = descriptor.previous().len(),
            new_len = descriptor.new_history().len(),
            "transition dispatched"
        );
        Some((handler, descriptor))
    }

    /// Commit the in-progress head, pop it off the queue and queue its
    /// listener notification.
    fn finish_head(&mut self) -> bool {
        let Some(descriptor) = self
            .queue
            .in_progress_head()
            .and_then(PendingTransition::descriptor)
            .cloned()
        else {
            return false;
        };
        self.store.commit(descriptor.new_history().clone());

        if let Some(mut finished) = self.queue.pop() {
            finished.complete();
            debug!(
                transition = %finished.id(),
                elapsed = ?finished.elapsed(),
                history_len = self.store.len(),
                remaining = self.queue.len(),
                "transition completed"
            );
        }
        let listeners = self.listeners.snapshot();
        self.notifications.push_back((descriptor, listeners));
        true
    }

    fn in_flight(&self) -> Option<TransitionId> {
        self.queue.in_progress_head().map(PendingTransition::id)
    }
}

impl<L: Location> Clone for Backstack<L> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<L: Location> Backstack<L> {
    /// Create a machine whose first history will be `initial`.
    ///
    /// # Errors
    ///
    /// [`BuildError::EmptyInitialHistory`] if `initial` is empty.
    pub fn new(initial: Vec<L>) -> Result<Self, BuildError> {
        BackstackBuilder::new().initial(initial).build()
    }

    /// Start a builder for a machine with initial listeners.
    pub fn builder() -> BackstackBuilder<L> {
        BackstackBuilder::new()
    }

    pub(crate) fn from_parts(initial: History<L>, listeners: Vec<SharedListener<L>>) -> Self {
        let mut registry = ListenerRegistry::new();
        for listener in listeners {
            registry.add(listener);
        }
        Self {
            shared: Arc::new(Mutex::new(Inner {
                initial,
                store: HistoryStore::new(),
                queue: TransitionQueue::new(),
                handler: None,
                listeners: registry,
                force_executed: HashSet::new(),
                notifications: VecDeque::new(),
                notifying: false,
            })),
        }
    }

    /// Navigate to `location`.
    ///
    /// If the history the request builds on already contains `location`,
    /// everything after its first occurrence is dropped and the transition
    /// is `Backward`. Otherwise `location` is appended as `Forward`.
    pub fn go_to(&self, location: L) {
        {
            let mut inner = self.shared.lock();
            let current = inner.effective_history();
            let (target, direction) = match current.position(&location) {
                Some(index) => (current.truncated_to(index + 1), Direction::Backward),
                None => (current.pushed(location), Direction::Forward),
            };
            inner.enqueue(target, direction, false);
        }
        self.attempt_start();
    }

    /// Navigate back one entry.
    ///
    /// Returns `true` while a transition is still pending (nothing new is
    /// queued) or when a `Backward` transition was queued. Returns `false`
    /// when there was at most one entry left: the history is then cleared
    /// without dispatching anything or notifying listeners.
    pub fn go_back(&self) -> bool {
        {
            let mut inner = self.shared.lock();
            if !inner.queue.is_empty() {
                trace!(queued = inner.queue.len(), "go_back while navigating");
                return true;
            }
            let current = inner.effective_history();
            if current.len() <= 1 {
                inner.store.clear();
                debug!("history cleared by going back from its last entry");
                return false;
            }
            inner.enqueue(
                current.truncated_to(current.len() - 1),
                Direction::Backward,
                false,
            );
        }
        self.attempt_start();
        true
    }

    /// Replace the history with `history`, tagged with `direction`.
    ///
    /// # Errors
    ///
    /// [`NavigationError::EmptyHistory`] if `history` has no entries. Nothing
    /// is queued in that case.
    pub fn set_history(
        &self,
        history: impl Into<History<L>>,
        direction: Direction,
    ) -> Result<(), NavigationError> {
        let history = history.into();
        if history.is_empty() {
            return Err(NavigationError::EmptyHistory);
        }
        self.shared.lock().enqueue(history, direction, false);
        self.attempt_start();
        Ok(())
    }

    /// Snapshot of the committed history.
    pub fn current_history(&self) -> History<L> {
        self.shared.lock().store.current()
    }

    /// Current location of the committed history.
    pub fn top(&self) -> Option<L> {
        self.shared.lock().store.current().top().cloned()
    }

    /// History the next `go_to`/`go_back` will build on.
    pub fn effective_history(&self) -> History<L> {
        self.shared.lock().effective_history()
    }

    /// The history supplied at construction.
    pub fn initial_history(&self) -> History<L> {
        self.shared.lock().initial.clone()
    }

    /// Whether any transition has ever been committed.
    pub fn is_initialized(&self) -> bool {
        self.shared.lock().store.is_initialized()
    }

    /// `true` while any transition is queued or in progress.
    pub fn is_change_pending(&self) -> bool {
        !self.shared.lock().queue.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.shared.lock().queue.len()
    }

    /// Id of the transition currently handed to the handler.
    pub fn in_flight(&self) -> Option<TransitionId> {
        self.shared.lock().in_flight()
    }

    pub fn has_handler(&self) -> bool {
        self.shared.lock().handler.is_some()
    }

    /// Register `handler`, replacing any previous one.
    ///
    /// See [`RegisterMode`] for how the two modes differ. A queued
    /// transition is dispatched before this returns.
    pub fn register_handler<H>(&self, handler: H, mode: RegisterMode)
    where
        H: TransitionHandler<L> + 'static,
    {
        self.register_shared_handler(Arc::new(handler), mode);
    }

    /// Register an already shared handler.
    pub fn register_shared_handler(&self, handler: SharedHandler<L>, mode: RegisterMode) {
        let replaced = {
            let mut inner = self.shared.lock();
            let replaced = inner.handler.replace(handler);
            info!(
                ?mode,
                replaced = replaced.is_some(),
                queued = inner.queue.len(),
                "transition handler registered"
            );
            let synthesize = mode == RegisterMode::Initialize
                && inner.queue.is_empty()
                && inner.store.is_empty();
            if synthesize {
                let initial = inner.effective_history();
                inner.enqueue(initial, Direction::Replace, true);
            }
            replaced
        };
        // The old handler may own completion tokens whose drop locks the machine.
        drop(replaced);
        self.attempt_start();
    }

    /// Stop dispatching new transitions.
    ///
    /// A transition already in progress keeps its completion token and still
    /// applies when completed. Returns whether a handler was registered.
    pub fn unregister_handler(&self) -> bool {
        let removed = self.shared.lock().handler.take();
        info!(removed = removed.is_some(), "transition handler unregistered");
        removed.is_some()
    }

    /// Complete the in-progress transition now, without waiting for its
    /// handler.
    ///
    /// The handler's own completion of that transition is ignored
    /// afterwards. Returns `false` if nothing was in progress.
    pub fn force_complete_pending(&self) -> bool {
        let finished = {
            let mut inner = self.shared.lock();
            let Some(head) = inner.queue.in_progress_head() else {
                return false;
            };
            let transition = head.id();
            let abandoned = head.is_abandoned();
            // A dropped token can no longer deliver a late completion.
            if !abandoned {
                inner.force_executed.insert(transition);
            }
            debug!(transition = %transition, abandoned, "forcing completion");
            inner.finish_head()
        };
        if finished {
            self.publish();
        }
        finished
    }

    /// Add a listener, notified after every completed transition.
    pub fn add_completion_listener(&self, listener: SharedListener<L>) {
        let mut inner = self.shared.lock();
        inner.listeners.add(listener);
        trace!(listeners = inner.listeners.len(), "completion listener added");
    }

    /// Remove a listener previously added with the same `Arc`.
    pub fn remove_completion_listener(&self, listener: &SharedListener<L>) -> bool {
        let removed = self.shared.lock().listeners.remove(listener);
        trace!(removed, "completion listener removed");
        removed
    }

    /// Dispatch the head transition if the machine is idle.
    fn attempt_start(&self) -> bool {
        let next = self.shared.lock().begin_next();
        match next {
            Some((handler, descriptor)) => {
                let completion = Completion::new(self.clone(), descriptor.id());
                handler.handle(descriptor, completion);
                true
            }
            None => false,
        }
    }

    /// Deliver queued completion notifications in commit order, then resume
    /// dispatch.
    ///
    /// One caller drains at a time. A completion that arrives on another
    /// thread, or re-entrantly from a listener, only queues its notification
    /// for the active drain.
    fn publish(&self) {
        {
            let mut inner = self.shared.lock();
            if inner.notifying {
                return;
            }
            inner.notifying = true;
        }
        loop {
            let next = {
                let mut inner = self.shared.lock();
                let next = inner.notifications.pop_front();
                if next.is_none() {
                    inner.notifying = false;
                }
                next
            };
            let Some((descriptor, listeners)) = next else {
                break;
            };
            trace!(
                transition = %descriptor.id(),
                listeners = listeners.len(),
                "notifying completion listeners"
            );
            notify_all(&listeners, &descriptor);
        }
        self.attempt_start();
    }

    pub(crate) fn complete_transition(
        &self,
        transition: TransitionId,
    ) -> Result<(), NavigationError> {
        {
            let mut inner = self.shared.lock();
            if inner.in_flight() == Some(transition) {
                inner.finish_head();
            } else if inner.force_executed.remove(&transition) {
                debug!(
                    transition = %transition,
                    "ignoring completion of a force-completed transition"
                );
                return Ok(());
            } else {
                warn!(
                    transition = %transition,
                    "completion delivered for a transition that is not in flight"
                );
                return Err(NavigationError::ProtocolViolation { transition });
            }
        }
        self.publish();
        Ok(())
    }

    pub(crate) fn abandon_completion(&self, transition: TransitionId) {
        let mut inner = self.shared.lock();
        if inner.force_executed.remove(&transition) {
            trace!(transition = %transition, "force-completed token dropped");
        } else if let Some(head) = inner
            .queue
            .in_progress_head_mut()
            .filter(|head| head.id() == transition)
        {
            head.abandon();
            warn!(
                transition = %transition,
                "completion dropped without being called; transition stays in flight"
            );
        }
    }
}

impl<L: Location> fmt::Debug for Backstack<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.shared.lock();
        f.debug_struct("Backstack")
            .field("history", &inner.store.current())
            .field("queued", &inner.queue.len())
            .field("in_flight", &inner.in_flight())
            .field("has_handler", &inner.handler.is_some())
            .finish()
    }
}
