//! The handler contract and its one-shot completion token.

use super::backstack::Backstack;
use super::error::NavigationError;
use super::transition::{TransitionDescriptor, TransitionId};
use crate::core::Location;
use std::fmt;

/// Performs the actual work of moving from one history to another.
///
/// The machine calls `handle` for one transition at a time. The handler
/// must eventually call [`Completion::complete`] on the token it receives,
/// either before returning or later from any thread or task. Until it does,
/// no further transition is dispatched.
///
/// Any `Fn(TransitionDescriptor<L>, Completion<L>) + Send + Sync` closure
/// is a handler.
pub trait TransitionHandler<L: Location>: Send + Sync {
    fn handle(&self, descriptor: TransitionDescriptor<L>, completion: Completion<L>);
}

impl<L, F> TransitionHandler<L> for F
where
    L: Location,
    F: Fn(TransitionDescriptor<L>, Completion<L>) + Send + Sync,
{
    fn handle(&self, descriptor: TransitionDescriptor<L>, completion: Completion<L>) {
        self(descriptor, completion)
    }
}

/// How a newly registered handler relates to the machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegisterMode {
    /// First-time setup: when nothing is queued and the history is empty,
    /// an initializing `Replace` transition to the initial history is
    /// synthesized.
    Initialize,
    /// A handler reconnecting after its predecessor was torn down. Only
    /// resumes whatever is already queued.
    Reattach,
}

/// Single-use token that finishes one dispatched transition.
///
/// `complete` consumes the token, so a given token can finish its
/// transition at most once:
///
/// ```compile_fail
/// # use navstack::{Backstack, Completion, RegisterMode, TransitionDescriptor};
/// let backstack = Backstack::new(vec!["home"]).unwrap();
/// backstack.register_handler(
///     |_: TransitionDescriptor<&str>, completion: Completion<&str>| {
///         let _ = completion.complete();
///         let _ = completion.complete();
///     },
///     RegisterMode::Initialize,
/// );
/// ```
///
/// Dropping a token without completing leaves the transition in flight
/// until [`Backstack::force_complete_pending`] is called.
#[must_use = "the transition stays in flight until the completion is called"]
pub struct Completion<L: Location> {
    machine: Backstack<L>,
    transition: TransitionId,
    consumed: bool,
}

impl<L: Location> Completion<L> {
    pub(crate) fn new(machine: Backstack<L>, transition: TransitionId) -> Self {
        Self {
            machine,
            transition,
            consumed: false,
        }
    }

    /// Id of the transition this token finishes.
    pub fn transition_id(&self) -> TransitionId {
        self.transition
    }

    /// Report that the handler has finished the transition.
    ///
    /// Commits the new history, notifies completion listeners and dispatches
    /// the next queued transition before returning. When another thread is
    /// already delivering notifications, this transition's listeners are
    /// called by that thread, after the ones queued ahead of it. If the
    /// transition was already force-completed this is a no-op.
    ///
    /// # Errors
    ///
    /// [`NavigationError::ProtocolViolation`] if the transition is no
    /// longer in flight and was not force-completed.
    pub fn complete(mut self) -> Result<(), NavigationError> {
        self.consumed = true;
        self.machine.complete_transition(self.transition)
    }
}

impl<L: Location> Drop for Completion<L> {
    fn drop(&mut self) {
        if !self.consumed {
            self.machine.abandon_completion(self.transition);
        }
    }
}

impl<L: Location> fmt::Debug for Completion<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion")
            .field("transition", &self.transition)
            .field("consumed", &self.consumed)
            .finish()
    }
}
