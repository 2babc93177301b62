//! Observers notified after a transition has been applied.

use super::transition::TransitionDescriptor;
use crate::core::Location;
use std::sync::Arc;

/// Observer of committed transitions.
///
/// Called after the history store already holds the new history, so
/// reading the machine's history from inside the callback returns the
/// post-transition state.
///
/// Any `Fn(&TransitionDescriptor<L>) + Send + Sync` closure is a listener.
pub trait CompletionListener<L: Location>: Send + Sync {
    fn on_transition_complete(&self, descriptor: &TransitionDescriptor<L>);
}

impl<L, F> CompletionListener<L> for F
where
    L: Location,
    F: Fn(&TransitionDescriptor<L>) + Send + Sync,
{
    fn on_transition_complete(&self, descriptor: &TransitionDescriptor<L>) {
        self(descriptor)
    }
}

/// Listeners in registration order.
pub(crate) struct ListenerRegistry<L: Location> {
    listeners: Vec<Arc<dyn CompletionListener<L>>>,
}

impl<L: Location> ListenerRegistry<L> {
    pub(crate) fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }

    pub(crate) fn add(&mut self, listener: Arc<dyn CompletionListener<L>>) {
        self.listeners.push(listener);
    }

    /// Remove the first registration of `listener`, compared by identity.
    pub(crate) fn remove(&mut self, listener: &Arc<dyn CompletionListener<L>>) -> bool {
        match self
            .listeners
            .iter()
            .position(|registered| Arc::ptr_eq(registered, listener))
        {
            Some(index) => {
                self.listeners.remove(index);
                true
            }
            None => false,
        }
    }

    /// Copy of the current registrations, so notification can run without
    /// holding the machine lock.
    pub(crate) fn snapshot(&self) -> Vec<Arc<dyn CompletionListener<L>>> {
        self.listeners.clone()
    }
}

pub(crate) fn notify_all<L: Location>(
    listeners: &[Arc<dyn CompletionListener<L>>],
    descriptor: &TransitionDescriptor<L>,
) {
    for listener in listeners {
        listener.on_transition_complete(descriptor);
    }
}
