//! Builder for constructing navigation machines.

use crate::builder::error::BuildError;
use crate::core::{History, Location};
use crate::dispatch::{Backstack, CompletionListener};
use std::sync::Arc;

/// Builder for constructing a [`Backstack`] with a fluent API.
///
/// # Example
///
/// ```rust
/// use navstack::{BackstackBuilder, CompletionListener, TransitionDescriptor};
/// use std::sync::Arc;
///
/// let log: Arc<dyn CompletionListener<&'static str>> =
///     Arc::new(|descriptor: &TransitionDescriptor<&'static str>| {
///         println!("now at {:?}", descriptor.new_top());
///     });
///
/// let backstack = BackstackBuilder::new()
///     .initial(vec!["home"])
///     .listener(log)
///     .build()
///     .unwrap();
///
/// assert_eq!(backstack.initial_history().as_slice(), &["home"]);
/// ```
pub struct BackstackBuilder<L: Location> {
    initial: Option<History<L>>,
    listeners: Vec<Arc<dyn CompletionListener<L>>>,
}

impl<L: Location> BackstackBuilder<L> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            listeners: Vec::new(),
        }
    }

    /// Set the initial history (required, non-empty).
    pub fn initial(mut self, history: impl Into<History<L>>) -> Self {
        self.initial = Some(history.into());
        self
    }

    /// Register a completion listener before the machine exists.
    pub fn listener(mut self, listener: Arc<dyn CompletionListener<L>>) -> Self {
        self.listeners.push(listener);
        self
    }

    /// Register several completion listeners, in order.
    pub fn listeners(mut self, listeners: Vec<Arc<dyn CompletionListener<L>>>) -> Self {
        self.listeners.extend(listeners);
        self
    }

    /// Build the machine.
    /// Returns an error if the initial history is missing or empty.
    pub fn build(self) -> Result<Backstack<L>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialHistory)?;

        if initial.is_empty() {
            return Err(BuildError::EmptyInitialHistory);
        }

        Ok(Backstack::from_parts(initial, self.listeners))
    }
}

impl<L: Location> Default for BackstackBuilder<L> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::{Completion, RegisterMode, TransitionDescriptor};
    use parking_lot::Mutex;

    #[test]
    fn builder_validates_required_fields() {
        let result = BackstackBuilder::<&str>::new().build();

        assert!(matches!(result, Err(BuildError::MissingInitialHistory)));
    }

    #[test]
    fn builder_rejects_empty_history() {
        let result = BackstackBuilder::<&str>::new().initial(Vec::<&str>::new()).build();

        assert!(matches!(result, Err(BuildError::EmptyInitialHistory)));
    }

    #[test]
    fn fluent_api_builds_machine() {
        let machine = BackstackBuilder::new().initial(vec!["a", "b"]).build();

        assert!(machine.is_ok());
        let machine = machine.unwrap();
        assert_eq!(machine.initial_history().as_slice(), &["a", "b"]);
        assert!(machine.current_history().is_empty());
        assert!(!machine.is_initialized());
        assert!(!machine.has_handler());
    }

    #[test]
    fn builder_listeners_are_notified_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let first_seen = Arc::clone(&seen);
        let second_seen = Arc::clone(&seen);
        let first: Arc<dyn CompletionListener<&'static str>> =
            Arc::new(move |_: &TransitionDescriptor<&'static str>| first_seen.lock().push(1));
        let second: Arc<dyn CompletionListener<&'static str>> =
            Arc::new(move |_: &TransitionDescriptor<&'static str>| second_seen.lock().push(2));

        let machine = BackstackBuilder::new()
            .initial(vec!["a"])
            .listeners(vec![first, second])
            .build()
            .unwrap();
        machine.register_handler(
            |_: TransitionDescriptor<&'static str>, completion: Completion<&'static str>| {
                completion.complete().unwrap();
            },
            RegisterMode::Initialize,
        );

        assert_eq!(*seen.lock(), vec![1, 2]);
    }
}
