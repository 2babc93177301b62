//! Navigation error types.

use super::transition::TransitionId;
use thiserror::Error;

/// Errors returned by navigation requests and completion tokens.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum NavigationError {
    /// A new history must contain at least one location
    #[error("New history cannot be empty")]
    EmptyHistory,

    /// A completion arrived for a transition that is not in flight and was
    /// not force-completed
    #[error("Transition {transition} is not in flight")]
    ProtocolViolation { transition: TransitionId },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_violation_names_the_transition() {
        let transition = TransitionId::new();
        let message = NavigationError::ProtocolViolation { transition }.to_string();

        assert_eq!(message, format!("Transition {transition} is not in flight"));
    }
}
