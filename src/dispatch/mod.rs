//! Queueing and single-flight dispatch of navigation transitions.
//!
//! This module is the "imperative shell" around the value types in
//! [`crate::core`]: it owns the history store, queues requests, hands them
//! one at a time to a [`TransitionHandler`], and applies each result when
//! the handler's [`Completion`] token is consumed.
//!
//! # Key Concepts
//!
//! - **Pending transitions**: requests wait in FIFO order, at most one is
//!   in progress
//! - **Completion tokens**: one-shot values the handler consumes to report
//!   that a transition finished
//! - **Listeners**: observers told about every committed transition, in
//!   registration order
//!
//! The handler may complete synchronously from inside `handle` or later
//! from another thread or task. The machine never holds its lock while
//! handler or listener code runs. Listener notifications are delivered in
//! commit order, and nothing new is dispatched until they have all
//! returned.

mod backstack;
mod error;
mod handler;
mod listener;
mod queue;
mod transition;

pub use backstack::Backstack;
pub use error::NavigationError;
pub use handler::{Completion, RegisterMode, TransitionHandler};
pub use listener::CompletionListener;
pub use transition::{TransitionDescriptor, TransitionId};
