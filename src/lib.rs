//! Navstack: a navigation-history state machine
//!
//! Navstack keeps an ordered history of caller-defined locations and moves
//! between histories one transition at a time. The work of actually
//! performing a transition (swapping views, running animations, fetching
//! data) belongs to an external handler. The machine only does the
//! bookkeeping: it queues requests in order, dispatches one at a time, and
//! applies each result exactly once.
//!
//! # Core Concepts
//!
//! - **History**: immutable snapshots of the navigation stack
//! - **Transitions**: queued requests, dispatched FIFO with at most one in
//!   flight
//! - **Completion**: a one-shot token the handler consumes when it is done
//! - **Listeners**: observers notified after each committed transition
//!
//! # Example
//!
//! ```rust
//! use navstack::{Backstack, Completion, Direction, RegisterMode, TransitionDescriptor};
//!
//! #[derive(Clone, PartialEq, Debug)]
//! enum Screen {
//!     Inbox,
//!     Message(u64),
//! }
//!
//! let backstack = Backstack::new(vec![Screen::Inbox]).unwrap();
//!
//! backstack.register_handler(
//!     |descriptor: TransitionDescriptor<Screen>, completion: Completion<Screen>| {
//!         println!("{} -> {:?}", descriptor.direction(), descriptor.new_top());
//!         completion.complete().unwrap();
//!     },
//!     RegisterMode::Initialize,
//! );
//!
//! backstack.go_to(Screen::Message(42));
//! assert_eq!(backstack.top(), Some(Screen::Message(42)));
//!
//! backstack.go_to(Screen::Inbox);
//! assert_eq!(backstack.current_history().as_slice(), &[Screen::Inbox]);
//!
//! backstack
//!     .set_history(vec![Screen::Message(7)], Direction::Replace)
//!     .unwrap();
//! assert_eq!(backstack.top(), Some(Screen::Message(7)));
//! ```

pub mod builder;
pub mod core;
pub mod dispatch;

// Re-export commonly used types
pub use builder::{BackstackBuilder, BuildError};
pub use self::core::{Direction, History, Location};
pub use dispatch::{
    Backstack, Completion, CompletionListener, NavigationError, RegisterMode,
    TransitionDescriptor, TransitionHandler, TransitionId,
};
