//! Core navigation-history types.
//!
//! This module contains the value types the machine is built from:
//! - The `Location` marker trait for history entries
//! - Immutable `History` snapshots and the owning `HistoryStore`
//! - `Direction` metadata for transitions
//!
//! Nothing in this module performs dispatch or talks to handlers.

mod direction;
mod history;
mod location;

pub use direction::Direction;
pub use history::{History, HistoryStore};
pub use location::Location;
