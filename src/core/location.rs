//! Location values stored in a navigation history.
//!
//! The machine never looks inside a location. All it needs is to clone it
//! into snapshots, compare it for `go_to`, and print it in diagnostics.

use std::fmt::Debug;

/// Marker trait for values that can live in a navigation history.
///
/// Every type that is `Clone + PartialEq + Debug + Send + Sync + 'static`
/// is a `Location`, so callers normally never implement it by hand.
///
/// # Required Traits
///
/// - `Clone`: locations are copied into immutable history snapshots
/// - `PartialEq`: `go_to` finds an existing entry by equality
/// - `Debug`: locations appear in diagnostics
/// - `Send` + `Sync`: a handler may complete a transition from another thread
///
/// # Example
///
/// ```rust
/// use navstack::core::Location;
///
/// #[derive(Clone, PartialEq, Debug)]
/// enum Screen {
///     Inbox,
///     Message { id: u64 },
/// }
///
/// fn accepts_location<L: Location>(_location: L) {}
///
/// accepts_location(Screen::Inbox);
/// accepts_location(Screen::Message { id: 7 });
/// accepts_location("settings");
/// ```
pub trait Location: Clone + PartialEq + Debug + Send + Sync + 'static {}

impl<T> Location for T where T: Clone + PartialEq + Debug + Send + Sync + 'static {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug)]
    enum Screen {
        Home,
        Detail(u32),
    }

    fn assert_location<L: Location>() {}

    #[test]
    fn plain_values_are_locations() {
        assert_location::<Screen>();
        assert_location::<String>();
        assert_location::<&'static str>();
        assert_location::<u64>();
    }

    #[test]
    fn duplicate_locations_compare_equal() {
        assert_eq!(Screen::Detail(3), Screen::Detail(3));
        assert_ne!(Screen::Detail(3), Screen::Detail(4));
        assert_ne!(Screen::Home, Screen::Detail(0));
    }
}
