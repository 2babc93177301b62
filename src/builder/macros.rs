//! Macros for ergonomic history construction.

/// Build a [`History`](crate::core::History) from a list of locations.
///
/// # Example
///
/// ```
/// use navstack::history;
///
/// let history = history!["inbox", "message", "attachment"];
/// assert_eq!(history.len(), 3);
/// assert_eq!(history.top(), Some(&"attachment"));
///
/// let empty: navstack::core::History<&str> = history![];
/// assert!(empty.is_empty());
/// ```
#[macro_export]
macro_rules! history {
    () => {
        $crate::core::History::empty()
    };
    ($($location:expr),+ $(,)?) => {
        $crate::core::History::new(vec![$($location),+])
    };
}
