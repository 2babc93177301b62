//! Navigation history snapshots and the authoritative history store.
//!
//! A [`History`] is an immutable value: every operation that "changes" a
//! history returns a new one, so snapshots handed to handlers and listeners
//! can never be altered behind their back.

use super::location::Location;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::ops::Index;
use std::sync::Arc;

/// Ordered, immutable sequence of locations.
///
/// Index 0 is the root, the last index is the current (top) location.
/// Cloning is cheap: clones share the same backing slice.
///
/// # Example
///
/// ```rust
/// use navstack::core::History;
///
/// let history = History::from(vec!["inbox", "message"]);
/// let deeper = history.pushed("attachment");
///
/// assert_eq!(history.len(), 2); // Original unchanged
/// assert_eq!(deeper.top(), Some(&"attachment"));
/// assert_eq!(deeper.root(), Some(&"inbox"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct History<L: Location> {
    entries: Arc<[L]>,
}

impl<L: Location> Default for History<L> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<L: Location> History<L> {
    /// Create a history from an ordered list of locations.
    pub fn new(entries: Vec<L>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    /// Create a history with no entries.
    ///
    /// Only used as the "previous" side of an initializing transition and
    /// for the store before it is initialized or after it is cleared.
    pub fn empty() -> Self {
        Self {
            entries: Arc::from(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, L> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[L] {
        &self.entries
    }

    /// The first location in the history.
    pub fn root(&self) -> Option<&L> {
        self.entries.first()
    }

    /// The current location, i.e. the last entry.
    pub fn top(&self) -> Option<&L> {
        self.entries.last()
    }

    pub fn contains(&self, location: &L) -> bool {
        self.entries.contains(location)
    }

    /// Index of the first entry equal to `location`.
    pub fn position(&self, location: &L) -> Option<usize> {
        self.entries.iter().position(|entry| entry == location)
    }

    pub fn to_vec(&self) -> Vec<L> {
        self.entries.to_vec()
    }

    /// Return a new history with `location` appended.
    ///
    /// ```rust
    /// use navstack::core::History;
    ///
    /// let history = History::from(vec![1, 2]);
    /// assert_eq!(history.pushed(3).as_slice(), &[1, 2, 3]);
    /// ```
    pub fn pushed(&self, location: L) -> Self {
        let mut entries = self.to_vec();
        entries.push(location);
        Self::new(entries)
    }

    /// Return a new history holding only the first `len` entries.
    ///
    /// A `len` past the end returns an equal history.
    ///
    /// ```rust
    /// use navstack::core::History;
    ///
    /// let history = History::from(vec!['a', 'b', 'c']);
    /// assert_eq!(history.truncated_to(2).as_slice(), &['a', 'b']);
    /// assert_eq!(history.truncated_to(9), history);
    /// ```
    pub fn truncated_to(&self, len: usize) -> Self {
        let len = len.min(self.entries.len());
        Self::new(self.entries[..len].to_vec())
    }
}

impl<L: Location> From<Vec<L>> for History<L> {
    fn from(entries: Vec<L>) -> Self {
        Self::new(entries)
    }
}

impl<L: Location> FromIterator<L> for History<L> {
    fn from_iter<I: IntoIterator<Item = L>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<L: Location> Index<usize> for History<L> {
    type Output = L;

    fn index(&self, index: usize) -> &L {
        &self.entries[index]
    }
}

impl<'a, L: Location> IntoIterator for &'a History<L> {
    type Item = &'a L;
    type IntoIter = std::slice::Iter<'a, L>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<L: Location + Serialize> Serialize for History<L> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.iter())
    }
}

impl<'de, L: Location + Deserialize<'de>> Deserialize<'de> for History<L> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<L>::deserialize(deserializer).map(Self::new)
    }
}

/// The single authoritative history owned by a machine.
///
/// Readers only ever see snapshots. Mutation is crate-internal and happens
/// when a transition completes, or when going back from the last entry
/// clears it.
#[derive(Debug)]
pub struct HistoryStore<L: Location> {
    entries: History<L>,
    initialized: bool,
}

impl<L: Location> Default for HistoryStore<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Location> HistoryStore<L> {
    /// Create an empty, never-initialized store.
    pub fn new() -> Self {
        Self {
            entries: History::empty(),
            initialized: false,
        }
    }

    /// Immutable snapshot of the committed history.
    pub fn current(&self) -> History<L> {
        self.entries.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether any transition has ever been committed.
    ///
    /// Stays `true` after a terminal clear.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub(crate) fn commit(&mut self, history: History<L>) {
        self.entries = history;
        self.initialized = true;
    }

    pub(crate) fn clear(&mut self) {
        self.entries = History::empty();
    }
}
