//! How a transition relates to the history it replaces.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction metadata attached to every transition.
///
/// Direction never changes which locations end up in the history. It only
/// tells the handler how the new history relates to the previous one, so a
/// view layer can pick an animation or similar presentation detail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// A location was appended to the history
    Forward,
    /// The history was rewound to one of its prefixes
    Backward,
    /// An arbitrary new history superseded the old one
    Replace,
}

impl Direction {
    /// Lowercase name used in log fields.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
            Self::Replace => "replace",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
