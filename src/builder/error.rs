//! Build errors for navigation machines.

use thiserror::Error;

/// Errors that can occur when building a [`Backstack`](crate::Backstack).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("Initial history not specified. Call .initial(locations) before .build()")]
    MissingInitialHistory,

    #[error("Initial history is empty. At least one initial location must be defined")]
    EmptyInitialHistory,
}
