#![forbid(unsafe_code)]

//! Error types.

/// Errors raised while building a [`Cycle`](crate::Cycle).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleError {
    /// The cycle has no strings to display.
    Empty,
}

impl std::fmt::Display for CycleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "cycle must contain at least one string"),
        }
    }
}

impl std::error::Error for CycleError {}
