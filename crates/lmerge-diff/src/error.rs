//! Error types for the diff crate.

/// Errors that can occur during diff operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiffError {
    /// A required input sequence was absent (an empty sequence is not absent).
    #[error("missing input sequence: {argument}")]
    NullInput {
        /// Name of the missing argument.
        argument: &'static str,
    },

    /// A range operation broke its contract. This indicates a bug in range
    /// compression or merge logic rather than bad user input.
    #[error("invalid range [{from}, {to}]: {reason}")]
    InvalidRange {
        from: usize,
        to: usize,
        reason: String,
    },
}

impl DiffError {
    pub(crate) fn invalid_range(from: usize, to: usize, reason: impl Into<String>) -> Self {
        Self::InvalidRange {
            from,
            to,
            reason: reason.into(),
        }
    }
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
