//! Error types for the merge crate.

use lmerge_diff::DiffError;

/// Errors that can occur while merging.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MergeError {
    /// The two diffs were not computed against the same original sequence.
    #[error("diffs were computed against different original sequences")]
    IncompatibleOriginal,

    /// A diff passed in already carries conflict links.
    #[error("{0} diff already contains conflicts")]
    ConflictedInput(&'static str),

    /// A required input sequence was absent.
    #[error("missing input sequence: {argument}")]
    NullInput {
        /// Name of the missing argument.
        argument: &'static str,
    },

    /// Range arithmetic failed inside the diff engine.
    #[error("diff error: {0}")]
    Diff(#[from] DiffError),
}

/// Convenience alias for merge results.
pub type MergeResult<T> = Result<T, MergeError>;
