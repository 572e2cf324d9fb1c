use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("unknown edit kind: {0}")]
    UnknownEditKind(String),

    #[error("unknown comparison mode: {0}")]
    UnknownComparison(String),
}
