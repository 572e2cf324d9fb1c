//! Foundation types for lmerge.
//!
//! This crate provides the value types shared by the diff and merge engines.
//! Every other lmerge crate depends on `lmerge-types`.
//!
//! # Key Types
//!
//! - [`Line`] -- An indexed line of text compared by its trimmed content
//! - [`Sequence`] -- An immutable, shareable list of lines with identity semantics
//! - [`EditKind`] -- The closed set of per-line edit kinds
//! - [`Comparison`] / [`LineComparer`] -- Pluggable line equality

pub mod compare;
pub mod error;
pub mod kind;
pub mod line;
pub mod sequence;

pub use compare::{Comparison, ExactText, IgnoreSurroundingWhitespace, LineComparer};
pub use error::TypeError;
pub use kind::EditKind;
pub use line::Line;
pub use sequence::Sequence;
