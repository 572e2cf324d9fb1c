//! Merge engine for lmerge.
//!
//! Combines two diffs computed against one shared original into a single
//! range set, splitting ranges where the two sides overlap and linking the
//! overlapping slices as conflicts.
//!
//! # Key Types
//!
//! - [`merge_diffs`] -- Three-way merge of two [`Diff`](lmerge_diff::Diff)s
//! - [`merge_texts`] / [`MergeOutcome`] -- Whole-text three-way merge
//! - [`MergeConfig`] -- Comparison mode and conflict markers

pub mod error;
pub mod merge;
pub mod text;

pub use error::{MergeError, MergeResult};
pub use merge::merge_diffs;
pub use text::{merge_sequences, merge_texts, MergeConfig, MergeOutcome};
