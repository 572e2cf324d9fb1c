//! Diff engine for lmerge.
//!
//! Aligns two line sequences with a longest-common-subsequence table,
//! compresses the per-line events into contiguous ranges over the original
//! sequence, and rebuilds patched output from those ranges.
//!
//! # Key Types
//!
//! - [`Diff`] -- An original sequence plus its ordered range set
//! - [`DifferenceRange`] / [`RangeId`] -- A contiguous edit and its arena handle
//! - [`Event`] / [`LcsTable`] -- Alignment engine output and table
//! - [`LineDifference`] -- One entry of a per-line listing
//! - [`DiffOptions`] / [`ConflictMarkers`] -- Configuration

pub mod compress;
pub mod diff;
pub mod error;
#[cfg(any(test, feature = "test-support"))]
pub mod generate;
pub mod lcs;
pub mod options;
pub mod patch;
pub mod range;

pub use compress::compress;
pub use diff::{compute_diff, compute_diff_with, Diff};
pub use error::{DiffError, DiffResult};
pub use lcs::{align, longest_common_subsequence, Event, LcsTable};
pub use options::{ConflictMarkers, DiffOptions};
pub use patch::LineDifference;
pub use range::{DifferenceRange, RangeId};
