//! Whole-text three-way merge on top of [`merge_diffs`].

use lmerge_diff::{ConflictMarkers, Diff, DiffOptions};
use lmerge_types::{Comparison, Sequence};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{MergeError, MergeResult};
use crate::merge::merge_diffs;

/// Settings for a text-level merge.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// How lines are compared when diffing each side against the original.
    pub comparison: Comparison,
    /// Marker lines framing conflict blocks in the merged text.
    pub markers: ConflictMarkers,
}

impl MergeConfig {
    fn diff_options(&self) -> DiffOptions {
        DiffOptions {
            comparison: self.comparison,
        }
    }
}

/// Result of merging whole texts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MergeOutcome {
    /// Merged lines, with conflict blocks inlined.
    pub lines: Vec<String>,
    /// Number of conflict blocks in `lines`.
    pub conflicts: usize,
}

impl MergeOutcome {
    /// Returns `true` if both sides merged without conflicts.
    pub fn is_clean(&self) -> bool {
        self.conflicts == 0
    }

    /// The merged lines joined with `\n`.
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Diff `first` and `second` against `original` and merge the two diffs.
pub fn merge_sequences(
    original: &Sequence,
    first: &Sequence,
    second: &Sequence,
    config: &MergeConfig,
) -> MergeResult<Diff> {
    let options = config.diff_options();
    let ours = Diff::with_options(original, first, &options)?;
    let theirs = Diff::with_options(original, second, &options)?;
    merge_diffs(&ours, &theirs)
}

/// Merge two edited versions of `original` line by line.
///
/// Any absent input is rejected with [`MergeError::NullInput`]; empty inputs
/// are fine.
pub fn merge_texts<S: AsRef<str>>(
    original: Option<&[S]>,
    first: Option<&[S]>,
    second: Option<&[S]>,
    config: &MergeConfig,
) -> MergeResult<MergeOutcome> {
    let original = original.ok_or(MergeError::NullInput { argument: "original" })?;
    let first = first.ok_or(MergeError::NullInput { argument: "first" })?;
    let second = second.ok_or(MergeError::NullInput { argument: "second" })?;

    let to_sequence = |lines: &[S]| Sequence::from_lines(lines.iter().map(|l| l.as_ref().to_string()));
    let merged = merge_sequences(
        &to_sequence(original),
        &to_sequence(first),
        &to_sequence(second),
        config,
    )?;

    let outcome = MergeOutcome {
        lines: merged.apply_with(&config.markers),
        conflicts: merged.conflicts().count(),
    };
    debug!(
        lines = outcome.lines.len(),
        conflicts = outcome.conflicts,
        "merged texts"
    );
    Ok(outcome)
}
