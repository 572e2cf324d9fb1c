//! Two-way diff: an original sequence and the ranges that turn it into a
//! target.

use lmerge_types::{EditKind, Sequence};
use tracing::debug;

use crate::compress::compress;
use crate::error::{DiffError, DiffResult};
use crate::lcs::align;
use crate::options::{ConflictMarkers, DiffOptions};
use crate::patch::{self, LineDifference};
use crate::range::{DifferenceRange, RangeId};

/// An original sequence plus an ordered set of ranges over its index space.
///
/// A `Diff` is immutable once built. Diffs computed from the same
/// [`Sequence`] handle can be merged.
#[derive(Clone, Debug)]
pub struct Diff {
    original: Sequence,
    ranges: Vec<DifferenceRange>,
}

/// Compute the diff from `original` to `target` with default options.
///
/// Either argument being `None` is an error; an empty sequence is fine.
pub fn compute_diff(original: Option<&Sequence>, target: Option<&Sequence>) -> DiffResult<Diff> {
    compute_diff_with(original, target, &DiffOptions::default())
}

/// Compute the diff from `original` to `target`.
pub fn compute_diff_with(
    original: Option<&Sequence>,
    target: Option<&Sequence>,
    options: &DiffOptions,
) -> DiffResult<Diff> {
    let original = original.ok_or(DiffError::NullInput { argument: "original" })?;
    let target = target.ok_or(DiffError::NullInput { argument: "target" })?;
    Diff::with_options(original, target, options)
}

impl Diff {
    /// Diff `original` against `target` with default options.
    pub fn new(original: &Sequence, target: &Sequence) -> DiffResult<Self> {
        Self::with_options(original, target, &DiffOptions::default())
    }

    /// Diff `original` against `target`.
    pub fn with_options(original: &Sequence, target: &Sequence, options: &DiffOptions) -> DiffResult<Self> {
        let events = align(original, target, &options.comparison);
        let ranges = compress(&events)?;
        debug!(
            original = original.len(),
            target = target.len(),
            ranges = ranges.len(),
            "computed diff"
        );
        Ok(Self {
            original: original.clone(),
            ranges,
        })
    }

    /// Assemble a diff from ranges computed elsewhere, such as a merge.
    ///
    /// Ranges must be non-empty, sorted by `from`, within the bounds of
    /// `original`, and conflict links must point at another range of the set.
    pub fn from_ranges(original: Sequence, ranges: Vec<DifferenceRange>) -> DiffResult<Self> {
        let mut previous_from = 0;
        for (index, range) in ranges.iter().enumerate() {
            if range.is_empty() {
                return Err(DiffError::invalid_range(range.from(), range.to(), "empty range in range set"));
            }
            if range.from() < previous_from {
                return Err(DiffError::invalid_range(range.from(), range.to(), "ranges are not sorted"));
            }
            let in_bounds = match range.kind() {
                EditKind::Added => range.from() <= original.len(),
                _ => range.to() < original.len(),
            };
            if !in_bounds {
                return Err(DiffError::invalid_range(
                    range.from(),
                    range.to(),
                    format!("outside original of {} lines", original.len()),
                ));
            }
            if let Some(other) = range.conflicted_with() {
                if other.index() == index || other.index() >= ranges.len() {
                    return Err(DiffError::invalid_range(
                        range.from(),
                        range.to(),
                        format!("dangling conflict link {other}"),
                    ));
                }
            }
            previous_from = range.from();
        }
        Ok(Self { original, ranges })
    }

    /// The original sequence this diff refers to.
    pub fn original(&self) -> &Sequence {
        &self.original
    }

    /// The ranges, ascending by `from`.
    pub fn ranges(&self) -> &[DifferenceRange] {
        &self.ranges
    }

    /// The range behind `id`.
    pub fn range(&self, id: RangeId) -> Option<&DifferenceRange> {
        self.ranges.get(id.index())
    }

    /// Returns `true` if the target equals the original.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Number of ranges.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Returns `true` if any range carries a conflict link.
    pub fn has_conflicts(&self) -> bool {
        self.ranges.iter().any(DifferenceRange::has_conflict)
    }

    /// Every conflicted pair as `(linking range, partner range)`.
    pub fn conflicts(&self) -> impl Iterator<Item = (&DifferenceRange, &DifferenceRange)> + '_ {
        self.ranges.iter().filter_map(|range| {
            let partner = self.range(range.conflicted_with()?)?;
            Some((range, partner))
        })
    }

    /// Total number of lines inserted by `Added` and `Replaced` ranges.
    pub fn additions(&self) -> usize {
        self.ranges.iter().map(|r| r.added_lines().len()).sum()
    }

    /// Total number of original lines removed by `Deleted` and `Replaced`
    /// ranges.
    pub fn deletions(&self) -> usize {
        self.ranges
            .iter()
            .filter(|r| r.kind().consumes_original())
            .map(DifferenceRange::len)
            .sum()
    }

    /// Apply the ranges to the original, rendering conflicts with the default
    /// `<<<` / `---` / `>>>` markers.
    ///
    /// Lines the alignment matched as equal keep the original's text. Under
    /// the default [`Comparison::IgnoreSurroundingWhitespace`](lmerge_types::Comparison)
    /// a target line that differs only in leading or trailing whitespace
    /// therefore comes back with the original's padding. Diff with
    /// [`DiffOptions::exact`] when the output must match the target byte for
    /// byte.
    pub fn apply(&self) -> Vec<String> {
        self.apply_with(&ConflictMarkers::default())
    }

    /// Apply the ranges to the original using `markers` for conflict blocks.
    pub fn apply_with(&self, markers: &ConflictMarkers) -> Vec<String> {
        patch::apply(&self.original, &self.ranges, markers)
    }

    /// Per-line listing of the original with every range's lines in place.
    pub fn per_line(&self) -> Vec<LineDifference> {
        patch::per_line(&self.original, &self.ranges)
    }
}
