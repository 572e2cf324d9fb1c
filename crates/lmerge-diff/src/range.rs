//! Contiguous edit ranges over the original sequence's index space.

use std::fmt;

use lmerge_types::{EditKind, Line};
use serde::Serialize;

use crate::error::{DiffError, DiffResult};

/// Handle to a range inside the range collection of one [`Diff`](crate::Diff).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RangeId(usize);

impl RangeId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position in the owning range collection.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for RangeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A contiguous interval `[from, to]` of original indices sharing one edit
/// kind.
///
/// - `Deleted` and `Replaced` ranges consume original lines `from..=to`.
/// - An `Added` range inserts its lines before original line `from` (its
///   insertion point); `to` is `from + count - 1`.
/// - `Added` and `Replaced` ranges carry exactly `len()` added lines.
///
/// A range may record the [`RangeId`] of another range it conflicts with.
/// The link is a handle into the owning collection, set at most once.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DifferenceRange {
    kind: EditKind,
    from: usize,
    len: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    added_lines: Vec<Line>,
    #[serde(skip_serializing_if = "Option::is_none")]
    conflicted_with: Option<RangeId>,
}

impl DifferenceRange {
    /// An insertion of `lines` before original line `at`.
    pub fn added(at: usize, lines: Vec<Line>) -> DiffResult<Self> {
        if lines.is_empty() {
            return Err(DiffError::invalid_range(at, at, "added range needs at least one line"));
        }
        Ok(Self {
            kind: EditKind::Added,
            from: at,
            len: lines.len(),
            added_lines: lines,
            conflicted_with: None,
        })
    }

    /// Deletion of original lines `from..=to`.
    pub fn deleted(from: usize, to: usize) -> DiffResult<Self> {
        if to < from {
            return Err(DiffError::invalid_range(from, to, "range ends before it starts"));
        }
        Ok(Self {
            kind: EditKind::Deleted,
            from,
            len: to - from + 1,
            added_lines: Vec::new(),
            conflicted_with: None,
        })
    }

    /// Replacement of original lines `from..=to` by exactly as many `lines`.
    pub fn replaced(from: usize, to: usize, lines: Vec<Line>) -> DiffResult<Self> {
        if to < from {
            return Err(DiffError::invalid_range(from, to, "range ends before it starts"));
        }
        if lines.len() != to - from + 1 {
            return Err(DiffError::invalid_range(
                from,
                to,
                format!("replaced range of length {} given {} lines", to - from + 1, lines.len()),
            ));
        }
        Ok(Self {
            kind: EditKind::Replaced,
            from,
            len: lines.len(),
            added_lines: lines,
            conflicted_with: None,
        })
    }

    /// A one-line range of `kind` positioned at `at`.
    pub(crate) fn single(kind: EditKind, at: usize, line: Line) -> DiffResult<Self> {
        match kind {
            EditKind::Added => Self::added(at, vec![line]),
            EditKind::Deleted => Self::deleted(at, at),
            EditKind::Replaced => Self::replaced(at, at, vec![line]),
            EditKind::Equal => Err(DiffError::invalid_range(at, at, "equal lines do not form ranges")),
        }
    }

    pub fn kind(&self) -> EditKind {
        self.kind
    }

    /// First index of the range (the insertion point for `Added`).
    pub fn from(&self) -> usize {
        self.from
    }

    /// Last index of the range. Only meaningful for non-empty ranges.
    pub fn to(&self) -> usize {
        (self.from + self.len).saturating_sub(1)
    }

    /// Number of indices covered, `to - from + 1`.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` for a zero-length range, which only exists transiently
    /// after a cut consumed every index.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Lines inserted by this range (empty for `Deleted`).
    pub fn added_lines(&self) -> &[Line] {
        &self.added_lines
    }

    /// Consume the range, returning its added lines.
    pub fn into_lines(self) -> Vec<Line> {
        self.added_lines
    }

    /// The range this one conflicts with, if any.
    pub fn conflicted_with(&self) -> Option<RangeId> {
        self.conflicted_with
    }

    pub fn has_conflict(&self) -> bool {
        self.conflicted_with.is_some()
    }

    /// Last original index this range touches. An insertion touches only its
    /// insertion point.
    pub fn footprint_end(&self) -> usize {
        match self.kind {
            EditKind::Added => self.from,
            _ => self.to(),
        }
    }

    /// Returns `true` if the footprints of the two ranges intersect,
    /// boundaries included.
    pub fn overlaps(&self, other: &DifferenceRange) -> bool {
        self.from <= other.footprint_end() && other.from <= self.footprint_end()
    }

    /// Grow the range by one index to `at`, which must be `to + 1`.
    ///
    /// `line` is appended to the added lines unless the range is `Deleted`.
    pub fn extend_to(&mut self, at: usize, line: Line) -> DiffResult<()> {
        if at != self.from + self.len {
            return Err(DiffError::invalid_range(
                self.from,
                self.to(),
                format!("cannot extend to non-adjacent index {at}"),
            ));
        }
        self.len += 1;
        if self.kind.carries_lines() {
            self.added_lines.push(line);
        }
        Ok(())
    }

    /// Split off and return `[from, index]`; `self` keeps `[index + 1, to]`,
    /// which is empty when `index == to`.
    ///
    /// Added lines are partitioned by count. Both halves of an `Added` range
    /// keep the same insertion point.
    pub fn cut_to(&mut self, index: usize) -> DiffResult<DifferenceRange> {
        self.check_cut(index)?;
        let count = index - self.from + 1;
        let rest = if self.kind.carries_lines() {
            self.added_lines.split_off(count)
        } else {
            Vec::new()
        };
        let head = Self {
            kind: self.kind,
            from: self.from,
            len: count,
            added_lines: std::mem::replace(&mut self.added_lines, rest),
            conflicted_with: None,
        };
        if self.kind != EditKind::Added {
            self.from = index + 1;
        }
        self.len -= count;
        Ok(head)
    }

    /// Split off and return `[index, to]`; `self` keeps `[from, index - 1]`,
    /// which is empty when `index == from`.
    ///
    /// Added lines are partitioned by count. Both halves of an `Added` range
    /// keep the same insertion point.
    pub fn cut_from(&mut self, index: usize) -> DiffResult<DifferenceRange> {
        self.check_cut(index)?;
        let keep = index - self.from;
        let tail_lines = if self.kind.carries_lines() {
            self.added_lines.split_off(keep)
        } else {
            Vec::new()
        };
        let tail = Self {
            kind: self.kind,
            from: if self.kind == EditKind::Added { self.from } else { index },
            len: self.len - keep,
            added_lines: tail_lines,
            conflicted_with: None,
        };
        self.len = keep;
        Ok(tail)
    }

    /// Record that the range at `own` (this one) conflicts with `other`.
    pub fn mark_conflict(&mut self, own: RangeId, other: RangeId) -> DiffResult<()> {
        if own == other {
            return Err(DiffError::invalid_range(
                self.from,
                self.to(),
                "a range cannot conflict with itself",
            ));
        }
        if let Some(existing) = self.conflicted_with {
            return Err(DiffError::invalid_range(
                self.from,
                self.to(),
                format!("already conflicted with {existing}"),
            ));
        }
        self.conflicted_with = Some(other);
        Ok(())
    }

    fn check_cut(&self, index: usize) -> DiffResult<()> {
        if self.has_conflict() {
            return Err(DiffError::invalid_range(self.from, self.to(), "cannot cut a conflicted range"));
        }
        if self.is_empty() || index < self.from || index > self.to() {
            return Err(DiffError::invalid_range(
                self.from,
                self.to(),
                format!("cut index {index} outside range"),
            ));
        }
        Ok(())
    }
}
