//! Longest-common-subsequence alignment of two line sequences.
//!
//! [`LcsTable`] holds the classic `(n+1) x (m+1)` length table and
//! [`align`] backtracks it into an ordered stream of per-line [`Event`]s.
//! Backtracking is iterative, so input length is bounded by the table's
//! memory rather than by the call stack.

use lmerge_types::{EditKind, Line, LineComparer, Sequence};
use tracing::debug;

/// One step of an alignment between an original and a target sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// The original line matches the target line.
    Equal { original: Line, target: Line },
    /// A target line with no counterpart in the original.
    Added(Line),
    /// An original line with no counterpart in the target.
    Deleted(Line),
}

impl Event {
    /// The edit kind this event represents.
    pub fn kind(&self) -> EditKind {
        match self {
            Event::Equal { .. } => EditKind::Equal,
            Event::Added(_) => EditKind::Added,
            Event::Deleted(_) => EditKind::Deleted,
        }
    }

    /// The line this event is about: the target line for `Added`, the
    /// original line otherwise.
    pub fn line(&self) -> &Line {
        match self {
            Event::Equal { original, .. } => original,
            Event::Added(line) | Event::Deleted(line) => line,
        }
    }
}

/// LCS length table: `get(i, j)` is the LCS length of `original[..i]` and
/// `target[..j]`.
#[derive(Clone, Debug)]
pub struct LcsTable {
    rows: usize,
    cols: usize,
    cells: Vec<usize>,
}

impl LcsTable {
    /// Fill the table for `original` against `target`.
    pub fn build<C>(original: &[Line], target: &[Line], comparer: &C) -> Self
    where
        C: LineComparer + ?Sized,
    {
        let rows = original.len() + 1;
        let cols = target.len() + 1;
        let mut table = Self {
            rows,
            cols,
            cells: vec![0; rows * cols],
        };

        for i in 1..rows {
            for j in 1..cols {
                let value = if comparer.equals(&original[i - 1], &target[j - 1]) {
                    table.get(i - 1, j - 1) + 1
                } else {
                    table.get(i - 1, j).max(table.get(i, j - 1))
                };
                table.cells[i * cols + j] = value;
            }
        }

        table
    }

    /// Table value at row `i`, column `j`.
    pub fn get(&self, i: usize, j: usize) -> usize {
        self.cells[i * self.cols + j]
    }

    /// Number of rows (`original.len() + 1`).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (`target.len() + 1`).
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Length of the longest common subsequence of the full inputs.
    pub fn max_length(&self) -> usize {
        self.get(self.rows - 1, self.cols - 1)
    }
}

/// Align `original` against `target`, returning events in ascending
/// original-then-target order.
///
/// When an original line is unmatched and the table does not prefer dropping
/// it (`M[i][j-1] >= M[i-1][j]`), the target line is reported as added first.
/// Within a hunk this puts every deletion before every addition.
pub fn align<C>(original: &Sequence, target: &Sequence, comparer: &C) -> Vec<Event>
where
    C: LineComparer + ?Sized,
{
    if original.is_empty() {
        return target.iter().cloned().map(Event::Added).collect();
    }
    if target.is_empty() {
        return original.iter().cloned().map(Event::Deleted).collect();
    }

    let a = original.lines();
    let b = target.lines();
    let table = LcsTable::build(a, b, comparer);
    debug!(
        original = a.len(),
        target = b.len(),
        common = table.max_length(),
        "built LCS table"
    );

    let (mut i, mut j) = (a.len(), b.len());
    let mut events = Vec::with_capacity(a.len() + b.len() - table.max_length());
    while i > 0 || j > 0 {
        if i > 0 && j > 0 && comparer.equals(&a[i - 1], &b[j - 1]) {
            events.push(Event::Equal {
                original: a[i - 1].clone(),
                target: b[j - 1].clone(),
            });
            i -= 1;
            j -= 1;
        } else if j > 0 && (i == 0 || table.get(i, j - 1) >= table.get(i - 1, j)) {
            events.push(Event::Added(b[j - 1].clone()));
            j -= 1;
        } else {
            events.push(Event::Deleted(a[i - 1].clone()));
            i -= 1;
        }
    }

    events.reverse();
    events
}

/// The common lines themselves, taken from `original`, in order.
pub fn longest_common_subsequence<C>(original: &Sequence, target: &Sequence, comparer: &C) -> Vec<Line>
where
    C: LineComparer + ?Sized,
{
    if original.is_empty() || target.is_empty() {
        return Vec::new();
    }

    let a = original.lines();
    let b = target.lines();
    let table = LcsTable::build(a, b, comparer);

    let (mut i, mut j) = (a.len(), b.len());
    let mut common = Vec::with_capacity(table.max_length());
    while i > 0 && j > 0 {
        if comparer.equals(&a[i - 1], &b[j - 1]) {
            common.push(a[i - 1].clone());
            i -= 1;
            j -= 1;
        } else if table.get(i - 1, j) > table.get(i, j - 1) {
            i -= 1;
        } else {
            j -= 1;
        }
    }

    common.reverse();
    common
}
