//! Patch reconstruction: rebuilding text from an original and its ranges.

use std::collections::HashSet;
use std::fmt;

use lmerge_types::{EditKind, Line, Sequence};
use serde::Serialize;

use crate::options::ConflictMarkers;
use crate::range::DifferenceRange;

/// One entry of a per-line difference listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LineDifference {
    pub kind: EditKind,
    /// The original line for `Equal`/`Deleted`, the new line otherwise.
    pub line: Line,
    /// Set when the entry belongs to a conflicted range pair.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub conflicted: bool,
}

impl fmt::Display for LineDifference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.\t\t{}|{}", self.line.index(), self.kind.marker(), self.line.text())
    }
}

/// Indices of ranges that are the target of another range's conflict link.
/// They are rendered as part of the linking range's block.
fn conflict_partners(ranges: &[DifferenceRange]) -> HashSet<usize> {
    ranges
        .iter()
        .filter_map(DifferenceRange::conflicted_with)
        .map(|id| id.index())
        .collect()
}

fn shifted(index: usize, offset: isize) -> usize {
    (index as isize + offset) as usize
}

/// Apply `ranges` to `original`, producing the patched lines.
pub(crate) fn apply(original: &Sequence, ranges: &[DifferenceRange], markers: &ConflictMarkers) -> Vec<String> {
    let partners = conflict_partners(ranges);
    let mut result = original.texts();
    let mut offset: isize = 0;

    for (index, range) in ranges.iter().enumerate() {
        if partners.contains(&index) {
            continue;
        }

        if let Some(partner) = range.conflicted_with().and_then(|id| ranges.get(id.index())) {
            let (start, end) = conflict_region(range, partner);
            let block = conflict_block(original, range, partner, start, end, markers);
            let inserted = block.len() as isize;
            let at = shifted(start, offset);
            result.splice(at..shifted(end, offset), block);
            offset += inserted - (end - start) as isize;
            continue;
        }

        let at = shifted(range.from(), offset);
        let texts = range.added_lines().iter().map(|l| l.text().to_string());
        match range.kind() {
            EditKind::Deleted => {
                result.drain(at..at + range.len());
                offset -= range.len() as isize;
            }
            EditKind::Replaced => {
                let inserted = range.added_lines().len() as isize;
                result.splice(at..at + range.len(), texts);
                offset += inserted - range.len() as isize;
            }
            EditKind::Added => {
                let inserted = range.added_lines().len() as isize;
                result.splice(at..at, texts);
                offset += inserted;
            }
            EditKind::Equal => {}
        }
    }

    result
}

/// Half-open span of original lines a conflict block stands in for: the
/// union of lines consumed by either side, or an empty span at the shared
/// insertion point when neither side consumes any.
fn conflict_region(a: &DifferenceRange, b: &DifferenceRange) -> (usize, usize) {
    let start = a.from().min(b.from());
    let end = [a, b]
        .iter()
        .filter(|r| r.kind().consumes_original())
        .map(|r| r.to() + 1)
        .max()
        .unwrap_or(start);
    (start, end.max(start))
}

fn conflict_block(
    original: &Sequence,
    range: &DifferenceRange,
    partner: &DifferenceRange,
    start: usize,
    end: usize,
    markers: &ConflictMarkers,
) -> Vec<String> {
    let mut block = vec![markers.begin.clone()];
    block.extend(side(original, range, start, end));
    block.push(markers.separator.clone());
    block.extend(side(original, partner, start, end));
    block.push(markers.end.clone());
    block
}

/// One side's version of original lines `start..end`: its own edit applied,
/// the other lines of the region left as they were.
fn side(original: &Sequence, range: &DifferenceRange, start: usize, end: usize) -> Vec<String> {
    let inserts = range.kind().carries_lines();
    let consumes = range.kind().consumes_original();
    let added = || range.added_lines().iter().map(|l| l.text().to_string());

    let mut out = Vec::new();
    let mut placed = false;
    for index in start..end {
        if inserts && !placed && index == range.from() {
            out.extend(added());
            placed = true;
        }
        let consumed = consumes && index >= range.from() && index <= range.to();
        if !consumed {
            if let Some(line) = original.get(index) {
                out.push(line.text().to_string());
            }
        }
    }
    if inserts && !placed {
        out.extend(added());
    }
    out
}

/// One entry per original line not touched by any range (`Equal`), plus one
/// entry per line of every range, in original order.
pub(crate) fn per_line(original: &Sequence, ranges: &[DifferenceRange]) -> Vec<LineDifference> {
    let partners = conflict_partners(ranges);
    let mut out = Vec::with_capacity(original.len());
    let mut next = 0usize;

    let equal = |line: &Line| LineDifference {
        kind: EditKind::Equal,
        line: line.clone(),
        conflicted: false,
    };

    for (index, range) in ranges.iter().enumerate() {
        let conflicted = range.has_conflict() || partners.contains(&index);
        while next < range.from() && next < original.len() {
            if let Some(line) = original.get(next) {
                out.push(equal(line));
            }
            next += 1;
        }

        match range.kind() {
            EditKind::Deleted => {
                for line in original.lines().iter().skip(range.from()).take(range.len()) {
                    out.push(LineDifference {
                        kind: EditKind::Deleted,
                        line: line.clone(),
                        conflicted,
                    });
                }
            }
            kind @ (EditKind::Added | EditKind::Replaced) => {
                for line in range.added_lines() {
                    out.push(LineDifference {
                        kind,
                        line: line.clone(),
                        conflicted,
                    });
                }
            }
            EditKind::Equal => {}
        }

        if range.kind().consumes_original() {
            next = next.max(range.to() + 1);
        }
    }

    for line in original.lines().iter().skip(next) {
        out.push(equal(line));
    }
    out
}
