//! Compression of alignment events into difference ranges.
//!
//! Pass one coalesces runs of same-kind, positionally adjacent events. Pass
//! two collapses a deletion that is directly followed by an insertion of at
//! least as many lines into a `Replaced` range plus an optional `Added`
//! remainder.

use lmerge_types::EditKind;

use crate::error::DiffResult;
use crate::lcs::Event;
use crate::range::DifferenceRange;

/// Compress an ordered event stream into ascending, non-overlapping ranges
/// over the original sequence.
pub fn compress(events: &[Event]) -> DiffResult<Vec<DifferenceRange>> {
    let coalesced = coalesce(events)?;
    collapse_replacements(coalesced)
}

fn coalesce(events: &[Event]) -> DiffResult<Vec<DifferenceRange>> {
    let mut ranges: Vec<DifferenceRange> = Vec::new();
    let mut last_kind: Option<EditKind> = None;
    // Original lines consumed so far; where the next insertion lands.
    let mut insertion_point = 0usize;
    let mut added_run = 0usize;

    for event in events {
        match event {
            Event::Equal { original, .. } => {
                insertion_point = original.index() + 1;
                added_run = 0;
                last_kind = Some(EditKind::Equal);
            }
            Event::Deleted(line) => {
                push_or_extend(&mut ranges, last_kind, EditKind::Deleted, line.index(), line)?;
                insertion_point = line.index() + 1;
                added_run = 0;
                last_kind = Some(EditKind::Deleted);
            }
            Event::Added(line) => {
                let at = insertion_point + added_run;
                push_or_extend(&mut ranges, last_kind, EditKind::Added, at, line)?;
                added_run += 1;
                last_kind = Some(EditKind::Added);
            }
        }
    }

    Ok(ranges)
}

fn push_or_extend(
    ranges: &mut Vec<DifferenceRange>,
    last_kind: Option<EditKind>,
    kind: EditKind,
    at: usize,
    line: &lmerge_types::Line,
) -> DiffResult<()> {
    if last_kind == Some(kind) {
        if let Some(last) = ranges.last_mut().filter(|r| r.kind() == kind) {
            return last.extend_to(at, line.clone());
        }
    }
    ranges.push(DifferenceRange::single(kind, at, line.clone())?);
    Ok(())
}

fn collapse_replacements(ranges: Vec<DifferenceRange>) -> DiffResult<Vec<DifferenceRange>> {
    let mut out = Vec::with_capacity(ranges.len());
    let mut iter = ranges.into_iter().peekable();

    while let Some(range) = iter.next() {
        let replaces = range.kind() == EditKind::Deleted
            && iter.peek().is_some_and(|next| {
                next.kind() == EditKind::Added
                    && next.from() == range.to() + 1
                    && range.len() <= next.len()
            });
        if !replaces {
            out.push(range);
            continue;
        }

        let Some(mut added) = iter.next() else {
            out.push(range);
            break;
        };
        let head = added.cut_to(added.from() + range.len() - 1)?;
        out.push(DifferenceRange::replaced(range.from(), range.to(), head.into_lines())?);
        if !added.is_empty() {
            out.push(added);
        }
    }

    Ok(out)
}
