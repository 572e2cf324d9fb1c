//! Three-way merge of two diffs that share one original sequence.
//!
//! Ranges from both diffs are tagged with their side, sorted by `from`
//! (first side wins ties), and scanned pairwise. Where ranges from different
//! sides overlap, the earlier range is cut at the later one's start, both
//! are trimmed to their shared footprint, and the two slices are emitted back
//! to back with the earlier slice linked to its partner. Trimmed-off pieces
//! go back into the pending queue so they are checked against later ranges.
//!
//! Before the scan, a deletion followed by a shorter insertion at its end is
//! rewritten as a replacement of its first lines plus a deletion of the rest.
//! The edit is the same, but each replaced line now carries its new text, so
//! a conflict on that line shows the side's replacement inside the block.

use std::collections::VecDeque;

use lmerge_diff::{Diff, DifferenceRange, RangeId};
use lmerge_types::EditKind;
use tracing::debug;

use crate::error::{MergeError, MergeResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Side {
    First,
    Second,
}

#[derive(Debug)]
struct Tagged {
    side: Side,
    range: DifferenceRange,
}

impl Tagged {
    fn key(&self) -> (usize, Side) {
        (self.range.from(), self.side)
    }
}

/// Merge `first` and `second` into a new diff over their shared original.
///
/// Both diffs must have been computed against the very same
/// [`Sequence`](lmerge_types::Sequence) handle; equal contents are not
/// enough. Inputs are left untouched.
pub fn merge_diffs(first: &Diff, second: &Diff) -> MergeResult<Diff> {
    if !first.original().same_as(second.original()) {
        return Err(MergeError::IncompatibleOriginal);
    }
    if first.has_conflicts() {
        return Err(MergeError::ConflictedInput("first"));
    }
    if second.has_conflicts() {
        return Err(MergeError::ConflictedInput("second"));
    }

    let ranges = merge_ranges(first.ranges(), second.ranges())?;
    let merged = Diff::from_ranges(first.original().clone(), ranges)?;
    debug!(
        first = first.len(),
        second = second.len(),
        merged = merged.len(),
        conflicts = merged.conflicts().count(),
        "merged diffs"
    );
    Ok(merged)
}

fn merge_ranges(first: &[DifferenceRange], second: &[DifferenceRange]) -> MergeResult<Vec<DifferenceRange>> {
    let mut tagged: Vec<Tagged> = split_hunks(first)?
        .into_iter()
        .map(|range| Tagged { side: Side::First, range })
        .chain(split_hunks(second)?.into_iter().map(|range| Tagged { side: Side::Second, range }))
        .collect();
    tagged.sort_by_key(Tagged::key);
    let mut pending: VecDeque<Tagged> = tagged.into();

    let mut merged = Vec::with_capacity(pending.len());
    let Some(mut prev) = pending.pop_front() else {
        return Ok(merged);
    };

    while let Some(mut curr) = pending.pop_front() {
        if prev.side == curr.side || !prev.range.overlaps(&curr.range) {
            merged.push(prev.range);
            prev = curr;
            continue;
        }

        // Sorted order guarantees prev.from <= curr.from here.
        if curr.range.from() > prev.range.from() {
            let slice = prev.range.cut_from(curr.range.from())?;
            merged.push(std::mem::replace(&mut prev.range, slice));
        }

        let end = prev.range.footprint_end().min(curr.range.footprint_end());
        if prev.range.footprint_end() > end {
            let tail = prev.range.cut_from(end + 1)?;
            requeue(&mut pending, Tagged { side: prev.side, range: tail });
        }
        if curr.range.footprint_end() > end {
            let after = curr.range.cut_from(end + 1)?;
            requeue(&mut pending, Tagged { side: curr.side, range: after });
        }

        let own = RangeId::new(merged.len());
        prev.range.mark_conflict(own, RangeId::new(own.index() + 1))?;
        merged.push(prev.range);
        merged.push(curr.range);

        match pending.pop_front() {
            Some(next) => prev = next,
            None => return Ok(merged),
        }
    }

    merged.push(prev.range);
    Ok(merged)
}

/// Rewrite `Deleted [d, e]` followed by `Added` at `e + 1` with `m < e - d + 1`
/// lines as `Replaced [d, d + m - 1]` plus `Deleted [d + m, e]`.
fn split_hunks(ranges: &[DifferenceRange]) -> MergeResult<Vec<DifferenceRange>> {
    let mut out = Vec::with_capacity(ranges.len());
    let mut iter = ranges.iter().cloned().peekable();

    while let Some(mut range) = iter.next() {
        let shorter_insert = range.kind() == EditKind::Deleted
            && iter.peek().is_some_and(|next| {
                next.kind() == EditKind::Added && next.from() == range.to() + 1 && next.len() < range.len()
            });
        if !shorter_insert {
            out.push(range);
            continue;
        }

        let Some(added) = iter.next() else {
            out.push(range);
            break;
        };
        let head = range.cut_to(range.from() + added.len() - 1)?;
        out.push(DifferenceRange::replaced(head.from(), head.to(), added.into_lines())?);
        out.push(range);
    }

    Ok(out)
}

/// Insert `item` keeping `pending` sorted by `(from, side)`.
fn requeue(pending: &mut VecDeque<Tagged>, item: Tagged) {
    let key = item.key();
    let at = pending
        .iter()
        .position(|p| p.key() > key)
        .unwrap_or(pending.len());
    pending.insert(at, item);
}

#[cfg(test)]
mod tests {
    use lmerge_types::{Line, Sequence};

    use super::*;

    fn numbered(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("line {i}")).collect()
    }

    fn summary(diff: &Diff) -> Vec<(EditKind, usize, usize, bool)> {
        diff.ranges()
            .iter()
            .map(|r| (r.kind(), r.from(), r.to(), r.has_conflict()))
            .collect()
    }

    fn texts(range: &DifferenceRange) -> Vec<&str> {
        range.added_lines().iter().map(Line::text).collect()
    }

    /// Replace lines 3-4 and insert a line before line 5.
    fn first_target(original: &[String]) -> Vec<String> {
        let mut target = original.to_vec();
        target[3] = "first 3".into();
        target[4] = "first 4".into();
        target.insert(5, "first insert".into());
        target
    }

    #[test]
    fn different_originals_are_rejected_even_if_equal() {
        let a = Sequence::from_lines(["x", "y"]);
        let b = Sequence::from_lines(["x", "y"]);
        let target = Sequence::from_lines(["x"]);
        let first = Diff::new(&a, &target).unwrap();
        let second = Diff::new(&b, &target).unwrap();
        assert_eq!(merge_diffs(&first, &second).unwrap_err(), MergeError::IncompatibleOriginal);
    }

    #[test]
    fn merging_with_empty_diff_keeps_other_side() {
        let original = Sequence::from_lines(numbered(6));
        let target = Sequence::from_lines(first_target(&original.texts()));
        let changed = Diff::new(&original, &target).unwrap();
        let unchanged = Diff::new(&original, &original).unwrap();

        let merged = merge_diffs(&unchanged, &changed).unwrap();
        assert_eq!(merged.ranges(), changed.ranges());
        assert_eq!(merged.apply(), target.texts());

        let empty = merge_diffs(&unchanged, &unchanged).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn disjoint_edits_merge_without_conflicts() {
        let lines = numbered(10);
        let original = Sequence::from_lines(lines.clone());
        let first = Sequence::from_lines(first_target(&lines));

        let mut second = lines.clone();
        second[6] = "second 6".into();
        second[7] = "second 7".into();
        second.remove(8);
        let second = Sequence::from_lines(second);

        let merged = merge_diffs(
            &Diff::new(&original, &first).unwrap(),
            &Diff::new(&original, &second).unwrap(),
        )
        .unwrap();

        assert_eq!(merged.len(), 4);
        assert!(!merged.has_conflicts());
        assert!(merged.ranges().windows(2).all(|w| w[0].from() <= w[1].from()));
        assert_eq!(
            merged.apply(),
            vec![
                "line 0", "line 1", "line 2", "first 3", "first 4", "first insert", "line 5",
                "second 6", "second 7", "line 9",
            ]
        );
    }

    #[test]
    fn insertion_against_changed_line_conflicts_once() {
        let lines = numbered(10);
        let original = Sequence::from_lines(lines.clone());
        let first = Sequence::from_lines(first_target(&lines));

        let mut second = lines.clone();
        second[5] = "second 5".into();
        second[6] = "second 6".into();
        second[7] = "second 7".into();
        second.remove(8);
        let second = Sequence::from_lines(second);

        let merged = merge_diffs(
            &Diff::new(&original, &first).unwrap(),
            &Diff::new(&original, &second).unwrap(),
        )
        .unwrap();

        assert_eq!(
            summary(&merged),
            vec![
                (EditKind::Replaced, 3, 4, false),
                (EditKind::Added, 5, 5, true),
                (EditKind::Replaced, 5, 5, false),
                (EditKind::Replaced, 6, 7, false),
                (EditKind::Deleted, 8, 8, false),
            ]
        );
        assert_eq!(texts(&merged.ranges()[1]), vec!["first insert"]);
        assert_eq!(texts(&merged.ranges()[2]), vec!["second 5"]);

        let patched = merged.apply();
        let begin = patched.iter().position(|l| l == "<<<").unwrap();
        let separator = patched.iter().position(|l| l == "---").unwrap();
        let end = patched.iter().position(|l| l == ">>>").unwrap();
        assert!(begin < separator && separator < end);
        assert_eq!(patched[begin + 1..separator], ["first insert", "line 5"]);
        assert_eq!(patched[separator + 1..end], ["second 5"]);
        assert_eq!(
            patched,
            vec![
                "line 0", "line 1", "line 2", "first 3", "first 4", "<<<", "first insert", "line 5", "---",
                "second 5", ">>>", "second 6", "second 7", "line 9",
            ]
        );
    }

    #[test]
    fn shortened_hunk_keeps_its_text_in_the_conflict() {
        // One side turns "b c" into "x"; the other replaces "b" alone.
        let original = Sequence::from_lines(["a", "b", "c", "d"]);
        let shortened = Diff::new(&original, &Sequence::from_lines(["a", "x", "d"])).unwrap();
        let replaced = Diff::new(&original, &Sequence::from_lines(["a", "B", "c", "d"])).unwrap();
        assert_eq!(shortened.ranges()[0].kind(), EditKind::Deleted);

        let merged = merge_diffs(&shortened, &replaced).unwrap();
        assert_eq!(
            summary(&merged),
            vec![
                (EditKind::Replaced, 1, 1, true),
                (EditKind::Replaced, 1, 1, false),
                (EditKind::Deleted, 2, 2, false),
            ]
        );
        assert_eq!(merged.apply(), vec!["a", "<<<", "x", "---", "B", ">>>", "d"]);

        let reversed = merge_diffs(&replaced, &shortened).unwrap();
        assert_eq!(reversed.apply(), vec!["a", "<<<", "B", "---", "x", ">>>", "d"]);
    }

    #[test]
    fn shortened_hunk_applies_unchanged_without_conflicts() {
        let original = Sequence::from_lines(numbered(6));
        let target = Sequence::from_lines(["line 0", "new", "line 5"]);
        let diff = Diff::new(&original, &target).unwrap();
        let unchanged = Diff::new(&original, &original).unwrap();

        let merged = merge_diffs(&diff, &unchanged).unwrap();
        assert_eq!(
            summary(&merged),
            vec![(EditKind::Replaced, 1, 1, false), (EditKind::Deleted, 2, 4, false)]
        );
        assert_eq!(merged.apply(), target.texts());
    }

    #[test]
    fn same_line_replaced_on_both_sides() {
        let original = Sequence::from_lines(["a", "b", "c"]);
        let mine = Sequence::from_lines(["a", "mine", "c"]);
        let theirs = Sequence::from_lines(["a", "theirs", "c"]);

        let merged = merge_diffs(
            &Diff::new(&original, &mine).unwrap(),
            &Diff::new(&original, &theirs).unwrap(),
        )
        .unwrap();

        assert_eq!(
            summary(&merged),
            vec![
                (EditKind::Replaced, 1, 1, true),
                (EditKind::Replaced, 1, 1, false),
            ]
        );
        assert_eq!(merged.ranges()[0].conflicted_with(), Some(RangeId::new(1)));
        assert_eq!(
            merged.apply(),
            vec!["a", "<<<", "mine", "---", "theirs", ">>>", "c"]
        );
    }

    #[test]
    fn overlap_splits_both_ranges() {
        // First replaces 1..=4, second replaces 3..=6.
        let original = Sequence::from_lines(numbered(8));
        let mut mine = original.texts();
        for (i, line) in mine.iter_mut().enumerate().take(5).skip(1) {
            *line = format!("mine {i}");
        }
        let mut theirs = original.texts();
        for (i, line) in theirs.iter_mut().enumerate().take(7).skip(3) {
            *line = format!("theirs {i}");
        }

        let merged = merge_diffs(
            &Diff::new(&original, &Sequence::from_lines(mine)).unwrap(),
            &Diff::new(&original, &Sequence::from_lines(theirs)).unwrap(),
        )
        .unwrap();

        assert_eq!(
            summary(&merged),
            vec![
                (EditKind::Replaced, 1, 2, false),
                (EditKind::Replaced, 3, 4, true),
                (EditKind::Replaced, 3, 4, false),
                (EditKind::Replaced, 5, 6, false),
            ]
        );
        assert_eq!(texts(&merged.ranges()[0]), vec!["mine 1", "mine 2"]);
        assert_eq!(texts(&merged.ranges()[3]), vec!["theirs 5", "theirs 6"]);
        assert_eq!(
            merged.apply(),
            vec![
                "line 0", "mine 1", "mine 2", "<<<", "mine 3", "mine 4", "---", "theirs 3",
                "theirs 4", ">>>", "theirs 5", "theirs 6", "line 7",
            ]
        );
    }

    #[test]
    fn long_range_is_checked_against_every_later_range() {
        // First deletes 1..=6; second replaces 2 and 5 separately.
        let original = Sequence::from_lines(numbered(8));
        let first = Sequence::from_lines(["line 0", "line 7"]);
        let mut theirs = original.texts();
        theirs[2] = "theirs 2".into();
        theirs[5] = "theirs 5".into();

        let merged = merge_diffs(
            &Diff::new(&original, &first).unwrap(),
            &Diff::new(&original, &Sequence::from_lines(theirs)).unwrap(),
        )
        .unwrap();

        assert_eq!(
            summary(&merged),
            vec![
                (EditKind::Deleted, 1, 1, false),
                (EditKind::Deleted, 2, 2, true),
                (EditKind::Replaced, 2, 2, false),
                (EditKind::Deleted, 3, 4, false),
                (EditKind::Deleted, 5, 5, true),
                (EditKind::Replaced, 5, 5, false),
                (EditKind::Deleted, 6, 6, false),
            ]
        );
        assert_eq!(merged.conflicts().count(), 2);
        assert_eq!(
            merged.apply(),
            vec!["line 0", "<<<", "---", "theirs 2", ">>>", "<<<", "---", "theirs 5", ">>>", "line 7"]
        );
    }

    #[test]
    fn inputs_are_not_mutated() {
        let original = Sequence::from_lines(["a", "b"]);
        let first = Diff::new(&original, &Sequence::from_lines(["a", "x"])).unwrap();
        let second = Diff::new(&original, &Sequence::from_lines(["a", "y"])).unwrap();
        let before = (first.ranges().to_vec(), second.ranges().to_vec());

        let merged = merge_diffs(&first, &second).unwrap();
        assert!(merged.has_conflicts());
        assert!(!first.has_conflicts() && !second.has_conflicts());
        assert_eq!((first.ranges().to_vec(), second.ranges().to_vec()), before);
        assert!(merged.original().same_as(&original));
    }

    #[test]
    fn merged_diffs_cannot_be_merged_again() {
        let original = Sequence::from_lines(["a"]);
        let first = Diff::new(&original, &Sequence::from_lines(["x"])).unwrap();
        let second = Diff::new(&original, &Sequence::from_lines(["y"])).unwrap();
        let merged = merge_diffs(&first, &second).unwrap();
        assert_eq!(
            merge_diffs(&merged, &first).unwrap_err(),
            MergeError::ConflictedInput("first")
        );
    }
}
