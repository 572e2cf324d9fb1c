use std::fmt;
use std::sync::Arc;

use crate::line::Line;

/// An ordered, immutable list of [`Line`]s built once from an input array.
///
/// Cloning a `Sequence` is cheap and yields a handle to the *same* sequence.
/// [`Sequence::same_as`] compares identity rather than contents, which is how
/// the merge engine decides that two diffs were computed against one shared
/// original.
#[derive(Clone)]
pub struct Sequence {
    lines: Arc<[Line]>,
}

impl Sequence {
    /// Build a sequence from raw line texts, indexing them from zero.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines: Vec<Line> = lines
            .into_iter()
            .enumerate()
            .map(|(index, text)| Line::new(index, text))
            .collect();
        Self {
            lines: lines.into(),
        }
    }

    /// Split `text` into lines (`\n` or `\r\n` terminated) and build a sequence.
    pub fn from_text(text: &str) -> Self {
        Self::from_lines(text.lines())
    }

    /// A sequence with no lines.
    pub fn empty() -> Self {
        Self::from_lines(std::iter::empty::<String>())
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if the sequence has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The line at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    /// All lines as a slice.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Iterate over the lines in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Line> {
        self.lines.iter()
    }

    /// The literal texts of all lines, in order.
    pub fn texts(&self) -> Vec<String> {
        self.lines.iter().map(|l| l.text().to_string()).collect()
    }

    /// Returns `true` if `other` is a handle to this very sequence.
    ///
    /// Two sequences built separately from equal texts are *not* the same.
    pub fn same_as(&self, other: &Sequence) -> bool {
        Arc::ptr_eq(&self.lines, &other.lines)
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sequence({} lines)", self.lines.len())
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a Line;
    type IntoIter = std::slice::Iter<'a, Line>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_are_indexed_from_zero() {
        let seq = Sequence::from_lines(["a", "b", "c"]);
        assert_eq!(seq.len(), 3);
        for (i, line) in seq.iter().enumerate() {
            assert_eq!(line.index(), i);
        }
        assert_eq!(seq.get(1).map(Line::text), Some("b"));
        assert!(seq.get(3).is_none());
    }

    #[test]
    fn clones_share_identity() {
        let seq = Sequence::from_lines(["a"]);
        let handle = seq.clone();
        assert!(seq.same_as(&handle));
    }

    #[test]
    fn equal_contents_are_not_the_same_sequence() {
        let a = Sequence::from_lines(["a", "b"]);
        let b = Sequence::from_lines(["a", "b"]);
        assert_eq!(a.lines(), b.lines());
        assert!(!a.same_as(&b));
    }

    #[test]
    fn empty_sequences_are_distinct() {
        let a = Sequence::empty();
        let b = Sequence::empty();
        assert!(a.is_empty());
        assert!(!a.same_as(&b));
    }

    #[test]
    fn from_text_splits_on_newlines() {
        let seq = Sequence::from_text("one\r\ntwo\nthree\n");
        assert_eq!(seq.texts(), vec!["one", "two", "three"]);
    }

    #[test]
    fn debug_shows_length() {
        let seq = Sequence::from_lines(["x", "y"]);
        assert_eq!(format!("{seq:?}"), "Sequence(2 lines)");
    }
}
