use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A single line of text together with its position in the sequence it was
/// read from.
///
/// Two lines are equal when their text is equal after trimming leading and
/// trailing whitespace. Internal whitespace is significant. The index is
/// positional metadata only and never takes part in equality or hashing.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Line {
    index: usize,
    text: String,
}

impl Line {
    /// Create a line at `index` holding `text`.
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }

    /// Position of this line in its source sequence (0-based).
    pub fn index(&self) -> usize {
        self.index
    }

    /// The literal text, including any surrounding whitespace.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The text with leading and trailing whitespace removed.
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }
}

impl PartialEq for Line {
    fn eq(&self, other: &Self) -> bool {
        self.trimmed() == other.trimmed()
    }
}

impl Eq for Line {}

impl Hash for Line {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.trimmed().hash(state);
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
