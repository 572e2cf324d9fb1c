use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// The kind of edit applied to a line or a range of lines.
///
/// `Replaced` is only ever produced by range compression; the alignment
/// engine emits `Equal`, `Added` and `Deleted` events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditKind {
    Equal,
    Added,
    Deleted,
    Replaced,
}

impl EditKind {
    /// Returns `true` for every kind except `Equal`.
    pub fn is_change(self) -> bool {
        !matches!(self, EditKind::Equal)
    }

    /// Returns `true` if ranges of this kind carry inserted lines.
    pub fn carries_lines(self) -> bool {
        matches!(self, EditKind::Added | EditKind::Replaced)
    }

    /// Returns `true` if ranges of this kind remove original lines.
    pub fn consumes_original(self) -> bool {
        matches!(self, EditKind::Deleted | EditKind::Replaced)
    }

    /// Two-character marker used in per-line listings.
    pub fn marker(self) -> &'static str {
        match self {
            EditKind::Equal => "  ",
            EditKind::Deleted => "- ",
            EditKind::Added => "+ ",
            EditKind::Replaced => "-+",
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            EditKind::Equal => "equal",
            EditKind::Added => "added",
            EditKind::Deleted => "deleted",
            EditKind::Replaced => "replaced",
        }
    }
}

impl fmt::Display for EditKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EditKind {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "equal" => Ok(EditKind::Equal),
            "added" => Ok(EditKind::Added),
            "deleted" => Ok(EditKind::Deleted),
            "replaced" => Ok(EditKind::Replaced),
            _ => Err(TypeError::UnknownEditKind(s.to_string())),
        }
    }
}
