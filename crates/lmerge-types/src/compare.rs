//! Line equality strategies used by the alignment engine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::line::Line;

/// Decides whether two lines match during alignment.
pub trait LineComparer {
    fn equals(&self, a: &Line, b: &Line) -> bool;
}

/// Trimmed-text equality; the behavior of [`Line`]'s `PartialEq`.
#[derive(Clone, Copy, Debug, Default)]
pub struct IgnoreSurroundingWhitespace;

impl LineComparer for IgnoreSurroundingWhitespace {
    fn equals(&self, a: &Line, b: &Line) -> bool {
        a == b
    }
}

/// Byte-for-byte text equality.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExactText;

impl LineComparer for ExactText {
    fn equals(&self, a: &Line, b: &Line) -> bool {
        a.text() == b.text()
    }
}

/// Configurable selection of a [`LineComparer`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Comparison {
    /// Ignore leading and trailing whitespace (default).
    #[default]
    IgnoreSurroundingWhitespace,
    /// Compare the literal text.
    Exact,
}

impl LineComparer for Comparison {
    fn equals(&self, a: &Line, b: &Line) -> bool {
        match self {
            Comparison::IgnoreSurroundingWhitespace => IgnoreSurroundingWhitespace.equals(a, b),
            Comparison::Exact => ExactText.equals(a, b),
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Comparison::IgnoreSurroundingWhitespace => f.write_str("ignore-surrounding-whitespace"),
            Comparison::Exact => f.write_str("exact"),
        }
    }
}

impl FromStr for Comparison {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ignore-surrounding-whitespace" | "trim" => Ok(Comparison::IgnoreSurroundingWhitespace),
            "exact" => Ok(Comparison::Exact),
            _ => Err(TypeError::UnknownComparison(s.to_string())),
        }
    }
}
