use lmerge_types::Comparison;
use serde::{Deserialize, Serialize};

/// Options controlling how a diff is computed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffOptions {
    /// How lines are compared during alignment.
    pub comparison: Comparison,
}

impl DiffOptions {
    /// Options that compare lines byte-for-byte.
    pub fn exact() -> Self {
        Self {
            comparison: Comparison::Exact,
        }
    }
}

/// Marker lines framing a conflict block in patched output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConflictMarkers {
    /// Opens the block; the first side follows.
    pub begin: String,
    /// Separates the first side from the second.
    pub separator: String,
    /// Closes the block.
    pub end: String,
}

impl Default for ConflictMarkers {
    fn default() -> Self {
        Self {
            begin: "<<<".into(),
            separator: "---".into(),
            end: ">>>".into(),
        }
    }
}
