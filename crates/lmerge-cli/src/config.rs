//! Optional TOML settings file for the `lmerge` binary.
//!
//! ```toml
//! comparison = "exact"
//! header = true
//!
//! [markers]
//! begin = "<<<<<<<"
//! separator = "======="
//! end = ">>>>>>>"
//! ```

use std::fs;
use std::path::Path;

use anyhow::Context;
use lmerge_diff::{ConflictMarkers, DiffOptions};
use lmerge_merge::MergeConfig;
use lmerge_types::Comparison;
use serde::Deserialize;

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub comparison: Comparison,
    pub markers: ConflictMarkers,
    pub header: bool,
}

impl CliConfig {
    /// Load settings from `path`, or defaults when no file was given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    /// `--exact` on the command line wins over the file.
    fn comparison(&self, exact: bool) -> Comparison {
        if exact {
            Comparison::Exact
        } else {
            self.comparison
        }
    }

    pub fn diff_options(&self, exact: bool) -> DiffOptions {
        DiffOptions {
            comparison: self.comparison(exact),
        }
    }

    pub fn merge_config(&self, exact: bool) -> MergeConfig {
        MergeConfig {
            comparison: self.comparison(exact),
            markers: self.markers.clone(),
        }
    }
}
