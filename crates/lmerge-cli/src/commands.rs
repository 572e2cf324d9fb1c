use std::fs;
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use lmerge_diff::{Diff, DifferenceRange, LineDifference};
use lmerge_merge::{merge_texts, MergeOutcome};
use lmerge_types::{EditKind, Sequence};
use serde::Serialize;
use tracing::warn;

use crate::cli::*;
use crate::config::CliConfig;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::load(cli.config.as_deref())?;
    match cli.command {
        Command::Diff(args) => cmd_diff(args, &config, &cli.format),
        Command::Merge(args) => cmd_merge(args, &config, &cli.format),
    }
}

fn read_lines(path: &Path) -> anyhow::Result<Vec<String>> {
    let text = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(text.lines().map(str::to_string).collect())
}

#[derive(Serialize)]
struct DiffReport<'a> {
    ranges: &'a [DifferenceRange],
    lines: Vec<LineDifference>,
    additions: usize,
    deletions: usize,
}

fn cmd_diff(args: DiffArgs, config: &CliConfig, format: &OutputFormat) -> anyhow::Result<()> {
    let original = Sequence::from_lines(read_lines(&args.original)?);
    let target = Sequence::from_lines(read_lines(&args.target)?);
    let diff = Diff::with_options(&original, &target, &config.diff_options(args.exact))?;

    match format {
        OutputFormat::Json => {
            let report = DiffReport {
                ranges: diff.ranges(),
                lines: diff.per_line(),
                additions: diff.additions(),
                deletions: diff.deletions(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            for entry in diff.per_line() {
                println!("{}", paint(&entry));
            }
            if diff.is_empty() {
                println!("{} No differences.", "✓".green());
            } else {
                println!(
                    "{} ranges, {} added, {} deleted",
                    diff.len().to_string().bold(),
                    diff.additions().to_string().green(),
                    diff.deletions().to_string().red(),
                );
            }
        }
    }
    Ok(())
}

fn paint(entry: &LineDifference) -> String {
    let text = entry.to_string();
    let colored = match entry.kind {
        EditKind::Equal => text.normal(),
        EditKind::Added => text.green(),
        EditKind::Deleted => text.red(),
        EditKind::Replaced => text.yellow(),
    };
    if entry.conflicted {
        colored.bold().to_string()
    } else {
        colored.to_string()
    }
}

/// The report header naming the merged files.
fn merge_header(original: &Path, first: &Path, second: &Path) -> Vec<String> {
    vec![
        "Merge".to_string(),
        format!("\t{}", original.display()),
        "With files".to_string(),
        format!("\t{}", first.display()),
        format!("\t{}", second.display()),
    ]
}

#[derive(Serialize)]
struct MergeReport<'a> {
    original: &'a Path,
    first: &'a Path,
    second: &'a Path,
    #[serde(flatten)]
    outcome: &'a MergeOutcome,
}

fn cmd_merge(args: MergeArgs, config: &CliConfig, format: &OutputFormat) -> anyhow::Result<()> {
    let original = read_lines(&args.original)?;
    let first = read_lines(&args.first)?;
    let second = read_lines(&args.second)?;

    let outcome = merge_texts(
        Some(original.as_slice()),
        Some(first.as_slice()),
        Some(second.as_slice()),
        &config.merge_config(args.exact),
    )?;
    if !outcome.is_clean() {
        warn!(conflicts = outcome.conflicts, "merge produced conflicts");
    }

    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&MergeReport {
            original: &args.original,
            first: &args.first,
            second: &args.second,
            outcome: &outcome,
        })?,
        OutputFormat::Text => {
            let mut lines = Vec::new();
            if args.header || config.header {
                lines = merge_header(&args.original, &args.first, &args.second);
            }
            lines.extend(outcome.lines.iter().cloned());
            lines.join("\n")
        }
    };

    match &args.output {
        Some(path) => {
            fs::write(path, format!("{rendered}\n"))
                .with_context(|| format!("failed to write {}", path.display()))?;
            if outcome.is_clean() {
                println!("{} Merged into {}", "✓".green().bold(), path.display().to_string().bold());
            } else {
                println!(
                    "{} Merged into {} with {} conflicts",
                    "!".yellow().bold(),
                    path.display().to_string().bold(),
                    outcome.conflicts.to_string().red(),
                );
            }
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, lines: &[&str]) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, lines.join("\n")).unwrap();
        path
    }

    fn merge_args(dir: &Path, second: &[&str]) -> MergeArgs {
        MergeArgs {
            original: write(dir, "base.txt", &["one", "two", "three"]),
            first: write(dir, "first.txt", &["zero", "one", "two", "three"]),
            second: write(dir, "second.txt", second),
            output: Some(dir.join("merged.txt")),
            header: false,
            exact: false,
        }
    }

    #[test]
    fn merge_writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let args = merge_args(dir.path(), &["one", "two", "3"]);
        cmd_merge(args, &CliConfig::default(), &OutputFormat::Text).unwrap();

        let merged = fs::read_to_string(dir.path().join("merged.txt")).unwrap();
        assert_eq!(merged, "zero\none\ntwo\n3\n");
    }

    #[test]
    fn merge_header_comes_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let args = merge_args(dir.path(), &["one", "two", "three"]);
        let config = CliConfig {
            header: true,
            ..CliConfig::default()
        };
        cmd_merge(args, &config, &OutputFormat::Text).unwrap();

        let merged = fs::read_to_string(dir.path().join("merged.txt")).unwrap();
        let lines: Vec<&str> = merged.lines().collect();
        assert_eq!(lines[0], "Merge");
        assert!(lines[1].starts_with('\t') && lines[1].ends_with("base.txt"));
        assert_eq!(lines[2], "With files");
        assert!(lines[3].ends_with("first.txt"));
        assert!(lines[4].ends_with("second.txt"));
        assert_eq!(&lines[5..], ["zero", "one", "two", "three"]);
    }

    #[test]
    fn merge_json_reports_conflicts() {
        let dir = tempfile::tempdir().unwrap();
        let args = merge_args(dir.path(), &["none", "one", "two", "three"]);
        cmd_merge(args, &CliConfig::default(), &OutputFormat::Json).unwrap();

        let report: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("merged.txt")).unwrap()).unwrap();
        assert_eq!(report["conflicts"], 1);
        assert_eq!(report["lines"][0], "<<<");
        assert!(report["first"].as_str().unwrap().ends_with("first.txt"));
    }

    #[test]
    fn missing_input_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = merge_args(dir.path(), &["one"]);
        args.second = dir.path().join("nope.txt");
        let err = cmd_merge(args, &CliConfig::default(), &OutputFormat::Text).unwrap_err();
        assert!(format!("{err:#}").contains("nope.txt"));
    }

    #[test]
    fn diff_runs_on_files() {
        let dir = tempfile::tempdir().unwrap();
        let args = DiffArgs {
            original: write(dir.path(), "a.txt", &["a", "b"]),
            target: write(dir.path(), "b.txt", &["a", "c"]),
            exact: true,
        };
        cmd_diff(args, &CliConfig::default(), &OutputFormat::Json).unwrap();
    }

    #[test]
    fn paint_keeps_listing_text() {
        colored::control::set_override(false);
        let entry = LineDifference {
            kind: EditKind::Added,
            line: lmerge_types::Line::new(3, "new"),
            conflicted: false,
        };
        assert_eq!(paint(&entry), "3.\t\t+ |new");
    }
}
