//! Statement image export.
//!
//! The batch export walks persons serially in first-appearance order with a
//! settle delay before each capture and an interval delay after it, matching
//! the sequencing the statement view needs to finish rendering between
//! selections. A per-person failure is logged and the loop moves on unless
//! `halt_on_error` is set.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use chrono_tz::Asia::Tokyo;
use pino_core::{ParseOutcome, PersonAggregate};

use crate::statement::{Statement, StatementOptions, build_statement};
use crate::svg::render_statement_svg;

/// Batch export knobs.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub out_dir: PathBuf,
    /// Wait after selecting a person, before capturing.
    pub settle_delay: Duration,
    /// Wait after a capture, before the next person.
    pub interval_delay: Duration,
    /// Abort the batch on the first per-person failure instead of
    /// logging and continuing.
    pub halt_on_error: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("."),
            settle_delay: Duration::from_millis(100),
            interval_delay: Duration::from_millis(500),
            halt_on_error: false,
        }
    }
}

/// Calculation-date stamp in Japan time: `(display, file)` forms.
///
/// Statements show `YYYY/MM/DD`; artifact names use `YYYY-MM-DD` because the
/// locale separator is not filesystem-safe.
pub fn calculation_date() -> (String, String) {
    let today = Utc::now().with_timezone(&Tokyo);
    (
        today.format("%Y/%m/%d").to_string(),
        today.format("%Y-%m-%d").to_string(),
    )
}

/// Artifact name for one person's statement.
pub fn artifact_file_name(name: &str, stamp: &str) -> String {
    format!("精算書_{name}_{stamp}.svg")
}

fn write_statement(statement: &Statement, dir: &Path, stamp: &str) -> Result<PathBuf> {
    let path = dir.join(artifact_file_name(&statement.name, stamp));
    std::fs::write(&path, render_statement_svg(statement))
        .with_context(|| format!("write {}", path.display()))?;
    Ok(path)
}

/// Export a single person's statement image.
pub fn export_one(
    name: &str,
    aggregate: &PersonAggregate,
    statement_options: &StatementOptions,
    out_dir: &Path,
) -> Result<PathBuf> {
    std::fs::create_dir_all(out_dir).with_context(|| format!("create {}", out_dir.display()))?;
    let (display_date, stamp) = calculation_date();
    let statement = build_statement(name, aggregate, statement_options, &display_date);
    write_statement(&statement, out_dir, &stamp)
}

/// Export every person's statement image, serially.
///
/// Returns the paths actually written. Whether a per-person failure should
/// abort the rest of the batch is configurable; continuing is the default.
pub async fn export_all(
    outcome: &ParseOutcome,
    statement_options: &StatementOptions,
    options: &ExportOptions,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(&options.out_dir)
        .with_context(|| format!("create {}", options.out_dir.display()))?;

    let (display_date, stamp) = calculation_date();
    let mut written = Vec::new();

    for (name, aggregate) in &outcome.by_person {
        tokio::time::sleep(options.settle_delay).await;

        let statement = build_statement(name, aggregate, statement_options, &display_date);
        match write_statement(&statement, &options.out_dir, &stamp) {
            Ok(path) => {
                tracing::info!(person = %name, path = %path.display(), "statement exported");
                written.push(path);
            }
            Err(err) if options.halt_on_error => return Err(err),
            Err(err) => {
                tracing::warn!(person = %name, error = %err, "statement export failed, continuing");
            }
        }

        tokio::time::sleep(options.interval_delay).await;
    }

    Ok(written)
}
