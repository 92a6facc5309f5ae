//! Entry-listing outputs: terminal table and CSV export.

use std::path::Path;

use anyhow::{Context, Result};
use pino_core::Entry;

use crate::statement::{display_width, format_distance, pad_left, pad_right};

const HEADERS: [&str; 5] = ["No.", "日付", "担当者", "経路", "距離(km)"];

/// Render the listing as an aligned text table. Callers pass entries in the
/// order they want shown (normally `ParseOutcome::listing()`).
pub fn render_listing_text(entries: &[Entry]) -> String {
    let rows: Vec<[String; 5]> = entries
        .iter()
        .map(|e| {
            [
                e.id.to_string(),
                e.date.clone(),
                e.name.clone(),
                e.route.clone(),
                format_distance(e.distance),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = HEADERS.iter().map(|h| display_width(h)).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(display_width(cell));
        }
    }

    let mut out = String::new();
    out.push_str(&format!("交通費データ一覧（全{}件）\n", entries.len()));
    let header_line: Vec<String> = HEADERS
        .iter()
        .enumerate()
        .map(|(i, h)| pad_right(h, widths[i]))
        .collect();
    out.push_str(header_line.join("  ").trim_end());
    out.push('\n');

    for row in &rows {
        let line: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                // No. and distance right-align.
                if i == 0 || i == 4 {
                    pad_left(cell, widths[i])
                } else {
                    pad_right(cell, widths[i])
                }
            })
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    }

    out
}

/// Write the listing as CSV, one row per entry in the given order.
pub fn write_listing_csv(path: &Path, entries: &[Entry]) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("open {}", path.display()))?;

    writer.write_record(HEADERS)?;
    for e in entries {
        writer.write_record([
            e.id.to_string(),
            e.date.clone(),
            e.name.clone(),
            e.route.clone(),
            format_distance(e.distance),
        ])?;
    }
    writer.flush().context("flush listing csv")?;
    Ok(())
}
