//! Per-person settlement statement view model and terminal rendering.

use num_format::{Locale, ToFormattedString};
use pino_core::PersonAggregate;

/// Presentation knobs for statements.
#[derive(Debug, Clone, PartialEq)]
pub struct StatementOptions {
    /// Settlement period shown in the title, e.g. `1月`.
    pub period_label: String,
    /// Optional footer note, e.g. `※2025年1月分給与にて清算しました。`.
    pub note: Option<String>,
}

impl Default for StatementOptions {
    fn default() -> Self {
        Self {
            period_label: "1月".to_string(),
            note: None,
        }
    }
}

/// One statement table row: a single day bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct StatementRow {
    pub date: String,
    /// One route per detail, in entry order.
    pub routes: Vec<String>,
    pub total_distance: f64,
    pub transportation_fee: i64,
    pub daily_allowance: i64,
}

/// A fully-resolved statement, ready for text or SVG rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub name: String,
    pub title: String,
    pub rows: Vec<StatementRow>,
    pub grand_total: i64,
    pub note: Option<String>,
    /// Calculation date in `YYYY/MM/DD` form.
    pub calculated_on: String,
}

/// Build one person's statement from their aggregate.
pub fn build_statement(
    name: &str,
    aggregate: &PersonAggregate,
    options: &StatementOptions,
    calculated_on: &str,
) -> Statement {
    let rows = aggregate
        .days
        .iter()
        .map(|(date, day)| StatementRow {
            date: date.clone(),
            routes: day.details.iter().map(|d| d.route.clone()).collect(),
            total_distance: day.total_distance,
            transportation_fee: day.transportation_fee,
            daily_allowance: day.daily_allowance,
        })
        .collect();

    Statement {
        name: name.to_string(),
        title: format!(
            "{name}様 {} 社内通貨（交通費）清算額",
            options.period_label
        ),
        rows,
        grand_total: aggregate.summary.grand_total,
        note: options.note.clone(),
        calculated_on: calculated_on.to_string(),
    }
}

/// Distance display: one decimal, truncating semantics left to the caller's
/// data (values are stored exact).
pub fn format_distance(distance: f64) -> String {
    format!("{distance:.1}")
}

/// Comma-grouped yen amount.
pub fn format_yen(amount: i64) -> String {
    amount.to_formatted_string(&Locale::ja)
}

/// Terminal column width: CJK characters render double-width.
pub(crate) fn display_width(text: &str) -> usize {
    text.chars().map(|c| if c.is_ascii() { 1 } else { 2 }).sum()
}

pub(crate) fn pad_right(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(display_width(text));
    format!("{text}{}", " ".repeat(pad))
}

pub(crate) fn pad_left(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(display_width(text));
    format!("{}{text}", " ".repeat(pad))
}

const HEADERS: [&str; 5] = ["日付", "経路", "距離(km)", "交通費", "運転手当"];

/// Statement cell grid: one line per route, numbers only on the first line
/// of each day bucket.
pub(crate) fn statement_cells(statement: &Statement) -> Vec<[String; 5]> {
    let mut cells = Vec::new();
    for row in &statement.rows {
        let first_route = row.routes.first().cloned().unwrap_or_default();
        cells.push([
            row.date.clone(),
            first_route,
            format_distance(row.total_distance),
            format_yen(row.transportation_fee),
            format_yen(row.daily_allowance),
        ]);
        for route in row.routes.iter().skip(1) {
            cells.push([
                String::new(),
                route.clone(),
                String::new(),
                String::new(),
                String::new(),
            ]);
        }
    }
    cells
}

/// Render a statement as an aligned text table for the terminal.
pub fn render_statement_text(statement: &Statement) -> String {
    let cells = statement_cells(statement);

    let mut widths: Vec<usize> = HEADERS.iter().map(|h| display_width(h)).collect();
    for row in &cells {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(display_width(cell));
        }
    }

    let mut out = String::new();
    out.push_str(&statement.title);
    out.push_str("\n\n");

    let header_line: Vec<String> = HEADERS
        .iter()
        .enumerate()
        .map(|(i, h)| pad_right(h, widths[i]))
        .collect();
    out.push_str(header_line.join("  ").trim_end());
    out.push('\n');

    for row in &cells {
        let line: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                // Numeric columns right-align.
                if i >= 2 {
                    pad_left(cell, widths[i])
                } else {
                    pad_right(cell, widths[i])
                }
            })
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&format!("合計金額: {}円\n", format_yen(statement.grand_total)));
    if let Some(note) = &statement.note {
        out.push_str(note);
        out.push('\n');
    }
    out.push_str(&format!("計算日時: {}\n", statement.calculated_on));
    out
}
