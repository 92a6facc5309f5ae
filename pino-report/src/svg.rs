//! SVG statement rendering: the image artifact written by the exporter.
//!
//! Layout: title line, striped five-column table, grand-total band, footer
//! lines (optional note, calculation date). Column widths come from a fixed
//! per-character estimate with CJK characters counted double, which is close
//! enough for the target font without measuring glyphs.

use std::borrow::Cow;
use std::fmt::Write;

use crate::statement::{Statement, format_yen, statement_cells};

const FONT_SIZE: u32 = 14;
const CELL_PADDING: u32 = 10;
const LINE_HEIGHT: u32 = FONT_SIZE + CELL_PADDING * 2;
const TITLE_HEIGHT: u32 = LINE_HEIGHT + 6;
const PAGE_BG: &str = "#ffffff";
const HEADER_BG: &str = "#f5f5f5";
const ROW_BG_EVEN: &str = "#ffffff";
const ROW_BG_ODD: &str = "#f9f9f9";
const TEXT_COLOR: &str = "#1a1a1a";
const MUTED_COLOR: &str = "#666666";
const BORDER_COLOR: &str = "#dddddd";
const FONT_FAMILY: &str = "Noto Sans CJK JP";
const CHAR_WIDTH: f32 = 8.5;

const HEADERS: [&str; 5] = ["日付", "経路", "距離(km)", "交通費", "運転手当"];
/// Numeric columns (distance and the two yen columns) right-align.
const RIGHT_ALIGNED: [bool; 5] = [false, false, true, true, true];

fn estimate_text_width(text: &str) -> u32 {
    let width: f32 = text
        .chars()
        .map(|c| if c.is_ascii() { CHAR_WIDTH } else { CHAR_WIDTH * 2.0 })
        .sum();
    (width.ceil() as u32).max(20) + CELL_PADDING
}

fn escape_xml(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 10);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

fn text_baseline(row_top: u32) -> u32 {
    row_top + LINE_HEIGHT / 2 + FONT_SIZE / 2 - 2
}

/// Render one statement as a standalone SVG document.
pub fn render_statement_svg(statement: &Statement) -> String {
    let cells = statement_cells(statement);

    let mut col_widths: Vec<u32> = HEADERS.iter().map(|h| estimate_text_width(h)).collect();
    for row in &cells {
        for (i, cell) in row.iter().enumerate() {
            col_widths[i] = col_widths[i].max(estimate_text_width(cell));
        }
    }

    let table_width: u32 =
        col_widths.iter().sum::<u32>() + (HEADERS.len() as u32 + 1) * CELL_PADDING;
    let title_width = estimate_text_width(&statement.title) + CELL_PADDING * 2;
    let total_width = table_width.max(title_width);

    let footer_lines = 1 + u32::from(statement.note.is_some());
    let total_height = TITLE_HEIGHT
        + LINE_HEIGHT * (1 + cells.len() as u32) // header + data rows
        + LINE_HEIGHT                            // grand-total band
        + LINE_HEIGHT * footer_lines
        + CELL_PADDING;

    let mut svg = String::with_capacity(4096);
    let _ = writeln!(
        &mut svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{total_width}" height="{total_height}" viewBox="0 0 {total_width} {total_height}">"#
    );
    let _ = writeln!(
        &mut svg,
        r#"<style>text {{ font-family: {FONT_FAMILY}; font-size: {FONT_SIZE}px; }}</style>"#
    );
    let _ = writeln!(
        &mut svg,
        r#"<rect width="{total_width}" height="{total_height}" fill="{PAGE_BG}" stroke="{BORDER_COLOR}" />"#
    );

    // Title.
    let _ = writeln!(
        &mut svg,
        r#"<text x="{CELL_PADDING}" y="{}" fill="{TEXT_COLOR}" font-weight="bold">{}</text>"#,
        text_baseline(4),
        escape_xml(&statement.title)
    );

    // Header band.
    let header_top = TITLE_HEIGHT;
    let _ = writeln!(
        &mut svg,
        r#"<rect x="0" y="{header_top}" width="{total_width}" height="{LINE_HEIGHT}" fill="{HEADER_BG}" />"#
    );
    write_table_line(&mut svg, &HEADERS.map(String::from), &col_widths, header_top);

    // Data rows, striped.
    for (row_idx, row) in cells.iter().enumerate() {
        let row_top = header_top + LINE_HEIGHT * (1 + row_idx as u32);
        let bg = if row_idx % 2 == 0 { ROW_BG_EVEN } else { ROW_BG_ODD };
        let _ = writeln!(
            &mut svg,
            r#"<rect x="0" y="{row_top}" width="{total_width}" height="{LINE_HEIGHT}" fill="{bg}" />"#
        );
        write_table_line(&mut svg, row, &col_widths, row_top);
    }

    // Grand total band.
    let total_top = header_top + LINE_HEIGHT * (1 + cells.len() as u32);
    let _ = writeln!(
        &mut svg,
        r#"<line x1="0" y1="{total_top}" x2="{total_width}" y2="{total_top}" stroke="{TEXT_COLOR}" stroke-width="2" />"#
    );
    let _ = writeln!(
        &mut svg,
        r#"<text x="{}" y="{}" fill="{TEXT_COLOR}" text-anchor="end">合計金額: {}円</text>"#,
        total_width - CELL_PADDING,
        text_baseline(total_top),
        format_yen(statement.grand_total)
    );

    // Footer.
    let mut footer_top = total_top + LINE_HEIGHT;
    if let Some(note) = &statement.note {
        let _ = writeln!(
            &mut svg,
            r#"<text x="{CELL_PADDING}" y="{}" fill="{MUTED_COLOR}">{}</text>"#,
            text_baseline(footer_top),
            escape_xml(note)
        );
        footer_top += LINE_HEIGHT;
    }
    let _ = writeln!(
        &mut svg,
        r#"<text x="{CELL_PADDING}" y="{}" fill="{MUTED_COLOR}">計算日時: {}</text>"#,
        text_baseline(footer_top),
        escape_xml(&statement.calculated_on)
    );

    svg.push_str("</svg>");
    svg
}

fn write_table_line(svg: &mut String, row: &[String; 5], col_widths: &[u32], row_top: u32) {
    let mut x = CELL_PADDING;
    for (i, cell) in row.iter().enumerate() {
        let width = col_widths[i];
        let (text_x, anchor) = if RIGHT_ALIGNED[i] {
            (x + width, "end")
        } else {
            (x, "start")
        };
        let _ = writeln!(
            svg,
            r#"<text x="{text_x}" y="{}" fill="{TEXT_COLOR}" text-anchor="{anchor}">{}</text>"#,
            text_baseline(row_top),
            escape_xml(cell)
        );
        x += width + CELL_PADDING;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::{StatementOptions, build_statement};
    use pino_core::{Entry, SettlementRates, aggregate};

    fn sample() -> Statement {
        let outcome = aggregate(
            vec![
                Entry {
                    id: 1,
                    name: "山田太郎".to_string(),
                    date: "1/15".to_string(),
                    route: "自宅-会社".to_string(),
                    distance: 10.5,
                },
                Entry {
                    id: 2,
                    name: "山田太郎".to_string(),
                    date: "1/15".to_string(),
                    route: "会社-<倉庫>".to_string(),
                    distance: 3.2,
                },
            ],
            &SettlementRates::default(),
        );
        build_statement(
            "山田太郎",
            &outcome.by_person["山田太郎"],
            &StatementOptions::default(),
            "2025/01/31",
        )
    }

    #[test]
    fn test_svg_structure() {
        let svg = render_statement_svg(&sample());
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("山田太郎様 1月 社内通貨（交通費）清算額"));
        assert!(svg.contains("合計金額: 405円")); // floor(13.7*15)=205, +200
        assert!(svg.contains("計算日時: 2025/01/31"));
    }

    #[test]
    fn test_svg_escapes_route_text() {
        let svg = render_statement_svg(&sample());
        assert!(svg.contains("会社-&lt;倉庫&gt;"));
        assert!(!svg.contains("会社-<倉庫>"));
    }

    #[test]
    fn test_escape_xml_passthrough() {
        assert!(matches!(escape_xml("自宅-会社"), Cow::Borrowed(_)));
        assert_eq!(escape_xml("a&b"), "a&amp;b");
    }
}
