//! Parser for the legacy plain line format.
//!
//! Expected shape:
//!   山田太郎様
//!   12/25 本社→倉庫→本社
//!   12/26 本社→支社
//!
//! A line containing 様 switches the current person; every following
//! `<date> <route>` line is one entry. No distance is written, so it is
//! estimated from the route hop count.

use pino_core::Entry;

/// Kilometers credited per route hop (`→`-separated segment boundary).
const KM_PER_HOP: f64 = 5.0;

/// Parse plain-format text into entries, in input order.
///
/// Lines before the first person header and lines without a route token are
/// skipped; there is nothing else to diagnose in this format.
pub fn parse_plain_text(text: &str) -> Vec<Entry> {
    let mut entries = Vec::new();
    let mut current_name: Option<String> = None;
    let mut next_id = 0u32;

    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        if line.contains('様') {
            current_name = Some(line.replace('様', "").trim().to_string());
            continue;
        }

        let Some(name) = current_name.as_ref() else {
            tracing::debug!(line, "line before any person header, skipped");
            continue;
        };

        let mut tokens = line.split_whitespace();
        let Some(date) = tokens.next() else {
            continue;
        };
        let route_tokens: Vec<&str> = tokens.collect();
        if route_tokens.is_empty() {
            continue;
        }
        let route = route_tokens.join(" ");

        let hops = route.split('→').count();
        let distance = (hops.saturating_sub(1)) as f64 * KM_PER_HOP;

        next_id += 1;
        entries.push(Entry {
            id: next_id,
            name: name.clone(),
            date: date.to_string(),
            route,
            distance,
        });
    }

    entries
}
