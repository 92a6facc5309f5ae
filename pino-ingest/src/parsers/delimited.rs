//! Field parser for delimiter-prefixed entry blocks.
//!
//! Expected block shape after extraction:
//!   【ピノ】 山田太郎 1/15(水) 自宅-会社 10.5km
//!
//! Parsing is best-effort: blocks that fail the header or distance match are
//! discarded with a diagnostic and the rest of the input still parses.

use anyhow::Result;
use pino_core::Entry;

use crate::extractor::{RawBlock, extract_blocks};
use crate::matchers::{DistanceMatcher, HeaderMatcher};

/// Parse one extracted block into an entry, or discard it.
pub fn parse_block(
    block: &RawBlock,
    header: &HeaderMatcher,
    distance: &DistanceMatcher,
) -> Option<Entry> {
    let content = block.content.as_str();

    let Some(head) = header.first(content) else {
        tracing::warn!(id = block.id, block = content, "header not recognized, block discarded");
        return None;
    };

    let Some(dist) = distance.first(content) else {
        tracing::warn!(id = block.id, block = content, "no distance found, block discarded");
        return None;
    };

    // Route runs from the end of the weekday parenthesis to the start of the
    // last occurrence of the matched distance text. The last occurrence keeps
    // numeric tokens inside the route from clipping it.
    let route_start = head.end;
    let route_end = content.rfind(dist.text).unwrap_or(dist.start);
    let route = if route_end > route_start {
        content[route_start..route_end].replace('\n', "").trim().to_string()
    } else {
        String::new()
    };

    Some(Entry {
        id: block.id,
        name: head.name.to_string(),
        date: head.date.to_string(),
        route,
        distance: dist.value,
    })
}

/// Parse pasted delimiter-format text into entries, in extraction order.
///
/// Never fails on malformed input; unrecognizable blocks are dropped and the
/// recognized subset is returned.
pub fn parse_expense_text(text: &str) -> Result<Vec<Entry>> {
    let header = HeaderMatcher::new()?;
    let distance = DistanceMatcher::new()?;

    let blocks = extract_blocks(text, &distance);
    tracing::debug!(count = blocks.len(), "extracted candidate blocks");

    Ok(blocks
        .iter()
        .filter_map(|block| parse_block(block, &header, &distance))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed_block() {
        let entries = parse_expense_text("【ピノ】 山田太郎 1/15(水) 自宅-会社 10.5km").unwrap();
        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.id, 1);
        assert_eq!(entry.name, "山田太郎");
        assert_eq!(entry.date, "1/15");
        assert_eq!(entry.route, "自宅-会社");
        assert_eq!(entry.distance, 10.5);
    }

    #[test]
    fn test_multiline_route_is_flattened() {
        let entries =
            parse_expense_text("【ピノ】山田太郎 1/15(水) 自宅-会社-\n倉庫経由\n10.5km").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].route, "自宅-会社-倉庫経由");
    }

    #[test]
    fn test_route_keeps_embedded_numbers() {
        let entries = parse_expense_text("【ピノ】山田 1/15(水) 国道16号線経由 10.5km").unwrap();
        assert_eq!(entries[0].route, "国道16号線経由");
        assert_eq!(entries[0].distance, 10.5);
    }

    #[test]
    fn test_missing_weekday_discards_block_only() {
        let text = "【ピノ】山田 1/15 自宅-会社 10.5km\n【ピノ】田中 1/16(木) 駅-現場 3km";
        let entries = parse_expense_text(text).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "田中");
        // The malformed block still consumed id 1 at extraction.
        assert_eq!(entries[0].id, 2);
    }

    #[test]
    fn test_unit_variants_parse_identically() {
        let baseline = parse_expense_text("【ピノ】山田 1/15(水) 自宅-会社 10.5km").unwrap();
        for unit in ["㎞", "ｋｍ", "kｍ", "KM"] {
            let text = format!("【ピノ】山田 1/15(水) 自宅-会社 10.5{unit}");
            let entries = parse_expense_text(&text).unwrap();
            assert_eq!(entries[0].distance, baseline[0].distance, "unit {unit}");
            assert_eq!(entries[0].route, baseline[0].route, "unit {unit}");
        }
    }

    #[test]
    fn test_full_paste_with_noise() {
        let text = "\
今月の精算です。

【ピノ】山田太郎 1/15(水) 自宅-会社 10.5km
【ピノ】山田太郎 1/15(水) 会社-倉庫 3.2km

【ピノ】田中 花子 1/16(木)
駅-現場
7km
メモ: 領収書は後日
";
        let entries = parse_expense_text(text).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[2].name, "田中 花子");
        assert_eq!(entries[2].route, "駅-現場");
        assert_eq!(entries[2].distance, 7.0);
        let ids: Vec<u32> = entries.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_parse_is_idempotent() {
        let text = "【ピノ】山田 1/15(水) 自宅-会社 10.5km\n【ピノ】田中 1/16(木) 駅-現場 3km";
        let first = parse_expense_text(text).unwrap();
        let second = parse_expense_text(text).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_and_delimiterless_input() {
        assert!(parse_expense_text("").unwrap().is_empty());
        assert!(parse_expense_text("山田 1/15(水) 10.5km").unwrap().is_empty());
    }
}
