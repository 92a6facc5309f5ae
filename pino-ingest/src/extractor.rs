//! Record extraction: raw pasted text to delimiter-bounded candidate blocks.

use crate::matchers::DistanceMatcher;

/// Marker string that begins every entry block.
pub const DELIMITER: &str = "【ピノ】";

/// One candidate entry block, delimiter prefix included, truncated just past
/// its first distance marker.
#[derive(Debug, Clone, PartialEq)]
pub struct RawBlock {
    /// 1-based, monotonically increasing in extraction order.
    pub id: u32,
    pub content: String,
}

/// Normalize pasted text: CRLF to LF, runs of newlines collapsed to one,
/// surrounding whitespace trimmed.
pub fn normalize(text: &str) -> String {
    let unified = text.replace("\r\n", "\n");
    let mut out = String::with_capacity(unified.len());
    let mut at_newline = false;
    for ch in unified.chars() {
        if ch == '\n' {
            if !at_newline {
                out.push('\n');
            }
            at_newline = true;
        } else {
            out.push(ch);
            at_newline = false;
        }
    }
    out.trim().to_string()
}

/// Split normalized text into candidate blocks.
///
/// Text before the first delimiter is not a candidate. Each candidate is
/// re-prefixed with the delimiter and truncated immediately after its first
/// number+unit occurrence; candidates without one are dropped without
/// consuming an id.
pub fn extract_blocks(text: &str, distance: &DistanceMatcher) -> Vec<RawBlock> {
    let normalized = normalize(text);
    let Some(first) = normalized.find(DELIMITER) else {
        return Vec::new();
    };

    let mut blocks = Vec::new();
    let mut next_id = 0u32;

    for piece in normalized[first..].split(DELIMITER) {
        let piece = piece.trim();
        if piece.is_empty() {
            continue;
        }

        let candidate = format!("{DELIMITER}{piece}");
        let Some(m) = distance.first(&candidate) else {
            continue;
        };

        next_id += 1;
        blocks.push(RawBlock {
            id: next_id,
            content: candidate[..m.end].to_string(),
        });
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> DistanceMatcher {
        DistanceMatcher::new().unwrap()
    }

    #[test]
    fn test_normalize_collapses_line_endings() {
        assert_eq!(normalize("a\r\nb\n\n\nc"), "a\nb\nc");
        assert_eq!(normalize("  a  \n\n"), "a");
    }

    #[test]
    fn test_extracts_blocks_in_order() {
        let text = "【ピノ】山田 1/15(水) 自宅-会社 10.5km\n【ピノ】田中 1/16(木) 駅-現場 3km";
        let blocks = extract_blocks(text, &matcher());
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].id, 1);
        assert_eq!(blocks[0].content, "【ピノ】山田 1/15(水) 自宅-会社 10.5km");
        assert_eq!(blocks[1].id, 2);
    }

    #[test]
    fn test_truncates_after_first_distance() {
        let text = "【ピノ】山田 1/15(水) 自宅-会社 4km メモ: 帰りは電車 2km";
        let blocks = extract_blocks(text, &matcher());
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].content, "【ピノ】山田 1/15(水) 自宅-会社 4km");
    }

    #[test]
    fn test_candidate_without_unit_is_dropped_silently() {
        let text = "【ピノ】山田 1/15(水) 自宅-会社\n【ピノ】田中 1/16(木) 駅-現場 3km";
        let blocks = extract_blocks(text, &matcher());
        // Ids stay sequential over surviving candidates only.
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].id, 1);
        assert!(blocks[0].content.contains("田中"));
    }

    #[test]
    fn test_text_before_first_delimiter_is_ignored() {
        let text = "3km の距離データ\n【ピノ】山田 1/15(水) 自宅-会社 10.5km";
        let blocks = extract_blocks(text, &matcher());
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].content.starts_with("【ピノ】山田"));
    }

    #[test]
    fn test_no_delimiter_yields_nothing() {
        assert!(extract_blocks("山田 1/15(水) 10.5km", &matcher()).is_empty());
    }

    #[test]
    fn test_blank_lines_and_crlf_between_blocks() {
        let text = "【ピノ】山田 1/15(水) 自宅-会社 10.5km\r\n\r\n\r\n【ピノ】田中 1/16(木) 駅-現場 3km\r\n";
        let blocks = extract_blocks(text, &matcher());
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn test_unit_variants_truncate_at_same_boundary() {
        for unit in ["km", "㎞", "ｋｍ", "kｍ"] {
            let text = format!("【ピノ】山田 1/15(水) 自宅-会社 10.5{unit} 以降は無視");
            let blocks = extract_blocks(&text, &matcher());
            assert_eq!(blocks.len(), 1, "unit {unit}");
            assert_eq!(
                blocks[0].content,
                format!("【ピノ】山田 1/15(水) 自宅-会社 10.5{unit}"),
                "unit {unit}"
            );
        }
    }
}
