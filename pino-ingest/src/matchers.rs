//! Named field matchers with explicit capture contracts.
//!
//! The two tie-break rules that shape parsing live here and in the callers:
//! distance extraction always takes the *first* number+unit occurrence, and
//! route extraction separately anchors on the *last* occurrence of the
//! matched text. Keeping the matchers named (rather than inline scans) keeps
//! both rules testable on their own.

use anyhow::Result;
use regex::Regex;

/// Accepted kilometer spellings: ASCII, the squared-km codepoint, full-width,
/// and the mixed ASCII/full-width form, all case-insensitive.
const UNIT_PATTERN: &str = "(?:km|㎞|ｋｍ|kｍ)";

/// Weekday characters accepted inside the header parentheses.
const WEEKDAYS: &str = "月火水木金土日";

/// A decimal-number + kilometer-unit occurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatch<'a> {
    /// Parsed kilometers.
    pub value: f64,
    /// Exact matched text, number and unit spelling included.
    pub text: &'a str,
    /// Byte offset of the number start.
    pub start: usize,
    /// Byte offset just past the unit.
    pub end: usize,
}

/// Finds `<decimal><unit>` occurrences. ASCII digits only, matching the
/// number shape `1`, `1.`, `1.5`.
pub struct DistanceMatcher {
    re: Regex,
}

impl DistanceMatcher {
    pub fn new() -> Result<Self> {
        let re = Regex::new(&format!(r"(?i)([0-9]+\.?[0-9]*){UNIT_PATTERN}"))?;
        Ok(Self { re })
    }

    /// First occurrence in `text`, or `None` when no unit marker exists.
    pub fn first<'a>(&self, text: &'a str) -> Option<DistanceMatch<'a>> {
        let caps = self.re.captures(text)?;
        let whole = caps.get(0)?;
        let value: f64 = caps.get(1)?.as_str().parse().ok()?;
        Some(DistanceMatch {
            value,
            text: whole.as_str(),
            start: whole.start(),
            end: whole.end(),
        })
    }
}

/// Captured header fields of one entry block.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderMatch<'a> {
    /// Person name: one or more non-space tokens, possibly space-separated.
    pub name: &'a str,
    /// `month/day`, digits as written.
    pub date: &'a str,
    /// The weekday character inside the parentheses.
    pub weekday: char,
    /// Byte offset just past the closing parenthesis; route text starts here.
    pub end: usize,
}

/// Matches the block header: delimiter, name, `M/D`, `(weekday)`.
///
/// Name tokens may be separated by ASCII or ideographic spaces; the date is
/// taken as written and never calendar-checked.
pub struct HeaderMatcher {
    re: Regex,
}

impl HeaderMatcher {
    pub fn new() -> Result<Self> {
        let re = Regex::new(&format!(
            r"【ピノ】\s*([^　\s]+(?:[ 　]+[^　\s]+)*)\s+([0-9]+/[0-9]+)\s*\(([{WEEKDAYS}])\)"
        ))?;
        Ok(Self { re })
    }

    /// First header occurrence anywhere in `block`, or `None`.
    pub fn first<'a>(&self, block: &'a str) -> Option<HeaderMatch<'a>> {
        let caps = self.re.captures(block)?;
        let whole = caps.get(0)?;
        let weekday = caps.get(3)?.as_str().chars().next()?;
        Some(HeaderMatch {
            name: caps.get(1)?.as_str().trim(),
            date: caps.get(2)?.as_str(),
            weekday,
            end: whole.end(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_first_occurrence_wins() {
        let m = DistanceMatcher::new().unwrap();
        let found = m.first("往路 10.5km 復路 3km").unwrap();
        assert_eq!(found.value, 10.5);
        assert_eq!(found.text, "10.5km");
        assert_eq!(found.start, "往路 ".len());
    }

    #[test]
    fn test_distance_unit_spellings_are_equivalent() {
        let m = DistanceMatcher::new().unwrap();
        for unit in ["km", "KM", "Km", "㎞", "ｋｍ", "kｍ"] {
            let text = format!("経路 7.5{unit}");
            let found = m.first(&text).unwrap();
            assert_eq!(found.value, 7.5, "unit {unit}");
            assert_eq!(found.end, text.len(), "unit {unit}");
        }
    }

    #[test]
    fn test_distance_integer_and_trailing_dot() {
        let m = DistanceMatcher::new().unwrap();
        assert_eq!(m.first("7km").unwrap().value, 7.0);
        assert_eq!(m.first("7.km").unwrap().value, 7.0);
    }

    #[test]
    fn test_distance_absent() {
        let m = DistanceMatcher::new().unwrap();
        assert!(m.first("自宅-会社 往復").is_none());
    }

    #[test]
    fn test_header_basic() {
        let m = HeaderMatcher::new().unwrap();
        let block = "【ピノ】 山田太郎 1/15(水) 自宅-会社 10.5km";
        let head = m.first(block).unwrap();
        assert_eq!(head.name, "山田太郎");
        assert_eq!(head.date, "1/15");
        assert_eq!(head.weekday, '水');
        assert_eq!(&block[head.end..], " 自宅-会社 10.5km");
    }

    #[test]
    fn test_header_name_with_spaces() {
        let m = HeaderMatcher::new().unwrap();
        let head = m.first("【ピノ】山田 太郎 1/15(水) r 1km").unwrap();
        assert_eq!(head.name, "山田 太郎");

        // Ideographic space between name tokens.
        let head = m.first("【ピノ】山田　太郎 1/15(月) r 1km").unwrap();
        assert_eq!(head.name, "山田　太郎");
    }

    #[test]
    fn test_header_requires_weekday_parenthesis() {
        let m = HeaderMatcher::new().unwrap();
        assert!(m.first("【ピノ】山田太郎 1/15 自宅-会社 10.5km").is_none());
        assert!(m.first("【ピノ】山田太郎 1/15(X) 自宅-会社 10.5km").is_none());
    }
}
