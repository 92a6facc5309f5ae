//! Expense entry record and listing order.

use serde::{Deserialize, Serialize};

/// One recognized reimbursement record extracted from pasted text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// 1-based, assigned in extraction order; stable for one parse.
    pub id: u32,
    /// Person the entry belongs to, as written, trimmed.
    pub name: String,
    /// `month/day` as written. Never validated against a calendar.
    pub date: String,
    /// Travel route text, newlines removed, trimmed.
    pub route: String,
    /// Kilometers.
    pub distance: f64,
}

impl Entry {
    /// Synthetic listing sort key: `month * 100 + day`.
    ///
    /// Year-agnostic: entries from different years with the same month/day
    /// collide. Known limitation, kept as-is.
    pub fn date_sort_key(&self) -> u32 {
        let mut parts = self.date.split('/');
        let month: u32 = parts.next().and_then(|s| s.parse().ok()).unwrap_or(0);
        let day: u32 = parts.next().and_then(|s| s.parse().ok()).unwrap_or(0);
        month * 100 + day
    }
}

/// Order entries for listing display: most recent month/day first,
/// ties broken by ascending id.
pub fn sort_for_listing(entries: &mut [Entry]) {
    entries.sort_by(|a, b| {
        b.date_sort_key()
            .cmp(&a.date_sort_key())
            .then(a.id.cmp(&b.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u32, date: &str) -> Entry {
        Entry {
            id,
            name: "山田太郎".to_string(),
            date: date.to_string(),
            route: "自宅-会社".to_string(),
            distance: 10.5,
        }
    }

    #[test]
    fn test_date_sort_key() {
        assert_eq!(entry(1, "1/15").date_sort_key(), 115);
        assert_eq!(entry(1, "12/31").date_sort_key(), 1231);
        assert_eq!(entry(1, "1/5").date_sort_key(), 105);
    }

    #[test]
    fn test_listing_sorts_december_before_january() {
        // 12/31 outranks 1/5 under the year-agnostic key.
        let mut entries = vec![entry(1, "1/5"), entry(2, "12/31")];
        sort_for_listing(&mut entries);
        assert_eq!(entries[0].date, "12/31");
        assert_eq!(entries[1].date, "1/5");
    }

    #[test]
    fn test_listing_ties_break_by_id() {
        let mut entries = vec![entry(3, "2/10"), entry(1, "2/10"), entry(2, "2/10")];
        sort_for_listing(&mut entries);
        let ids: Vec<u32> = entries.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
