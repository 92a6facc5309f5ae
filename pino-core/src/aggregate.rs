//! Grouping of parsed entries into per-person, per-day settlement buckets.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::entry::{Entry, sort_for_listing};
use crate::rates::SettlementRates;

/// One route/distance pair inside a day bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteDetail {
    pub route: String,
    pub distance: f64,
}

/// Aggregation of all entries sharing one (person, date) pair.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DayAggregate {
    /// Insertion order follows entry extraction order.
    pub details: Vec<RouteDetail>,
    pub total_distance: f64,
    pub transportation_fee: i64,
    pub daily_allowance: i64,
}

/// Per-person grand totals across all day buckets.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Summary {
    pub total_distance: f64,
    pub total_transportation: i64,
    pub total_daily_allowance: i64,
    pub grand_total: i64,
}

/// All of one person's day buckets plus their summary.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PersonAggregate {
    /// Keyed by `month/day`, in first-appearance order.
    pub days: IndexMap<String, DayAggregate>,
    pub summary: Summary,
}

/// Immutable result of one parse invocation. A new parse replaces the whole
/// structure; nothing is updated incrementally.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParseOutcome {
    /// Entries in extraction order.
    pub entries: Vec<Entry>,
    /// Person name to aggregate, in first-appearance order.
    pub by_person: IndexMap<String, PersonAggregate>,
}

impl ParseOutcome {
    /// Entries in listing display order (recent month/day first, id ties
    /// ascending). Leaves `entries` itself in extraction order.
    pub fn listing(&self) -> Vec<Entry> {
        let mut sorted = self.entries.clone();
        sort_for_listing(&mut sorted);
        sorted
    }
}

/// Group entries by (person, date) and compute fees and summaries.
pub fn aggregate(entries: Vec<Entry>, rates: &SettlementRates) -> ParseOutcome {
    let mut by_person: IndexMap<String, PersonAggregate> = IndexMap::new();

    for entry in &entries {
        let person = by_person.entry(entry.name.clone()).or_default();
        let day = person.days.entry(entry.date.clone()).or_default();
        day.details.push(RouteDetail {
            route: entry.route.clone(),
            distance: entry.distance,
        });
    }

    for person in by_person.values_mut() {
        for day in person.days.values_mut() {
            day.total_distance = day.details.iter().map(|d| d.distance).sum();
            day.transportation_fee = rates.transportation_fee(day.total_distance);
            day.daily_allowance = rates.daily_allowance;
        }

        // Fees are summed per day bucket; the floor applies per day, never
        // to the grand product.
        person.summary.total_distance = person.days.values().map(|d| d.total_distance).sum();
        person.summary.total_transportation =
            person.days.values().map(|d| d.transportation_fee).sum();
        person.summary.total_daily_allowance = rates.daily_allowance * person.days.len() as i64;
        person.summary.grand_total =
            person.summary.total_transportation + person.summary.total_daily_allowance;
    }

    ParseOutcome { entries, by_person }
}
