//! pino-core: domain types and aggregation for the PINO expense settlement pipeline.

pub mod aggregate;
pub mod entry;
pub mod rates;

pub use aggregate::{DayAggregate, ParseOutcome, PersonAggregate, RouteDetail, Summary, aggregate};
pub use entry::{Entry, sort_for_listing};
pub use rates::SettlementRates;
