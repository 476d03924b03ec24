//! Data module - resale JSON loading and per-year aggregation

mod aggregator;
mod loader;
mod record;

pub use aggregator::{aggregate, AggregateError, RegionAggregate, YearSelection};
pub use loader::ResaleTable;
#[cfg(test)]
pub use record::ResaleRecord;
