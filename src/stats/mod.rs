//! Statistics module - box plot summaries

mod summary;

pub use summary::BoxSummary;
