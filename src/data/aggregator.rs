//! Year Aggregator Module
//! Filters the resale table to one year and computes per-region mean and
//! median prices with Polars lazy frames.

use super::loader::{ResaleTable, COL_MONTH, COL_PRICE, COL_TOWN};
use polars::prelude::*;
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

pub const COL_MEAN: &str = "mean";
pub const COL_MEDIAN: &str = "median";

#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// One summary statistic for one region.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionAggregate {
    pub region: String,
    pub value: f64,
}

/// Everything the dashboard needs for one selected year.
#[derive(Debug, Clone)]
pub struct YearSelection {
    pub year: i32,
    /// Filtered rows projected to `[town, resale_price]`.
    pub prices: DataFrame,
    /// Mean price per region, ascending.
    pub mean: Vec<RegionAggregate>,
    /// Median price per region, ascending.
    pub median: Vec<RegionAggregate>,
}

/// Filter to `year`, group by region, and sort mean and median ascending.
///
/// A year with no rows yields empty tables rather than an error.
pub fn aggregate(table: &ResaleTable, year: i32) -> Result<YearSelection, AggregateError> {
    let prices = table
        .dataframe()
        .clone()
        .lazy()
        .filter(col(COL_MONTH).dt().year().eq(lit(year)))
        .select([col(COL_TOWN), col(COL_PRICE)])
        .collect()?;

    let mean = statistic_table(&prices, col(COL_PRICE).mean().alias(COL_MEAN), COL_MEAN)?;
    let median = statistic_table(&prices, col(COL_PRICE).median().alias(COL_MEDIAN), COL_MEDIAN)?;

    debug!(
        year,
        rows = prices.height(),
        regions = mean.len(),
        "aggregated year selection"
    );

    Ok(YearSelection {
        year,
        prices,
        mean,
        median,
    })
}

/// Group by region in first-appearance order, apply `agg`, and sort by it.
/// The sort keeps ties in grouping order.
fn statistic_table(
    prices: &DataFrame,
    agg: Expr,
    name: &str,
) -> Result<Vec<RegionAggregate>, AggregateError> {
    let grouped = prices
        .clone()
        .lazy()
        .group_by_stable([col(COL_TOWN)])
        .agg([agg])
        .sort(
            [name],
            SortMultipleOptions::default().with_maintain_order(true),
        )
        .collect()?;

    let towns = grouped.column(COL_TOWN)?.str()?;
    let values = grouped.column(name)?.f64()?;

    Ok(towns
        .into_iter()
        .zip(values.into_iter())
        .filter_map(|(town, value)| {
            Some(RegionAggregate {
                region: town?.to_string(),
                value: value?,
            })
        })
        .collect())
}

impl YearSelection {
    /// Number of filtered records.
    pub fn row_count(&self) -> usize {
        self.prices.height()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.height() == 0
    }

    /// Filtered `(region, price)` pairs in table order.
    pub fn pairs(&self) -> Vec<(String, f64)> {
        let (Ok(towns), Ok(prices)) = (
            self.prices.column(COL_TOWN).and_then(|c| c.str()),
            self.prices.column(COL_PRICE).and_then(|c| c.f64()),
        ) else {
            return Vec::new();
        };

        towns
            .into_iter()
            .zip(prices.into_iter())
            .filter_map(|(town, price)| Some((town?.to_string(), price?)))
            .collect()
    }

    /// Filtered prices grouped per region, regions in first-appearance order.
    pub fn prices_by_region(&self) -> Vec<(String, Vec<f64>)> {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut groups: Vec<(String, Vec<f64>)> = Vec::new();

        for (town, price) in self.pairs() {
            match index.get(&town) {
                Some(&i) => groups[i].1.push(price),
                None => {
                    index.insert(town.clone(), groups.len());
                    groups.push((town, vec![price]));
                }
            }
        }
        groups
    }
}
