//! Chart Figure Module
//! Renderer-neutral descriptions of the three dashboard charts.

use crate::data::{RegionAggregate, YearSelection};
use crate::stats::BoxSummary;

pub const BOX_ID: &str = "my-box";
pub const MEAN_BAR_ID: &str = "my-mean-bar";
pub const MEDIAN_BAR_ID: &str = "my-median-bar";

pub const X_LABEL: &str = "town";
const PRICE_LABEL: &str = "resale_price";

/// Box plot of resale price per region.
#[derive(Debug, Clone)]
pub struct BoxFigure {
    pub id: &'static str,
    pub title: String,
    pub y_label: &'static str,
    pub groups: Vec<(String, BoxSummary)>,
}

/// Bar chart of one statistic per region.
#[derive(Debug, Clone)]
pub struct BarFigure {
    pub id: &'static str,
    pub title: String,
    pub y_label: &'static str,
    pub bars: Vec<RegionAggregate>,
}

/// The three outputs of one slider callback.
#[derive(Debug, Clone)]
pub struct DashboardFigures {
    pub year: i32,
    /// Sales in the selected year.
    pub record_count: usize,
    pub price_box: BoxFigure,
    pub mean_bar: BarFigure,
    pub median_bar: BarFigure,
}

impl BoxFigure {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Lowest and highest plotted value, including outliers.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.groups.iter().fold(None, |acc, (_, s)| {
            let (lo, hi) = acc.unwrap_or((s.min, s.max));
            Some((lo.min(s.min), hi.max(s.max)))
        })
    }
}

impl BarFigure {
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn max_value(&self) -> Option<f64> {
        self.bars.iter().map(|b| b.value).reduce(f64::max)
    }
}

impl DashboardFigures {
    /// Build all three figures for a year selection.
    pub fn build(selection: &YearSelection) -> Self {
        let year = selection.year;
        let groups = BoxSummary::for_groups(&selection.prices_by_region());

        Self {
            year,
            record_count: selection.row_count(),
            price_box: BoxFigure {
                id: BOX_ID,
                title: format!("Resale price by town ({year})"),
                y_label: PRICE_LABEL,
                groups,
            },
            mean_bar: BarFigure {
                id: MEAN_BAR_ID,
                title: format!("Mean resale price by town ({year})"),
                y_label: "mean",
                bars: selection.mean.clone(),
            },
            median_bar: BarFigure {
                id: MEDIAN_BAR_ID,
                title: format!("Median resale price by town ({year})"),
                y_label: "median",
                bars: selection.median.clone(),
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.price_box.is_empty() && self.mean_bar.is_empty() && self.median_bar.is_empty()
    }
}
