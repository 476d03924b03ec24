//! Box Summary Module
//! Descriptive statistics behind one box in a box plot.

use rayon::prelude::*;
use statrs::statistics::Statistics;

/// Whisker reach as a multiple of the interquartile range.
pub const WHISKER_IQR: f64 = 1.5;

/// Five-number summary plus outliers for a single region.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSummary {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}

impl BoxSummary {
    /// Summarise `values`. Returns `None` when there is nothing to summarise.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let q1 = percentile(&sorted, 25.0);
        let median = percentile(&sorted, 50.0);
        let q3 = percentile(&sorted, 75.0);
        let iqr = q3 - q1;
        let low_fence = q1 - WHISKER_IQR * iqr;
        let high_fence = q3 + WHISKER_IQR * iqr;

        // Whiskers end at the most extreme data points inside the fences
        let whisker_low = sorted
            .iter()
            .copied()
            .find(|&v| v >= low_fence)
            .unwrap_or(q1);
        let whisker_high = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= high_fence)
            .unwrap_or(q3);

        let outliers = sorted
            .iter()
            .copied()
            .filter(|&v| v < whisker_low || v > whisker_high)
            .collect();

        Some(Self {
            count: sorted.len(),
            mean: sorted.iter().mean(),
            min: Statistics::min(sorted.iter()),
            max: Statistics::max(sorted.iter()),
            q1,
            median,
            q3,
            whisker_low,
            whisker_high,
            outliers,
        })
    }

    /// Summarise every group in parallel, keeping input order and dropping
    /// empty groups.
    pub fn for_groups(groups: &[(String, Vec<f64>)]) -> Vec<(String, BoxSummary)> {
        groups
            .par_iter()
            .filter_map(|(name, values)| Some((name.clone(), Self::from_values(values)?)))
            .collect()
    }
}

/// Calculate percentile using linear interpolation (NumPy compatible).
pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
    let n = sorted_values.len();
    if n == 0 {
        return f64::NAN;
    }
    if n == 1 {
        return sorted_values[0];
    }

    let rank = (p / 100.0) * (n - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = (rank.ceil() as usize).min(n - 1);
    let frac = rank - lower as f64;

    if lower == upper {
        sorted_values[lower]
    } else {
        sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
    }
}
