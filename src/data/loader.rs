//! Resale Data Loader Module
//! Loads the resale JSON dataset into an immutable Polars table.

use super::record::{Envelope, ResaleRecord};
use chrono::{Datelike, NaiveDate};
use polars::prelude::*;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub const COL_TOWN: &str = "town";
pub const COL_MONTH: &str = "month";
pub const COL_FLOOR_AREA: &str = "floor_area_sqm";
pub const COL_LEASE: &str = "lease_commence_date";
pub const COL_PRICE: &str = "resale_price";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Record {row}: missing field `{field}`")]
    MissingField { row: usize, field: &'static str },
    #[error("Record {row}: `{field}` is not a non-negative number: {value}")]
    InvalidNumber {
        row: usize,
        field: &'static str,
        value: String,
    },
    #[error("Record {row}: `{field}` is not a valid date: {value}")]
    InvalidDate {
        row: usize,
        field: &'static str,
        value: String,
    },
    #[error("Failed to build table: {0}")]
    Polars(#[from] PolarsError),
}

/// The full resale dataset, loaded once and never mutated.
#[derive(Debug)]
pub struct ResaleTable {
    df: DataFrame,
    years: Vec<i32>,
    source: Option<PathBuf>,
}

impl ResaleTable {
    /// Load the dataset from a JSON file with a `result.records` array.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoaderError> {
        let path = path.as_ref();
        info!(path = %path.display(), "loading resale records");

        let contents = fs::read_to_string(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut table = Self::from_json_str(&contents)?;
        table.source = Some(path.to_path_buf());

        info!(
            rows = table.row_count(),
            years = table.years.len(),
            regions = table.regions().len(),
            "resale records loaded"
        );
        if let Some(first) = table.record(0) {
            debug!(?first, "first record");
        }
        Ok(table)
    }

    /// Parse the JSON envelope and coerce every record.
    pub fn from_json_str(contents: &str) -> Result<Self, LoaderError> {
        let envelope: Envelope = serde_json::from_str(contents)?;
        debug!(raw = envelope.result.records.len(), "parsed JSON envelope");

        let records = envelope
            .result
            .records
            .into_iter()
            .enumerate()
            .map(|(row, raw)| raw.coerce(row))
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_records(&records)
    }

    /// Build the table from typed records.
    pub fn from_records(records: &[ResaleRecord]) -> Result<Self, LoaderError> {
        let mut towns: Vec<&str> = Vec::with_capacity(records.len());
        let mut months: Vec<i32> = Vec::with_capacity(records.len());
        let mut areas: Vec<f64> = Vec::with_capacity(records.len());
        let mut leases: Vec<i32> = Vec::with_capacity(records.len());
        let mut prices: Vec<f64> = Vec::with_capacity(records.len());
        let mut years = BTreeSet::new();

        for record in records {
            towns.push(&record.town);
            months.push(days_since_epoch(record.month));
            areas.push(record.floor_area_sqm);
            leases.push(days_since_epoch(record.lease_commence_date));
            prices.push(record.resale_price);
            years.insert(record.month.year());
        }

        let df = DataFrame::new(vec![
            Column::new(COL_TOWN.into(), towns),
            Column::new(COL_MONTH.into(), months).cast(&DataType::Date)?,
            Column::new(COL_FLOOR_AREA.into(), areas),
            Column::new(COL_LEASE.into(), leases).cast(&DataType::Date)?,
            Column::new(COL_PRICE.into(), prices),
        ])?;

        Ok(Self {
            df,
            years: years.into_iter().collect(),
            source: None,
        })
    }

    /// Get a reference to the underlying DataFrame.
    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    /// Distinct transaction years, ascending.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Get the number of records.
    pub fn row_count(&self) -> usize {
        self.df.height()
    }

    /// Get the file the table was loaded from.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Get distinct region names, sorted.
    pub fn regions(&self) -> Vec<String> {
        let Ok(towns) = self.df.column(COL_TOWN).and_then(|c| c.str()) else {
            return Vec::new();
        };
        let set: BTreeSet<&str> = towns.into_iter().flatten().collect();
        set.into_iter().map(str::to_string).collect()
    }

    /// Read back row `idx` as a typed record.
    pub fn record(&self, idx: usize) -> Option<ResaleRecord> {
        if idx >= self.df.height() {
            return None;
        }

        let town = self.df.column(COL_TOWN).ok()?.str().ok()?.get(idx)?.to_string();
        let month = self.date_at(COL_MONTH, idx)?;
        let lease_commence_date = self.date_at(COL_LEASE, idx)?;
        let floor_area_sqm = self.df.column(COL_FLOOR_AREA).ok()?.f64().ok()?.get(idx)?;
        let resale_price = self.df.column(COL_PRICE).ok()?.f64().ok()?.get(idx)?;

        Some(ResaleRecord {
            town,
            month,
            floor_area_sqm,
            lease_commence_date,
            resale_price,
        })
    }

    fn date_at(&self, column: &str, idx: usize) -> Option<NaiveDate> {
        let days = self
            .df
            .column(column)
            .ok()?
            .cast(&DataType::Int32)
            .ok()?
            .i32()
            .ok()?
            .get(idx)?;
        epoch().checked_add_signed(chrono::Duration::days(days as i64))
    }
}

fn epoch() -> NaiveDate {
    NaiveDate::default()
}

fn days_since_epoch(date: NaiveDate) -> i32 {
    (date - epoch()).num_days() as i32
}
