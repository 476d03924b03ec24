//! Resale Record Module
//! Raw JSON records and their coercion into typed resale records.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use super::loader::LoaderError;

/// Prices in the dataset are whole currency units; the dashboard shows thousands.
pub const PRICE_SCALE: f64 = 1000.0;

/// Top-level JSON envelope: `{"result": {"records": [...]}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    pub result: EnvelopeResult,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EnvelopeResult {
    pub records: Vec<RawRecord>,
}

/// A record as it appears on disk. Numbers may arrive as JSON numbers or
/// numeric strings, so every field is kept loose until coercion.
#[derive(Debug, Deserialize)]
pub(crate) struct RawRecord {
    pub town: Option<String>,
    pub floor_area_sqm: Option<Value>,
    pub month: Option<Value>,
    pub lease_commence_date: Option<Value>,
    pub resale_price: Option<Value>,
}

/// One housing resale transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct ResaleRecord {
    pub town: String,
    /// First day of the transaction month.
    pub month: NaiveDate,
    pub floor_area_sqm: f64,
    pub lease_commence_date: NaiveDate,
    /// Thousands of currency units.
    pub resale_price: f64,
}

impl RawRecord {
    /// Coerce into a typed record. `row` is only used for error reporting.
    pub(crate) fn coerce(self, row: usize) -> Result<ResaleRecord, LoaderError> {
        let town = match self.town {
            Some(t) if !t.trim().is_empty() => t,
            _ => return Err(LoaderError::MissingField { row, field: "town" }),
        };

        let floor_area_sqm = parse_number(row, "floor_area_sqm", self.floor_area_sqm)?;
        let resale_price = parse_number(row, "resale_price", self.resale_price)? / PRICE_SCALE;
        let month = parse_date(row, "month", self.month)?;
        let lease_commence_date =
            parse_date(row, "lease_commence_date", self.lease_commence_date)?;

        Ok(ResaleRecord {
            town,
            month,
            floor_area_sqm,
            lease_commence_date,
            resale_price,
        })
    }
}

fn parse_number(row: usize, field: &'static str, value: Option<Value>) -> Result<f64, LoaderError> {
    let value = value.ok_or(LoaderError::MissingField { row, field })?;
    let parsed = match &value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(LoaderError::InvalidNumber {
            row,
            field,
            value: value.to_string(),
        }),
    }
}

fn parse_date(row: usize, field: &'static str, value: Option<Value>) -> Result<NaiveDate, LoaderError> {
    let value = value.ok_or(LoaderError::MissingField { row, field })?;
    let text = match &value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    };

    parse_date_text(&text).ok_or(LoaderError::InvalidDate {
        row,
        field,
        value: value.to_string(),
    })
}

/// Accepts `YYYY`, `YYYY-MM` or `YYYY-MM-DD`. Partial dates resolve to the
/// first day of the period.
pub fn parse_date_text(text: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{text}-01"), "%Y-%m-%d") {
        return Some(date);
    }
    if text.len() == 4 {
        let year = text.parse::<i32>().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_coerces_strings_and_numbers() {
        let record = raw(json!({
            "town": "ANG MO KIO",
            "floor_area_sqm": "44",
            "month": "2017-01",
            "lease_commence_date": "1979",
            "resale_price": 232000
        }))
        .coerce(0)
        .unwrap();

        assert_eq!(record.town, "ANG MO KIO");
        assert_eq!(record.floor_area_sqm, 44.0);
        assert_eq!(record.month, NaiveDate::from_ymd_opt(2017, 1, 1).unwrap());
        assert_eq!(
            record.lease_commence_date,
            NaiveDate::from_ymd_opt(1979, 1, 1).unwrap()
        );
        assert_eq!(record.resale_price, 232.0);
    }

    #[test]
    fn test_numeric_lease_year() {
        let record = raw(json!({
            "town": "BEDOK",
            "floor_area_sqm": 67.5,
            "month": "2019-11-15",
            "lease_commence_date": 1985,
            "resale_price": "350000.0"
        }))
        .coerce(3)
        .unwrap();

        assert_eq!(record.month, NaiveDate::from_ymd_opt(2019, 11, 15).unwrap());
        assert_eq!(
            record.lease_commence_date,
            NaiveDate::from_ymd_opt(1985, 1, 1).unwrap()
        );
        assert_eq!(record.resale_price, 350.0);
    }

    #[test]
    fn test_missing_field_reports_row() {
        let err = raw(json!({
            "town": "BEDOK",
            "floor_area_sqm": 67.5,
            "month": "2019-11",
            "lease_commence_date": 1985
        }))
        .coerce(7)
        .unwrap_err();

        assert!(matches!(
            err,
            LoaderError::MissingField { row: 7, field: "resale_price" }
        ));
    }

    #[test]
    fn test_rejects_bad_values() {
        let bad_price = raw(json!({
            "town": "BEDOK",
            "floor_area_sqm": 67.5,
            "month": "2019-11",
            "lease_commence_date": 1985,
            "resale_price": "n/a"
        }))
        .coerce(0);
        assert!(matches!(bad_price, Err(LoaderError::InvalidNumber { .. })));

        let negative_area = raw(json!({
            "town": "BEDOK",
            "floor_area_sqm": -1,
            "month": "2019-11",
            "lease_commence_date": 1985,
            "resale_price": 1
        }))
        .coerce(0);
        assert!(matches!(negative_area, Err(LoaderError::InvalidNumber { .. })));

        let bad_month = raw(json!({
            "town": "BEDOK",
            "floor_area_sqm": 67.5,
            "month": "November",
            "lease_commence_date": 1985,
            "resale_price": 1
        }))
        .coerce(0);
        assert!(matches!(bad_month, Err(LoaderError::InvalidDate { .. })));

        let blank_town = raw(json!({
            "town": "  ",
            "floor_area_sqm": 67.5,
            "month": "2019-11",
            "lease_commence_date": 1985,
            "resale_price": 1
        }))
        .coerce(0);
        assert!(matches!(blank_town, Err(LoaderError::MissingField { field: "town", .. })));
    }

    #[test]
    fn test_parse_date_text() {
        assert_eq!(parse_date_text("2020-06"), NaiveDate::from_ymd_opt(2020, 6, 1));
        assert_eq!(parse_date_text("1990"), NaiveDate::from_ymd_opt(1990, 1, 1));
        assert_eq!(parse_date_text("2020-13"), None);
        assert_eq!(parse_date_text(""), None);
    }
}
