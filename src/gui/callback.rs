//! Slider Callback
//! Binds a named input control to the handler that recomputes the charts.

use crate::charts::DashboardFigures;
use crate::data::{aggregate, AggregateError, ResaleTable};
use std::sync::Arc;
use tracing::{debug, instrument};

pub const SLIDER_ID: &str = "my-slider";

type Handler = Box<dyn Fn(i32) -> Result<DashboardFigures, AggregateError>>;

/// A handler registered against one input control. Dispatch is synchronous:
/// the new value goes in, the new outputs come back.
pub struct SliderCallback {
    input_id: &'static str,
    handler: Handler,
}

impl SliderCallback {
    pub fn new<F>(input_id: &'static str, handler: F) -> Self
    where
        F: Fn(i32) -> Result<DashboardFigures, AggregateError> + 'static,
    {
        Self {
            input_id,
            handler: Box::new(handler),
        }
    }

    /// The standard dashboard binding: aggregate the shared table for the
    /// selected year and build the three figures.
    pub fn year_figures(table: Arc<ResaleTable>) -> Self {
        Self::new(SLIDER_ID, move |year| {
            let selection = aggregate(&table, year)?;
            if selection.is_empty() {
                debug!(year, "no sales in selected year");
            }
            Ok(DashboardFigures::build(&selection))
        })
    }

    pub fn input_id(&self) -> &'static str {
        self.input_id
    }

    /// Invoke the handler with the control's new value.
    #[instrument(skip(self), fields(input = self.input_id))]
    pub fn dispatch(&self, value: i32) -> Result<DashboardFigures, AggregateError> {
        let figures = (self.handler)(value)?;
        debug!(
            regions = figures.mean_bar.bars.len(),
            "callback produced figures"
        );
        Ok(figures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ResaleRecord;
    use chrono::NaiveDate;
    use std::cell::Cell;
    use std::rc::Rc;

    fn table() -> Arc<ResaleTable> {
        let rec = |town: &str, year: i32, price: f64| ResaleRecord {
            town: town.to_string(),
            month: NaiveDate::from_ymd_opt(year, 3, 1).unwrap(),
            floor_area_sqm: 100.0,
            lease_commence_date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            resale_price: price,
        };
        Arc::new(
            ResaleTable::from_records(&[
                rec("TAMPINES", 2019, 400.0),
                rec("TAMPINES", 2020, 450.0),
                rec("CLEMENTI", 2020, 500.0),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn test_dispatch_returns_figures_for_year() {
        let callback = SliderCallback::year_figures(table());
        assert_eq!(callback.input_id(), SLIDER_ID);

        let figures = callback.dispatch(2020).unwrap();
        assert_eq!(figures.year, 2020);
        assert_eq!(figures.mean_bar.bars.len(), 2);

        let figures = callback.dispatch(2019).unwrap();
        assert_eq!(figures.year, 2019);
        assert_eq!(figures.mean_bar.bars.len(), 1);
        assert_eq!(figures.mean_bar.bars[0].region, "TAMPINES");
    }

    #[test]
    fn test_dispatch_invokes_handler_each_time() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let shared = table();

        let callback = SliderCallback::new("custom", move |year| {
            counter.set(counter.get() + 1);
            Ok(DashboardFigures::build(&aggregate(&shared, year)?))
        });

        callback.dispatch(2020).unwrap();
        callback.dispatch(2020).unwrap();
        assert_eq!(calls.get(), 2);
        assert_eq!(callback.input_id(), "custom");
    }

    #[test]
    fn test_empty_year_is_not_an_error() {
        let figures = SliderCallback::year_figures(table()).dispatch(1980).unwrap();
        assert!(figures.is_empty());
    }
}
