//! OHLCV bar representation.
//!
//! One bar per trading day, ordered by date. Bars are immutable once produced
//! by the data source; the simulator only ever reads them.

use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub symbol: String,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

impl Bar {
    /// Collect the closing prices of a bar slice, in bar order.
    pub fn closes(bars: &[Bar]) -> Vec<f64> {
        bars.iter().map(|b| b.close).collect()
    }
}
