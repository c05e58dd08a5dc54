//! Data access port trait.
//!
//! The core never fetches data itself; a collaborator supplies ordered bar
//! sequences by symbol and date range.

use chrono::NaiveDate;

use crate::domain::bar::Bar;
use crate::domain::error::StocklabError;

pub trait DataPort {
    /// Fetch bars for `symbol` within `[start_date, end_date]`, sorted by date.
    fn fetch_bars(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<Bar>, StocklabError>;

    fn list_symbols(&self) -> Result<Vec<String>, StocklabError>;
}
