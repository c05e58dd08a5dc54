//! CSV file data adapter.
//!
//! Reads `{SYMBOL}.csv` files with a `date,open,high,low,close,volume`
//! header from a base directory. Stand-in for the SQL persistence
//! collaborator that supplies bar sequences in production.

use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

use crate::domain::bar::Bar;
use crate::domain::error::StocklabError;
use crate::ports::data_port::DataPort;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }
}

fn field<'a>(record: &'a csv::StringRecord, index: usize, name: &str) -> Result<&'a str, StocklabError> {
    record.get(index).ok_or_else(|| StocklabError::Data {
        reason: format!("missing {} column", name),
    })
}

fn parse_number<T: std::str::FromStr>(value: &str, name: &str) -> Result<T, StocklabError>
where
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e| StocklabError::Data {
        reason: format!("invalid {} value: {}", name, e),
    })
}

impl DataPort for CsvAdapter {
    fn fetch_bars(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<Bar>, StocklabError> {
        let path = self.csv_path(symbol);
        let content = fs::read_to_string(&path).map_err(|e| StocklabError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| StocklabError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;

            let date_str = field(&record, 0, "date")?;
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                StocklabError::Data {
                    reason: format!("invalid date format: {}", e),
                }
            })?;

            if date < start_date || date > end_date {
                continue;
            }

            bars.push(Bar {
                symbol: symbol.to_string(),
                date,
                open: parse_number(field(&record, 1, "open")?, "open")?,
                high: parse_number(field(&record, 2, "high")?, "high")?,
                low: parse_number(field(&record, 3, "low")?, "low")?,
                close: parse_number(field(&record, 4, "close")?, "close")?,
                volume: parse_number(field(&record, 5, "volume")?, "volume")?,
            });
        }

        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }

    fn list_symbols(&self) -> Result<Vec<String>, StocklabError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| StocklabError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut symbols = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StocklabError::Data {
                reason: format!("directory entry error: {}", e),
            })?;
            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            if let Some(symbol) = name_str.strip_suffix(".csv") {
                symbols.push(symbol.to_string());
            }
        }

        symbols.sort();
        Ok(symbols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_data() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_path_buf();

        let csv_content = "date,open,high,low,close,volume\n\
            2024-01-16,105.0,115.0,100.0,110.0,60000\n\
            2024-01-15,100.0,110.0,90.0,105.0,50000\n\
            2024-01-17,110.0,120.0,105.0,115.0,55000\n";

        fs::write(path.join("AAPL.csv"), csv_content).unwrap();
        fs::write(path.join("MSFT.csv"), "date,open,high,low,close,volume\n").unwrap();

        (dir, path)
    }

    #[test]
    fn fetch_bars_sorted_by_date() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let start = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 17).unwrap();
        let bars = adapter.fetch_bars("AAPL", start, end).unwrap();

        assert_eq!(bars.len(), 3);
        assert_eq!(bars[0].date, start);
        assert_eq!(bars[0].close, 105.0);
        assert_eq!(bars[2].date, end);
        assert!(bars.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn fetch_bars_filters_by_date() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let day = NaiveDate::from_ymd_opt(2024, 1, 16).unwrap();
        let bars = adapter.fetch_bars("AAPL", day, day).unwrap();

        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].date, day);
    }

    #[test]
    fn fetch_bars_missing_file_is_an_error() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let result = adapter.fetch_bars("XYZ", start, end);

        assert!(matches!(result, Err(StocklabError::Data { .. })));
    }

    #[test]
    fn fetch_bars_rejects_bad_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_path_buf();
        fs::write(
            path.join("BAD.csv"),
            "date,open,high,low,close,volume\n2024-01-15,not_a_number,1,1,1,1\n",
        )
        .unwrap();

        let adapter = CsvAdapter::new(path);
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let err = adapter.fetch_bars("BAD", start, end).unwrap_err();
        assert!(matches!(err, StocklabError::Data { reason } if reason.contains("open")));
    }

    #[test]
    fn list_symbols_sorted() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);
        assert_eq!(adapter.list_symbols().unwrap(), vec!["AAPL", "MSFT"]);
    }
}
