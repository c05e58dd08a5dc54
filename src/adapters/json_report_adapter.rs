//! JSON report adapter.
//!
//! Serializes backtest and Monte Carlo results to pretty-printed JSON
//! files so other tools can pick them up.

use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::domain::backtest::Backtest;
use crate::domain::error::StocklabError;
use crate::domain::monte_carlo::MonteCarloResult;
use crate::ports::report_port::ReportPort;

pub struct JsonReportAdapter;

#[derive(Serialize)]
struct BacktestReport<'a> {
    symbol: &'a str,
    strategy: String,
    status: &'a str,
    result: Option<&'a crate::domain::backtest::BacktestResult>,
}

#[derive(Serialize)]
struct MonteCarloReport<'a> {
    symbol: &'a str,
    #[serde(flatten)]
    result: &'a MonteCarloResult,
}

fn write_json<T: Serialize>(report: &T, path: &Path) -> Result<(), StocklabError> {
    let json = serde_json::to_string_pretty(report).map_err(|e| StocklabError::Data {
        reason: format!("failed to serialize report: {}", e),
    })?;
    fs::write(path, json)?;
    Ok(())
}

impl ReportPort for JsonReportAdapter {
    fn write_backtest(&self, backtest: &Backtest, path: &Path) -> Result<(), StocklabError> {
        let report = BacktestReport {
            symbol: &backtest.config.symbol,
            strategy: backtest.config.strategy.to_string(),
            status: backtest.status.as_str(),
            result: backtest.result.as_ref(),
        };
        write_json(&report, path)
    }

    fn write_monte_carlo(
        &self,
        symbol: &str,
        result: &MonteCarloResult,
        path: &Path,
    ) -> Result<(), StocklabError> {
        let report = MonteCarloReport { symbol, result };
        write_json(&report, path)
    }
}
