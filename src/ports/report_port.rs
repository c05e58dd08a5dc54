//! Report generation port trait.

use std::path::Path;

use crate::domain::backtest::Backtest;
use crate::domain::error::StocklabError;
use crate::domain::monte_carlo::MonteCarloResult;

/// Port for writing backtest and Monte Carlo reports.
pub trait ReportPort {
    fn write_backtest(&self, backtest: &Backtest, output: &Path) -> Result<(), StocklabError>;

    fn write_monte_carlo(
        &self,
        symbol: &str,
        result: &MonteCarloResult,
        output: &Path,
    ) -> Result<(), StocklabError>;
}
