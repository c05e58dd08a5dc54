//! Backtest driver and lifecycle.
//!
//! A [`Backtest`] owns one symbol, one strategy configuration, one date
//! range, one commission/slippage rate pair, and its initial capital. Status
//! is monotonic: `Created -> Running -> Completed | Failed`, never back.
//! Callers construct and own backtest values explicitly; there is no
//! process-wide current instance.

use chrono::NaiveDate;

use crate::domain::bar::Bar;
use crate::domain::error::StocklabError;
use crate::domain::ledger::{EquityPoint, Trade};
use crate::domain::metrics::Metrics;
use crate::domain::monte_carlo::{run_monte_carlo, MonteCarloConfig, MonteCarloResult};
use crate::domain::simulator::run_simulation;
use crate::domain::strategy::{StrategyParams, StrategyType};

pub const DEFAULT_COMMISSION_RATE: f64 = 0.001;
pub const DEFAULT_SLIPPAGE_RATE: f64 = 0.0005;
pub const DEFAULT_INITIAL_CAPITAL: f64 = 100_000.0;

#[derive(Debug, Clone)]
pub struct BacktestConfig {
    pub symbol: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub strategy: StrategyType,
    pub params: StrategyParams,
    pub commission_rate: f64,
    pub slippage_rate: f64,
    pub initial_capital: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BacktestStatus {
    Created,
    Running,
    Completed,
    Failed,
}

impl BacktestStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, BacktestStatus::Completed | BacktestStatus::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BacktestStatus::Created => "created",
            BacktestStatus::Running => "running",
            BacktestStatus::Completed => "completed",
            BacktestStatus::Failed => "failed",
        }
    }
}

/// Completed simulation output owned by the backtest.
#[derive(Debug, Clone, serde::Serialize)]
pub struct BacktestResult {
    pub final_capital: f64,
    pub trades: Vec<Trade>,
    pub equity_curve: Vec<EquityPoint>,
    pub metrics: Metrics,
}

#[derive(Debug, Clone)]
pub struct Backtest {
    pub config: BacktestConfig,
    pub status: BacktestStatus,
    pub result: Option<BacktestResult>,
}

impl Backtest {
    pub fn new(config: BacktestConfig) -> Self {
        Backtest {
            config,
            status: BacktestStatus::Created,
            result: None,
        }
    }

    /// Run the simulation over `bars` and store the result.
    ///
    /// Empty input marks the backtest failed and returns [`StocklabError::NoData`].
    /// A backtest can only be run once; rerunning from any non-created state
    /// is an error and leaves the stored result untouched.
    pub fn run(&mut self, bars: &[Bar]) -> Result<&BacktestResult, StocklabError> {
        if self.status != BacktestStatus::Created {
            return Err(StocklabError::AlreadyRun {
                status: self.status.as_str().into(),
            });
        }

        self.status = BacktestStatus::Running;

        if bars.is_empty() {
            self.status = BacktestStatus::Failed;
            return Err(StocklabError::NoData {
                symbol: self.config.symbol.clone(),
            });
        }

        let outcome = run_simulation(
            bars,
            self.config.strategy,
            &self.config.params,
            self.config.commission_rate,
            self.config.slippage_rate,
            self.config.initial_capital,
        );

        let metrics = Metrics::compute(
            self.config.initial_capital,
            outcome.final_capital,
            &outcome.equity_curve,
            &outcome.trades,
        );

        self.status = BacktestStatus::Completed;
        Ok(self.result.insert(BacktestResult {
            final_capital: outcome.final_capital,
            trades: outcome.trades,
            equity_curve: outcome.equity_curve,
            metrics,
        }))
    }

    /// Forward-looking risk analysis on the completed backtest's equity curve.
    pub fn monte_carlo(
        &self,
        config: &MonteCarloConfig,
    ) -> Result<MonteCarloResult, StocklabError> {
        let result = self.result.as_ref().ok_or(StocklabError::NoEquityCurve)?;
        run_monte_carlo(
            &result.equity_curve,
            self.config.initial_capital,
            config,
        )
    }
}
