//! Technical indicator library.
//!
//! Pure, stateless computation over a prefix of closing prices; every function
//! returns a documented neutral value instead of erroring on short input.
//! [`IndicatorSnapshot`] bundles one bar's worth of indicator values for the
//! signal generator, including the previous bar's values where crossover
//! detection needs them.

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;

pub use bollinger::{bollinger, BollingerValue};
pub use ema::ema;
pub use macd::{macd, MacdValue};
pub use rsi::rsi;
pub use sma::sma;

use crate::domain::strategy::StrategyParams;

/// Bars of history required before indicator values are considered valid.
pub const MIN_HISTORY: usize = 20;

/// Indicator values for the current bar, recomputed every bar from the full
/// close-price prefix. Not persisted independently.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSnapshot {
    /// False until at least [`MIN_HISTORY`] closes exist; signals generated
    /// from an invalid snapshot are always hold.
    pub valid: bool,
    pub sma: f64,
    pub prev_sma: f64,
    pub prev_close: f64,
    pub rsi: f64,
    pub macd: MacdValue,
    pub prev_macd: MacdValue,
    pub bollinger: BollingerValue,
}

impl IndicatorSnapshot {
    /// Compute the snapshot for the last close in `closes`.
    ///
    /// `closes` must be the full prefix up to and including the current bar;
    /// previous-bar values come from the prefix with the last close dropped.
    pub fn compute(closes: &[f64], params: &StrategyParams) -> Self {
        let prev = &closes[..closes.len().saturating_sub(1)];

        IndicatorSnapshot {
            valid: closes.len() >= MIN_HISTORY,
            sma: sma(closes, params.sma_period),
            prev_sma: sma(prev, params.sma_period),
            prev_close: prev.last().copied().unwrap_or(0.0),
            rsi: rsi(closes, params.rsi_period),
            macd: macd(closes, params.macd_fast, params.macd_slow, params.macd_signal),
            prev_macd: macd(prev, params.macd_fast, params.macd_slow, params.macd_signal),
            bollinger: bollinger(closes, params.bollinger_period, params.bollinger_std_dev),
        }
    }
}
