//! Signal generation.
//!
//! Maps a strategy type, the current bar, and its indicator snapshot to a
//! discrete action. One strategy type is evaluated at a time; strength is
//! binary (0.0 or 1.0). Unrecognized conditions and insufficient indicator
//! history always degrade to hold; signal faults never abort a simulation.

use crate::domain::bar::Bar;
use crate::domain::indicator::IndicatorSnapshot;
use crate::domain::strategy::StrategyType;

const RSI_OVERSOLD: f64 = 30.0;
const RSI_OVERBOUGHT: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Buy,
    Sell,
    Hold,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Signal {
    pub action: Action,
    pub strength: f64,
}

impl Signal {
    fn hold() -> Self {
        Signal {
            action: Action::Hold,
            strength: 0.0,
        }
    }

    fn fire(action: Action) -> Self {
        Signal {
            action,
            strength: 1.0,
        }
    }
}

/// Generate the signal for `bar` under `strategy`.
///
/// `shares_held` is part of the contract for parity with the position
/// simulator's call site; the decision tables themselves are position-blind
/// and the simulator applies its own long-only gating.
pub fn generate_signal(
    bar: &Bar,
    snapshot: &IndicatorSnapshot,
    _shares_held: u64,
    strategy: StrategyType,
) -> Signal {
    if !snapshot.valid {
        return Signal::hold();
    }

    match strategy {
        StrategyType::MovingAverage => {
            // Crossover of close against SMA, requiring both bars' values.
            if snapshot.prev_close <= snapshot.prev_sma && bar.close > snapshot.sma {
                Signal::fire(Action::Buy)
            } else if snapshot.prev_close >= snapshot.prev_sma && bar.close < snapshot.sma {
                Signal::fire(Action::Sell)
            } else {
                Signal::hold()
            }
        }
        StrategyType::Rsi => {
            if snapshot.rsi < RSI_OVERSOLD {
                Signal::fire(Action::Buy)
            } else if snapshot.rsi > RSI_OVERBOUGHT {
                Signal::fire(Action::Sell)
            } else {
                Signal::hold()
            }
        }
        StrategyType::Macd => {
            // With the signal line pinned to the MACD line these crossovers
            // never fire. See the macd module doc.
            let (line, signal) = (snapshot.macd.line, snapshot.macd.signal);
            let (prev_line, prev_signal) = (snapshot.prev_macd.line, snapshot.prev_macd.signal);
            if prev_line <= prev_signal && line > signal {
                Signal::fire(Action::Buy)
            } else if prev_line >= prev_signal && line < signal {
                Signal::fire(Action::Sell)
            } else {
                Signal::hold()
            }
        }
        StrategyType::BollingerBands => {
            if bar.close < snapshot.bollinger.lower {
                Signal::fire(Action::Buy)
            } else if bar.close > snapshot.bollinger.upper {
                Signal::fire(Action::Sell)
            } else {
                Signal::hold()
            }
        }
    }
}
