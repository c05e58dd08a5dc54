//! Bar-by-bar position simulation.
//!
//! Drives the signal generator over an ordered bar sequence and mutates a
//! [`Ledger`] in response. The loop is inherently sequential: each bar's
//! decision depends on indicator state accumulated from all prior bars.
//! Any position still open after the last bar is force-liquidated at that
//! bar's close, so a simulation never ends holding shares.

use crate::domain::bar::Bar;
use crate::domain::indicator::IndicatorSnapshot;
use crate::domain::ledger::{EquityPoint, Ledger, Trade};
use crate::domain::signal::{generate_signal, Action};
use crate::domain::strategy::{StrategyParams, StrategyType};

/// Raw simulation output, before metric computation.
#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    pub final_capital: f64,
    pub trades: Vec<Trade>,
    pub equity_curve: Vec<EquityPoint>,
}

/// Run one backtest simulation over `bars`.
///
/// Produces exactly one equity point per input bar, in bar order. The
/// equity curve is marked before forced liquidation, so the final point and
/// `final_capital` differ by the liquidation fees.
pub fn run_simulation(
    bars: &[Bar],
    strategy: StrategyType,
    params: &StrategyParams,
    commission_rate: f64,
    slippage_rate: f64,
    initial_capital: f64,
) -> SimulationOutcome {
    let mut ledger = Ledger::new(initial_capital);
    let closes = Bar::closes(bars);

    for (i, bar) in bars.iter().enumerate() {
        let snapshot = IndicatorSnapshot::compute(&closes[..=i], params);
        let signal = generate_signal(bar, &snapshot, ledger.shares, strategy);

        match signal.action {
            Action::Buy => {
                ledger.buy(bar.date, bar.close, commission_rate, slippage_rate);
            }
            Action::Sell => {
                ledger.sell(bar.date, bar.close, commission_rate, slippage_rate);
            }
            Action::Hold => {}
        }

        ledger.record_equity(bar.date, bar.close);
    }

    if !ledger.is_flat() {
        if let Some(last) = bars.last() {
            ledger.sell(last.date, last.close, commission_rate, slippage_rate);
        }
    }

    SimulationOutcome {
        final_capital: ledger.cash,
        trades: ledger.trades,
        equity_curve: ledger.equity_curve,
    }
}
