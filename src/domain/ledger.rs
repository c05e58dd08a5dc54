//! Cash/shares ledger, trade log, and equity curve for one simulation.
//!
//! Long-only, single symbol, full-or-nothing sizing: every buy spends all
//! available cash on whole shares, every sell flattens the position.
//! Commission and slippage are proportional to trade notional and deducted
//! from cash on both sides.

use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
}

/// One executed trade, immutable once recorded.
///
/// `pnl` is carried for the metrics calculator but the simulator never
/// populates it; win rate and profit factor therefore evaluate to 0 on
/// simulator-produced trade logs.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Trade {
    pub date: NaiveDate,
    pub side: TradeSide,
    pub price: f64,
    pub shares: u64,
    pub commission: f64,
    pub slippage: f64,
    pub pnl: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub equity: f64,
}

/// Simulated account state, local to one simulation run.
#[derive(Debug, Clone)]
pub struct Ledger {
    pub cash: f64,
    pub shares: u64,
    pub initial_capital: f64,
    pub trades: Vec<Trade>,
    pub equity_curve: Vec<EquityPoint>,
}

impl Ledger {
    pub fn new(initial_capital: f64) -> Self {
        Ledger {
            cash: initial_capital,
            shares: 0,
            initial_capital,
            trades: Vec::new(),
            equity_curve: Vec::new(),
        }
    }

    pub fn is_flat(&self) -> bool {
        self.shares == 0
    }

    /// Buy as many whole shares as available cash covers at `price`.
    ///
    /// No-op (returns false) when already holding or when less than one
    /// share is affordable. Fees are charged on the notional after sizing.
    pub fn buy(
        &mut self,
        date: NaiveDate,
        price: f64,
        commission_rate: f64,
        slippage_rate: f64,
    ) -> bool {
        if !self.is_flat() || price <= 0.0 {
            return false;
        }
        let shares = (self.cash / price).floor() as u64;
        if shares == 0 {
            return false;
        }

        let notional = shares as f64 * price;
        let commission = notional * commission_rate;
        let slippage = notional * slippage_rate;

        self.cash -= notional + commission + slippage;
        self.shares = shares;
        self.trades.push(Trade {
            date,
            side: TradeSide::Buy,
            price,
            shares,
            commission,
            slippage,
            pnl: None,
        });
        true
    }

    /// Sell the entire position at `price`. No-op (returns false) when flat.
    pub fn sell(
        &mut self,
        date: NaiveDate,
        price: f64,
        commission_rate: f64,
        slippage_rate: f64,
    ) -> bool {
        if self.is_flat() {
            return false;
        }
        let shares = self.shares;
        let notional = shares as f64 * price;
        let commission = notional * commission_rate;
        let slippage = notional * slippage_rate;

        self.cash += notional - commission - slippage;
        self.shares = 0;
        self.trades.push(Trade {
            date,
            side: TradeSide::Sell,
            price,
            shares,
            commission,
            slippage,
            pnl: None,
        });
        true
    }

    /// Mark-to-market equity at `price`: cash plus position value.
    pub fn equity(&self, price: f64) -> f64 {
        self.cash + self.shares as f64 * price
    }

    pub fn record_equity(&mut self, date: NaiveDate, price: f64) {
        let equity = self.equity(price);
        self.equity_curve.push(EquityPoint { date, equity });
    }
}
