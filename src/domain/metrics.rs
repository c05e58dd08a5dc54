//! Performance metrics derived from an equity curve and trade log.
//!
//! Every ratio falls back to 0 on degenerate input (empty curve, zero
//! variance, zero trades); this calculator never errors. Annualization is a
//! simple 252/n scaling of total return, not compounding.

use crate::domain::ledger::{EquityPoint, Trade};

const TRADING_DAYS_PER_YEAR: f64 = 252.0;

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Metrics {
    pub total_return: f64,
    pub annualized_return: f64,
    pub sharpe_ratio: f64,
    pub sortino_ratio: f64,
    pub max_drawdown: f64,
    pub total_trades: usize,
    pub win_rate: f64,
    pub profit_factor: f64,
}

impl Metrics {
    pub fn compute(
        initial_capital: f64,
        final_capital: f64,
        equity_curve: &[EquityPoint],
        trades: &[Trade],
    ) -> Self {
        let total_return = if initial_capital > 0.0 {
            (final_capital - initial_capital) / initial_capital
        } else {
            0.0
        };

        let annualized_return = if equity_curve.is_empty() {
            0.0
        } else {
            total_return * (TRADING_DAYS_PER_YEAR / equity_curve.len() as f64)
        };

        let returns = daily_returns(equity_curve);
        let (sharpe_ratio, sortino_ratio) = risk_adjusted_ratios(&returns);
        let max_drawdown = max_drawdown(equity_curve);
        let (total_trades, win_rate, profit_factor) = trade_stats(trades);

        Metrics {
            total_return,
            annualized_return,
            sharpe_ratio,
            sortino_ratio,
            max_drawdown,
            total_trades,
            win_rate,
            profit_factor,
        }
    }
}

/// Percentage change between consecutive equity points.
pub fn daily_returns(equity_curve: &[EquityPoint]) -> Vec<f64> {
    equity_curve
        .windows(2)
        .map(|w| {
            let prev = w[0].equity;
            if prev > 0.0 {
                (w[1].equity - prev) / prev
            } else {
                0.0
            }
        })
        .collect()
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divides by N).
fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

fn risk_adjusted_ratios(returns: &[f64]) -> (f64, f64) {
    if returns.is_empty() {
        return (0.0, 0.0);
    }

    let mean_return = mean(returns);
    let annualizer = TRADING_DAYS_PER_YEAR.sqrt();

    let total_std = std_dev(returns);
    let sharpe = if total_std > 0.0 {
        mean_return / total_std * annualizer
    } else {
        0.0
    };

    let negative: Vec<f64> = returns.iter().copied().filter(|&r| r < 0.0).collect();
    let downside_std = std_dev(&negative);
    let sortino = if downside_std > 0.0 {
        mean_return / downside_std * annualizer
    } else {
        0.0
    };

    (sharpe, sortino)
}

fn max_drawdown(equity_curve: &[EquityPoint]) -> f64 {
    let mut peak = f64::MIN;
    let mut max_dd = 0.0_f64;

    for point in equity_curve {
        if point.equity > peak {
            peak = point.equity;
        } else if peak > 0.0 {
            let dd = (peak - point.equity) / peak;
            if dd > max_dd {
                max_dd = dd;
            }
        }
    }

    max_dd
}

fn trade_stats(trades: &[Trade]) -> (usize, f64, f64) {
    if trades.is_empty() {
        return (0, 0.0, 0.0);
    }

    let mut winners = 0usize;
    let mut gross_profit = 0.0_f64;
    let mut gross_loss = 0.0_f64;

    for trade in trades {
        // Trades without a recorded pnl count as zero / non-winning; the
        // simulator leaves pnl unset, so these stats are 0 on its output.
        let pnl = trade.pnl.unwrap_or(0.0);
        if pnl > 0.0 {
            winners += 1;
            gross_profit += pnl;
        } else if pnl < 0.0 {
            gross_loss += pnl.abs();
        }
    }

    let win_rate = winners as f64 / trades.len() as f64;
    let profit_factor = if gross_loss > 0.0 {
        gross_profit / gross_loss
    } else {
        0.0
    };

    (trades.len(), win_rate, profit_factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ledger::TradeSide;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn make_equity_curve(values: &[f64]) -> Vec<EquityPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, &equity)| EquityPoint {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                    + chrono::Duration::days(i as i64),
                equity,
            })
            .collect()
    }

    fn make_trade(pnl: Option<f64>) -> Trade {
        Trade {
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            side: TradeSide::Sell,
            price: 100.0,
            shares: 100,
            commission: 10.0,
            slippage: 5.0,
            pnl,
        }
    }

    #[test]
    fn total_return() {
        let curve = make_equity_curve(&[100_000.0, 110_000.0]);
        let metrics = Metrics::compute(100_000.0, 110_000.0, &curve, &[]);
        assert_relative_eq!(metrics.total_return, 0.10);
    }

    #[test]
    fn zero_initial_capital_degrades_to_zero() {
        let metrics = Metrics::compute(0.0, 0.0, &[], &[]);
        assert_eq!(metrics.total_return, 0.0);
        assert_eq!(metrics.annualized_return, 0.0);
    }

    #[test]
    fn annualized_return_simple_scaling() {
        // 10% over 126 points scales to 20%, not compounded.
        let curve = make_equity_curve(&vec![100_000.0; 126]);
        let metrics = Metrics::compute(100_000.0, 110_000.0, &curve, &[]);
        assert_relative_eq!(metrics.annualized_return, 0.10 * (252.0 / 126.0));
    }

    #[test]
    fn daily_returns_consecutive_points() {
        let curve = make_equity_curve(&[100.0, 110.0, 99.0]);
        let returns = daily_returns(&curve);
        assert_eq!(returns.len(), 2);
        assert_relative_eq!(returns[0], 0.10);
        assert_relative_eq!(returns[1], -0.10);
    }

    #[test]
    fn sharpe_zero_on_flat_curve() {
        let curve = make_equity_curve(&vec![100_000.0; 50]);
        let metrics = Metrics::compute(100_000.0, 100_000.0, &curve, &[]);
        assert_eq!(metrics.sharpe_ratio, 0.0);
    }

    #[test]
    fn sharpe_positive_on_rising_noisy_curve() {
        let mut values = vec![100_000.0];
        for i in 1..200 {
            let factor = 1.001 + 0.002 * ((i as f64 * 0.7).sin());
            values.push(values[i - 1] * factor);
        }
        let curve = make_equity_curve(&values);
        let metrics = Metrics::compute(100_000.0, *values.last().unwrap(), &curve, &[]);
        assert!(metrics.sharpe_ratio > 0.0);
    }

    #[test]
    fn sortino_zero_without_negative_returns() {
        let values: Vec<f64> = (0..50).map(|i| 100_000.0 + 100.0 * i as f64).collect();
        let curve = make_equity_curve(&values);
        let metrics = Metrics::compute(100_000.0, *values.last().unwrap(), &curve, &[]);
        assert_eq!(metrics.sortino_ratio, 0.0);
        assert!(metrics.sharpe_ratio > 0.0);
    }

    #[test]
    fn max_drawdown_peak_to_trough() {
        let curve = make_equity_curve(&[100.0, 110.0, 90.0, 95.0, 80.0, 100.0]);
        let metrics = Metrics::compute(100.0, 100.0, &curve, &[]);
        assert_relative_eq!(metrics.max_drawdown, (110.0 - 80.0) / 110.0);
    }

    #[test]
    fn max_drawdown_zero_on_monotone_curve() {
        let values: Vec<f64> = (0..100)
            .map(|i| 100_000.0 + 1_000.0 * i as f64)
            .collect();
        let curve = make_equity_curve(&values);
        let metrics = Metrics::compute(100_000.0, 200_000.0, &curve, &[]);
        assert_eq!(metrics.max_drawdown, 0.0);
    }

    #[test]
    fn win_rate_counts_positive_pnl_only() {
        let trades = vec![
            make_trade(Some(100.0)),
            make_trade(Some(-50.0)),
            make_trade(Some(200.0)),
            make_trade(Some(0.0)),
        ];
        let metrics = Metrics::compute(100_000.0, 100_000.0, &[], &trades);
        assert_eq!(metrics.total_trades, 4);
        assert_relative_eq!(metrics.win_rate, 0.5);
    }

    #[test]
    fn missing_pnl_counts_as_non_winning() {
        // Simulator-produced trades never carry pnl; both ratios are 0.
        let trades = vec![make_trade(None), make_trade(None)];
        let metrics = Metrics::compute(100_000.0, 110_000.0, &[], &trades);
        assert_eq!(metrics.total_trades, 2);
        assert_eq!(metrics.win_rate, 0.0);
        assert_eq!(metrics.profit_factor, 0.0);
    }

    #[test]
    fn profit_factor_gross_ratio() {
        let trades = vec![
            make_trade(Some(100.0)),
            make_trade(Some(-50.0)),
            make_trade(Some(200.0)),
        ];
        let metrics = Metrics::compute(100_000.0, 100_000.0, &[], &trades);
        assert_relative_eq!(metrics.profit_factor, 300.0 / 50.0);
    }

    #[test]
    fn profit_factor_zero_without_losses() {
        let trades = vec![make_trade(Some(100.0))];
        let metrics = Metrics::compute(100_000.0, 100_000.0, &[], &trades);
        assert_eq!(metrics.profit_factor, 0.0);
    }

    #[test]
    fn empty_everything_is_all_zero() {
        let metrics = Metrics::compute(100_000.0, 100_000.0, &[], &[]);
        assert_eq!(metrics.total_return, 0.0);
        assert_eq!(metrics.annualized_return, 0.0);
        assert_eq!(metrics.sharpe_ratio, 0.0);
        assert_eq!(metrics.sortino_ratio, 0.0);
        assert_eq!(metrics.max_drawdown, 0.0);
        assert_eq!(metrics.total_trades, 0);
        assert_eq!(metrics.win_rate, 0.0);
        assert_eq!(metrics.profit_factor, 0.0);
    }
}
