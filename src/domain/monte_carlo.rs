//! Monte Carlo resampling of a backtest's daily-return distribution.
//!
//! Draws repeated 252-day random-walk equity paths from a normal
//! distribution fitted to the historical daily returns (mean / population
//! std dev) and summarizes the simulated final values: percentile table,
//! VaR/CVaR at 95% and 99%, worst/best/expected case. The RNG is seeded
//! through [`MonteCarloConfig`] so runs are reproducible under a fixed seed.
//! Each draw is independent; only the first 100 paths are retained to bound
//! output size.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use crate::domain::error::StocklabError;
use crate::domain::ledger::EquityPoint;
use crate::domain::metrics::daily_returns;

/// Trading days simulated per path.
const FORECAST_DAYS: usize = 252;

/// Simulated paths kept in the result as a representative sample.
const MAX_SAMPLE_PATHS: usize = 100;

#[derive(Debug, Clone, serde::Serialize)]
pub struct MonteCarloConfig {
    pub num_simulations: usize,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        MonteCarloConfig {
            num_simulations: 1000,
            seed: 42,
        }
    }
}

/// Percentiles of the simulated final-value distribution.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct ConfidenceLevels {
    pub p5: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p95: f64,
}

/// Parameters of the fitted historical return distribution.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct DistributionStats {
    pub mean_daily_return: f64,
    pub std_dev_daily_return: f64,
    pub observations: usize,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct MonteCarloResult {
    pub confidence_levels: ConfidenceLevels,
    pub worst_case: f64,
    pub best_case: f64,
    pub expected_value: f64,
    pub var95: f64,
    pub var99: f64,
    pub cvar95: f64,
    pub cvar99: f64,
    pub sample_paths: Vec<Vec<f64>>,
    pub distribution_stats: DistributionStats,
}

/// Resample forward equity paths from the historical return distribution of
/// `equity_curve`.
///
/// Errors when the curve is empty or yields fewer than 2 daily returns;
/// a mean/std-dev estimate needs at least that much history.
pub fn run_monte_carlo(
    equity_curve: &[EquityPoint],
    initial_capital: f64,
    config: &MonteCarloConfig,
) -> Result<MonteCarloResult, StocklabError> {
    if equity_curve.is_empty() {
        return Err(StocklabError::NoEquityCurve);
    }

    let returns = daily_returns(equity_curve);
    if returns.len() < 2 {
        return Err(StocklabError::InsufficientReturns {
            returns: returns.len(),
        });
    }

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|&r| (r - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut final_values = Vec::with_capacity(config.num_simulations);
    let mut sample_paths = Vec::with_capacity(MAX_SAMPLE_PATHS.min(config.num_simulations));

    for sim in 0..config.num_simulations {
        let mut equity = initial_capital;
        let mut path = Vec::with_capacity(FORECAST_DAYS);

        for _ in 0..FORECAST_DAYS {
            let z: f64 = rng.sample(StandardNormal);
            let sampled_return = mean + std_dev * z;
            equity *= 1.0 + sampled_return;
            path.push(equity);
        }

        final_values.push(equity);
        if sim < MAX_SAMPLE_PATHS {
            sample_paths.push(path);
        }
    }

    final_values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let var95 = percentile_sorted(&final_values, 5.0);
    let var99 = percentile_sorted(&final_values, 1.0);
    let cvar95 = tail_mean(&final_values, var95);
    let cvar99 = tail_mean(&final_values, var99);

    let expected_value = final_values.iter().sum::<f64>() / final_values.len() as f64;

    Ok(MonteCarloResult {
        confidence_levels: ConfidenceLevels {
            p5: percentile_sorted(&final_values, 5.0),
            p25: percentile_sorted(&final_values, 25.0),
            p50: percentile_sorted(&final_values, 50.0),
            p75: percentile_sorted(&final_values, 75.0),
            p95: percentile_sorted(&final_values, 95.0),
        },
        worst_case: final_values.first().copied().unwrap_or(initial_capital),
        best_case: final_values.last().copied().unwrap_or(initial_capital),
        expected_value,
        var95,
        var99,
        cvar95,
        cvar99,
        sample_paths,
        distribution_stats: DistributionStats {
            mean_daily_return: mean,
            std_dev_daily_return: std_dev,
            observations: returns.len(),
        },
    })
}

/// Percentile of a sorted slice using linear interpolation.
fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    if n == 1 {
        return sorted[0];
    }
    let rank = (p / 100.0) * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    let frac = rank - lo as f64;
    sorted[lo] * (1.0 - frac) + sorted[hi] * frac
}

/// Mean of the values at or below `threshold` (expected shortfall).
fn tail_mean(sorted: &[f64], threshold: f64) -> f64 {
    let tail: Vec<f64> = sorted
        .iter()
        .copied()
        .take_while(|&v| v <= threshold)
        .collect();
    if tail.is_empty() {
        return threshold;
    }
    tail.iter().sum::<f64>() / tail.len() as f64
}
