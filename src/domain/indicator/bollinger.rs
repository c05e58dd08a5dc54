//! Bollinger Bands.
//!
//! Middle = SMA(n); upper/lower = middle ± multiplier × population standard
//! deviation of the last n closes (divides by N, not N-1). With fewer than n
//! prices all three bands are 0.0, matching the SMA fallback.

use crate::domain::indicator::sma::sma;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerValue {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// Bollinger Bands over the last `period` closes of `prices`.
pub fn bollinger(prices: &[f64], period: usize, std_dev_mult: f64) -> BollingerValue {
    if period == 0 || prices.len() < period {
        return BollingerValue {
            upper: 0.0,
            middle: 0.0,
            lower: 0.0,
        };
    }

    let middle = sma(prices, period);
    let window = &prices[prices.len() - period..];
    let variance = window
        .iter()
        .map(|&p| {
            let diff = p - middle;
            diff * diff
        })
        .sum::<f64>()
        / period as f64;
    let std_dev = variance.sqrt();

    BollingerValue {
        upper: middle + std_dev_mult * std_dev,
        middle,
        lower: middle - std_dev_mult * std_dev,
    }
}
