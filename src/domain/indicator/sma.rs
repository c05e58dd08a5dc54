//! Simple Moving Average.
//!
//! Mean of the last n closing prices. With fewer than n prices available the
//! result is 0.0; degenerate inputs never raise an error.

/// SMA over the last `period` closes of `prices`.
pub fn sma(prices: &[f64], period: usize) -> f64 {
    if period == 0 || prices.len() < period {
        return 0.0;
    }
    let window = &prices[prices.len() - period..];
    window.iter().sum::<f64>() / period as f64
}
