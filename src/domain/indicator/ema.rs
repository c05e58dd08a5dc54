//! Exponential Moving Average.
//!
//! Recursive average seeded with the first price in the series:
//! EMA[0] = C[0], EMA[i] = C[i]*k + EMA[i-1]*(1-k) with k = 2/(n+1).
//! A series shorter than n returns the last price (or 0.0 when empty).

/// EMA over `prices` with multiplier 2/(period+1).
pub fn ema(prices: &[f64], period: usize) -> f64 {
    let Some(&first) = prices.first() else {
        return 0.0;
    };
    if period == 0 || prices.len() < period {
        return *prices.last().unwrap_or(&0.0);
    }

    let k = 2.0 / (period as f64 + 1.0);
    let mut value = first;
    for &price in &prices[1..] {
        value = price * k + value * (1.0 - k);
    }
    value
}
