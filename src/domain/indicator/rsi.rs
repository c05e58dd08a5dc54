//! RSI (Relative Strength Index).
//!
//! Simple (non-Wilder) averages of gains and losses over the last n price
//! deltas: RSI = 100 - 100/(1 + avg_gain/avg_loss).
//! Fallbacks: 50.0 (neutral) with fewer than n+1 prices or when the window
//! is completely flat, 100.0 when the average loss alone is exactly zero.

/// RSI over the last `period` deltas of `prices`.
pub fn rsi(prices: &[f64], period: usize) -> f64 {
    if period == 0 || prices.len() < period + 1 {
        return 50.0;
    }

    let deltas = &prices[prices.len() - period - 1..];
    let mut gain_sum = 0.0;
    let mut loss_sum = 0.0;
    for pair in deltas.windows(2) {
        let change = pair[1] - pair[0];
        if change > 0.0 {
            gain_sum += change;
        } else {
            loss_sum += -change;
        }
    }

    let avg_gain = gain_sum / period as f64;
    let avg_loss = loss_sum / period as f64;

    if avg_gain == 0.0 && avg_loss == 0.0 {
        // No price change at all: neutral, not overbought.
        return 50.0;
    }
    if avg_loss == 0.0 {
        return 100.0;
    }
    100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
}
