//! Relative Strength Index (RSI).
//!
//! Simple (non-smoothed) variant over the most recent `period` price changes:
//! avg_gain = sum(gains) / period, avg_loss = sum(|losses|) / period,
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss).
//! Edge cases: fewer than period + 1 closes → NaN; avg_loss == 0 → 100
//! (this includes a perfectly flat series).

/// Default RSI lookback.
pub const DEFAULT_RSI_PERIOD: usize = 14;

/// RSI of the latest close.
pub fn rsi(closes: &[f64], period: usize) -> f64 {
    if period == 0 || closes.len() < period + 1 {
        return f64::NAN;
    }

    let tail = &closes[closes.len() - (period + 1)..];
    let mut gains = 0.0;
    let mut losses = 0.0;
    for pair in tail.windows(2) {
        let change = pair[1] - pair[0];
        if change > 0.0 {
            gains += change;
        } else {
            losses -= change;
        }
    }

    let avg_gain = gains / period as f64;
    let avg_loss = losses / period as f64;
    if avg_loss == 0.0 {
        return 100.0;
    }
    100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
}
