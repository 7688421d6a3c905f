//! Technical math primitives.
//!
//! Pure functions over numeric slices returning the indicator value at the
//! end of the slice. Insufficient input yields a sentinel (`NaN` for EMA and
//! RSI, `0.0` for slope) instead of an error; the stages decide how to
//! interpret it.

pub mod ema;
pub mod rsi;
pub mod slope;

pub use ema::ema;
pub use rsi::{rsi, DEFAULT_RSI_PERIOD};
pub use slope::{simple_slope, DEFAULT_SLOPE_LOOKBACK};

/// Create synthetic bars from close prices for testing.
///
/// Generates plausible OHLV: open = prev_close (or close for first bar),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0, volume = 1000,
/// one bar per day starting 2024-01-02.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<crate::domain::Bar> {
    use crate::domain::Bar;
    const BASE_TIME: i64 = 1_704_153_600;
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                time: BASE_TIME + i as i64 * 86_400,
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: Some(1000.0),
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
