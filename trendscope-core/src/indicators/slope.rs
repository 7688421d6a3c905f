//! Simple slope — normalized fractional change over a trailing window.

/// Default slope lookback.
pub const DEFAULT_SLOPE_LOOKBACK: usize = 10;

/// `(last - first) / max(first, 1e-9)` over the last `lookback` values.
///
/// Returns 0.0 when the series is shorter than `lookback` (or `lookback` is 0).
pub fn simple_slope(series: &[f64], lookback: usize) -> f64 {
    if lookback == 0 || series.len() < lookback {
        return 0.0;
    }

    let window = &series[series.len() - lookback..];
    let first = window[0];
    let last = window[lookback - 1];
    (last - first) / first.max(1e-9)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn slope_short_series_is_zero() {
        assert_eq!(simple_slope(&[1.0, 2.0], DEFAULT_SLOPE_LOOKBACK), 0.0);
        assert_eq!(simple_slope(&[], 12), 0.0);
    }

    #[test]
    fn slope_uses_trailing_window() {
        // Window of the last 3: [20, 25, 30] → (30 - 20) / 20 = 0.5
        let series = [1.0, 5.0, 20.0, 25.0, 30.0];
        assert_approx(simple_slope(&series, 3), 0.5, DEFAULT_EPSILON);
    }

    #[test]
    fn slope_preserves_sign() {
        assert_approx(simple_slope(&[100.0, 90.0, 80.0], 3), -0.2, DEFAULT_EPSILON);
    }

    #[test]
    fn slope_floors_tiny_denominator() {
        // first = 0 → denominator floored at 1e-9
        let v = simple_slope(&[0.0, 1e-9], 2);
        assert_approx(v, 1.0, DEFAULT_EPSILON);
    }
}
