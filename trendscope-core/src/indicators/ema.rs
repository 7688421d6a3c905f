//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = k * value[t] + (1 - k) * EMA[t-1], k = 2 / (period + 1).
//! Seed: the first value of the window (no SMA warmup), so any non-empty
//! window produces a value regardless of its length relative to `period`.

/// Final EMA value over `values`.
///
/// Returns `f64::NAN` for an empty slice. The caller decides the window; the
/// whole slice is folded.
pub fn ema(values: &[f64], period: usize) -> f64 {
    let Some((&seed, rest)) = values.split_first() else {
        return f64::NAN;
    };

    let k = 2.0 / (period as f64 + 1.0);
    rest.iter().fold(seed, |e, &v| v * k + e * (1.0 - k))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn ema_empty_is_nan() {
        assert!(ema(&[], 12).is_nan());
    }

    #[test]
    fn ema_single_value_is_seed() {
        assert_approx(ema(&[42.0], 12), 42.0, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_period_1_equals_last() {
        assert_approx(ema(&[100.0, 200.0, 300.0], 1), 300.0, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_3_known_values() {
        // k = 2/(3+1) = 0.5
        // seed 10 → 0.5*11 + 0.5*10 = 10.5 → 0.5*12 + 0.5*10.5 = 11.25
        //        → 0.5*13 + 0.5*11.25 = 12.125
        assert_approx(ema(&[10.0, 11.0, 12.0, 13.0], 3), 12.125, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_constant_series_is_constant() {
        assert_approx(ema(&[7.5; 30], 26), 7.5, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_shorter_period_tracks_faster() {
        let rising: Vec<f64> = (0..26).map(|i| 100.0 + i as f64).collect();
        assert!(ema(&rising, 12) > ema(&rising, 26));
    }

    #[test]
    fn ema_nan_input_propagates() {
        assert!(ema(&[1.0, f64::NAN, 3.0], 3).is_nan());
    }
}
