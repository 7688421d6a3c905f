//! Trend stage — EMA crossover direction with a 0.1% deadband.
//!
//! Both EMAs are computed over the same trailing window of `SLOW_PERIOD`
//! closes; the slope uses the full close history.

use serde::{Deserialize, Deserializer, Serialize};

use crate::indicators::{ema, simple_slope};

pub const FAST_PERIOD: usize = 12;
pub const SLOW_PERIOD: usize = 26;
pub const SLOPE_LOOKBACK: usize = 12;

/// Fractional band around EMA equality reported as Sideways.
pub const DEADBAND: f64 = 0.001;

/// EMA divergence is multiplied by this to get strength (saturates at 10%).
const STRENGTH_SCALE: f64 = 10.0;

/// Trend direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrendDirection {
    Uptrend,
    Downtrend,
    Sideways,
}

/// Output of the trend stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendOutput {
    pub trend: TrendDirection,
    /// NaN when there are no closes. Serialized as `null` in that case.
    #[serde(deserialize_with = "nan_from_null")]
    pub ema_fast: f64,
    #[serde(deserialize_with = "nan_from_null")]
    pub ema_slow: f64,
    pub slope: f64,
    /// 0.0 to 1.0.
    pub strength: f64,
}

/// JSON has no NaN; `serde_json` writes it as `null`, so read `null` back as NaN.
fn nan_from_null<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

/// Classify the trend from the full close history.
pub fn classify_trend(closes: &[f64]) -> TrendOutput {
    let window = &closes[closes.len().saturating_sub(SLOW_PERIOD.max(FAST_PERIOD))..];
    let ema_fast = ema(window, FAST_PERIOD);
    let ema_slow = ema(window, SLOW_PERIOD);
    let slope = simple_slope(closes, SLOPE_LOOKBACK);

    let trend = classify_crossover(ema_fast, ema_slow);

    let divergence = (ema_fast - ema_slow).abs() / ema_slow.max(1e-9);
    let strength = if divergence.is_finite() {
        (divergence * STRENGTH_SCALE).clamp(0.0, 1.0)
    } else {
        0.0
    };

    TrendOutput {
        trend,
        ema_fast,
        ema_slow,
        slope,
        strength,
    }
}

/// Direction from a fast/slow EMA pair. NaN inputs fall through to Sideways.
pub fn classify_crossover(ema_fast: f64, ema_slow: f64) -> TrendDirection {
    if ema_fast > ema_slow * (1.0 + DEADBAND) {
        TrendDirection::Uptrend
    } else if ema_fast < ema_slow * (1.0 - DEADBAND) {
        TrendDirection::Downtrend
    } else {
        TrendDirection::Sideways
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn empty_closes_are_sideways_with_zero_strength() {
        let out = classify_trend(&[]);
        assert_eq!(out.trend, TrendDirection::Sideways);
        assert!(out.ema_fast.is_nan());
        assert!(out.ema_slow.is_nan());
        assert_eq!(out.slope, 0.0);
        assert_eq!(out.strength, 0.0);
    }

    #[test]
    fn rising_closes_are_uptrend() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + 2.0 * i as f64).collect();
        let out = classify_trend(&closes);
        assert_eq!(out.trend, TrendDirection::Uptrend);
        assert!(out.ema_fast > out.ema_slow);
        assert!(out.slope > 0.0);
        assert!(out.strength > 0.0 && out.strength <= 1.0);
    }

    #[test]
    fn falling_closes_are_downtrend() {
        let closes: Vec<f64> = (0..40).map(|i| 200.0 - 2.0 * i as f64).collect();
        let out = classify_trend(&closes);
        assert_eq!(out.trend, TrendDirection::Downtrend);
        assert!(out.slope < 0.0);
    }

    #[test]
    fn flat_closes_are_sideways() {
        let out = classify_trend(&[50.0; 30]);
        assert_eq!(out.trend, TrendDirection::Sideways);
        assert_approx(out.strength, 0.0, DEFAULT_EPSILON);
        assert_approx(out.slope, 0.0, DEFAULT_EPSILON);
    }

    #[test]
    fn deadband_is_sideways() {
        assert_eq!(classify_crossover(100.05, 100.0), TrendDirection::Sideways);
        assert_eq!(classify_crossover(99.95, 100.0), TrendDirection::Sideways);
        assert_eq!(classify_crossover(100.2, 100.0), TrendDirection::Uptrend);
        assert_eq!(classify_crossover(99.8, 100.0), TrendDirection::Downtrend);
    }

    #[test]
    fn emas_share_the_trailing_window() {
        // Only the last 26 closes feed the EMAs; a spike before that is ignored.
        let mut closes = vec![10_000.0];
        closes.extend(std::iter::repeat(100.0).take(26));
        let out = classify_trend(&closes);
        assert_approx(out.ema_fast, 100.0, DEFAULT_EPSILON);
        assert_approx(out.ema_slow, 100.0, DEFAULT_EPSILON);
    }

    #[test]
    fn short_history_still_produces_emas() {
        let out = classify_trend(&[100.0, 101.0, 102.0]);
        assert!(out.ema_fast.is_finite());
        assert!(out.ema_slow.is_finite());
        // Below the slope lookback → 0
        assert_eq!(out.slope, 0.0);
    }

    #[test]
    fn nan_emas_survive_json() {
        let json = serde_json::to_string(&classify_trend(&[])).unwrap();
        assert!(json.contains("\"emaFast\":null"));
        let back: TrendOutput = serde_json::from_str(&json).unwrap();
        assert!(back.ema_fast.is_nan());
        assert!(back.ema_slow.is_nan());
        assert_eq!(back.trend, TrendDirection::Sideways);
    }

    #[test]
    fn finite_emas_survive_json() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let out = classify_trend(&closes);
        let back: TrendOutput = serde_json::from_str(&serde_json::to_string(&out).unwrap()).unwrap();
        assert_eq!(back.trend, out.trend);
        assert_approx(back.ema_fast, out.ema_fast, DEFAULT_EPSILON);
        assert_approx(back.ema_slow, out.ema_slow, DEFAULT_EPSILON);
    }

    #[test]
    fn strength_saturates() {
        let mut closes = vec![100.0; 25];
        closes.push(1_000.0);
        let out = classify_trend(&closes);
        assert_eq!(out.trend, TrendDirection::Uptrend);
        assert_eq!(out.strength, 1.0);
    }
}
