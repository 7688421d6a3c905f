//! Pattern stage — two-bar candlestick pattern detection.
//!
//! Checks run in a fixed order: Doji first, then bullish engulfing, then
//! bearish engulfing. A Doji wins even if the bodies also satisfy the
//! engulfing geometry.

use serde::{Deserialize, Serialize};

use crate::domain::Bar;

/// Body at or below this fraction of the close is a Doji.
pub const DOJI_BODY_RATIO: f64 = 0.001;

/// Fixed strength reported for a Doji.
pub const DOJI_STRENGTH: f64 = 0.4;

/// Recognized two-bar patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CandlePattern {
    BullishEngulfing,
    BearishEngulfing,
    Doji,
    None,
}

/// Output of the pattern stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatternOutput {
    pub pattern: CandlePattern,
    /// 0.0 to 1.0.
    pub strength: f64,
}

impl PatternOutput {
    pub fn none() -> Self {
        Self {
            pattern: CandlePattern::None,
            strength: 0.0,
        }
    }
}

/// Detect the pattern formed by the last two bars.
pub fn detect_pattern(bars: &[Bar]) -> PatternOutput {
    let [.., prev, last] = bars else {
        return PatternOutput::none();
    };

    let prev_body = prev.body();
    let last_body = last.body();

    if last_body <= last.close * DOJI_BODY_RATIO {
        return PatternOutput {
            pattern: CandlePattern::Doji,
            strength: DOJI_STRENGTH,
        };
    }

    // Inclusive: equal bodies still engulf.
    let engulfs = last.body_low() <= prev.body_low() && last.body_high() >= prev.body_high();
    if !engulfs {
        return PatternOutput::none();
    }

    let pattern = if last.is_bullish() && prev.is_bearish() {
        CandlePattern::BullishEngulfing
    } else if last.is_bearish() && prev.is_bullish() {
        CandlePattern::BearishEngulfing
    } else {
        return PatternOutput::none();
    };

    PatternOutput {
        pattern,
        strength: engulfing_strength(last_body, prev_body),
    }
}

fn engulfing_strength(last_body: f64, prev_body: f64) -> f64 {
    (last_body / (prev_body + 1e-9)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    fn bar(open: f64, close: f64) -> Bar {
        Bar {
            time: 0,
            open,
            high: open.max(close) + 0.5,
            low: open.min(close) - 0.5,
            close,
            volume: None,
        }
    }

    #[test]
    fn fewer_than_two_bars_is_none() {
        assert_eq!(detect_pattern(&[]), PatternOutput::none());
        assert_eq!(detect_pattern(&[bar(10.0, 12.0)]), PatternOutput::none());
    }

    #[test]
    fn bullish_engulfing_scenario() {
        // prev bearish [9,10] body 1, last bullish [8,12] body 4
        let out = detect_pattern(&[bar(10.0, 9.0), bar(8.0, 12.0)]);
        assert_eq!(out.pattern, CandlePattern::BullishEngulfing);
        assert_approx(out.strength, 1.0, DEFAULT_EPSILON);
    }

    #[test]
    fn bearish_engulfing() {
        let out = detect_pattern(&[bar(9.0, 10.0), bar(12.0, 8.0)]);
        assert_eq!(out.pattern, CandlePattern::BearishEngulfing);
        assert_approx(out.strength, 1.0, DEFAULT_EPSILON);
    }

    #[test]
    fn equal_bodies_still_engulf() {
        let out = detect_pattern(&[bar(10.0, 9.0), bar(9.0, 10.0)]);
        assert_eq!(out.pattern, CandlePattern::BullishEngulfing);
        // 1 / (1 + 1e-9) just under 1
        assert!(out.strength < 1.0 && out.strength > 0.999_999);
    }

    #[test]
    fn strength_formula_is_symmetric() {
        let bull = detect_pattern(&[bar(10.0, 9.0), bar(9.0, 10.0)]);
        let bear = detect_pattern(&[bar(9.0, 10.0), bar(10.0, 9.0)]);
        assert_eq!(bull.strength, bear.strength);
    }

    #[test]
    fn same_colour_is_not_engulfing() {
        let out = detect_pattern(&[bar(9.0, 10.0), bar(8.0, 12.0)]);
        assert_eq!(out, PatternOutput::none());
    }

    #[test]
    fn partial_overlap_is_not_engulfing() {
        let out = detect_pattern(&[bar(10.0, 8.0), bar(9.0, 12.0)]);
        assert_eq!(out, PatternOutput::none());
    }

    #[test]
    fn tiny_body_is_doji() {
        let out = detect_pattern(&[bar(100.0, 101.0), bar(100.0, 100.05)]);
        assert_eq!(out.pattern, CandlePattern::Doji);
        assert_eq!(out.strength, DOJI_STRENGTH);
    }

    #[test]
    fn doji_takes_precedence_over_engulfing() {
        // prev bullish with an even tinier body, last bearish doji whose body
        // contains prev's body.
        let prev = bar(100.00, 100.01);
        let last = bar(100.05, 99.98);
        assert!(last.body_low() <= prev.body_low() && last.body_high() >= prev.body_high());
        let out = detect_pattern(&[prev, last]);
        assert_eq!(out.pattern, CandlePattern::Doji);
    }

    #[test]
    fn only_last_two_bars_matter() {
        let out = detect_pattern(&[bar(1.0, 50.0), bar(10.0, 9.0), bar(8.0, 12.0)]);
        assert_eq!(out.pattern, CandlePattern::BullishEngulfing);
    }
}
