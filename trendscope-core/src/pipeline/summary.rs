//! Signal tally across the regime, pattern and trend stages.

use serde::{Deserialize, Serialize};

use crate::stages::{CandlePattern, PatternOutput, Regime, RegimeOutput, TrendDirection, TrendOutput};

/// Count of agreeing directional signals (each 0..=3) and the majority view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub bullish_signals: u8,
    pub bearish_signals: u8,
    pub overall_sentiment: Regime,
}

impl AnalysisSummary {
    pub fn from_outputs(regime: &RegimeOutput, pattern: &PatternOutput, trend: &TrendOutput) -> Self {
        let bullish_signals = [
            regime.regime == Regime::Bullish,
            pattern.pattern == CandlePattern::BullishEngulfing,
            trend.trend == TrendDirection::Uptrend,
        ]
        .into_iter()
        .filter(|&hit| hit)
        .count() as u8;

        let bearish_signals = [
            regime.regime == Regime::Bearish,
            pattern.pattern == CandlePattern::BearishEngulfing,
            trend.trend == TrendDirection::Downtrend,
        ]
        .into_iter()
        .filter(|&hit| hit)
        .count() as u8;

        let overall_sentiment = match bullish_signals.cmp(&bearish_signals) {
            std::cmp::Ordering::Greater => Regime::Bullish,
            std::cmp::Ordering::Less => Regime::Bearish,
            std::cmp::Ordering::Equal => Regime::Neutral,
        };

        Self {
            bullish_signals,
            bearish_signals,
            overall_sentiment,
        }
    }
}
