//! Regime stage — momentum regime classification from RSI.
//!
//! Thresholds: RSI >= 60 is Bullish, RSI <= 40 is Bearish, anything between is
//! Neutral. Overbought (>= 70) and oversold (<= 30) are flags, independent of
//! the regime label.

use serde::{Deserialize, Serialize};

use crate::indicators::{rsi, DEFAULT_RSI_PERIOD};

pub const BULLISH_RSI: f64 = 60.0;
pub const BEARISH_RSI: f64 = 40.0;
pub const OVERBOUGHT_RSI: f64 = 70.0;
pub const OVERSOLD_RSI: f64 = 30.0;

/// RSI distance from 50 at which confidence saturates.
const CONFIDENCE_SPAN: f64 = 30.0;

/// Coarse momentum classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Regime {
    Bullish,
    Bearish,
    Neutral,
}

/// Output of the regime stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegimeOutput {
    /// `None` when there are fewer than `period + 1` closes.
    pub rsi: Option<f64>,
    pub regime: Regime,
    pub overbought: bool,
    pub oversold: bool,
    /// 0.0 to 1.0, linear in |RSI - 50|, saturating at RSI 20 / 80.
    pub confidence: f64,
}

impl RegimeOutput {
    /// Output used when RSI is unavailable.
    pub fn insufficient() -> Self {
        Self {
            rsi: None,
            regime: Regime::Neutral,
            overbought: false,
            oversold: false,
            confidence: 0.0,
        }
    }
}

/// Classify the momentum regime from the full close history.
pub fn classify_regime(closes: &[f64]) -> RegimeOutput {
    let value = rsi(closes, DEFAULT_RSI_PERIOD);
    if value.is_nan() {
        return RegimeOutput::insufficient();
    }

    let regime = if value >= BULLISH_RSI {
        Regime::Bullish
    } else if value <= BEARISH_RSI {
        Regime::Bearish
    } else {
        Regime::Neutral
    };

    RegimeOutput {
        rsi: Some(value),
        regime,
        overbought: value >= OVERBOUGHT_RSI,
        oversold: value <= OVERSOLD_RSI,
        confidence: ((value - 50.0).abs() / CONFIDENCE_SPAN).clamp(0.0, 1.0),
    }
}
