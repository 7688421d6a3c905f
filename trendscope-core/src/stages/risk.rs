//! Risk stage — take-profit multiplier derived from the other three stages.
//!
//! The stop-loss distance is the fixed fraction `RHO`; the stage only picks
//! the multiplier applied to it. How the multiplier is chosen is delegated to
//! a `RiskStrategy`. `HeuristicRisk` is deterministic and always available;
//! the advisory strategy in `crate::advisor` wraps it as a fallback.

use serde::{Deserialize, Serialize};

use super::pattern::{CandlePattern, PatternOutput};
use super::regime::{Regime, RegimeOutput};
use super::trend::{TrendDirection, TrendOutput};

/// Fractional stop-loss distance used as the risk unit.
pub const RHO: f64 = 0.0005;

pub const MIN_R_MULTIPLIER: f64 = 1.2;
pub const MAX_R_MULTIPLIER: f64 = 1.8;
pub const BASE_R_MULTIPLIER: f64 = 1.5;

const REGIME_ADJUST: f64 = 0.15;
const TREND_ADJUST: f64 = 0.1;
const PATTERN_ADJUST: f64 = 0.05;
const CONFIDENCE_BONUS: f64 = 0.05;
const STRONG_TREND_ADJUST: f64 = 0.05;

const CONFIDENCE_THRESHOLD: f64 = 0.7;
const STRONG_TREND_THRESHOLD: f64 = 0.6;

/// Which strategy produced a `RiskOutput`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskSource {
    Heuristic,
    Advisory,
    /// Advisory was configured but failed; the heuristic value was used.
    Fallback,
}

/// Output of the risk stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskOutput {
    pub rho: f64,
    pub r_multiplier: f64,
    pub take_profit: f64,
    pub commentary: String,
    pub source: RiskSource,
}

impl RiskOutput {
    /// Build an output, clamping the multiplier and deriving take-profit from it.
    pub fn new(r_multiplier: f64, source: RiskSource, commentary: impl Into<String>) -> Self {
        let r_multiplier = clamp_multiplier(r_multiplier);
        Self {
            rho: RHO,
            r_multiplier,
            take_profit: r_multiplier * RHO,
            commentary: commentary.into(),
            source,
        }
    }
}

/// Clamp into `[MIN_R_MULTIPLIER, MAX_R_MULTIPLIER]`. NaN maps to the base value.
pub fn clamp_multiplier(value: f64) -> f64 {
    if value.is_nan() {
        return BASE_R_MULTIPLIER;
    }
    value.clamp(MIN_R_MULTIPLIER, MAX_R_MULTIPLIER)
}

/// The three stage outputs the risk stage reads.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RiskInputs<'a> {
    pub regime: &'a RegimeOutput,
    pub pattern: &'a PatternOutput,
    pub trend: &'a TrendOutput,
}

/// Trait for multiplier selection strategies.
///
/// Implementations must be infallible: any internal failure degrades to a
/// valid output rather than an error.
pub trait RiskStrategy: Send + Sync {
    /// Human-readable name (e.g., "heuristic").
    fn name(&self) -> &str;

    fn assess(&self, inputs: &RiskInputs<'_>) -> RiskOutput;
}

/// Deterministic rule-based multiplier.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicRisk;

impl HeuristicRisk {
    pub const COMMENTARY: &'static str = "heuristic";
}

impl RiskStrategy for HeuristicRisk {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn assess(&self, inputs: &RiskInputs<'_>) -> RiskOutput {
        RiskOutput::new(
            heuristic_multiplier(inputs),
            RiskSource::Heuristic,
            Self::COMMENTARY,
        )
    }
}

/// Rule-based multiplier, clamped to `[1.2, 1.8]`.
pub fn heuristic_multiplier(inputs: &RiskInputs<'_>) -> f64 {
    let mut r = BASE_R_MULTIPLIER;

    r += match inputs.regime.regime {
        Regime::Bullish => REGIME_ADJUST,
        Regime::Bearish => -REGIME_ADJUST,
        Regime::Neutral => 0.0,
    };

    let trend_sign = match inputs.trend.trend {
        TrendDirection::Uptrend => 1.0,
        TrendDirection::Downtrend => -1.0,
        TrendDirection::Sideways => 0.0,
    };
    r += trend_sign * TREND_ADJUST;

    r += match inputs.pattern.pattern {
        CandlePattern::BullishEngulfing => PATTERN_ADJUST,
        CandlePattern::BearishEngulfing => -PATTERN_ADJUST,
        CandlePattern::Doji | CandlePattern::None => 0.0,
    };

    if inputs.regime.confidence > CONFIDENCE_THRESHOLD {
        r += CONFIDENCE_BONUS;
    }

    if inputs.trend.strength > STRONG_TREND_THRESHOLD {
        r += trend_sign * STRONG_TREND_ADJUST;
    }

    clamp_multiplier(r)
}
