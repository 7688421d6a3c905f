//! Analysis stages.
//!
//! Regime, pattern and trend read only the bar history and are independent of
//! each other. Risk reads their three outputs. All stages are pure and never
//! fail: insufficient data produces a neutral output.

pub mod pattern;
pub mod regime;
pub mod risk;
pub mod trend;

pub use pattern::{detect_pattern, CandlePattern, PatternOutput};
pub use regime::{classify_regime, Regime, RegimeOutput};
pub use risk::{
    clamp_multiplier, heuristic_multiplier, HeuristicRisk, RiskInputs, RiskOutput, RiskSource,
    RiskStrategy, MAX_R_MULTIPLIER, MIN_R_MULTIPLIER, RHO,
};
pub use trend::{classify_trend, TrendDirection, TrendOutput};
