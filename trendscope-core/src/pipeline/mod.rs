//! Pipeline coordinator.
//!
//! Runs regime → pattern → trend → risk in that fixed order over one bar
//! series, then renders the narrative. Each run owns its `AnalysisContext`;
//! a `Pipeline` holds only the risk strategy and can be shared across threads.

pub mod context;
pub mod narrative;
pub mod summary;

pub use context::{AnalysisContext, AnalysisReport};
pub use narrative::{render_narrative, render_report, INCOMPLETE_MESSAGE, NO_DATA_MESSAGE};
pub use summary::AnalysisSummary;

use tracing::debug;

use crate::advisor::build_risk_strategy;
use crate::config::TrendScopeConfig;
use crate::domain::Bar;
use crate::stages::{
    classify_regime, classify_trend, detect_pattern, HeuristicRisk, RiskInputs, RiskStrategy,
};

/// The four-stage analysis pipeline.
pub struct Pipeline {
    risk: Box<dyn RiskStrategy>,
}

impl Pipeline {
    pub fn new(risk: Box<dyn RiskStrategy>) -> Self {
        Self { risk }
    }

    /// Pipeline using the deterministic heuristic risk strategy.
    pub fn heuristic() -> Self {
        Self::new(Box::new(HeuristicRisk))
    }

    /// Pipeline whose risk strategy is chosen by `config.advisor`.
    pub fn from_config(config: &TrendScopeConfig) -> Self {
        Self::new(build_risk_strategy(&config.advisor))
    }

    /// Name of the configured risk strategy.
    pub fn risk_strategy(&self) -> &str {
        self.risk.name()
    }

    /// Run all stages and render the narrative.
    pub fn run<'a>(&self, bars: &'a [Bar]) -> (AnalysisContext<'a>, String) {
        let (ctx, report) = self.run_stages(bars);
        let narrative = match bars.last() {
            Some(last) => render_report(last, &report),
            None => NO_DATA_MESSAGE.to_string(),
        };
        (ctx, narrative)
    }

    /// Run all stages and return the structured report.
    pub fn analyze(&self, bars: &[Bar]) -> AnalysisReport {
        self.run_stages(bars).1
    }

    fn run_stages<'a>(&self, bars: &'a [Bar]) -> (AnalysisContext<'a>, AnalysisReport) {
        let closes = crate::domain::closes(bars);
        let ctx = AnalysisContext::new(bars);

        let regime = classify_regime(&closes);
        debug!(regime = ?regime.regime, rsi = ?regime.rsi, confidence = regime.confidence, "regime stage");
        let ctx = ctx.with_regime(regime.clone());

        let pattern = detect_pattern(bars);
        debug!(pattern = ?pattern.pattern, strength = pattern.strength, "pattern stage");
        let ctx = ctx.with_pattern(pattern);

        let trend = classify_trend(&closes);
        debug!(trend = ?trend.trend, strength = trend.strength, slope = trend.slope, "trend stage");
        let ctx = ctx.with_trend(trend);

        let risk = self.risk.assess(&RiskInputs {
            regime: &regime,
            pattern: &pattern,
            trend: &trend,
        });
        debug!(
            r_multiplier = risk.r_multiplier,
            source = ?risk.source,
            strategy = self.risk.name(),
            "risk stage"
        );
        let ctx = ctx.with_risk(risk.clone());

        (ctx, AnalysisReport::new(regime, pattern, trend, risk))
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::heuristic()
    }
}

/// Run the heuristic pipeline: context plus narrative.
pub fn run_pipeline(bars: &[Bar]) -> (AnalysisContext<'_>, String) {
    Pipeline::heuristic().run(bars)
}

/// Run the heuristic pipeline: structured report.
pub fn run_analysis(bars: &[Bar]) -> AnalysisReport {
    Pipeline::heuristic().analyze(bars)
}
