//! Analysis context — per-run accumulator populated stage by stage.

use serde::{Deserialize, Serialize};

use crate::domain::Bar;
use crate::stages::{PatternOutput, RegimeOutput, RiskInputs, RiskOutput, TrendOutput};

use super::summary::AnalysisSummary;

/// Bars under analysis plus whichever stage outputs exist so far.
///
/// Passed by value from stage to stage; each `with_*` call consumes the
/// context and returns it with one more output filled in.
#[derive(Debug, Clone)]
pub struct AnalysisContext<'a> {
    pub bars: &'a [Bar],
    pub regime: Option<RegimeOutput>,
    pub pattern: Option<PatternOutput>,
    pub trend: Option<TrendOutput>,
    pub risk: Option<RiskOutput>,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(bars: &'a [Bar]) -> Self {
        Self {
            bars,
            regime: None,
            pattern: None,
            trend: None,
            risk: None,
        }
    }

    pub fn with_regime(mut self, regime: RegimeOutput) -> Self {
        self.regime = Some(regime);
        self
    }

    pub fn with_pattern(mut self, pattern: PatternOutput) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn with_trend(mut self, trend: TrendOutput) -> Self {
        self.trend = Some(trend);
        self
    }

    pub fn with_risk(mut self, risk: RiskOutput) -> Self {
        self.risk = Some(risk);
        self
    }

    /// Close prices of the bars, oldest first.
    pub fn closes(&self) -> Vec<f64> {
        crate::domain::closes(self.bars)
    }

    pub fn last_bar(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// Inputs for the risk stage, once the three upstream stages have run.
    pub fn risk_inputs(&self) -> Option<RiskInputs<'_>> {
        Some(RiskInputs {
            regime: self.regime.as_ref()?,
            pattern: self.pattern.as_ref()?,
            trend: self.trend.as_ref()?,
        })
    }

    pub fn is_complete(&self) -> bool {
        self.regime.is_some() && self.pattern.is_some() && self.trend.is_some() && self.risk.is_some()
    }

    /// Structured result, if every stage produced output.
    pub fn report(&self) -> Option<AnalysisReport> {
        Some(AnalysisReport::new(
            self.regime.clone()?,
            self.pattern?,
            self.trend?,
            self.risk.clone()?,
        ))
    }
}

/// Complete, serializable analysis result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub regime: RegimeOutput,
    pub pattern: PatternOutput,
    pub trend: TrendOutput,
    pub risk: RiskOutput,
    pub summary: AnalysisSummary,
}

impl AnalysisReport {
    /// Assemble a report, deriving the summary from the three signal stages.
    pub fn new(
        regime: RegimeOutput,
        pattern: PatternOutput,
        trend: TrendOutput,
        risk: RiskOutput,
    ) -> Self {
        let summary = AnalysisSummary::from_outputs(&regime, &pattern, &trend);
        Self {
            regime,
            pattern,
            trend,
            risk,
            summary,
        }
    }
}
