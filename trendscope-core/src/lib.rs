//! TrendScope Core — deterministic technical analysis of an OHLCV series.
//!
//! This crate turns a chronological bar series into a trade-risk view:
//! - Technical primitives (EMA, RSI, slope)
//! - Regime, pattern and trend stages, each a pure function of the bars
//! - Risk stage choosing a take-profit multiplier, heuristic or advisory
//! - Pipeline coordinator producing a structured report and a narrative
//! - Bar sources (synthetic walk, CSV/JSON files) and TOML configuration

pub mod advisor;
pub mod config;
pub mod data;
pub mod domain;
pub mod indicators;
pub mod pipeline;
pub mod stages;

pub use config::{AdvisorConfig, ConfigError, TrendScopeConfig};
pub use domain::Bar;
pub use pipeline::{run_analysis, run_pipeline, AnalysisContext, AnalysisReport, Pipeline};
pub use stages::RHO;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: types handed across threads by the CLI are Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::Bar>();
        require_sync::<domain::Bar>();
        require_send::<Pipeline>();
        require_sync::<Pipeline>();
        require_send::<AnalysisReport>();
        require_sync::<AnalysisReport>();
        require_send::<AnalysisContext<'static>>();
        require_sync::<AnalysisContext<'static>>();
        require_send::<advisor::ChatCompletionsClient>();
        require_sync::<advisor::ChatCompletionsClient>();
        require_send::<data::SyntheticSource>();
        require_sync::<data::SyntheticSource>();
        require_send::<data::FileSource>();
        require_sync::<data::FileSource>();
    }

    /// Compile-time check: the risk stage never sees raw bars.
    ///
    /// `RiskStrategy::assess` takes only `RiskInputs`, which carries the three
    /// upstream outputs, and the trait stays object-safe.
    #[allow(dead_code)]
    fn assert_risk_strategy_signature(
        strategy: &dyn stages::RiskStrategy,
        inputs: &stages::RiskInputs<'_>,
    ) -> stages::RiskOutput {
        strategy.assess(inputs)
    }
}
