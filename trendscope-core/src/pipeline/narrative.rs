//! Human-readable rendering of an analysis context.

use std::fmt::Write;

use crate::stages::{Regime, RegimeOutput};

use crate::domain::Bar;

use super::context::{AnalysisContext, AnalysisReport};

pub const NO_DATA_MESSAGE: &str = "No candle data available for analysis.";
pub const INCOMPLETE_MESSAGE: &str = "Analysis incomplete: one or more stages produced no output.";

/// Direction marker shown at the start of the narrative.
pub fn regime_marker(regime: Regime) -> &'static str {
    match regime {
        Regime::Bullish => "📈",
        Regime::Bearish => "📉",
        Regime::Neutral => "➖",
    }
}

/// Render the narrative: header with timestamp, one line per stage, summary.
pub fn render_narrative(ctx: &AnalysisContext<'_>) -> String {
    let Some(last) = ctx.last_bar() else {
        return NO_DATA_MESSAGE.to_string();
    };
    let Some(report) = ctx.report() else {
        return INCOMPLETE_MESSAGE.to_string();
    };
    render_report(last, &report)
}

/// Render a finished report as of `last`, the newest bar of the series.
pub fn render_report(last: &Bar, report: &AnalysisReport) -> String {
    let timestamp = last
        .iso_time()
        .unwrap_or_else(|| format!("t={}", last.time));
    let regime = &report.regime;
    let pattern = &report.pattern;
    let trend = &report.trend;
    let risk = &report.risk;
    let summary = &report.summary;

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} Market analysis as of {timestamp}",
        regime_marker(regime.regime)
    );
    let _ = writeln!(out, "Regime: {}", describe_regime(regime));
    let _ = writeln!(
        out,
        "Pattern: {:?} (strength {:.2})",
        pattern.pattern, pattern.strength
    );
    let _ = writeln!(
        out,
        "Trend: {:?} (EMA12 {:.4}, EMA26 {:.4}, slope {:.2}%, strength {:.2})",
        trend.trend,
        trend.ema_fast,
        trend.ema_slow,
        trend.slope * 100.0,
        trend.strength
    );
    let _ = writeln!(
        out,
        "Risk: R {:.2} x rho {} = take-profit {:.6} [{}]",
        risk.r_multiplier, risk.rho, risk.take_profit, risk.commentary
    );
    let _ = write!(
        out,
        "Summary: {} bullish / {} bearish signals, overall {:?}",
        summary.bullish_signals, summary.bearish_signals, summary.overall_sentiment
    );
    out
}

fn describe_regime(regime: &RegimeOutput) -> String {
    let rsi = regime
        .rsi
        .map(|v| format!("{v:.2}"))
        .unwrap_or_else(|| "n/a".into());
    let mut text = format!(
        "{:?} (RSI {rsi}, confidence {:.2}",
        regime.regime, regime.confidence
    );
    if regime.overbought {
        text.push_str(", overbought");
    }
    if regime.oversold {
        text.push_str(", oversold");
    }
    text.push(')');
    text
}
