//! External advisory risk strategy.
//!
//! Asks a text-generation service for the take-profit multiplier. Any failure
//! (transport, HTTP status, malformed or out-of-range reply) degrades to the
//! heuristic multiplier with the reason recorded in the commentary. A single
//! attempt is made per assessment.

pub mod client;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::AdvisorConfig;
use crate::stages::risk::{
    HeuristicRisk, RiskInputs, RiskOutput, RiskSource, RiskStrategy, MAX_R_MULTIPLIER,
    MIN_R_MULTIPLIER,
};

pub use client::ChatCompletionsClient;

/// Longest failure reason kept in commentary.
pub const MAX_REASON_CHARS: usize = 80;

/// Errors from the text-generation collaborator or from interpreting its reply.
#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to build prompt: {0}")]
    Prompt(#[from] serde_json::Error),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("empty reply")]
    EmptyReply,

    #[error("unparseable reply: {0:?}")]
    Unparseable(String),

    #[error("multiplier {0} outside [1.2, 1.8]")]
    OutOfRange(f64),
}

/// A prompt-in, text-out collaborator.
///
/// Implementations block until a reply arrives or their own timeout elapses.
pub trait TextGenerator: Send + Sync {
    /// Identifier shown in commentary (e.g., the model name).
    fn label(&self) -> &str;

    fn generate(&self, prompt: &str) -> Result<String, AdvisorError>;
}

/// Risk strategy backed by a `TextGenerator`, falling back to `HeuristicRisk`.
pub struct AdvisoryRisk<G> {
    generator: G,
    fallback: HeuristicRisk,
}

impl<G: TextGenerator> AdvisoryRisk<G> {
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            fallback: HeuristicRisk,
        }
    }

    fn request_multiplier(&self, inputs: &RiskInputs<'_>) -> Result<f64, AdvisorError> {
        let prompt = build_prompt(inputs)?;
        let reply = self.generator.generate(&prompt)?;
        parse_multiplier(&reply)
    }
}

impl<G: TextGenerator> RiskStrategy for AdvisoryRisk<G> {
    fn name(&self) -> &str {
        "advisory"
    }

    fn assess(&self, inputs: &RiskInputs<'_>) -> RiskOutput {
        match self.request_multiplier(inputs) {
            Ok(r) => {
                debug!(r_multiplier = r, model = self.generator.label(), "advisory multiplier");
                RiskOutput::new(
                    r,
                    RiskSource::Advisory,
                    format!("advisory ({})", self.generator.label()),
                )
            }
            Err(err) => {
                warn!(error = %err, "advisory risk failed, using heuristic");
                let heuristic = self.fallback.assess(inputs);
                RiskOutput::new(
                    heuristic.r_multiplier,
                    RiskSource::Fallback,
                    format!("heuristic fallback: {}", truncate_reason(&err.to_string())),
                )
            }
        }
    }
}

/// Instruction plus the three stage outputs as JSON.
pub fn build_prompt(inputs: &RiskInputs<'_>) -> Result<String, AdvisorError> {
    let context = serde_json::to_string(inputs)?;
    Ok(format!(
        "You are a trading risk assistant. Given the technical analysis below, \
         choose a take-profit R multiplier between {MIN_R_MULTIPLIER} and {MAX_R_MULTIPLIER}. \
         Reply with a single number and nothing else.\n\nAnalysis: {context}"
    ))
}

/// Parse a reply into a multiplier rounded to two decimals.
///
/// Surrounding whitespace, quotes and backticks are ignored; anything else
/// that is not a plain number is rejected.
pub fn parse_multiplier(reply: &str) -> Result<f64, AdvisorError> {
    let cleaned = reply.trim().trim_matches(|c| c == '`' || c == '"' || c == '\'').trim();
    if cleaned.is_empty() {
        return Err(AdvisorError::EmptyReply);
    }

    let value: f64 = cleaned
        .parse()
        .map_err(|_| AdvisorError::Unparseable(truncate_reason(cleaned)))?;
    if !value.is_finite() {
        return Err(AdvisorError::Unparseable(cleaned.to_string()));
    }

    let rounded = (value * 100.0).round() / 100.0;
    if !(MIN_R_MULTIPLIER..=MAX_R_MULTIPLIER).contains(&rounded) {
        return Err(AdvisorError::OutOfRange(rounded));
    }
    Ok(rounded)
}

fn truncate_reason(reason: &str) -> String {
    reason.chars().take(MAX_REASON_CHARS).collect()
}

/// Pick the risk strategy for a config.
///
/// Advisory only when the advisor is enabled, a credential resolves and the
/// HTTP client builds; otherwise the heuristic.
pub fn build_risk_strategy(config: &AdvisorConfig) -> Box<dyn RiskStrategy> {
    if !config.enabled {
        info!("advisor disabled, using heuristic risk");
        return Box::new(HeuristicRisk);
    }

    let Some(api_key) = config.resolve_api_key() else {
        info!(env = %config.api_key_env, "no advisor credential, using heuristic risk");
        return Box::new(HeuristicRisk);
    };

    match ChatCompletionsClient::new(config, api_key) {
        Ok(client) => {
            info!(model = %config.model, "using advisory risk");
            Box::new(AdvisoryRisk::new(client))
        }
        Err(err) => {
            warn!(error = %err, "advisor client unavailable, using heuristic risk");
            Box::new(HeuristicRisk)
        }
    }
}
