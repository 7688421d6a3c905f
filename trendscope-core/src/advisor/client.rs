//! OpenAI-compatible chat-completions client.
//!
//! Posts a single user message to `{base_url}/chat/completions` and returns
//! the first choice's content. Blocking, with the request bounded by the
//! configured timeout.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{AdvisorError, TextGenerator};
use crate::config::AdvisorConfig;

/// Cap on the reply length; the expected answer is a single number.
const MAX_REPLY_TOKENS: u32 = 16;

/// Longest response body kept in an `AdvisorError::Status`.
const MAX_ERROR_BODY: usize = 200;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

/// Text generator speaking the chat-completions protocol.
pub struct ChatCompletionsClient {
    client: reqwest::blocking::Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f64,
}

impl ChatCompletionsClient {
    pub fn new(config: &AdvisorConfig, api_key: String) -> Result<Self, AdvisorError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AdvisorError::ClientBuild(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: Self::endpoint_url(&config.base_url),
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    fn endpoint_url(base_url: &str) -> String {
        format!("{}/chat/completions", base_url.trim_end_matches('/'))
    }

    /// Error for a non-2xx response, keeping at most `MAX_ERROR_BODY` chars of body.
    fn status_error(status: u16, body: &str) -> AdvisorError {
        AdvisorError::Status {
            status,
            body: body.chars().take(MAX_ERROR_BODY).collect(),
        }
    }

    /// Pull the first choice's content out of a response.
    fn extract_reply(resp: ChatResponse) -> Result<String, AdvisorError> {
        let content = resp
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AdvisorError::MalformedResponse("no choices".into()))?
            .message
            .content
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(AdvisorError::EmptyReply);
        }
        Ok(content)
    }
}

impl TextGenerator for ChatCompletionsClient {
    fn label(&self) -> &str {
        &self.model
    }

    fn generate(&self, prompt: &str) -> Result<String, AdvisorError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
            max_tokens: MAX_REPLY_TOKENS,
        };

        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .map_err(|e| AdvisorError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(Self::status_error(status.as_u16(), &body));
        }

        let parsed: ChatResponse = resp
            .json()
            .map_err(|e| AdvisorError::MalformedResponse(e.to_string()))?;
        Self::extract_reply(parsed)
    }
}
