/// LLM Client: the single point of entry for all text-generation calls in SS-Finder.
///
/// ARCHITECTURAL RULE: No other module may call a model provider directly.
/// Classifiers depend on the `TextGenerator` capability, never on `LlmClient`.
///
/// Two implementations are injected at startup: `LlmClient` (Anthropic Messages API)
/// when an API key is configured, `DisabledGenerator` otherwise. Every call goes
/// through `generate_with_retry`, which enforces the timeout and retry budget.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for all LLM calls in SS-Finder.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "claude-sonnet-4-5";
/// Low temperature: selection must be reproducible, descriptions factual.
const TEMPERATURE: f32 = 0.2;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM call timed out after {0:?}")]
    Timeout(Duration),

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("AI text generation is not enabled")]
    Disabled,
}

impl LlmError {
    /// Transient failures get one more attempt; everything else falls back immediately.
    pub fn is_transient(&self) -> bool {
        match self {
            LlmError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            LlmError::Api { status, .. } => *status == 429 || *status >= 500,
            LlmError::Timeout(_) => true,
            LlmError::EmptyContent | LlmError::Disabled => false,
        }
    }
}

/// What a generation request is for. Carried for logging and so test doubles
/// can answer each stage differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationPurpose {
    CompanyDescription,
    OccupationSelection,
    IndustrySelection,
}

#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub purpose: GenerationPurpose,
    pub system: String,
    pub prompt: String,
    pub max_tokens: u32,
}

/// Optional text-generation capability: `generate(prompt, max_tokens) -> text | failure`.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError>;

    /// False only for the disabled capability. Reported on /health, never branched on
    /// by classification logic.
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Stand-in capability when no provider is configured, or when a caller opts out of AI.
/// Every call fails with `LlmError::Disabled`, which routes classification to its
/// deterministic fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledGenerator;

#[async_trait]
impl TextGenerator for DisabledGenerator {
    async fn generate(&self, _request: &GenerationRequest) -> Result<String, LlmError> {
        Err(LlmError::Disabled)
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Anthropic provider
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Extracts the text content from the first text block.
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// Anthropic Messages API client. One HTTP attempt per `generate` call;
/// retries and the overall deadline belong to `generate_with_retry`.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    /// Makes a raw call to the Claude API, returning the full response object.
    pub async fn call(
        &self,
        prompt: &str,
        system: &str,
        max_tokens: u32,
    ) -> Result<LlmResponse, LlmError> {
        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens,
            temperature: TEMPERATURE,
            system,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Try to parse error message
            let message = serde_json::from_str::<AnthropicError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let llm_response: LlmResponse = response.json().await?;

        debug!(
            "LLM call succeeded: input_tokens={}, output_tokens={}",
            llm_response.usage.input_tokens, llm_response.usage.output_tokens
        );

        Ok(llm_response)
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError> {
        let response = self
            .call(&request.prompt, &request.system, request.max_tokens)
            .await?;

        match response.text().map(str::trim) {
            Some(text) if !text.is_empty() => Ok(text.to_string()),
            _ => Err(LlmError::EmptyContent),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Bounded calls
// ────────────────────────────────────────────────────────────────────────────

/// Timeout and retry budget applied to every generation call.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Deadline for a single attempt.
    pub timeout: Duration,
    /// Total attempts, including the first. Two means one retry.
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_attempts: 2,
            backoff: Duration::from_millis(1000),
        }
    }
}

/// Calls the generator under the policy's deadline, retrying transient failures
/// until `max_attempts` is spent. Non-transient failures return immediately.
pub async fn generate_with_retry(
    generator: &dyn TextGenerator,
    request: &GenerationRequest,
    policy: &RetryPolicy,
) -> Result<String, LlmError> {
    let attempts = policy.max_attempts.max(1);
    let mut last_error = LlmError::EmptyContent;

    for attempt in 1..=attempts {
        let outcome = match tokio::time::timeout(policy.timeout, generator.generate(request)).await
        {
            Ok(result) => result,
            Err(_) => Err(LlmError::Timeout(policy.timeout)),
        };

        match outcome {
            Ok(text) if !text.trim().is_empty() => return Ok(text),
            Ok(_) => return Err(LlmError::EmptyContent),
            Err(e) if e.is_transient() && attempt < attempts => {
                warn!(
                    "{:?} attempt {}/{} failed ({}), retrying after {}ms...",
                    request.purpose,
                    attempt,
                    attempts,
                    e,
                    policy.backoff.as_millis()
                );
                tokio::time::sleep(policy.backoff).await;
                last_error = e;
            }
            Err(e) => return Err(e),
        }
    }

    Err(last_error)
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
