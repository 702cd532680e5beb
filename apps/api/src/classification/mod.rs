// Classification subsystem
// Implements: description synthesis, occupation and industry funnels,
// compatibility validation, confidence scoring, and the engine that sequences them.
// All LLM calls go through llm_client, never a provider directly.

pub mod compatibility;
pub mod confidence;
pub mod description;
pub mod engine;
pub mod handlers;
pub mod industry;
pub mod models;
pub mod occupation;
pub mod prompts;
pub mod selection;

use std::time::Duration;

use crate::config::Config;
use crate::llm_client::RetryPolicy;

/// Tunables shared by every classification stage.
#[derive(Debug, Clone)]
pub struct ClassifierSettings {
    /// Top-K lexical candidates shown to the AI (and searched for the fallback pick).
    pub candidate_pool_size: usize,
    pub low_confidence_threshold: f64,
    /// Bounded parallelism for batch classification.
    pub batch_concurrency: usize,
    pub retry: RetryPolicy,
}

impl ClassifierSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            candidate_pool_size: config.candidate_pool_size,
            low_confidence_threshold: config.low_confidence_threshold,
            batch_concurrency: config.batch_concurrency,
            retry: RetryPolicy {
                timeout: Duration::from_secs(config.ai_timeout_secs),
                ..RetryPolicy::default()
            },
        }
    }

    #[cfg(test)]
    pub(crate) fn for_tests() -> Self {
        Self {
            candidate_pool_size: 15,
            low_confidence_threshold: 30.0,
            batch_concurrency: 4,
            retry: RetryPolicy {
                timeout: Duration::from_secs(30),
                max_attempts: 2,
                backoff: Duration::from_millis(1),
            },
        }
    }
}
