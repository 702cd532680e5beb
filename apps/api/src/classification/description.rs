//! Description Synthesizer: turns (company, job title, raw text) into a short
//! industry-focused description of the company.
//!
//! One bounded AI request when the capability is available; otherwise, or on
//! any failure, a deterministic template built from the company name alone.

use tracing::{debug, warn};

use crate::classification::models::{ClassificationInput, CompanyAnalysis, GeneratedVia};
use crate::classification::prompts::{
    DESCRIPTION_MAX_TOKENS, DESCRIPTION_PROMPT_TEMPLATE, DESCRIPTION_SYSTEM,
};
use crate::llm_client::prompts::{clip_for_prompt, render_template};
use crate::llm_client::{
    generate_with_retry, GenerationPurpose, GenerationRequest, LlmError, RetryPolicy,
    TextGenerator,
};

/// Generated descriptions are cut to this many characters.
pub const MAX_DESCRIPTION_CHARS: usize = 600;

pub struct DescriptionSynthesizer {
    retry: RetryPolicy,
}

impl DescriptionSynthesizer {
    pub fn new(retry: RetryPolicy) -> Self {
        Self { retry }
    }

    pub async fn synthesize(
        &self,
        input: &ClassificationInput,
        generator: &dyn TextGenerator,
    ) -> CompanyAnalysis {
        let company = input.company.trim();
        if company.is_empty() {
            return fallback_analysis(input);
        }

        let request = GenerationRequest {
            purpose: GenerationPurpose::CompanyDescription,
            system: DESCRIPTION_SYSTEM.to_string(),
            prompt: render_template(
                DESCRIPTION_PROMPT_TEMPLATE,
                &[
                    ("company", clip_for_prompt(company).as_str()),
                    ("job_title", clip_for_prompt(&input.job_title).as_str()),
                    (
                        "raw_description",
                        clip_for_prompt(input.description().unwrap_or("")).as_str(),
                    ),
                ],
            ),
            max_tokens: DESCRIPTION_MAX_TOKENS,
        };

        match generate_with_retry(generator, &request, &self.retry).await {
            Ok(reply) => match sanitize_description(&reply) {
                Some(text) => CompanyAnalysis {
                    text,
                    generated_via: GeneratedVia::Ai,
                    company: input.company.clone(),
                    job_title: input.job_title.clone(),
                    raw_description: input.raw_description.clone(),
                },
                None => {
                    warn!("Company description for '{company}' was empty after cleanup, using template");
                    fallback_analysis(input)
                }
            },
            Err(LlmError::Disabled) => {
                debug!("AI disabled, templating description for '{company}'");
                fallback_analysis(input)
            }
            Err(e) => {
                warn!("Company description for '{company}' failed ({e}), using template");
                fallback_analysis(input)
            }
        }
    }
}

/// Template description. Deterministic and derived from the company name only.
pub fn fallback_analysis(input: &ClassificationInput) -> CompanyAnalysis {
    let company = input.company.trim();
    let text = if company.is_empty() {
        "No company name was provided, so no industry description is available.".to_string()
    } else {
        format!(
            "{company} is an organisation operating in Singapore. No business description \
             was available, so its industry is inferred from the company name alone."
        )
    };

    CompanyAnalysis {
        text,
        generated_via: GeneratedVia::Fallback,
        company: input.company.clone(),
        job_title: input.job_title.clone(),
        raw_description: input.raw_description.clone(),
    }
}

/// Trims, strips wrapping quotes and collapses whitespace, then caps the
/// length on a char boundary. `None` when nothing usable remains.
pub fn sanitize_description(reply: &str) -> Option<String> {
    let trimmed = reply
        .trim()
        .trim_matches(|c: char| c == '"' || c == '\'' || c == '`')
        .trim();
    let collapsed = trimmed.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return None;
    }

    let capped = match collapsed.char_indices().nth(MAX_DESCRIPTION_CHARS) {
        Some((idx, _)) => collapsed[..idx].trim_end().to_string(),
        None => collapsed,
    };
    Some(capped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::llm_client::tests::SequenceGenerator;
    use crate::llm_client::DisabledGenerator;

    fn synthesizer() -> DescriptionSynthesizer {
        DescriptionSynthesizer::new(RetryPolicy {
            timeout: Duration::from_secs(30),
            max_attempts: 2,
            backoff: Duration::from_millis(1),
        })
    }

    fn input() -> ClassificationInput {
        ClassificationInput::new("DBS Bank", "Financial Analyst", Some("Join our team"))
    }

    #[test]
    fn test_sanitize_strips_quotes_and_whitespace() {
        let cleaned = sanitize_description("  \"DBS Bank provides\n\n  banking services.\"  ");
        assert_eq!(cleaned.as_deref(), Some("DBS Bank provides banking services."));
    }

    #[test]
    fn test_sanitize_caps_length() {
        let long = "word ".repeat(400);
        let cleaned = sanitize_description(&long).unwrap();
        assert!(cleaned.chars().count() <= MAX_DESCRIPTION_CHARS);
    }

    #[test]
    fn test_sanitize_rejects_blank() {
        assert_eq!(sanitize_description(" \"\" "), None);
    }

    #[test]
    fn test_fallback_mentions_company_only() {
        let analysis = fallback_analysis(&input());
        assert_eq!(analysis.generated_via, GeneratedVia::Fallback);
        assert!(analysis.text.starts_with("DBS Bank"));
        assert!(!analysis.text.contains("Financial Analyst"));
    }

    #[tokio::test]
    async fn test_ai_description_is_used() {
        let generator = SequenceGenerator::new(vec![Ok(
            "DBS Bank is a Singapore bank providing commercial banking services.".to_string(),
        )]);
        let analysis = synthesizer().synthesize(&input(), &generator).await;
        assert_eq!(analysis.generated_via, GeneratedVia::Ai);
        assert!(analysis.text.contains("banking services"));
    }

    #[tokio::test]
    async fn test_disabled_capability_falls_back() {
        let analysis = synthesizer().synthesize(&input(), &DisabledGenerator).await;
        assert_eq!(analysis, fallback_analysis(&input()));
    }

    #[tokio::test]
    async fn test_transient_failure_retried_then_falls_back() {
        let generator = SequenceGenerator::new(vec![
            Err(LlmError::Api {
                status: 529,
                message: "overloaded".to_string(),
            }),
            Err(LlmError::Api {
                status: 529,
                message: "overloaded".to_string(),
            }),
        ]);
        let analysis = synthesizer().synthesize(&input(), &generator).await;
        assert_eq!(analysis.generated_via, GeneratedVia::Fallback);
        assert_eq!(
            generator.calls.load(std::sync::atomic::Ordering::SeqCst),
            2
        );
    }

    #[tokio::test]
    async fn test_empty_company_skips_ai() {
        let generator = SequenceGenerator::new(vec![Ok("should not be used".to_string())]);
        let analysis = synthesizer()
            .synthesize(&ClassificationInput::new("  ", "Cook", None), &generator)
            .await;
        assert_eq!(analysis.generated_via, GeneratedVia::Fallback);
        assert_eq!(
            generator.calls.load(std::sync::atomic::Ordering::SeqCst),
            0
        );
    }
}
