//! AI re-ranking of a lexical candidate set.
//!
//! The model must answer with exactly one code from the set it was shown.
//! Anything else (no code, a code outside the set, a failed call) resolves to
//! the top lexical candidate, so selection itself never fails.

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::llm_client::prompts::{render_template, CANDIDATE_SET_INSTRUCTION, JSON_ONLY_SYSTEM};
use crate::llm_client::{
    generate_with_retry, strip_json_fences, GenerationPurpose, GenerationRequest, LlmError,
    RetryPolicy, TextGenerator,
};
use crate::taxonomy::{is_valid_code, CandidateOrigin, ClassificationCandidate, CODE_DIGITS};

use super::prompts::{SELECTION_MAX_TOKENS, SELECTION_SYSTEM};

#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("AI selection unavailable: {0}")]
    Unavailable(#[from] LlmError),

    #[error("invalid AI response: no 5-digit code in reply")]
    MissingCode,

    #[error("invalid AI response: code {0} is not in the candidate set")]
    OutOfSet(String),
}

/// Code and optional rationale extracted from a selection reply.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSelection {
    pub code: String,
    pub rationale: Option<String>,
}

/// The candidate a funnel settled on.
#[derive(Debug, Clone, PartialEq)]
pub struct Selected {
    pub candidate: ClassificationCandidate,
    pub rationale: String,
}

/// Formats candidates as a numbered `code: title` list for a prompt.
pub fn format_candidates(candidates: &[ClassificationCandidate]) -> String {
    candidates
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{}. {}: {}", i + 1, c.code, c.title))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Fills the shared placeholders of a selection template together with the
/// per-call `fields`, in a single pass.
pub fn fill_selection_template(template: &str, fields: &[(&str, &str)]) -> String {
    let mut values: Vec<(&str, &str)> = vec![
        ("candidate_set_instruction", CANDIDATE_SET_INSTRUCTION),
        ("json_only", JSON_ONLY_SYSTEM),
    ];
    values.extend_from_slice(fields);
    render_template(template, &values)
}

/// Extracts a code from a reply. Prefers `{"code", "rationale"}` JSON and
/// falls back to the first standalone 5-digit run anywhere in the text.
pub fn parse_selection(reply: &str) -> Result<ParsedSelection, SelectionError> {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(strip_json_fences(reply)) {
        let code = match map.get("code") {
            Some(Value::String(s)) => Some(s.trim().to_string()),
            Some(Value::Number(n)) => n.as_u64().map(|n| format!("{n:05}")),
            _ => None,
        };
        if let Some(code) = code.filter(|c| is_valid_code(c)) {
            let rationale = map
                .get("rationale")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(str::to_string);
            return Ok(ParsedSelection { code, rationale });
        }
    }

    find_standalone_code(reply)
        .map(|code| ParsedSelection {
            code,
            rationale: None,
        })
        .ok_or(SelectionError::MissingCode)
}

/// First run of exactly `CODE_DIGITS` ASCII digits not embedded in a longer number.
fn find_standalone_code(text: &str) -> Option<String> {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_digit() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            if i - start == CODE_DIGITS {
                return Some(text[start..i].to_string());
            }
        } else {
            i += 1;
        }
    }
    None
}

/// Asks the generator to pick from `candidates`. Errors are returned, not recovered.
pub async fn request_selection(
    generator: &dyn TextGenerator,
    retry: &RetryPolicy,
    purpose: GenerationPurpose,
    prompt: String,
    candidates: &[ClassificationCandidate],
) -> Result<(usize, Option<String>), SelectionError> {
    let request = GenerationRequest {
        purpose,
        system: SELECTION_SYSTEM.to_string(),
        prompt,
        max_tokens: SELECTION_MAX_TOKENS,
    };

    let reply = generate_with_retry(generator, &request, retry).await?;
    let parsed = parse_selection(&reply)?;

    candidates
        .iter()
        .position(|c| c.code == parsed.code)
        .map(|idx| (idx, parsed.rationale))
        .ok_or(SelectionError::OutOfSet(parsed.code))
}

/// Runs the AI stage of the funnel and resolves every failure to the top
/// lexical candidate. `candidates` must be non-empty and ranked.
pub async fn select_candidate(
    generator: &dyn TextGenerator,
    retry: &RetryPolicy,
    purpose: GenerationPurpose,
    prompt: String,
    candidates: &[ClassificationCandidate],
) -> Option<Selected> {
    let top = candidates.first()?;

    match request_selection(generator, retry, purpose, prompt, candidates).await {
        Ok((idx, rationale)) => {
            let mut candidate = candidates[idx].clone();
            candidate.origin = CandidateOrigin::AiSelected;
            let rationale = rationale.unwrap_or_else(|| {
                format!(
                    "AI selected {} {} from {} candidates",
                    candidate.code,
                    candidate.title,
                    candidates.len()
                )
            });
            Some(Selected {
                candidate,
                rationale,
            })
        }
        Err(e) => {
            match &e {
                SelectionError::Unavailable(LlmError::Disabled) => {
                    debug!("{purpose:?}: AI disabled, using top lexical candidate")
                }
                _ => warn!("{purpose:?}: {e}, using top lexical candidate {}", top.code),
            }
            Some(Selected {
                candidate: top.clone(),
                rationale: lexical_rationale(top),
            })
        }
    }
}

pub fn lexical_rationale(candidate: &ClassificationCandidate) -> String {
    format!(
        "Best keyword match: {} {} ({} matching keyword{}, lexical score {:.2})",
        candidate.code,
        candidate.title,
        candidate.keyword_overlap,
        if candidate.keyword_overlap == 1 { "" } else { "s" },
        candidate.lexical_score
    )
}
