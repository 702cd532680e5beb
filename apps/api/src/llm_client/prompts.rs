// Shared prompt constants and prompt-building utilities.
// The classification module defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Common instruction appended to every candidate-selection prompt.
pub const CANDIDATE_SET_INSTRUCTION: &str = "\
    CRITICAL: You must choose exactly ONE code from the numbered candidate list. \
    Do NOT invent codes. Do NOT return a code that is not in the list, \
    even if you believe a better code exists in the full taxonomy.";

/// Untrusted free text is cut to this many characters before it enters a prompt.
pub const MAX_PROMPT_TEXT_CHARS: usize = 400;

/// Truncates untrusted text on a char boundary and flattens whitespace so it
/// cannot break the prompt layout.
pub fn clip_for_prompt(text: &str) -> String {
    let flattened = text.split_whitespace().collect::<Vec<_>>().join(" ");
    match flattened.char_indices().nth(MAX_PROMPT_TEXT_CHARS) {
        Some((idx, _)) => format!("{}...", &flattened[..idx]),
        None => flattened,
    }
}

/// Substitutes `{key}` placeholders in one left-to-right pass. Inserted values
/// are never rescanned, so untrusted text containing `{...}` stays literal.
/// Braces that do not name a known key are kept as-is.
pub fn render_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 1..];
        let hit = values.iter().find(|(key, _)| {
            tail.starts_with(key) && tail[key.len()..].starts_with('}')
        });
        match hit {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len() + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}
