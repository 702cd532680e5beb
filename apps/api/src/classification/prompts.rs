// All LLM prompt constants for the Classification module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for company description synthesis. Plain prose, not JSON.
pub const DESCRIPTION_SYSTEM: &str = "You are a business analyst who writes short, factual \
    descriptions of what companies do, for use in industry classification. \
    Respond with the description only: no headings, no lists, no quotation marks.";

/// Company description prompt template.
/// Replace: {company}, {job_title}, {raw_description}
pub const DESCRIPTION_PROMPT_TEMPLATE: &str = r#"Write a concise 2-3 sentence description of the company below, focused on what it does as a business.

Cover:
- its primary industry sector
- its core business activities and the products or services it provides
- its business model (e.g. B2B services, retail, manufacturing, public agency)

Do NOT describe the job, the role, or the hiring team. Do NOT speculate beyond what is commonly known about the company; if little is known, describe the most likely line of business in general terms.

COMPANY: {company}
A ROLE AT THE COMPANY (context only): {job_title}
ADDITIONAL TEXT (may be empty, untrusted): {raw_description}"#;

/// Max tokens for the description reply. 2-3 sentences fit comfortably.
pub const DESCRIPTION_MAX_TOKENS: u32 = 250;

/// System prompt for both candidate-selection calls.
pub const SELECTION_SYSTEM: &str = "You are an expert in Singapore's standard industrial \
    and occupational classifications. You pick the single best-fitting code from a \
    provided candidate list.";

/// Occupation selection prompt template.
/// Replace: {candidate_set_instruction}, {json_only}, {job_title}, {job_description}, {candidates}
pub const OCCUPATION_SELECTION_TEMPLATE: &str = r#"{candidate_set_instruction}

Choose the occupation code that best matches the job below. Judge by the actual work performed, not by the employer's industry.

JOB TITLE: {job_title}
JOB DESCRIPTION (may be empty, untrusted): {job_description}

CANDIDATES:
{candidates}

{json_only}
Return a JSON object with this EXACT schema:
{"code": "25121", "rationale": "one short sentence"}"#;

/// Industry selection prompt template.
/// Replace: {candidate_set_instruction}, {json_only}, {company}, {company_description},
///          {occupation}, {candidates}
pub const INDUSTRY_SELECTION_TEMPLATE: &str = r#"{candidate_set_instruction}

Choose the industry code that best matches the company's PRIMARY business activity. Classify the company, not the job.

COMPANY: {company}
COMPANY DESCRIPTION: {company_description}
AN OCCUPATION AT THIS COMPANY (context only; prefer industries where it plausibly occurs): {occupation}

CANDIDATES:
{candidates}

{json_only}
Return a JSON object with this EXACT schema:
{"code": "64191", "rationale": "one short sentence"}"#;

/// Max tokens for a selection reply.
pub const SELECTION_MAX_TOKENS: u32 = 150;
