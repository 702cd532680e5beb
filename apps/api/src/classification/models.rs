//! Data models shared by every classification stage.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::taxonomy::{CandidateOrigin, ClassificationCandidate};

// ────────────────────────────────────────────────────────────────────────────
// Input
// ────────────────────────────────────────────────────────────────────────────

/// One record to classify. Missing fields deserialize as empty and produce
/// null results rather than request errors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassificationInput {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub job_title: String,
    /// Untrusted free text, e.g. a scraped job posting.
    #[serde(default)]
    pub raw_description: Option<String>,
}

impl ClassificationInput {
    #[cfg(test)]
    pub fn new(
        company: impl Into<String>,
        job_title: impl Into<String>,
        raw_description: Option<&str>,
    ) -> Self {
        Self {
            company: company.into(),
            job_title: job_title.into(),
            raw_description: raw_description.map(str::to_string),
        }
    }

    /// Raw description with blank text treated as absent.
    pub fn description(&self) -> Option<&str> {
        self.raw_description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Company analysis
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratedVia {
    Ai,
    Fallback,
}

/// Short industry-focused description of the company, plus the inputs it was built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyAnalysis {
    pub text: String,
    pub generated_via: GeneratedVia,
    pub company: String,
    pub job_title: String,
    pub raw_description: Option<String>,
}

impl CompanyAnalysis {
    /// Text the industry search runs against. A template carries no evidence
    /// beyond the company name, so only the name is searched.
    pub fn query_text(&self) -> &str {
        match self.generated_via {
            GeneratedVia::Ai => &self.text,
            GeneratedVia::Fallback => &self.company,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Results
// ────────────────────────────────────────────────────────────────────────────

/// Best-fit code for one taxonomy. `code` is `None` when the input gave nothing to match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub code: Option<String>,
    pub title: Option<String>,
    /// 0 – 100
    pub confidence: f64,
    pub rationale: Option<String>,
    /// Lexical evidence behind the chosen code, 0.0 – 1.0.
    pub lexical_score: f64,
    pub origin: Option<CandidateOrigin>,
    pub low_confidence: bool,
}

impl ClassificationResult {
    /// Null code, zero confidence. Used for empty input and for input that matches nothing.
    pub fn unmatched(reason: impl Into<String>) -> Self {
        Self {
            code: None,
            title: None,
            confidence: 0.0,
            rationale: Some(reason.into()),
            lexical_score: 0.0,
            origin: None,
            low_confidence: true,
        }
    }

    pub fn from_candidate(
        candidate: &ClassificationCandidate,
        confidence: f64,
        low_confidence: bool,
        rationale: String,
    ) -> Self {
        Self {
            code: Some(candidate.code.clone()),
            title: Some(candidate.title.clone()),
            confidence,
            rationale: Some(rationale),
            lexical_score: candidate.lexical_score,
            origin: Some(candidate.origin),
            low_confidence,
        }
    }

    pub fn is_null(&self) -> bool {
        self.code.is_none()
    }
}

/// Full outcome of one `classify()` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobClassification {
    pub occupation: ClassificationResult,
    pub industry: ClassificationResult,
    pub company_analysis: CompanyAnalysis,
    /// Confidence points the compatibility check added to (or took from) the industry result.
    pub compatibility_adjustment: f64,
}

/// Flattened export row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRow {
    pub industry_code: Option<String>,
    pub industry_title: Option<String>,
    pub industry_confidence: f64,
    pub occupation_code: Option<String>,
    pub occupation_title: Option<String>,
    pub occupation_confidence: f64,
    pub company_analysis: String,
}

impl JobClassification {
    pub fn to_row(&self) -> ClassificationRow {
        ClassificationRow {
            industry_code: self.industry.code.clone(),
            industry_title: self.industry.title.clone(),
            industry_confidence: self.industry.confidence,
            occupation_code: self.occupation.code.clone(),
            occupation_title: self.occupation.title.clone(),
            occupation_confidence: self.occupation.confidence,
            company_analysis: self.company_analysis.text.clone(),
        }
    }

    /// Human-readable report for display next to the structured result.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Company analysis:");
        let _ = writeln!(out, "  {}", self.company_analysis.text);
        let _ = writeln!(out);
        write_block(&mut out, "Industry", &self.industry);
        if self.compatibility_adjustment != 0.0 {
            let _ = writeln!(
                out,
                "  Compatibility adjustment: {:+.0}",
                self.compatibility_adjustment
            );
        }
        let _ = writeln!(out);
        write_block(&mut out, "Occupation", &self.occupation);
        let _ = writeln!(out);
        let _ = write!(out, "Method: {}", self.method());
        out
    }

    /// Which AI stages actually contributed to this result.
    fn method(&self) -> &'static str {
        let reranked = [&self.industry, &self.occupation]
            .iter()
            .any(|r| r.origin == Some(CandidateOrigin::AiSelected));
        match (self.company_analysis.generated_via, reranked) {
            (GeneratedVia::Ai, true) => "AI-generated company description with candidate re-ranking",
            (GeneratedVia::Ai, false) => {
                "AI-generated company description with keyword matching (AI selection unavailable)"
            }
            (GeneratedVia::Fallback, true) => {
                "template company description with candidate re-ranking"
            }
            (GeneratedVia::Fallback, false) => {
                "keyword matching only (no AI description available)"
            }
        }
    }
}

fn write_block(out: &mut String, label: &str, result: &ClassificationResult) {
    let _ = writeln!(out, "{label}:");
    match (&result.code, &result.title) {
        (Some(code), Some(title)) => {
            let _ = writeln!(out, "  {code} {title}");
            let flag = if result.low_confidence {
                " (low confidence)"
            } else {
                ""
            };
            let _ = writeln!(out, "  Confidence: {:.1}%{flag}", result.confidence);
        }
        _ => {
            let _ = writeln!(out, "  No code assigned");
        }
    }
    if let Some(rationale) = &result.rationale {
        let _ = writeln!(out, "  Rationale: {rationale}");
    }
}
