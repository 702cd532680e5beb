//! Industry Classifier: company analysis (+ occupation context) to one industry code.
//!
//! Same two-stage funnel as occupations. Compatibility with the chosen
//! occupation is checked after the pick and before confidence is final.

use tracing::debug;

use crate::classification::compatibility::CompatibilityValidator;
use crate::classification::confidence::{
    ConfidenceScorer, ConfidenceSignals, FALLBACK_INDUSTRY_CEILING,
};
use crate::classification::models::{ClassificationResult, CompanyAnalysis, GeneratedVia};
use crate::classification::prompts::INDUSTRY_SELECTION_TEMPLATE;
use crate::classification::selection::{fill_selection_template, format_candidates, select_candidate};
use crate::classification::ClassifierSettings;
use crate::llm_client::prompts::clip_for_prompt;
use crate::llm_client::{GenerationPurpose, TextGenerator};
use crate::taxonomy::{QueryTerms, TaxonomyIndex, TaxonomyKind};

/// Industry result plus the compatibility delta folded into its confidence.
#[derive(Debug, Clone, PartialEq)]
pub struct IndustryOutcome {
    pub result: ClassificationResult,
    pub compatibility_adjustment: f64,
}

pub struct IndustryClassifier<'a> {
    pub index: &'a TaxonomyIndex,
    pub generator: &'a dyn TextGenerator,
    pub settings: &'a ClassifierSettings,
    pub scorer: &'a ConfidenceScorer,
    pub compatibility: &'a CompatibilityValidator,
}

impl IndustryClassifier<'_> {
    pub async fn classify(
        &self,
        analysis: &CompanyAnalysis,
        occupation: &ClassificationResult,
    ) -> IndustryOutcome {
        let company = analysis.company.trim();
        if company.is_empty() {
            return unmatched("Company name is empty");
        }

        let query = QueryTerms::new().with_text(analysis.query_text(), 1.0);
        let candidates =
            self.index
                .candidates(TaxonomyKind::Industry, &query, self.settings.candidate_pool_size);
        debug!(
            "Industry candidates for '{company}': {:?}",
            candidates.iter().map(|c| c.code.as_str()).collect::<Vec<_>>()
        );

        let occupation_context = match (&occupation.code, &occupation.title) {
            (Some(code), Some(title)) => format!("{code} {title}"),
            _ => "unknown".to_string(),
        };
        let prompt = fill_selection_template(
            INDUSTRY_SELECTION_TEMPLATE,
            &[
                ("company", clip_for_prompt(company).as_str()),
                ("company_description", clip_for_prompt(&analysis.text).as_str()),
                ("occupation", occupation_context.as_str()),
                ("candidates", format_candidates(&candidates).as_str()),
            ],
        );

        let Some(selected) = select_candidate(
            self.generator,
            &self.settings.retry,
            GenerationPurpose::IndustrySelection,
            prompt,
            &candidates,
        )
        .await
        else {
            return unmatched(format!(
                "No industry shares vocabulary with the description of '{company}'"
            ));
        };

        let adjustment = self
            .compatibility
            .adjust(&selected.candidate.code, occupation.code.as_deref());
        let ceiling = match analysis.generated_via {
            GeneratedVia::Fallback => Some(FALLBACK_INDUSTRY_CEILING),
            GeneratedVia::Ai => None,
        };
        let confidence = self.scorer.score(ConfidenceSignals {
            lexical_score: selected.candidate.lexical_score,
            origin: selected.candidate.origin,
            adjustment,
            ceiling,
        });

        IndustryOutcome {
            result: ClassificationResult::from_candidate(
                &selected.candidate,
                confidence,
                self.scorer.is_low(confidence),
                selected.rationale,
            ),
            compatibility_adjustment: adjustment,
        }
    }
}

fn unmatched(reason: impl Into<String>) -> IndustryOutcome {
    IndustryOutcome {
        result: ClassificationResult::unmatched(reason),
        compatibility_adjustment: 0.0,
    }
}
