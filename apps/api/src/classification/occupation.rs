//! Occupation Classifier: job title + description to one occupation code.

use tracing::debug;

use crate::classification::confidence::{ConfidenceScorer, ConfidenceSignals};
use crate::classification::models::ClassificationResult;
use crate::classification::prompts::OCCUPATION_SELECTION_TEMPLATE;
use crate::classification::selection::{fill_selection_template, format_candidates, select_candidate};
use crate::classification::ClassifierSettings;
use crate::llm_client::prompts::clip_for_prompt;
use crate::llm_client::{GenerationPurpose, TextGenerator};
use crate::taxonomy::{QueryTerms, TaxonomyIndex, TaxonomyKind};

/// Title tokens count fully; description tokens at half weight.
pub const TITLE_WEIGHT: f64 = 1.0;
pub const DESCRIPTION_WEIGHT: f64 = 0.5;

pub struct OccupationClassifier<'a> {
    pub index: &'a TaxonomyIndex,
    pub generator: &'a dyn TextGenerator,
    pub settings: &'a ClassifierSettings,
    pub scorer: &'a ConfidenceScorer,
}

impl OccupationClassifier<'_> {
    pub async fn classify(&self, job_title: &str, description: Option<&str>) -> ClassificationResult {
        let job_title = job_title.trim();
        if job_title.is_empty() {
            return ClassificationResult::unmatched("Job title is empty");
        }

        let mut query = QueryTerms::new().with_text(job_title, TITLE_WEIGHT);
        if let Some(description) = description {
            query.add_text(description, DESCRIPTION_WEIGHT);
        }
        if query.is_empty() {
            return ClassificationResult::unmatched("Job title contains no classifiable words");
        }

        let candidates = self.index.candidates(
            TaxonomyKind::Occupation,
            &query,
            self.settings.candidate_pool_size,
        );
        debug!(
            "Occupation candidates for '{job_title}': {:?}",
            candidates.iter().map(|c| c.code.as_str()).collect::<Vec<_>>()
        );

        let prompt = fill_selection_template(
            OCCUPATION_SELECTION_TEMPLATE,
            &[
                ("job_title", clip_for_prompt(job_title).as_str()),
                ("job_description", clip_for_prompt(description.unwrap_or("")).as_str()),
                ("candidates", format_candidates(&candidates).as_str()),
            ],
        );

        let Some(selected) = select_candidate(
            self.generator,
            &self.settings.retry,
            GenerationPurpose::OccupationSelection,
            prompt,
            &candidates,
        )
        .await
        else {
            return ClassificationResult::unmatched(format!(
                "No occupation shares vocabulary with '{job_title}'"
            ));
        };

        let confidence = self.scorer.score(ConfidenceSignals {
            lexical_score: selected.candidate.lexical_score,
            origin: selected.candidate.origin,
            adjustment: 0.0,
            ceiling: None,
        });

        ClassificationResult::from_candidate(
            &selected.candidate,
            confidence,
            self.scorer.is_low(confidence),
            selected.rationale,
        )
    }
}
