//! Classification Engine: the single entry point of the subsystem.
//!
//! Sequences description synthesis, the occupation funnel, the industry funnel
//! (with compatibility) and confidence scoring for one record, and runs
//! batches of records with bounded parallelism.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::classification::compatibility::CompatibilityValidator;
use crate::classification::confidence::ConfidenceScorer;
use crate::classification::description::DescriptionSynthesizer;
use crate::classification::industry::IndustryClassifier;
use crate::classification::models::{ClassificationInput, JobClassification};
use crate::classification::occupation::OccupationClassifier;
use crate::classification::ClassifierSettings;
use crate::llm_client::{DisabledGenerator, TextGenerator};
use crate::taxonomy::TaxonomyIndex;

/// Outcome of a batch run. `results` is sorted by input row index.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub results: Vec<(usize, JobClassification)>,
    /// Rows never started because the batch was cancelled.
    pub skipped: Vec<usize>,
}

enum BatchItem {
    Done(usize, Box<JobClassification>),
    Skipped(usize),
}

pub struct ClassificationEngine {
    index: Arc<TaxonomyIndex>,
    generator: Arc<dyn TextGenerator>,
    compatibility: CompatibilityValidator,
    scorer: ConfidenceScorer,
    synthesizer: DescriptionSynthesizer,
    settings: ClassifierSettings,
}

impl ClassificationEngine {
    pub fn new(
        index: Arc<TaxonomyIndex>,
        generator: Arc<dyn TextGenerator>,
        compatibility: CompatibilityValidator,
        settings: ClassifierSettings,
    ) -> Self {
        Self {
            index,
            generator,
            compatibility,
            scorer: ConfidenceScorer::new(settings.low_confidence_threshold),
            synthesizer: DescriptionSynthesizer::new(settings.retry),
            settings,
        }
    }

    pub fn index(&self) -> &TaxonomyIndex {
        &self.index
    }

    pub fn low_confidence_threshold(&self) -> f64 {
        self.scorer.low_confidence_threshold()
    }

    /// Whether a real text-generation capability was injected.
    pub fn ai_configured(&self) -> bool {
        self.generator.is_enabled()
    }

    /// Classifies one record. Never fails: unusable input yields null codes
    /// with zero confidence, and every AI failure resolves to the lexical path.
    pub async fn classify(&self, input: &ClassificationInput, ai_enabled: bool) -> JobClassification {
        let generator: &dyn TextGenerator = if ai_enabled {
            self.generator.as_ref()
        } else {
            &DisabledGenerator
        };

        let company_analysis = self.synthesizer.synthesize(input, generator).await;

        let occupation = OccupationClassifier {
            index: &self.index,
            generator,
            settings: &self.settings,
            scorer: &self.scorer,
        }
        .classify(&input.job_title, input.description())
        .await;

        let industry = IndustryClassifier {
            index: &self.index,
            generator,
            settings: &self.settings,
            scorer: &self.scorer,
            compatibility: &self.compatibility,
        }
        .classify(&company_analysis, &occupation)
        .await;

        info!(
            "Classified '{}' / '{}': industry={} ({:.1}), occupation={} ({:.1}), description via {:?}",
            input.company.trim(),
            input.job_title.trim(),
            industry.result.code.as_deref().unwrap_or("none"),
            industry.result.confidence,
            occupation.code.as_deref().unwrap_or("none"),
            occupation.confidence,
            company_analysis.generated_via
        );

        JobClassification {
            occupation,
            industry: industry.result,
            company_analysis,
            compatibility_adjustment: industry.compatibility_adjustment,
        }
    }

    /// Classifies records with at most `batch_concurrency` in flight.
    ///
    /// Cancellation stops records that have not started; records already in
    /// flight complete. Results stay keyed by their input row index.
    pub async fn classify_batch(
        &self,
        records: Vec<ClassificationInput>,
        ai_enabled: bool,
        cancel: &CancellationToken,
    ) -> BatchOutcome {
        let total = records.len();
        let concurrency = self.settings.batch_concurrency.max(1);
        info!("Starting batch of {total} records with {concurrency} workers");

        let items: Vec<BatchItem> = stream::iter(records.into_iter().enumerate())
            .map(|(row, input)| async move {
                // Check cancellation before starting the record
                if cancel.is_cancelled() {
                    return BatchItem::Skipped(row);
                }
                debug!("Worker starting row {row}");
                let classification = self.classify(&input, ai_enabled).await;
                BatchItem::Done(row, Box::new(classification))
            })
            .buffer_unordered(concurrency)
            .collect()
            .await;

        let mut results = Vec::with_capacity(total);
        let mut skipped = Vec::new();
        for item in items {
            match item {
                BatchItem::Done(row, classification) => results.push((row, *classification)),
                BatchItem::Skipped(row) => skipped.push(row),
            }
        }
        results.sort_by_key(|(row, _)| *row);
        skipped.sort_unstable();

        let unresolved = results
            .iter()
            .filter(|(_, c)| c.industry.is_null() || c.occupation.is_null())
            .count();
        info!(
            "Batch finished: {} classified ({} with a null code), {} skipped",
            results.len(),
            unresolved,
            skipped.len()
        );

        BatchOutcome { results, skipped }
    }
}
