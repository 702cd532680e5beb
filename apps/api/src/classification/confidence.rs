//! Confidence Scorer: blends lexical, AI and compatibility signals into one
//! bounded 0 – 100 value.

use crate::taxonomy::CandidateOrigin;

/// Added when the AI confirms a candidate from the lexical set.
pub const AI_CONFIRMATION_BONUS: f64 = 35.0;
/// Pure-lexical results never claim more than this.
pub const LEXICAL_CEILING: f64 = 60.0;
/// Industry results built from a template description never claim more than this.
pub const FALLBACK_INDUSTRY_CEILING: f64 = 40.0;

pub const MIN_CONFIDENCE: f64 = 0.0;
pub const MAX_CONFIDENCE: f64 = 100.0;

/// Inputs to one confidence computation.
#[derive(Debug, Clone, Copy)]
pub struct ConfidenceSignals {
    pub lexical_score: f64,
    pub origin: CandidateOrigin,
    /// Compatibility delta, 0 when not applicable.
    pub adjustment: f64,
    /// Extra cap for results whose evidence is known to be weak. Lexical
    /// results are additionally held to `LEXICAL_CEILING`.
    pub ceiling: Option<f64>,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfidenceScorer {
    low_confidence_threshold: f64,
}

impl ConfidenceScorer {
    pub fn new(low_confidence_threshold: f64) -> Self {
        Self {
            low_confidence_threshold: clamp_confidence(low_confidence_threshold),
        }
    }

    pub fn low_confidence_threshold(&self) -> f64 {
        self.low_confidence_threshold
    }

    /// Lexical score on the 0 – 100 scale, with the AI bonus or the lexical ceiling.
    pub fn base(&self, lexical_score: f64, origin: CandidateOrigin) -> f64 {
        let scaled = lexical_score.clamp(0.0, 1.0) * MAX_CONFIDENCE;
        match origin {
            CandidateOrigin::AiSelected => (scaled + AI_CONFIRMATION_BONUS).min(MAX_CONFIDENCE),
            CandidateOrigin::Lexical => scaled.min(LEXICAL_CEILING),
        }
    }

    /// Final confidence: base, then adjustment, then ceiling, then clamp to [0, 100].
    /// Rounded to one decimal place.
    pub fn score(&self, signals: ConfidenceSignals) -> f64 {
        let adjusted = self.base(signals.lexical_score, signals.origin) + signals.adjustment;
        let ceiling = match signals.origin {
            CandidateOrigin::Lexical => Some(
                signals
                    .ceiling
                    .map_or(LEXICAL_CEILING, |c| c.min(LEXICAL_CEILING)),
            ),
            CandidateOrigin::AiSelected => signals.ceiling,
        };
        let capped = match ceiling {
            Some(ceiling) => adjusted.min(ceiling),
            None => adjusted,
        };
        (clamp_confidence(capped) * 10.0).round() / 10.0
    }

    /// Results below the threshold are kept and flagged, never dropped.
    pub fn is_low(&self, confidence: f64) -> bool {
        confidence < self.low_confidence_threshold
    }
}

impl Default for ConfidenceScorer {
    fn default() -> Self {
        Self::new(30.0)
    }
}

pub fn clamp_confidence(value: f64) -> f64 {
    if value.is_nan() {
        return MIN_CONFIDENCE;
    }
    value.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE)
}
