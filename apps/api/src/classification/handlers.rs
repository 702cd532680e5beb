//! Axum route handlers for the Classification API.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::classification::models::{ClassificationInput, ClassificationRow, JobClassification};
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    #[serde(flatten)]
    pub input: ClassificationInput,
    /// Defaults to true. Has no effect when no AI provider is configured.
    #[serde(default)]
    pub ai_enabled: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    #[serde(flatten)]
    pub classification: JobClassification,
    pub summary: String,
}

#[derive(Debug, Deserialize)]
pub struct BatchClassifyRequest {
    pub records: Vec<ClassificationInput>,
    #[serde(default)]
    pub ai_enabled: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct BatchRow {
    /// Zero-based index of the record in the request.
    pub row: usize,
    #[serde(flatten)]
    pub classification: ClassificationRow,
}

#[derive(Debug, Serialize)]
pub struct BatchClassifyResponse {
    pub batch_id: Uuid,
    pub completed_at: DateTime<Utc>,
    pub rows: Vec<BatchRow>,
    /// Rows not classified because the service began shutting down.
    pub skipped: Vec<usize>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/classify
///
/// Classifies one (company, job title, description) record.
/// Empty fields produce null codes with zero confidence, not errors.
pub async fn handle_classify(
    State(state): State<AppState>,
    Json(request): Json<ClassifyRequest>,
) -> Result<Json<ClassifyResponse>, AppError> {
    let classification = state
        .engine
        .classify(&request.input, request.ai_enabled.unwrap_or(true))
        .await;
    let summary = classification.summary();

    Ok(Json(ClassifyResponse {
        classification,
        summary,
    }))
}

/// POST /api/v1/classify/batch
///
/// Classifies up to `MAX_BATCH_SIZE` records with bounded parallelism and
/// returns flattened export rows, sorted by input row.
pub async fn handle_classify_batch(
    State(state): State<AppState>,
    Json(request): Json<BatchClassifyRequest>,
) -> Result<Json<BatchClassifyResponse>, AppError> {
    if request.records.is_empty() {
        return Err(AppError::Validation("records cannot be empty".to_string()));
    }
    if request.records.len() > state.config.max_batch_size {
        return Err(AppError::PayloadTooLarge(format!(
            "{} records submitted; the maximum per batch is {}",
            request.records.len(),
            state.config.max_batch_size
        )));
    }

    let batch_id = Uuid::new_v4();
    tracing::info!("Batch {batch_id}: {} records", request.records.len());

    let outcome = state
        .engine
        .classify_batch(
            request.records,
            request.ai_enabled.unwrap_or(true),
            &state.shutdown,
        )
        .await;

    let rows = outcome
        .results
        .iter()
        .map(|(row, classification)| BatchRow {
            row: *row,
            classification: classification.to_row(),
        })
        .collect();

    Ok(Json(BatchClassifyResponse {
        batch_id,
        completed_at: Utc::now(),
        rows,
        skipped: outcome.skipped,
    }))
}
