//! Axum route handlers for taxonomy lookups.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::state::AppState;
use crate::taxonomy::{is_valid_code, TaxonomyKind};

#[derive(Debug, Serialize)]
pub struct TaxonomyEntryResponse {
    pub kind: TaxonomyKind,
    pub code: String,
    pub title: String,
    /// Section through full code, shortest first.
    pub prefixes: Vec<String>,
    pub keywords: Vec<String>,
}

/// GET /api/v1/taxonomy/:kind/:code
pub async fn handle_get_code(
    State(state): State<AppState>,
    Path((kind, code)): Path<(String, String)>,
) -> Result<Json<TaxonomyEntryResponse>, AppError> {
    let kind: TaxonomyKind = kind.parse().map_err(AppError::Validation)?;
    if !is_valid_code(&code) {
        return Err(AppError::Validation(format!(
            "'{code}' is not a 5-digit code"
        )));
    }

    let entry = state
        .engine
        .index()
        .lookup(kind, &code)
        .ok_or_else(|| AppError::NotFound(format!("No {kind} code {code}")))?;

    Ok(Json(TaxonomyEntryResponse {
        kind,
        code: entry.code.clone(),
        title: entry.title.clone(),
        prefixes: entry.prefixes().into_iter().map(str::to_string).collect(),
        keywords: entry.keywords().iter().cloned().collect(),
    }))
}
