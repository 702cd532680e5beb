use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;
use crate::taxonomy::TaxonomyKind;

/// GET /health
/// Returns service status, version, loaded taxonomy sizes, the low-confidence
/// threshold and whether AI is configured.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let index = state.engine.index();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "ssfinder",
        "taxonomies": {
            "industry": index.table(TaxonomyKind::Industry).len(),
            "occupation": index.table(TaxonomyKind::Occupation).len()
        },
        "low_confidence_threshold": state.engine.low_confidence_threshold(),
        "ai_configured": state.engine.ai_configured()
    }))
}
