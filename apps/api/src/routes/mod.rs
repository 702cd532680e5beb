pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::classification::handlers;
use crate::state::AppState;
use crate::taxonomy::handlers as taxonomy_handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Classification API
        .route("/api/v1/classify", post(handlers::handle_classify))
        .route(
            "/api/v1/classify/batch",
            post(handlers::handle_classify_batch),
        )
        // Reference data
        .route(
            "/api/v1/taxonomy/:kind/:code",
            get(taxonomy_handlers::handle_get_code),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tokio_util::sync::CancellationToken;
    use tower::ServiceExt;

    use crate::classification::compatibility::CompatibilityValidator;
    use crate::classification::engine::ClassificationEngine;
    use crate::classification::ClassifierSettings;
    use crate::config::Config;
    use crate::llm_client::DisabledGenerator;
    use crate::taxonomy::tests::sample_index;

    fn test_state() -> AppState {
        let config = Config::from_lookup(|key| match key {
            "MAX_BATCH_SIZE" => Some("3".to_string()),
            _ => None,
        })
        .unwrap();
        AppState {
            engine: Arc::new(ClassificationEngine::new(
                Arc::new(sample_index()),
                Arc::new(DisabledGenerator),
                CompatibilityValidator::builtin(),
                ClassifierSettings::for_tests(),
            )),
            config,
            shutdown: CancellationToken::new(),
        }
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = build_router(test_state()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_taxonomy_sizes() {
        let (status, body) = send(get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["taxonomies"]["industry"], 12);
        assert_eq!(body["taxonomies"]["occupation"], 10);
        assert_eq!(body["low_confidence_threshold"], 30.0);
        assert_eq!(body["ai_configured"], false);
    }

    #[tokio::test]
    async fn test_classify_returns_both_results_and_summary() {
        let (status, body) = send(post_json(
            "/api/v1/classify",
            json!({
                "company": "DBS Bank",
                "job_title": "Financial Analyst",
                "raw_description": "Analyse commercial banking portfolios"
            }),
        ))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["occupation"]["code"], "24131");
        assert_eq!(body["industry"]["code"], "64191");
        assert_eq!(body["company_analysis"]["generated_via"], "fallback");
        assert!(body["summary"].as_str().unwrap().contains("24131"));
    }

    #[tokio::test]
    async fn test_classify_with_missing_title_is_not_an_error() {
        let (status, body) = send(post_json(
            "/api/v1/classify",
            json!({"company": "DBS Bank"}),
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["occupation"]["code"].is_null());
        assert_eq!(body["occupation"]["confidence"], 0.0);
    }

    #[tokio::test]
    async fn test_batch_returns_rows_in_input_order() {
        let (status, body) = send(post_json(
            "/api/v1/classify/batch",
            json!({
                "records": [
                    {"company": "DBS Bank", "job_title": "Accountant"},
                    {"company": "", "job_title": ""},
                    {"company": "General Hospital", "job_title": "Registered Nurse"}
                ],
                "ai_enabled": false
            }),
        ))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["batch_id"].is_string());
        let rows = body["rows"].as_array().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["row"], 0);
        assert_eq!(rows[0]["occupation_code"], "24111");
        assert!(rows[1]["industry_code"].is_null());
        assert_eq!(rows[2]["occupation_code"], "22210");
        assert_eq!(body["skipped"], json!([]));
    }

    #[tokio::test]
    async fn test_batch_size_limits() {
        let (status, body) = send(post_json(
            "/api/v1/classify/batch",
            json!({"records": []}),
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let records: Vec<Value> = (0..4)
            .map(|_| json!({"company": "DBS Bank", "job_title": "Accountant"}))
            .collect();
        let (status, body) = send(post_json(
            "/api/v1/classify/batch",
            json!({"records": records}),
        ))
        .await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"]["code"], "PAYLOAD_TOO_LARGE");
    }

    #[tokio::test]
    async fn test_taxonomy_lookup() {
        let (status, body) = send(get("/api/v1/taxonomy/industry/64191")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Commercial banking activities");
        assert_eq!(body["prefixes"], json!(["6", "64", "641", "6419", "64191"]));

        let (status, _) = send(get("/api/v1/taxonomy/occupation/99999")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(get("/api/v1/taxonomy/sector/64191")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(get("/api/v1/taxonomy/industry/641")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
