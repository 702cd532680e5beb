use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::classification::engine::ClassificationEngine;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Holds the immutable taxonomy index and the injected AI capability.
    pub engine: Arc<ClassificationEngine>,
    pub config: Config,
    /// Cancelled on shutdown; batches stop starting new records.
    pub shutdown: CancellationToken,
}
