use std::sync::Arc;

use crate::catalog::MatchContext;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Catalog artifacts, loaded once in `main` and never mutated afterwards.
    pub catalog: Arc<MatchContext>,
}
