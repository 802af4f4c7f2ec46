use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status plus the shape of the loaded catalog.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let catalog = &state.catalog;
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "jobmatch-api",
        "catalog": {
            "postings": catalog.postings.len(),
            "features": catalog.matrix.n_features(),
            "skills": catalog.skills.vocabulary.len(),
            "match_mode": catalog.skills.mode,
            "loaded_at": catalog.loaded_at,
        }
    }))
}
