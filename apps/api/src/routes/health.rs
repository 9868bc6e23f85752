use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::state::AppState;

/// GET /health
/// Service version plus row counts from the local store. Never delayed.
pub async fn health_handler(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let store = &state.store;
    Ok(Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "talentflow-mock-api",
        "records": {
            "jobs": store.jobs.count().await?,
            "candidates": store.candidates.count().await?,
            "assessments": store.assessments.count().await?,
        }
    })))
}
