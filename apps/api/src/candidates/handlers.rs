//! Mock backend handlers for `/candidates` and `/applications`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::candidate::{ApplicationInput, Candidate, CandidatePatch, Stage};
use crate::models::ListResponse;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateListQuery {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    pub search: Option<String>,
    pub stage: Option<Stage>,
    pub job_id: Option<String>,
}

/// GET /candidates
pub async fn handle_list_candidates(
    State(state): State<AppState>,
    Query(query): Query<CandidateListQuery>,
) -> Result<Json<ListResponse<Candidate>>, AppError> {
    state.latency.delay().await;

    let search = query.search.unwrap_or_default();
    let candidates: Vec<Candidate> = state
        .store
        .candidates
        .list()
        .await?
        .into_iter()
        .filter(|c| c.matches_search(&search))
        .filter(|c| query.stage.map_or(true, |s| c.stage == s))
        .filter(|c| query.job_id.as_ref().map_or(true, |j| &c.job_id == j))
        .collect();

    Ok(Json(ListResponse::paginate(
        candidates,
        query.page,
        query.page_size,
    )))
}

/// GET /candidates/:id
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Candidate>, AppError> {
    state.latency.delay().await;

    let candidate = state
        .store
        .candidates
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {id} not found")))?;
    Ok(Json(candidate))
}

/// PATCH /candidates/:id
pub async fn handle_update_candidate(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<CandidatePatch>,
) -> Result<Json<Candidate>, AppError> {
    state.latency.delay().await;
    state.latency.maybe_fail()?;

    let mut candidate = state
        .store
        .candidates
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {id} not found")))?;
    patch.apply_to(&mut candidate);
    state.store.candidates.put(&candidate).await?;

    Ok(Json(candidate))
}

/// DELETE /candidates/:id
pub async fn handle_delete_candidate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.latency.delay().await;
    state.latency.maybe_fail()?;

    if !state.store.candidates.delete(&id).await? {
        return Err(AppError::NotFound(format!("Candidate {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /applications
/// Every application enters the pipeline at `applied`.
pub async fn handle_apply(
    State(state): State<AppState>,
    Json(input): Json<ApplicationInput>,
) -> Result<(StatusCode, Json<Candidate>), AppError> {
    state.latency.delay().await;
    state.latency.maybe_fail()?;

    let candidate = Candidate {
        id: Uuid::new_v4().to_string(),
        job_id: input.job_id,
        name: input.name,
        email: input.email,
        phone: input.phone,
        resume: input.resume,
        cover_letter: input.cover_letter,
        experience: input.experience,
        education: input.education,
        skills: input.skills,
        stage: Stage::Applied,
        applied_at: Utc::now(),
    };
    state.store.candidates.put(&candidate).await?;

    info!("New application {} for job {}", candidate.id, candidate.job_id);
    Ok((StatusCode::CREATED, Json(candidate)))
}
