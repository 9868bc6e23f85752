//! Mock backend handlers for `/jobs`.

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
use crate::models::job::{slugify, Job, JobInput, JobPatch, JobStatus, JobType, ReorderBody};
use crate::models::ListResponse;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListQuery {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    pub search: Option<String>,
    pub status: Option<JobStatus>,
    pub job_type: Option<JobType>,
}

/// GET /jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobListQuery>,
) -> Result<Json<ListResponse<Job>>, AppError> {
    state.latency.delay().await;

    let search = query.search.unwrap_or_default();
    let jobs: Vec<Job> = state
        .store
        .jobs
        .list()
        .await?
        .into_iter()
        .filter(|j| j.matches_search(&search))
        .filter(|j| query.status.map_or(true, |s| j.status == s))
        .filter(|j| query.job_type.map_or(true, |t| j.job_type == t))
        .collect();

    Ok(Json(ListResponse::paginate(jobs, query.page, query.page_size)))
}

/// GET /jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Job>, AppError> {
    state.latency.delay().await;

    let job = state
        .store
        .jobs
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;
    Ok(Json(job))
}

/// POST /jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(input): Json<JobInput>,
) -> Result<(StatusCode, Json<Job>), AppError> {
    state.latency.delay().await;
    state.latency.maybe_fail()?;

    if input.title.trim().is_empty() {
        return Err(AppError::Validation("Job title is required".to_string()));
    }

    let job = Job {
        id: Uuid::new_v4().to_string(),
        slug: slugify(&input.title),
        title: input.title,
        status: input.status,
        job_type: input.job_type,
        location: input.location,
        salary: input.salary,
        description: input.description,
        requirements: input.requirements,
        tags: input.tags,
        order: state.store.next_job_order().await?,
        created_at: Utc::now(),
    };
    state.store.jobs.put(&job).await?;

    info!("Created job {} ({})", job.id, job.slug);
    Ok((StatusCode::CREATED, Json(job)))
}

/// PATCH /jobs/:id
pub async fn handle_update_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<JobPatch>,
) -> Result<Json<Job>, AppError> {
    state.latency.delay().await;
    state.latency.maybe_fail()?;

    let mut job = state
        .store
        .jobs
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;
    patch.apply_to(&mut job);
    state.store.jobs.put(&job).await?;

    Ok(Json(job))
}

/// DELETE /jobs/:id
pub async fn handle_delete_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.latency.delay().await;
    state.latency.maybe_fail()?;

    if !state.store.jobs.delete(&id).await? {
        return Err(AppError::NotFound(format!("Job {id} not found")));
    }
    info!("Deleted job {id}");
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /jobs/:id/reorder
///
/// `toOrder` is the stored `order` of the job the moved job was dropped on;
/// the moved job takes that job's slot. `fromOrder` is only logged. The job is
/// found by id, so a stale `fromOrder` still moves the right record.
pub async fn handle_reorder_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<ReorderBody>,
) -> Result<Json<Job>, AppError> {
    state.latency.delay().await;
    state.latency.maybe_fail()?;

    let job = state
        .store
        .reorder_job(&id, body.to_order)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;

    info!(
        "Reordered job {id}: {} -> {} (stored at {})",
        body.from_order, body.to_order, job.order
    );
    Ok(Json(job))
}
