//! Mock backend handlers for `/assessments`.

use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::info;

use crate::errors::AppError;
use crate::models::assessment::{Assessment, AssessmentStats, Submission};
use crate::models::ListResponse;
use crate::state::AppState;

fn check_assessment(assessment: &Assessment) -> Result<(), AppError> {
    if assessment.job_id.trim().is_empty() || assessment.title.trim().is_empty() {
        return Err(AppError::Validation(
            "Assessment needs a job and a title".to_string(),
        ));
    }
    Ok(())
}

/// GET /assessments
pub async fn handle_list_assessments(
    State(state): State<AppState>,
) -> Result<Json<ListResponse<Assessment>>, AppError> {
    state.latency.delay().await;

    let assessments = state.store.assessments.list().await?;
    Ok(Json(ListResponse::paginate(assessments, None, None)))
}

/// POST /assessments
/// The client picks the id; saving an existing id replaces it.
pub async fn handle_create_assessment(
    State(state): State<AppState>,
    Json(assessment): Json<Assessment>,
) -> Result<(StatusCode, Json<Assessment>), AppError> {
    state.latency.delay().await;
    state.latency.maybe_fail()?;
    check_assessment(&assessment)?;

    state.store.assessments.put(&assessment).await?;
    info!("Saved assessment {} for job {}", assessment.id, assessment.job_id);
    Ok((StatusCode::CREATED, Json(assessment)))
}

/// GET /assessments/stats
pub async fn handle_assessment_stats(
    State(state): State<AppState>,
) -> Result<Json<AssessmentStats>, AppError> {
    state.latency.delay().await;
    Ok(Json(state.store.assessment_stats().await?))
}

/// GET /assessments/by-job/:id
pub async fn handle_get_assessment_by_job(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<Assessment>, AppError> {
    state.latency.delay().await;

    let assessment = state
        .store
        .assessment_for_job(&job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No assessment for job {job_id}")))?;
    Ok(Json(assessment))
}

/// GET /assessments/:id
/// Looks up by assessment id, never by job id.
pub async fn handle_get_assessment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Assessment>, AppError> {
    state.latency.delay().await;

    let assessment = state
        .store
        .assessments
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Assessment {id} not found")))?;
    Ok(Json(assessment))
}

/// PUT /assessments/:id
pub async fn handle_update_assessment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(mut assessment): Json<Assessment>,
) -> Result<Json<Assessment>, AppError> {
    state.latency.delay().await;
    state.latency.maybe_fail()?;

    assessment.id = id;
    check_assessment(&assessment)?;
    state.store.assessments.put(&assessment).await?;
    Ok(Json(assessment))
}

/// POST /assessments/:id/submit
/// `:id` is the job id here: one submission is kept per job.
pub async fn handle_submit_assessment(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    Json(responses): Json<BTreeMap<String, Value>>,
) -> Result<Json<Value>, AppError> {
    state.latency.delay().await;
    state.latency.maybe_fail()?;

    let submission = Submission {
        job_id,
        responses,
        submitted_at: Utc::now(),
    };
    state.store.submissions.put(&submission).await?;

    info!(
        "Stored {} responses for job {}",
        submission.responses.len(),
        submission.job_id
    );
    Ok(Json(json!({ "success": true })))
}

/// DELETE /assessments/:id
pub async fn handle_delete_assessment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.latency.delay().await;
    state.latency.maybe_fail()?;

    if !state.store.assessments.delete(&id).await? {
        return Err(AppError::NotFound(format!("Assessment {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use crate::models::assessment::{Assessment, AssessmentStats};
    use crate::store::seed::seed_if_empty;
    use crate::store::tests::memory_store;
    use crate::transport::latency::Latency;
    use crate::transport::tests::transport_for;
    use crate::transport::MockTransport;

    async fn seeded() -> MockTransport {
        let store = memory_store().await;
        seed_if_empty(&store).await.unwrap();
        transport_for(store, Latency::instant())
    }

    #[tokio::test]
    async fn test_static_routes_win_over_id() {
        let transport = seeded().await;

        let stats: AssessmentStats = transport.get("/assessments/stats").await.unwrap();
        assert_eq!(stats.total_assessments, 3);
        assert_eq!(stats.pending_assessments, 3);

        let by_job: Assessment = transport.get("/assessments/by-job/job-2").await.unwrap();
        assert_eq!(by_job.id, "assessment-2");

        let by_id: Assessment = transport.get("/assessments/assessment-2").await.unwrap();
        assert_eq!(by_id.job_id, "job-2");
    }

    #[tokio::test]
    async fn test_get_by_job_id_on_id_route_is_not_found() {
        let transport = seeded().await;
        let err = transport
            .get::<Assessment>("/assessments/job-1")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_submission_marks_assessment_completed() {
        let transport = seeded().await;
        let ok: Value = transport
            .post("/assessments/job-1/submit", &json!({ "q-0-0": "Senior" }))
            .await
            .unwrap();
        assert_eq!(ok, json!({ "success": true }));

        let stats: AssessmentStats = transport.get("/assessments/stats").await.unwrap();
        assert_eq!(stats.completed_assessments, 1);
        assert_eq!(stats.pending_assessments, 2);
    }

    #[tokio::test]
    async fn test_put_uses_path_id() {
        let transport = seeded().await;
        let mut assessment: Assessment = transport.get("/assessments/assessment-1").await.unwrap();
        assessment.id = "something-else".to_string();
        assessment.title = "Renamed".to_string();

        let saved: Assessment = transport
            .put("/assessments/assessment-1", &assessment)
            .await
            .unwrap();
        assert_eq!(saved.id, "assessment-1");

        let list: crate::models::ListResponse<Assessment> =
            transport.get("/assessments").await.unwrap();
        assert_eq!(list.total, 3);
    }

    #[tokio::test]
    async fn test_untitled_assessment_is_rejected() {
        let transport = seeded().await;
        let mut assessment: Assessment = transport.get("/assessments/assessment-1").await.unwrap();
        assessment.title = String::new();

        let err = transport
            .put::<_, Assessment>("/assessments/assessment-1", &assessment)
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(axum::http::StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_delete_assessment() {
        let transport = seeded().await;
        transport.delete("/assessments/assessment-3").await.unwrap();
        assert!(transport
            .delete("/assessments/assessment-3")
            .await
            .unwrap_err()
            .is_not_found());
    }
}
