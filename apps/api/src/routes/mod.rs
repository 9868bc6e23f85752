pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::assessments::handlers as assessments;
use crate::candidates::handlers as candidates;
use crate::jobs::handlers as jobs;
use crate::state::AppState;

/// The mock backend's verb + path table.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Jobs
        .route(
            "/jobs",
            get(jobs::handle_list_jobs).post(jobs::handle_create_job),
        )
        .route(
            "/jobs/:id",
            get(jobs::handle_get_job)
                .patch(jobs::handle_update_job)
                .delete(jobs::handle_delete_job),
        )
        .route("/jobs/:id/reorder", patch(jobs::handle_reorder_job))
        // Candidates
        .route("/candidates", get(candidates::handle_list_candidates))
        .route(
            "/candidates/:id",
            get(candidates::handle_get_candidate)
                .patch(candidates::handle_update_candidate)
                .delete(candidates::handle_delete_candidate),
        )
        .route("/applications", post(candidates::handle_apply))
        // Assessments
        .route(
            "/assessments",
            get(assessments::handle_list_assessments).post(assessments::handle_create_assessment),
        )
        .route("/assessments/stats", get(assessments::handle_assessment_stats))
        .route(
            "/assessments/by-job/:id",
            get(assessments::handle_get_assessment_by_job),
        )
        .route(
            "/assessments/:id",
            get(assessments::handle_get_assessment)
                .put(assessments::handle_update_assessment)
                .delete(assessments::handle_delete_assessment),
        )
        .route(
            "/assessments/:id/submit",
            post(assessments::handle_submit_assessment),
        )
        .with_state(state)
}
