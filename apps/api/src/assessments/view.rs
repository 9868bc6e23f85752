use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::{error, info};

use crate::assessments::preview::{check_responses, AssessmentPreview};
use crate::models::assessment::{Assessment, AssessmentStats};
use crate::models::job::Job;
use crate::models::ListResponse;
use crate::notify::{Notifier, Toast};
use crate::transport::{ClientError, MockTransport};

/// HR assessments list, shown next to the jobs they belong to.
pub struct AssessmentsView {
    transport: MockTransport,
    notifier: Arc<dyn Notifier>,
    assessments: Vec<Assessment>,
    jobs: Vec<Job>,
}

impl AssessmentsView {
    pub fn new(transport: MockTransport, notifier: Arc<dyn Notifier>) -> Self {
        AssessmentsView {
            transport,
            notifier,
            assessments: Vec::new(),
            jobs: Vec::new(),
        }
    }

    pub fn assessments(&self) -> &[Assessment] {
        &self.assessments
    }

    /// Loads assessments and jobs together. Either failing keeps the old lists.
    pub async fn fetch(&mut self) -> bool {
        let (assessments, jobs) = tokio::join!(
            self.transport.get::<ListResponse<Assessment>>("/assessments"),
            self.transport.get::<ListResponse<Job>>("/jobs"),
        );
        match assessments.and_then(|a| jobs.map(|j| (a, j))) {
            Ok((assessments, jobs)) => {
                self.assessments = assessments.data;
                self.jobs = jobs.data;
                true
            }
            Err(e) => {
                error!("Error fetching assessments: {e}");
                self.notifier
                    .notify(Toast::error("Failed to load assessments"));
                false
            }
        }
    }

    pub fn job_for(&self, assessment: &Assessment) -> Option<&Job> {
        self.jobs.iter().find(|j| j.id == assessment.job_id)
    }

    pub fn total_questions(&self) -> usize {
        self.assessments.iter().map(Assessment::total_questions).sum()
    }

    pub async fn delete(&mut self, id: &str) -> bool {
        match self.transport.delete(&format!("/assessments/{id}")).await {
            Ok(()) => {
                self.assessments.retain(|a| a.id != id);
                self.notifier
                    .notify(Toast::success("Assessment deleted successfully"));
                true
            }
            Err(e) => {
                error!("Error deleting assessment: {e}");
                self.notifier
                    .notify(Toast::error("Failed to delete assessment"));
                false
            }
        }
    }

    pub async fn stats(&self) -> Option<AssessmentStats> {
        match self.transport.get("/assessments/stats").await {
            Ok(stats) => Some(stats),
            Err(e) => {
                error!("Error fetching assessment stats: {e}");
                None
            }
        }
    }

    /// Editor and preview pages load one assessment by id.
    pub async fn load(&self, id: &str) -> Option<Assessment> {
        match self.transport.get(&format!("/assessments/{id}")).await {
            Ok(assessment) => Some(assessment),
            Err(e) => {
                error!("Error fetching assessment {id}: {e}");
                self.notifier.notify(Toast::error(if e.is_not_found() {
                    "Assessment not found"
                } else {
                    "Failed to load assessment"
                }));
                None
            }
        }
    }

    pub async fn preview(&self, id: &str) -> Option<AssessmentPreview> {
        self.load(id).await.map(|a| AssessmentPreview::new(&a))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitAssessmentError {
    #[error("{} answers need attention", .0.len())]
    Invalid(BTreeMap<String, String>),

    #[error(transparent)]
    Transport(#[from] ClientError),
}

/// Candidate-side submission of answers to the assessment for `job_id`.
pub async fn submit_assessment(
    transport: &MockTransport,
    notifier: &dyn Notifier,
    job_id: &str,
    assessment: &Assessment,
    responses: &BTreeMap<String, Value>,
) -> Result<(), SubmitAssessmentError> {
    let errors = check_responses(assessment, responses);
    if !errors.is_empty() {
        notifier.notify(Toast::error("Please answer all required questions"));
        return Err(SubmitAssessmentError::Invalid(errors));
    }

    match transport
        .post::<_, Value>(&format!("/assessments/{job_id}/submit"), responses)
        .await
    {
        Ok(_) => {
            info!("Submitted {} answers for job {job_id}", responses.len());
            notifier.notify(Toast::success("Assessment submitted successfully!"));
            Ok(())
        }
        Err(e) => {
            error!("Error submitting assessment: {e}");
            notifier.notify(Toast::error("Failed to submit assessment"));
            Err(e.into())
        }
    }
}
