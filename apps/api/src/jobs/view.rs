//! HR jobs board: filtered, paginated list with create/edit/archive/delete
//! and drag-to-reorder.

use std::sync::Arc;

use tracing::{error, warn};

use crate::forms::SubmitError;
use crate::jobs::form::JobForm;
use crate::jobs::reorder::{
    move_item, PendingReorder, ReorderOutcome, ReorderRequest, Snapshot,
};
use crate::models::job::{Job, JobPatch, JobStatus, JobType};
use crate::models::ListResponse;
use crate::notify::{Notifier, Toast};
use crate::transport::latency::FaultPolicy;
use crate::transport::{with_query, MockTransport};

pub const PAGE_SIZE: usize = 9;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobFilters {
    pub search: String,
    pub status: Option<JobStatus>,
    pub job_type: Option<JobType>,
}

/// What a reorder ended up doing to the displayed list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderStatus {
    /// Same position or invalid index. Nothing was sent.
    NoOp,
    Confirmed,
    RolledBack,
}

pub struct JobsView {
    transport: MockTransport,
    notifier: Arc<dyn Notifier>,
    reorder_faults: FaultPolicy,
    jobs: Vec<Job>,
    filters: JobFilters,
    page: usize,
    total: usize,
}

impl JobsView {
    pub fn new(
        transport: MockTransport,
        notifier: Arc<dyn Notifier>,
        reorder_faults: FaultPolicy,
    ) -> Self {
        JobsView {
            transport,
            notifier,
            reorder_faults,
            jobs: Vec::new(),
            filters: JobFilters::default(),
            page: 1,
            total: 0,
        }
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn filters(&self) -> &JobFilters {
        &self.filters
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn total_pages(&self) -> usize {
        self.total.div_ceil(PAGE_SIZE)
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filters.search = search.into();
        self.page = 1;
    }

    pub fn set_status(&mut self, status: Option<JobStatus>) {
        self.filters.status = status;
        self.page = 1;
    }

    pub fn set_job_type(&mut self, job_type: Option<JobType>) {
        self.filters.job_type = job_type;
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Loads the current page. On failure the previous list stays on screen.
    pub async fn fetch(&mut self) -> bool {
        let uri = with_query(
            "/jobs",
            &[
                ("page", self.page.to_string()),
                ("pageSize", PAGE_SIZE.to_string()),
                ("search", self.filters.search.clone()),
                (
                    "status",
                    self.filters
                        .status
                        .map(|s| s.as_str().to_string())
                        .unwrap_or_default(),
                ),
                (
                    "jobType",
                    self.filters
                        .job_type
                        .map(|t| t.as_str().to_string())
                        .unwrap_or_default(),
                ),
            ],
        );

        match self.transport.get::<ListResponse<Job>>(&uri).await {
            Ok(list) => {
                self.jobs = list.data;
                self.total = list.total;
                true
            }
            Err(e) => {
                error!("Error fetching jobs: {e}");
                self.notifier.notify(Toast::error("Failed to load jobs"));
                false
            }
        }
    }

    /// Creates a job (`editing` is `None`) or updates `editing`.
    pub async fn save(&mut self, form: &JobForm, editing: Option<&Job>) -> Result<Job, SubmitError> {
        // Slug uniqueness is only checked on create, against every job.
        let existing = match editing {
            Some(_) => None,
            None => match self.transport.get::<ListResponse<Job>>("/jobs").await {
                Ok(list) => Some(list.data),
                Err(e) => {
                    error!("Error checking slug uniqueness: {e}");
                    None
                }
            },
        };

        let errors = form.validate(existing.as_deref());
        if !errors.is_empty() {
            self.notifier.notify(Toast::error("Please fix all errors"));
            return Err(SubmitError::Invalid(errors));
        }

        let result = match editing {
            Some(job) => {
                self.transport
                    .patch::<_, Job>(&format!("/jobs/{}", job.id), &form.to_patch())
                    .await
            }
            None => self.transport.post::<_, Job>("/jobs", &form.to_input()).await,
        };

        match result {
            Ok(job) => {
                self.notifier.notify(Toast::success(if editing.is_some() {
                    "Job updated successfully!"
                } else {
                    "Job created successfully!"
                }));
                self.fetch().await;
                Ok(job)
            }
            Err(e) => {
                error!("Error saving job: {e}");
                self.notifier.notify(Toast::error("Error saving job"));
                Err(e.into())
            }
        }
    }

    pub async fn toggle_archive(&mut self, job_id: &str) -> bool {
        let Some(job) = self.jobs.iter().find(|j| j.id == job_id) else {
            warn!("Archive toggle for job {job_id} that is not on screen");
            return false;
        };
        let status = job.status.toggled();
        let patch = JobPatch {
            status: Some(status),
            ..Default::default()
        };

        match self
            .transport
            .patch::<_, Job>(&format!("/jobs/{job_id}"), &patch)
            .await
        {
            Ok(_) => {
                self.notifier.notify(Toast::success(match status {
                    JobStatus::Archived => "Job archived successfully!",
                    JobStatus::Active => "Job unarchived successfully!",
                }));
                self.fetch().await;
                true
            }
            Err(e) => {
                error!("Error updating job status: {e}");
                self.notifier
                    .notify(Toast::error("Failed to update job status"));
                false
            }
        }
    }

    pub async fn delete(&mut self, job_id: &str) -> bool {
        match self.transport.delete(&format!("/jobs/{job_id}")).await {
            Ok(()) => {
                self.notifier
                    .notify(Toast::success("Job deleted successfully!"));
                self.fetch().await;
                true
            }
            Err(e) => {
                error!("Error deleting job: {e}");
                self.notifier.notify(Toast::error("Failed to delete job"));
                false
            }
        }
    }

    /// Applies the move to the displayed list right away and returns the
    /// pending confirmation. `None` when nothing should be sent.
    pub fn begin_reorder(&mut self, from: usize, to: usize) -> Option<PendingReorder> {
        if from == to {
            return None;
        }
        if from >= self.jobs.len() || to >= self.jobs.len() {
            warn!(
                "Ignoring reorder {from} -> {to} on a list of {}",
                self.jobs.len()
            );
            return None;
        }

        // Stored orders rather than on-screen indices: the list may be a
        // filtered page of the whole table.
        let request = ReorderRequest {
            job_id: self.jobs[from].id.clone(),
            from_order: self.jobs[from].order,
            to_order: self.jobs[to].order,
        };
        let snapshot = Snapshot::capture(&self.jobs);
        move_item(&mut self.jobs, from, to);

        Some(PendingReorder::new(request, snapshot))
    }

    /// Drag-end variant: `active` is the dragged job, `over` the job it was dropped on.
    pub fn begin_reorder_by_id(&mut self, active: &str, over: &str) -> Option<PendingReorder> {
        if active == over {
            return None;
        }
        let from = self.jobs.iter().position(|j| j.id == active)?;
        let to = self.jobs.iter().position(|j| j.id == over)?;
        self.begin_reorder(from, to)
    }

    /// Keeps the optimistic order on confirmation; otherwise replaces the
    /// whole list with the snapshot, discarding anything applied since.
    pub fn settle(&mut self, outcome: ReorderOutcome) -> ReorderStatus {
        match outcome {
            ReorderOutcome::Confirmed { .. } => {
                self.notifier.notify(Toast::success("Job order updated!"));
                ReorderStatus::Confirmed
            }
            ReorderOutcome::RolledBack { snapshot, .. } => {
                self.jobs = snapshot.into_jobs();
                self.notifier.notify(Toast::error(
                    "Failed to reorder jobs. Changes reverted.",
                ));
                ReorderStatus::RolledBack
            }
        }
    }

    /// Begin, confirm, and settle one reorder.
    pub async fn reorder(&mut self, from: usize, to: usize) -> ReorderStatus {
        let Some(pending) = self.begin_reorder(from, to) else {
            return ReorderStatus::NoOp;
        };
        let outcome = pending.confirm(&self.transport, &self.reorder_faults).await;
        self.settle(outcome)
    }
}
