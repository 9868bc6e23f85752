//! Optimistic reordering of the jobs list.
//!
//! A reorder runs in three explicit steps:
//!
//! 1. `JobsView::begin_reorder` applies the move to the displayed list
//!    synchronously and returns a [`PendingReorder`] holding the snapshot.
//! 2. [`PendingReorder::confirm`] asks the backend to persist the move and
//!    yields a [`ReorderOutcome`].
//! 3. `JobsView::settle` keeps the optimistic order or restores the snapshot.
//!
//! Overlapping reorders are independent. Each carries its own snapshot, so a
//! late failure restores the order it saw and discards anything applied after it.

use thiserror::Error;
use tracing::{info, warn};

use crate::models::job::{Job, ReorderBody};
use crate::transport::latency::FaultPolicy;
use crate::transport::{ClientError, MockTransport};

/// Removes the item at `from` and inserts it at `to`.
///
/// Returns `false` and leaves `items` untouched when the indices are equal or
/// either is out of range.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from == to || from >= items.len() || to >= items.len() {
        return false;
    }
    let item = items.remove(from);
    items.insert(to, item);
    true
}

/// One drag result, as stored `order` values: the moved job's own and that
/// of the job it was dropped on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderRequest {
    pub job_id: String,
    pub from_order: i64,
    pub to_order: i64,
}

/// The displayed sequence as it was right before an optimistic update.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot(Vec<Job>);

impl Snapshot {
    pub fn capture(jobs: &[Job]) -> Self {
        Snapshot(jobs.to_vec())
    }

    pub fn into_jobs(self) -> Vec<Job> {
        self.0
    }
}

#[derive(Debug, Error)]
pub enum ReorderError {
    /// Client-side fault injection. No request was sent.
    #[error("Simulated reorder failure")]
    Simulated,

    #[error("reorder request failed: {0}")]
    Transport(#[from] ClientError),
}

/// An optimistic update waiting for the backend.
#[derive(Debug)]
pub struct PendingReorder {
    request: ReorderRequest,
    snapshot: Snapshot,
}

#[derive(Debug)]
pub enum ReorderOutcome {
    Confirmed {
        request: ReorderRequest,
        job: Job,
    },
    RolledBack {
        request: ReorderRequest,
        snapshot: Snapshot,
        error: ReorderError,
    },
}

impl PendingReorder {
    pub fn new(request: ReorderRequest, snapshot: Snapshot) -> Self {
        PendingReorder { request, snapshot }
    }

    pub fn request(&self) -> &ReorderRequest {
        &self.request
    }

    /// Sends the confirmation request. `faults` is drawn once, before sending.
    pub async fn confirm(self, transport: &MockTransport, faults: &FaultPolicy) -> ReorderOutcome {
        let PendingReorder { request, snapshot } = self;
        match send(transport, faults, &request).await {
            Ok(job) => {
                info!(
                    "Reorder of {} confirmed ({} -> {})",
                    request.job_id, request.from_order, request.to_order
                );
                ReorderOutcome::Confirmed { request, job }
            }
            Err(error) => {
                warn!("Reorder of {} failed: {error}", request.job_id);
                ReorderOutcome::RolledBack {
                    request,
                    snapshot,
                    error,
                }
            }
        }
    }
}

async fn send(
    transport: &MockTransport,
    faults: &FaultPolicy,
    request: &ReorderRequest,
) -> Result<Job, ReorderError> {
    if faults.should_fail() {
        return Err(ReorderError::Simulated);
    }
    let body = ReorderBody {
        from_order: request.from_order,
        to_order: request.to_order,
    };
    let job = transport
        .patch(&format!("/jobs/{}/reorder", request.job_id), &body)
        .await?;
    Ok(job)
}
