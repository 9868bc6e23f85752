use std::sync::Arc;

use tracing::error;

use crate::candidates::form::ApplicationForm;
use crate::forms::SubmitError;
use crate::models::candidate::{Candidate, CandidatePatch, Stage};
use crate::models::ListResponse;
use crate::notify::{Notifier, Toast};
use crate::transport::{with_query, MockTransport};

/// HR candidate pipeline list.
pub struct CandidatesView {
    transport: MockTransport,
    notifier: Arc<dyn Notifier>,
    candidates: Vec<Candidate>,
    search: String,
    stage: Option<Stage>,
}

impl CandidatesView {
    pub fn new(transport: MockTransport, notifier: Arc<dyn Notifier>) -> Self {
        CandidatesView {
            transport,
            notifier,
            candidates: Vec::new(),
            search: String::new(),
            stage: None,
        }
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// `None` shows every stage.
    pub fn set_stage(&mut self, stage: Option<Stage>) {
        self.stage = stage;
    }

    pub async fn fetch(&mut self) -> bool {
        let uri = with_query(
            "/candidates",
            &[
                ("search", self.search.clone()),
                (
                    "stage",
                    self.stage.map(|s| s.as_str().to_string()).unwrap_or_default(),
                ),
            ],
        );
        match self.transport.get::<ListResponse<Candidate>>(&uri).await {
            Ok(list) => {
                self.candidates = list.data;
                true
            }
            Err(e) => {
                error!("Error fetching candidates: {e}");
                self.notifier
                    .notify(Toast::error("Failed to load candidates"));
                false
            }
        }
    }

    /// Profile page lookup. Missing candidates surface as a toast.
    pub async fn profile(&self, id: &str) -> Option<Candidate> {
        match self.transport.get(&format!("/candidates/{id}")).await {
            Ok(candidate) => Some(candidate),
            Err(e) => {
                error!("Error fetching candidate {id}: {e}");
                self.notifier.notify(Toast::error(if e.is_not_found() {
                    "Candidate not found"
                } else {
                    "Failed to load candidate"
                }));
                None
            }
        }
    }

    pub async fn move_stage(&mut self, id: &str, stage: Stage) -> bool {
        let patch = CandidatePatch {
            stage: Some(stage),
            ..Default::default()
        };
        match self
            .transport
            .patch::<_, Candidate>(&format!("/candidates/{id}"), &patch)
            .await
        {
            Ok(updated) => {
                if let Some(slot) = self.candidates.iter_mut().find(|c| c.id == id) {
                    *slot = updated;
                }
                self.notifier.notify(Toast::success(format!(
                    "Candidate moved to {}",
                    stage.as_str()
                )));
                true
            }
            Err(e) => {
                error!("Error updating candidate stage: {e}");
                self.notifier
                    .notify(Toast::error("Failed to update candidate"));
                false
            }
        }
    }

    pub async fn delete(&mut self, id: &str) -> bool {
        match self.transport.delete(&format!("/candidates/{id}")).await {
            Ok(()) => {
                self.notifier
                    .notify(Toast::success("Candidate deleted successfully"));
                self.fetch().await;
                true
            }
            Err(e) => {
                error!("Error deleting candidate: {e}");
                self.notifier
                    .notify(Toast::error("Failed to delete candidate"));
                false
            }
        }
    }
}

/// Candidate-side submission of an application for `job_id`.
pub async fn submit_application(
    transport: &MockTransport,
    notifier: &dyn Notifier,
    job_id: &str,
    form: &ApplicationForm,
) -> Result<Candidate, SubmitError> {
    let errors = form.validate();
    if !errors.is_empty() {
        notifier.notify(Toast::error("Please fix all errors before submitting"));
        return Err(SubmitError::Invalid(errors));
    }

    match transport
        .post::<_, Candidate>("/applications", &form.to_input(job_id))
        .await
    {
        Ok(candidate) => {
            notifier.notify(Toast::success("Application submitted successfully!"));
            Ok(candidate)
        }
        Err(e) => {
            error!("Error submitting application: {e}");
            notifier.notify(Toast::error(
                "Failed to submit application. Please try again.",
            ));
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::ToastLog;
    use crate::store::seed::{seed_if_empty, SEED_CANDIDATES};
    use crate::store::tests::memory_store;
    use crate::store::Store;
    use crate::transport::latency::{FaultPolicy, Latency};
    use crate::transport::tests::transport_for;

    async fn seeded() -> (Store, MockTransport) {
        let store = memory_store().await;
        seed_if_empty(&store).await.unwrap();
        let transport = transport_for(store.clone(), Latency::instant());
        (store, transport)
    }

    #[tokio::test]
    async fn test_stage_filter_and_search() {
        let (_store, transport) = seeded().await;
        let mut view = CandidatesView::new(transport, Arc::new(ToastLog::default()));

        assert!(view.fetch().await);
        assert_eq!(view.candidates().len(), SEED_CANDIDATES);

        view.set_stage(Some(Stage::Hired));
        assert!(view.fetch().await);
        assert!(!view.candidates().is_empty());
        assert!(view.candidates().iter().all(|c| c.stage == Stage::Hired));

        view.set_stage(None);
        view.set_search("MAYA");
        assert!(view.fetch().await);
        assert!(!view.candidates().is_empty());
        assert!(view
            .candidates()
            .iter()
            .all(|c| c.name.to_lowercase().contains("maya")
                || c.email.to_lowercase().contains("maya")));
    }

    #[tokio::test]
    async fn test_move_stage_updates_row_and_store() {
        let (store, transport) = seeded().await;
        let log = Arc::new(ToastLog::default());
        let mut view = CandidatesView::new(transport, log.clone());
        view.fetch().await;

        assert!(view.move_stage("cand-0001", Stage::Offer).await);
        assert_eq!(view.candidates()[0].stage, Stage::Offer);
        assert_eq!(
            store.candidates.get("cand-0001").await.unwrap().unwrap().stage,
            Stage::Offer
        );
        assert_eq!(log.last(), Some(Toast::success("Candidate moved to offer")));
    }

    #[tokio::test]
    async fn test_missing_profile_is_reported_not_fatal() {
        let (_store, transport) = seeded().await;
        let log = Arc::new(ToastLog::default());
        let view = CandidatesView::new(transport, log.clone());

        assert!(view.profile("cand-9999").await.is_none());
        assert_eq!(log.last(), Some(Toast::error("Candidate not found")));
        assert!(view.profile("cand-0002").await.is_some());
    }

    #[tokio::test]
    async fn test_delete_candidate() {
        let (store, transport) = seeded().await;
        let mut view = CandidatesView::new(transport, Arc::new(ToastLog::default()));
        view.fetch().await;

        assert!(view.delete("cand-0003").await);
        assert_eq!(view.candidates().len(), SEED_CANDIDATES - 1);
        assert!(store.candidates.get("cand-0003").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_application_lands_in_applied_stage() {
        let (store, transport) = seeded().await;
        let log = ToastLog::default();
        let form = ApplicationForm {
            name: "Noor Haddad".to_string(),
            email: "noor@example.com".to_string(),
            phone: "555".to_string(),
            cover_letter: "I would like to apply.".to_string(),
            skills: "go, rust".to_string(),
            ..Default::default()
        };

        let candidate = submit_application(&transport, &log, "job-2", &form)
            .await
            .unwrap();
        assert_eq!(candidate.stage, Stage::Applied);
        assert_eq!(candidate.job_id, "job-2");
        assert!(store.candidates.get(&candidate.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_invalid_application_is_not_sent() {
        let store = memory_store().await;
        let transport = transport_for(store.clone(), Latency::instant());
        let log = ToastLog::default();

        let err = submit_application(&transport, &log, "job-1", &ApplicationForm::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SubmitError::Invalid(_)));
        assert_eq!(store.candidates.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_failed_application_surfaces_toast() {
        let store = memory_store().await;
        let transport = transport_for(
            store,
            Latency::new(std::time::Duration::ZERO, FaultPolicy::always()),
        );
        let log = ToastLog::default();
        let form = ApplicationForm {
            name: "Kenji".to_string(),
            email: "kenji@example.com".to_string(),
            phone: "555".to_string(),
            cover_letter: "Hi".to_string(),
            ..Default::default()
        };

        let err = submit_application(&transport, &log, "job-1", &form)
            .await
            .unwrap_err();
        assert!(matches!(err, SubmitError::Transport(_)));
        assert_eq!(
            log.last(),
            Some(Toast::error("Failed to submit application. Please try again."))
        );
    }
}
