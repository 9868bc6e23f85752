use std::sync::Arc;

use tracing::info;

use crate::assessments::view::AssessmentsView;
use crate::candidates::view::CandidatesView;
use crate::config::Config;
use crate::jobs::view::JobsView;
use crate::notify::{Notifier, ToastLog};
use crate::session::guard::{guard, Navigation};
use crate::session::Session;
use crate::state::AppState;
use crate::transport::latency::FaultPolicy;
use crate::transport::MockTransport;

/// The client side wired together: one session, one transport into the mock
/// backend, one toast log, and a view per page.
pub struct ClientApp {
    pub session: Session,
    pub transport: MockTransport,
    pub toasts: Arc<ToastLog>,
    pub jobs: JobsView,
    pub candidates: CandidatesView,
    pub assessments: AssessmentsView,
}

impl ClientApp {
    pub fn new(state: AppState, config: &Config, session: Session) -> Self {
        let transport = MockTransport::new(state);
        let toasts = Arc::new(ToastLog::default());
        let notifier: Arc<dyn Notifier> = toasts.clone();

        ClientApp {
            jobs: JobsView::new(
                transport.clone(),
                notifier.clone(),
                FaultPolicy::new(config.reorder_failure_rate),
            ),
            candidates: CandidatesView::new(transport.clone(), notifier.clone()),
            assessments: AssessmentsView::new(transport.clone(), notifier),
            session,
            transport,
            toasts,
        }
    }

    /// Runs the guard for `path` and logs where the user ends up.
    pub fn navigate(&self, path: &str) -> Navigation {
        let navigation = guard(&self.session, path);
        match &navigation {
            Navigation::Allow(route) => info!("Navigated to {path} ({route:?})"),
            Navigation::Redirect(to) => info!("Redirected from {path} to {to}"),
        }
        navigation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::guard::Route;
    use crate::session::storage::MemoryStorage;
    use crate::session::Role;
    use crate::store::seed::seed_if_empty;
    use crate::store::tests::memory_store;
    use crate::transport::latency::Latency;

    async fn app() -> ClientApp {
        let store = memory_store().await;
        seed_if_empty(&store).await.unwrap();
        let state = AppState {
            store,
            latency: Latency::instant(),
        };
        let config = Config {
            reorder_failure_rate: 0.0,
            ..Config::default()
        };
        let session = Session::restore(Arc::new(MemoryStorage::default()))
            .await
            .unwrap();
        ClientApp::new(state, &config, session)
    }

    #[tokio::test]
    async fn test_login_then_reorder_from_dashboard() {
        let mut app = app().await;
        assert_eq!(app.navigate("/dashboard/jobs"), Navigation::Redirect("/login"));

        app.session.set_role(Some(Role::Hr)).await.unwrap();
        assert_eq!(
            app.navigate("/dashboard/jobs"),
            Navigation::Allow(Route::DashboardJobs)
        );

        assert!(app.jobs.fetch().await);
        let first = app.jobs.jobs()[0].id.clone();
        app.jobs.reorder(0, 2).await;
        assert_eq!(app.jobs.jobs()[2].id, first);
        assert_eq!(
            app.toasts.last().map(|t| t.message),
            Some("Job order updated!".to_string())
        );
    }
}
