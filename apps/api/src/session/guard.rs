//! Client-side route table and the role guard in front of it.

use crate::session::{Role, Session};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Landing,
    Login,
    Jobs,
    JobDetail(String),
    Dashboard,
    DashboardJobs,
    DashboardCandidates,
    CandidateProfile(String),
    Assessments,
    AssessmentNew,
    AssessmentEdit(String),
    AssessmentPreview(String),
    AssessmentResults(String),
}

impl Route {
    /// `None` for paths outside the table. Trailing slashes and query
    /// strings are ignored.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let route = match segments.as_slice() {
            [] => Route::Landing,
            ["login"] => Route::Login,
            ["jobs"] => Route::Jobs,
            ["jobs", id] => Route::JobDetail(id.to_string()),
            ["dashboard"] => Route::Dashboard,
            ["dashboard", "jobs"] => Route::DashboardJobs,
            ["dashboard", "candidates"] => Route::DashboardCandidates,
            ["dashboard", "candidates", id] => Route::CandidateProfile(id.to_string()),
            ["dashboard", "assessments"] => Route::Assessments,
            ["dashboard", "assessments", "new"] => Route::AssessmentNew,
            ["dashboard", "assessments", id, "edit"] => Route::AssessmentEdit(id.to_string()),
            ["dashboard", "assessments", id, "preview"] => {
                Route::AssessmentPreview(id.to_string())
            }
            ["dashboard", "assessments", id, "results"] => {
                Route::AssessmentResults(id.to_string())
            }
            _ => return None,
        };
        Some(route)
    }

    /// Empty means public.
    pub fn allowed_roles(&self) -> &'static [Role] {
        match self {
            Route::Landing | Route::Login | Route::Jobs | Route::JobDetail(_) => &[],
            _ => &[Role::Hr],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Allow(Route),
    Redirect(&'static str),
}

/// Home page for a signed-in role that hit a route it may not see.
fn home_for(role: Role) -> &'static str {
    match role {
        Role::Hr => "/dashboard",
        Role::Candidate => "/jobs",
    }
}

pub fn guard(session: &Session, path: &str) -> Navigation {
    let Some(route) = Route::parse(path) else {
        return Navigation::Redirect("/login");
    };

    let allowed = route.allowed_roles();
    if allowed.is_empty() {
        return Navigation::Allow(route);
    }
    match session.role() {
        None => Navigation::Redirect("/login"),
        Some(role) if allowed.contains(&role) => Navigation::Allow(route),
        Some(role) => Navigation::Redirect(home_for(role)),
    }
}
