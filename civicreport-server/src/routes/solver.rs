//! Solver triage endpoints

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::Form;
use serde::Deserialize;
use tower_cookies::Cookies;

use civicreport_core::IssueStatus;

use crate::error::AppError;
use crate::notify::Notifier;
use crate::state::AppState;
use crate::store::{AccountStore, IssueChanges, IssueId, IssueStore, SessionStore};

#[derive(Deserialize)]
pub struct StatusForm {
    pub status: String,
}

/// POST /solver/update/{id} (solver only)
///
/// Solvers may set any status on any issue; no transition is rejected
/// based on the current state.
pub async fn update_status<A, I, S, N>(
    State(state): State<Arc<AppState<A, I, S, N>>>,
    cookies: Cookies,
    Path(id): Path<u64>,
    Form(form): Form<StatusForm>,
) -> Result<Redirect, AppError>
where
    A: AccountStore,
    I: IssueStore,
    S: SessionStore,
    N: Notifier,
{
    let session = super::session::require_solver(&cookies, state.sessions.as_ref())?;

    let status: IssueStatus = form
        .status
        .parse()
        .map_err(|e: civicreport_core::UnknownStatus| AppError::Validation(e.to_string()))?;

    let issue = state.issues.update_issue(
        IssueId(id),
        IssueChanges {
            status: Some(status),
            ..Default::default()
        },
    )?;

    tracing::info!(
        issue = issue.id.0,
        status = %status,
        department = session.department.as_deref().unwrap_or(""),
        "Solver updated status"
    );

    // Best-effort: a mail failure never fails the update
    if let Some(reporter) = state.accounts.get_account(issue.reporter)? {
        if let Err(e) = state
            .notifier
            .status_changed(&reporter.email, &issue.title, status.as_str())
        {
            tracing::warn!("Failed to notify reporter: {}", e);
        }
    }

    Ok(Redirect::to("/solver"))
}
