//! Admin moderation endpoints

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::Form;
use tower_cookies::Cookies;

use crate::error::AppError;
use crate::notify::Notifier;
use super::issues::EditIssueForm;
use crate::state::AppState;
use crate::store::{AccountStore, IssueId, IssueStore, SessionStore};

/// POST /admin/update/{id} (admin only)
pub async fn update_issue<A, I, S, N>(
    State(state): State<Arc<AppState<A, I, S, N>>>,
    cookies: Cookies,
    Path(id): Path<u64>,
    Form(form): Form<EditIssueForm>,
) -> Result<Redirect, AppError>
where
    A: AccountStore,
    I: IssueStore,
    S: SessionStore,
    N: Notifier,
{
    super::session::require_admin(&cookies, state.sessions.as_ref())?;

    let issue = state.issues.update_issue(IssueId(id), form.into_changes()?)?;

    tracing::info!(issue = issue.id.0, "Admin edited issue");

    if let Some(reporter) = state.accounts.get_account(issue.reporter)? {
        if let Err(e) =
            state
                .notifier
                .post_moderated(&reporter.email, &issue.title, "edited by a moderator")
        {
            tracing::warn!("Failed to notify reporter: {}", e);
        }
    }

    Ok(Redirect::to("/admin"))
}

/// POST /admin/delete/{id} (admin only)
pub async fn delete_issue<A, I, S, N>(
    State(state): State<Arc<AppState<A, I, S, N>>>,
    cookies: Cookies,
    Path(id): Path<u64>,
) -> Result<Redirect, AppError>
where
    A: AccountStore,
    I: IssueStore,
    S: SessionStore,
    N: Notifier,
{
    super::session::require_admin(&cookies, state.sessions.as_ref())?;
    let id = IssueId(id);

    let issue = state.issues.get_issue(id)?.ok_or(AppError::IssueNotFound)?;
    state.issues.delete_issue(id)?;

    tracing::info!(issue = issue.id.0, "Admin deleted issue");

    if let Some(reporter) = state.accounts.get_account(issue.reporter)? {
        if let Err(e) = state.notifier.post_moderated(
            &reporter.email,
            &issue.title,
            "flagged as spam and removed",
        ) {
            tracing::warn!("Failed to notify reporter: {}", e);
        }
    }

    Ok(Redirect::to("/admin"))
}
