//! Issue submission, owner edits and endorsements

use std::sync::Arc;

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Path, State};
use axum::response::Redirect;
use axum::{Form, Json};
use serde::{Deserialize, Serialize};
use tower_cookies::Cookies;

use civicreport_core::IssueStatus;

use crate::error::AppError;
use crate::notify::Notifier;
use crate::state::AppState;
use crate::store::{
    AccountStore, IssueChanges, IssueId, IssueStore, NewIssue, SessionStore,
};
use crate::upload;

fn bad_upload(e: MultipartError) -> AppError {
    AppError::Validation(format!("Malformed upload: {}", e))
}

/// POST /issues
///
/// Multipart form: title, location, department and an optional image.
/// Creates the issue as Pending and applies the submission award to the
/// reporter's account.
pub async fn create_issue<A, I, S, N>(
    State(state): State<Arc<AppState<A, I, S, N>>>,
    cookies: Cookies,
    mut multipart: Multipart,
) -> Result<Redirect, AppError>
where
    A: AccountStore,
    I: IssueStore,
    S: SessionStore,
    N: Notifier,
{
    let session = super::session::require_authenticated(&cookies, state.sessions.as_ref())?;

    let mut title = None;
    let mut location = None;
    let mut department = None;
    let mut image_path = None;

    while let Some(field) = multipart.next_field().await.map_err(bad_upload)? {
        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some("title") => title = Some(field.text().await.map_err(bad_upload)?),
            Some("location") => location = Some(field.text().await.map_err(bad_upload)?),
            Some("department") => department = Some(field.text().await.map_err(bad_upload)?),
            Some("image") => {
                let file_name = field.file_name().map(|s| s.to_string());
                let bytes = field.bytes().await.map_err(bad_upload)?;
                // Browsers submit an empty file part when no image was chosen
                if let Some(name) = file_name.filter(|n| !n.is_empty()) {
                    if !bytes.is_empty() {
                        image_path =
                            Some(upload::save_image(&state.config.upload_dir, &name, &bytes)?);
                    }
                }
            }
            _ => {}
        }
    }

    let (title, location, department) = match (title, location, department) {
        (Some(t), Some(l), Some(d))
            if !t.trim().is_empty() && !l.trim().is_empty() && !d.trim().is_empty() =>
        {
            (t, l, d)
        }
        _ => {
            return Err(AppError::Validation(
                "Title, location and department are required".to_string(),
            ))
        }
    };

    let issue = state.issues.create_issue(NewIssue {
        title,
        location,
        image_path,
        reporter: session.account_id,
        department,
    })?;

    let account = state.accounts.award_submission(session.account_id)?;
    tracing::info!(
        issue = issue.id.0,
        account = account.id.0,
        points = account.points,
        level = %account.level,
        "Issue submitted"
    );

    Ok(Redirect::to("/"))
}

#[derive(Deserialize)]
pub struct EditIssueForm {
    pub title: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
}

impl EditIssueForm {
    /// Empty form fields count as absent; the status string must name one
    /// of the three conventional states.
    pub fn into_changes(self) -> Result<IssueChanges, AppError> {
        let status = match self.status.filter(|s| !s.trim().is_empty()) {
            Some(s) => Some(
                s.parse::<IssueStatus>()
                    .map_err(|e| AppError::Validation(e.to_string()))?,
            ),
            None => None,
        };
        Ok(IssueChanges {
            title: self.title.filter(|s| !s.trim().is_empty()),
            location: self.location.filter(|s| !s.trim().is_empty()),
            status,
        })
    }
}

/// POST /posts/{id}/edit (owner only)
pub async fn edit_issue<A, I, S, N>(
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
    let session = super::session::require_authenticated(&cookies, state.sessions.as_ref())?;
    let id = IssueId(id);

    let issue = state.issues.get_issue(id)?.ok_or(AppError::IssueNotFound)?;
    if issue.reporter != session.account_id {
        return Err(AppError::Forbidden);
    }

    state.issues.update_issue(id, form.into_changes()?)?;

    Ok(Redirect::to("/"))
}

/// POST /posts/{id}/delete (owner only)
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
    let session = super::session::require_authenticated(&cookies, state.sessions.as_ref())?;
    let id = IssueId(id);

    let issue = state.issues.get_issue(id)?.ok_or(AppError::IssueNotFound)?;
    if issue.reporter != session.account_id {
        return Err(AppError::Forbidden);
    }

    state.issues.delete_issue(id)?;

    Ok(Redirect::to("/"))
}

#[derive(Serialize)]
pub struct EndorseResponse {
    pub count: usize,
}

/// POST /posts/{id}/endorse
///
/// Toggles the caller's endorsement: a second request by the same account
/// undoes the first.
pub async fn endorse_issue<A, I, S, N>(
    State(state): State<Arc<AppState<A, I, S, N>>>,
    cookies: Cookies,
    Path(id): Path<u64>,
) -> Result<Json<EndorseResponse>, AppError>
where
    A: AccountStore,
    I: IssueStore,
    S: SessionStore,
    N: Notifier,
{
    let session = super::session::require_authenticated(&cookies, state.sessions.as_ref())?;

    let count = state
        .issues
        .toggle_endorsement(IssueId(id), session.account_id)?;

    Ok(Json(EndorseResponse { count }))
}
