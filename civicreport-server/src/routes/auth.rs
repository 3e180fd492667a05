//! Signup, login and session elevation endpoints

use std::sync::Arc;

use axum::extract::State;
use axum::response::Redirect;
use axum::Form;
use serde::Deserialize;
use tower_cookies::Cookies;

use crate::crypto::{hash_password, verify_password};
use crate::error::AppError;
use crate::notify::Notifier;
use crate::state::AppState;
use crate::store::{Account, AccountStore, IssueStore, SessionRoles, SessionStore};

#[derive(Deserialize)]
pub struct SignupForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// POST /signup
pub async fn signup<A, I, S, N>(
    State(state): State<Arc<AppState<A, I, S, N>>>,
    cookies: Cookies,
    Form(form): Form<SignupForm>,
) -> Result<Redirect, AppError>
where
    A: AccountStore,
    I: IssueStore,
    S: SessionStore,
    N: Notifier,
{
    if form.email.trim().is_empty() || form.password.is_empty() {
        return Err(AppError::Validation(
            "Email and password are required".to_string(),
        ));
    }
    if form.password != form.confirm_password {
        return Err(AppError::Validation("Passwords do not match".to_string()));
    }

    let password_hash =
        hash_password(&form.password).map_err(|e| AppError::Internal(e.to_string()))?;
    let account = state.accounts.create_account(&form.email, &password_hash)?;

    let session = state
        .sessions
        .create(account.id, SessionRoles::default())?;
    super::session::set_session_cookie(&cookies, &session.id.0);

    tracing::info!(account = account.id.0, "Account created");

    Ok(Redirect::to("/"))
}

#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// POST /login
pub async fn login<A, I, S, N>(
    State(state): State<Arc<AppState<A, I, S, N>>>,
    cookies: Cookies,
    Form(form): Form<LoginForm>,
) -> Result<Redirect, AppError>
where
    A: AccountStore,
    I: IssueStore,
    S: SessionStore,
    N: Notifier,
{
    let account = check_credentials(state.accounts.as_ref(), &form.email, &form.password)?;

    let session = state
        .sessions
        .create(account.id, SessionRoles::default())?;
    super::session::set_session_cookie(&cookies, &session.id.0);

    Ok(Redirect::to("/"))
}

#[derive(Deserialize)]
pub struct SolverLoginForm {
    pub email: String,
    pub password: String,
    pub token: String,
    pub department: String,
}

/// POST /login/solver
///
/// Elevation is session-scoped: the solver flag and department are bound
/// to the session created here, never stored on the account.
pub async fn solver_login<A, I, S, N>(
    State(state): State<Arc<AppState<A, I, S, N>>>,
    cookies: Cookies,
    Form(form): Form<SolverLoginForm>,
) -> Result<Redirect, AppError>
where
    A: AccountStore,
    I: IssueStore,
    S: SessionStore,
    N: Notifier,
{
    if form.token != state.config.solver_token {
        return Err(AppError::InvalidToken);
    }
    if form.department.trim().is_empty() {
        return Err(AppError::Validation("Department is required".to_string()));
    }

    let account = check_credentials(state.accounts.as_ref(), &form.email, &form.password)?;

    let session = state.sessions.create(
        account.id,
        SessionRoles {
            is_solver: true,
            is_admin: false,
            department: Some(form.department.trim().to_string()),
        },
    )?;
    super::session::set_session_cookie(&cookies, &session.id.0);

    tracing::info!(account = account.id.0, department = %form.department, "Solver session created");

    Ok(Redirect::to("/solver"))
}

#[derive(Deserialize)]
pub struct AdminLoginForm {
    pub email: String,
    pub password: String,
    pub secret: String,
}

/// POST /admin/login
pub async fn admin_login<A, I, S, N>(
    State(state): State<Arc<AppState<A, I, S, N>>>,
    cookies: Cookies,
    Form(form): Form<AdminLoginForm>,
) -> Result<Redirect, AppError>
where
    A: AccountStore,
    I: IssueStore,
    S: SessionStore,
    N: Notifier,
{
    if form.secret != state.config.admin_secret {
        return Err(AppError::InvalidToken);
    }

    let account = check_credentials(state.accounts.as_ref(), &form.email, &form.password)?;

    let session = state.sessions.create(
        account.id,
        SessionRoles {
            is_solver: false,
            is_admin: true,
            department: None,
        },
    )?;
    super::session::set_session_cookie(&cookies, &session.id.0);

    tracing::info!(account = account.id.0, "Admin session created");

    Ok(Redirect::to("/admin"))
}

/// POST /logout
pub async fn logout<A, I, S, N>(
    State(state): State<Arc<AppState<A, I, S, N>>>,
    cookies: Cookies,
) -> Redirect
where
    A: AccountStore,
    I: IssueStore,
    S: SessionStore,
    N: Notifier,
{
    if let Some(session) = super::session::session_from_cookies(&cookies, state.sessions.as_ref())
    {
        let _ = state.sessions.delete(&session.id);
    }
    super::session::clear_session_cookie(&cookies);

    Redirect::to("/")
}

fn check_credentials<A: AccountStore>(
    accounts: &A,
    email: &str,
    password: &str,
) -> Result<Account, AppError> {
    let account = accounts
        .get_account_by_email(email)?
        .ok_or(AppError::InvalidCredentials)?;

    let valid = verify_password(password, &account.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    if !valid {
        return Err(AppError::InvalidCredentials);
    }

    Ok(account)
}
