//! Session gate: cookie helpers and role guards

use tower_cookies::{Cookie, Cookies};

use crate::error::AppError;
use crate::store::{Session, SessionId, SessionStore};

pub const SESSION_COOKIE: &str = "civicreport_session";

/// Resolve the session cookie against the session store. Expired or
/// unknown sessions read as absent.
pub fn session_from_cookies<S: SessionStore>(cookies: &Cookies, sessions: &S) -> Option<Session> {
    cookies.get(SESSION_COOKIE).and_then(|c| {
        let session_id = SessionId(c.value().to_string());
        sessions.get(&session_id).ok().flatten()
    })
}

/// Guard: any valid session; otherwise the caller is sent to the login
/// form (NotAuthenticated renders as a redirect).
pub fn require_authenticated<S: SessionStore>(
    cookies: &Cookies,
    sessions: &S,
) -> Result<Session, AppError> {
    session_from_cookies(cookies, sessions).ok_or(AppError::NotAuthenticated)
}

/// Guard: session must carry the solver capability
pub fn require_solver<S: SessionStore>(
    cookies: &Cookies,
    sessions: &S,
) -> Result<Session, AppError> {
    let session = require_authenticated(cookies, sessions)?;
    if !session.is_solver {
        return Err(AppError::Forbidden);
    }
    Ok(session)
}

/// Guard: session must carry the admin capability
pub fn require_admin<S: SessionStore>(
    cookies: &Cookies,
    sessions: &S,
) -> Result<Session, AppError> {
    let session = require_authenticated(cookies, sessions)?;
    if !session.is_admin {
        return Err(AppError::Forbidden);
    }
    Ok(session)
}

/// Helper to set the session cookie
pub fn set_session_cookie(cookies: &Cookies, session_id: &str) {
    let cookie = Cookie::build((SESSION_COOKIE, session_id.to_string()))
        .path("/")
        .http_only(true)
        .build();
    cookies.add(cookie);
}

/// Helper to clear the session cookie
pub fn clear_session_cookie(cookies: &Cookies) {
    let cookie = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .max_age(tower_cookies::cookie::time::Duration::ZERO)
        .build();
    cookies.add(cookie);
}
