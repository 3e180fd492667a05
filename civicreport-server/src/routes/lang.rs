//! Language preference cookie

use axum::extract::Path;
use axum::http::{header, HeaderMap};
use axum::response::Redirect;
use tower_cookies::{Cookie, Cookies};

use crate::error::AppError;

pub const LANG_COOKIE: &str = "lang";

/// GET /change-lang/{lang}
///
/// Sets the language preference cookie and sends the caller back where
/// they came from.
pub async fn change_lang(
    Path(lang): Path<String>,
    headers: HeaderMap,
    cookies: Cookies,
) -> Result<Redirect, AppError> {
    let valid = !lang.is_empty()
        && lang.len() <= 16
        && lang.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
    if !valid {
        return Err(AppError::Validation("Invalid language code".to_string()));
    }

    let cookie = Cookie::build((LANG_COOKIE, lang)).path("/").build();
    cookies.add(cookie);

    let back = headers
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("/");

    Ok(Redirect::to(back))
}
