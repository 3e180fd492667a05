//! Service error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid elevation token")]
    InvalidToken,

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Forbidden")]
    Forbidden,

    #[error("Issue not found")]
    IssueNotFound,

    #[error("Account not found")]
    AccountNotFound,

    #[error("Email already registered")]
    EmailAlreadyExists,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            // Unauthenticated browsers are sent to the login form rather
            // than shown a bare status page.
            AppError::NotAuthenticated => {
                return Redirect::to("/login").into_response();
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.as_str()),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid credentials"),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid elevation token"),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "Forbidden"),
            AppError::IssueNotFound => (StatusCode::NOT_FOUND, "Issue not found"),
            AppError::AccountNotFound => (StatusCode::NOT_FOUND, "Account not found"),
            AppError::EmailAlreadyExists => (StatusCode::CONFLICT, "Email already registered"),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = json!({ "success": false, "reason": message });
        (status, axum::Json(body)).into_response()
    }
}
