//! HTTP routes for the service

mod admin;
mod auth;
mod issues;
mod lang;
mod reports;
mod session;
mod solver;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_cookies::CookieManagerLayer;
use tower_http::services::ServeDir;

use crate::notify::Notifier;
use crate::state::AppState;
use crate::store::{AccountStore, IssueStore, SessionStore};

/// Create the router with all routes
pub fn create_router<A, I, S, N>(state: Arc<AppState<A, I, S, N>>) -> Router
where
    A: AccountStore + 'static,
    I: IssueStore + 'static,
    S: SessionStore + 'static,
    N: Notifier + 'static,
{
    let upload_dir = state.config.upload_dir.clone();

    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/login/solver", post(auth::solver_login))
        .route("/admin/login", post(auth::admin_login))
        .route("/logout", post(auth::logout))
        .route("/issues", post(issues::create_issue))
        .route("/posts/{id}/edit", post(issues::edit_issue))
        .route("/posts/{id}/delete", post(issues::delete_issue))
        .route("/posts/{id}/endorse", post(issues::endorse_issue))
        .route("/solver/update/{id}", post(solver::update_status))
        .route("/admin/update/{id}", post(admin::update_issue))
        .route("/admin/delete/{id}", post(admin::delete_issue))
        .route("/api/reports", get(reports::list_reports))
        .route("/change-lang/{lang}", get(lang::change_lang))
        // Uploaded images are served statically
        .nest_service("/uploads", ServeDir::new(upload_dir))
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
