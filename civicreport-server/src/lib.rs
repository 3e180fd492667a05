//! CivicReport Service
//!
//! A citizen issue-reporting web service: citizens submit location-tagged
//! issues with photos, solvers (department staff) update issue status, and
//! admins moderate content. Solver/admin capability is a session-scoped
//! grant obtained by presenting a shared token at an elevation endpoint.

pub mod config;
pub mod crypto;
pub mod error;
pub mod notify;
pub mod routes;
pub mod state;
pub mod store;
pub mod upload;

pub use config::Config;
pub use error::AppError;
pub use notify::{ConsoleNotifier, Notifier, SmtpConfig, SmtpNotifier};
pub use state::AppState;
pub use store::{
    AccountStore, InMemoryAccountStore, InMemoryIssueStore, InMemorySessionStore, IssueStore,
    SessionStore, SqliteStore,
};
