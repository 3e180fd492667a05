//! Storage abstractions for the service

pub mod memory;
pub mod models;
pub mod sqlite;

pub use memory::{InMemoryAccountStore, InMemoryIssueStore, InMemorySessionStore};
pub use models::*;
pub use sqlite::SqliteStore;

use crate::error::AppError;

/// Result type for store operations
pub type StoreResult<T> = Result<T, AppError>;

/// Trait for account storage and gamification state
pub trait AccountStore: Send + Sync {
    /// Create an account for an email (stored lowercased) and password hash
    fn create_account(&self, email: &str, password_hash: &str) -> StoreResult<Account>;

    /// Get an account by ID
    fn get_account(&self, id: AccountId) -> StoreResult<Option<Account>>;

    /// Get an account by email address
    fn get_account_by_email(&self, email: &str) -> StoreResult<Option<Account>>;

    /// Apply the per-submission gamification award and return the updated
    /// account. Runs atomically inside the store so concurrent submissions
    /// by the same citizen never lose an increment.
    fn award_submission(&self, id: AccountId) -> StoreResult<Account>;
}

/// Trait for issue storage
pub trait IssueStore: Send + Sync {
    /// Create an issue; status starts Pending
    fn create_issue(&self, new: NewIssue) -> StoreResult<Issue>;

    /// Get an issue by ID
    fn get_issue(&self, id: IssueId) -> StoreResult<Option<Issue>>;

    /// List all issues, oldest first
    fn list_issues(&self) -> StoreResult<Vec<Issue>>;

    /// Apply a partial update; the reporter reference is never touched
    fn update_issue(&self, id: IssueId, changes: IssueChanges) -> StoreResult<Issue>;

    /// Delete an issue
    fn delete_issue(&self, id: IssueId) -> StoreResult<()>;

    /// Toggle the acting account's endorsement on an issue and return the
    /// resulting endorsement count. At most one endorsement per account.
    fn toggle_endorsement(&self, id: IssueId, account: AccountId) -> StoreResult<usize>;
}

/// Trait for session storage
pub trait SessionStore: Send + Sync {
    /// Create a session with the given capability flags
    fn create(&self, account_id: AccountId, roles: SessionRoles) -> StoreResult<Session>;

    /// Get a session by ID; expired sessions read as absent
    fn get(&self, session_id: &SessionId) -> StoreResult<Option<Session>>;

    /// Delete a session
    fn delete(&self, session_id: &SessionId) -> StoreResult<()>;
}
