//! Data models for service storage

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use civicreport_core::{IssueStatus, Level};

/// Unique account identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId(pub u64);

/// Unique issue identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IssueId(pub u64);

/// Unique session identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

/// A citizen account.
///
/// Solver/admin capability is deliberately NOT stored here; it is granted
/// per session at the elevation endpoints.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    /// Stored lowercased; unique
    pub email: String,
    pub password_hash: String,
    pub points: u32,
    pub level: Level,
    /// Append-only; a badge is never revoked
    pub badges: BTreeSet<String>,
    pub created_at: DateTime<Utc>,
}

/// A citizen-submitted issue report
#[derive(Debug, Clone)]
pub struct Issue {
    pub id: IssueId,
    pub title: String,
    /// Free text, optionally "lat,lng"; parsed only for map display
    pub location: String,
    /// Stored filename under the upload directory
    pub image_path: Option<String>,
    pub status: IssueStatus,
    /// Immutable after creation
    pub reporter: AccountId,
    pub department: String,
    pub created_at: DateTime<Utc>,
    /// Accounts that currently endorse this issue; toggled, not counted
    pub endorsements: BTreeSet<AccountId>,
}

/// Fields for creating an issue; id, status and timestamp are assigned by
/// the store (new issues always start Pending).
#[derive(Debug, Clone)]
pub struct NewIssue {
    pub title: String,
    pub location: String,
    pub image_path: Option<String>,
    pub reporter: AccountId,
    pub department: String,
}

/// Partial update applied by owners, solvers or admins. Absent fields are
/// left untouched.
#[derive(Debug, Clone, Default)]
pub struct IssueChanges {
    pub title: Option<String>,
    pub location: Option<String>,
    pub status: Option<IssueStatus>,
}

/// Capability flags bound to a session when it is created. A plain login
/// carries none of them.
#[derive(Debug, Clone, Default)]
pub struct SessionRoles {
    pub is_solver: bool,
    pub is_admin: bool,
    /// Bound at solver elevation; never taken from later requests
    pub department: Option<String>,
}

/// A logged-in session. Capability flags are session-scoped and trusted
/// for the cookie's lifetime; there is no re-check against the account
/// store after elevation.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub account_id: AccountId,
    pub is_solver: bool,
    pub is_admin: bool,
    pub department: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
