//! In-memory storage implementations

use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use chrono::{Duration, Utc};
use uuid::Uuid;

use civicreport_core::gamification;

use super::{
    Account, AccountId, AccountStore, Issue, IssueChanges, IssueId, IssueStore, NewIssue, Session,
    SessionId, SessionRoles, SessionStore, StoreResult,
};
use crate::error::AppError;

/// In-memory account store
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<AccountId, Account>>,
    next_id: AtomicU64,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl Default for InMemoryAccountStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountStore for InMemoryAccountStore {
    fn create_account(&self, email: &str, password_hash: &str) -> StoreResult<Account> {
        let normalized = email.to_lowercase();
        let mut accounts = self.accounts.write().unwrap();
        if accounts.values().any(|a| a.email == normalized) {
            return Err(AppError::EmailAlreadyExists);
        }

        let id = AccountId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let account = Account {
            id,
            email: normalized,
            password_hash: password_hash.to_string(),
            points: 0,
            level: Default::default(),
            badges: BTreeSet::new(),
            created_at: Utc::now(),
        };
        accounts.insert(id, account.clone());
        Ok(account)
    }

    fn get_account(&self, id: AccountId) -> StoreResult<Option<Account>> {
        Ok(self.accounts.read().unwrap().get(&id).cloned())
    }

    fn get_account_by_email(&self, email: &str) -> StoreResult<Option<Account>> {
        let normalized = email.to_lowercase();
        let accounts = self.accounts.read().unwrap();
        Ok(accounts.values().find(|a| a.email == normalized).cloned())
    }

    fn award_submission(&self, id: AccountId) -> StoreResult<Account> {
        // The increment, level recompute and badge merge all happen under
        // the write lock, so two concurrent submissions cannot both read
        // the same pre-update total.
        let mut accounts = self.accounts.write().unwrap();
        let account = accounts.get_mut(&id).ok_or(AppError::AccountNotFound)?;

        let reward = gamification::apply_submission(account.points);
        account.points = reward.points;
        account.level = reward.level;
        for badge in reward.badges {
            account.badges.insert(badge.to_string());
        }

        Ok(account.clone())
    }
}

/// In-memory issue store
pub struct InMemoryIssueStore {
    issues: RwLock<HashMap<IssueId, Issue>>,
    next_id: AtomicU64,
}

impl InMemoryIssueStore {
    pub fn new() -> Self {
        Self {
            issues: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl Default for InMemoryIssueStore {
    fn default() -> Self {
        Self::new()
    }
}

impl IssueStore for InMemoryIssueStore {
    fn create_issue(&self, new: NewIssue) -> StoreResult<Issue> {
        let id = IssueId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let issue = Issue {
            id,
            title: new.title,
            location: new.location,
            image_path: new.image_path,
            status: Default::default(),
            reporter: new.reporter,
            department: new.department,
            created_at: Utc::now(),
            endorsements: BTreeSet::new(),
        };
        self.issues.write().unwrap().insert(id, issue.clone());
        Ok(issue)
    }

    fn get_issue(&self, id: IssueId) -> StoreResult<Option<Issue>> {
        Ok(self.issues.read().unwrap().get(&id).cloned())
    }

    fn list_issues(&self) -> StoreResult<Vec<Issue>> {
        let issues = self.issues.read().unwrap();
        let mut all: Vec<Issue> = issues.values().cloned().collect();
        all.sort_by_key(|i| i.id);
        Ok(all)
    }

    fn update_issue(&self, id: IssueId, changes: IssueChanges) -> StoreResult<Issue> {
        let mut issues = self.issues.write().unwrap();
        let issue = issues.get_mut(&id).ok_or(AppError::IssueNotFound)?;

        if let Some(title) = changes.title {
            issue.title = title;
        }
        if let Some(location) = changes.location {
            issue.location = location;
        }
        if let Some(status) = changes.status {
            issue.status = status;
        }

        Ok(issue.clone())
    }

    fn delete_issue(&self, id: IssueId) -> StoreResult<()> {
        let mut issues = self.issues.write().unwrap();
        issues.remove(&id).ok_or(AppError::IssueNotFound)?;
        Ok(())
    }

    fn toggle_endorsement(&self, id: IssueId, account: AccountId) -> StoreResult<usize> {
        let mut issues = self.issues.write().unwrap();
        let issue = issues.get_mut(&id).ok_or(AppError::IssueNotFound)?;

        if !issue.endorsements.remove(&account) {
            issue.endorsements.insert(account);
        }

        Ok(issue.endorsements.len())
    }
}

/// In-memory session store with a fixed TTL
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, Session>>,
    ttl: Duration,
}

impl InMemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }
}

impl SessionStore for InMemorySessionStore {
    fn create(&self, account_id: AccountId, roles: SessionRoles) -> StoreResult<Session> {
        let now = Utc::now();
        let session = Session {
            id: SessionId(Uuid::new_v4().to_string()),
            account_id,
            is_solver: roles.is_solver,
            is_admin: roles.is_admin,
            department: roles.department,
            created_at: now,
            expires_at: now + self.ttl,
        };
        self.sessions
            .write()
            .unwrap()
            .insert(session.id.clone(), session.clone());
        Ok(session)
    }

    fn get(&self, session_id: &SessionId) -> StoreResult<Option<Session>> {
        let mut sessions = self.sessions.write().unwrap();
        match sessions.get(session_id) {
            Some(session) if session.expires_at > Utc::now() => Ok(Some(session.clone())),
            Some(_) => {
                sessions.remove(session_id);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn delete(&self, session_id: &SessionId) -> StoreResult<()> {
        self.sessions.write().unwrap().remove(session_id);
        Ok(())
    }
}
