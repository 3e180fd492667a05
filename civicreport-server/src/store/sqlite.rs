//! SQLite-based storage implementation

use std::collections::BTreeSet;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

use civicreport_core::{gamification, IssueStatus, Level};

use super::{
    Account, AccountId, AccountStore, Issue, IssueChanges, IssueId, IssueStore, NewIssue, Session,
    SessionId, SessionRoles, SessionStore, StoreResult,
};
use crate::error::AppError;

/// Current schema version
const SCHEMA_VERSION: i32 = 1;

/// SQLite store implementing AccountStore, IssueStore and SessionStore
pub struct SqliteStore {
    conn: Mutex<Connection>,
    session_ttl: Duration,
}

fn db_err(e: rusqlite::Error) -> AppError {
    AppError::Internal(e.to_string())
}

impl SqliteStore {
    /// Open or create a SQLite database at the given path
    pub fn open(path: &str, session_ttl: Duration) -> Result<Self, AppError> {
        let conn = Connection::open(path).map_err(db_err)?;

        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(db_err)?;

        Self::migrate(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
            session_ttl,
        })
    }

    /// Run database migrations
    fn migrate(conn: &Connection) -> Result<(), AppError> {
        let current_version = Self::get_schema_version(conn)?;

        if current_version < SCHEMA_VERSION {
            tracing::info!(
                current = current_version,
                target = SCHEMA_VERSION,
                "Running database migrations"
            );

            if current_version < 1 {
                Self::migrate_v1(conn)?;
            }

            conn.execute(
                "INSERT OR REPLACE INTO schema_version (version) VALUES (?1)",
                params![SCHEMA_VERSION],
            )
            .map_err(db_err)?;

            tracing::info!("Database migrations complete");
        }

        Ok(())
    }

    /// Get current schema version (0 if no schema exists)
    fn get_schema_version(conn: &Connection) -> Result<i32, AppError> {
        let table_exists: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
                [],
                |row| row.get(0),
            )
            .map_err(db_err)?;

        if !table_exists {
            return Ok(0);
        }

        conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
            row.get::<_, Option<i32>>(0).map(|v| v.unwrap_or(0))
        })
        .map_err(db_err)
    }

    /// Migration to version 1: initial schema
    fn migrate_v1(conn: &Connection) -> Result<(), AppError> {
        conn.execute_batch(
            r#"
            -- Schema version tracking
            CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER PRIMARY KEY
            );

            -- Citizen accounts; solver/admin capability is session-scoped
            -- and deliberately has no column here
            CREATE TABLE IF NOT EXISTS accounts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                points INTEGER NOT NULL DEFAULT 0,
                level TEXT NOT NULL DEFAULT 'Bronze',
                created_at TEXT NOT NULL
            );

            -- Badges are append-only per account
            CREATE TABLE IF NOT EXISTS account_badges (
                account_id INTEGER NOT NULL REFERENCES accounts(id) ON DELETE CASCADE,
                badge TEXT NOT NULL,
                PRIMARY KEY (account_id, badge)
            );

            -- Issue reports
            CREATE TABLE IF NOT EXISTS issues (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                location TEXT NOT NULL,
                image_path TEXT,
                status TEXT NOT NULL DEFAULT 'Pending',
                reporter INTEGER NOT NULL REFERENCES accounts(id),
                department TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_issues_reporter ON issues(reporter);

            -- One endorsement per account per issue
            CREATE TABLE IF NOT EXISTS issue_endorsements (
                issue_id INTEGER NOT NULL REFERENCES issues(id) ON DELETE CASCADE,
                account_id INTEGER NOT NULL REFERENCES accounts(id) ON DELETE CASCADE,
                PRIMARY KEY (issue_id, account_id)
            );

            -- Sessions, including session-scoped capability flags
            CREATE TABLE IF NOT EXISTS sessions (
                id TEXT PRIMARY KEY,
                account_id INTEGER NOT NULL REFERENCES accounts(id) ON DELETE CASCADE,
                is_solver INTEGER NOT NULL DEFAULT 0,
                is_admin INTEGER NOT NULL DEFAULT 0,
                department TEXT,
                created_at TEXT NOT NULL,
                expires_at TEXT NOT NULL
            );
            "#,
        )
        .map_err(db_err)?;

        Ok(())
    }

    fn load_account(conn: &Connection, id: i64) -> Result<Option<Account>, AppError> {
        let account = conn
            .query_row(
                "SELECT id, email, password_hash, points, level, created_at
                 FROM accounts WHERE id = ?1",
                params![id],
                account_from_row,
            )
            .optional()
            .map_err(db_err)?;

        let Some(mut account) = account else {
            return Ok(None);
        };

        let mut stmt = conn
            .prepare("SELECT badge FROM account_badges WHERE account_id = ?1")
            .map_err(db_err)?;
        let badges = stmt
            .query_map(params![id], |row| row.get::<_, String>(0))
            .map_err(db_err)?
            .collect::<Result<BTreeSet<String>, _>>()
            .map_err(db_err)?;
        account.badges = badges;

        Ok(Some(account))
    }

    fn load_issue(conn: &Connection, id: i64) -> Result<Option<Issue>, AppError> {
        let issue = conn
            .query_row(
                "SELECT id, title, location, image_path, status, reporter, department, created_at
                 FROM issues WHERE id = ?1",
                params![id],
                issue_from_row,
            )
            .optional()
            .map_err(db_err)?;

        let Some(mut issue) = issue else {
            return Ok(None);
        };

        issue.endorsements = Self::load_endorsements(conn, id)?;
        Ok(Some(issue))
    }

    fn load_endorsements(conn: &Connection, issue_id: i64) -> Result<BTreeSet<AccountId>, AppError> {
        let mut stmt = conn
            .prepare("SELECT account_id FROM issue_endorsements WHERE issue_id = ?1")
            .map_err(db_err)?;
        let endorsements = stmt
            .query_map(params![issue_id], |row| {
                row.get::<_, i64>(0).map(|id| AccountId(id as u64))
            })
            .map_err(db_err)?
            .collect::<Result<BTreeSet<AccountId>, _>>()
            .map_err(db_err);
        endorsements
    }
}

fn account_from_row(row: &Row<'_>) -> rusqlite::Result<Account> {
    let id: i64 = row.get(0)?;
    let level: String = row.get(4)?;
    let created_at: String = row.get(5)?;
    Ok(Account {
        id: AccountId(id as u64),
        email: row.get(1)?,
        password_hash: row.get(2)?,
        points: row.get::<_, i64>(3)? as u32,
        level: Level::from_str_opt(&level).unwrap_or_default(),
        badges: BTreeSet::new(),
        created_at: parse_timestamp(&created_at),
    })
}

fn issue_from_row(row: &Row<'_>) -> rusqlite::Result<Issue> {
    let id: i64 = row.get(0)?;
    let status: String = row.get(4)?;
    let reporter: i64 = row.get(5)?;
    let created_at: String = row.get(7)?;
    Ok(Issue {
        id: IssueId(id as u64),
        title: row.get(1)?,
        location: row.get(2)?,
        image_path: row.get(3)?,
        status: status.parse::<IssueStatus>().unwrap_or_default(),
        reporter: AccountId(reporter as u64),
        department: row.get(6)?,
        created_at: parse_timestamp(&created_at),
        endorsements: BTreeSet::new(),
    })
}

fn parse_timestamp(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

impl AccountStore for SqliteStore {
    fn create_account(&self, email: &str, password_hash: &str) -> StoreResult<Account> {
        let normalized = email.to_lowercase();
        let conn = self.conn.lock().unwrap();
        let now = Utc::now().to_rfc3339();

        let result = conn.execute(
            "INSERT INTO accounts (email, password_hash, created_at) VALUES (?1, ?2, ?3)",
            params![normalized, password_hash, now],
        );

        match result {
            Ok(_) => {}
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                return Err(AppError::EmailAlreadyExists);
            }
            Err(e) => return Err(db_err(e)),
        }

        let id = conn.last_insert_rowid();
        Self::load_account(&conn, id)?.ok_or(AppError::AccountNotFound)
    }

    fn get_account(&self, id: AccountId) -> StoreResult<Option<Account>> {
        let conn = self.conn.lock().unwrap();
        Self::load_account(&conn, id.0 as i64)
    }

    fn get_account_by_email(&self, email: &str) -> StoreResult<Option<Account>> {
        let normalized = email.to_lowercase();
        let conn = self.conn.lock().unwrap();

        let id: Option<i64> = conn
            .query_row(
                "SELECT id FROM accounts WHERE email = ?1",
                params![normalized],
                |row| row.get(0),
            )
            .optional()
            .map_err(db_err)?;

        match id {
            Some(id) => Self::load_account(&conn, id),
            None => Ok(None),
        }
    }

    fn award_submission(&self, id: AccountId) -> StoreResult<Account> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction().map_err(db_err)?;

        // Relative increment inside the transaction; two concurrent
        // submissions serialize rather than losing an update.
        let changed = tx
            .execute(
                "UPDATE accounts SET points = points + ?1 WHERE id = ?2",
                params![gamification::POINTS_PER_ISSUE, id.0 as i64],
            )
            .map_err(db_err)?;
        if changed == 0 {
            return Err(AppError::AccountNotFound);
        }

        let points: i64 = tx
            .query_row(
                "SELECT points FROM accounts WHERE id = ?1",
                params![id.0 as i64],
                |row| row.get(0),
            )
            .map_err(db_err)?;

        let level = Level::for_points(points as u32);
        tx.execute(
            "UPDATE accounts SET level = ?1 WHERE id = ?2",
            params![level.as_str(), id.0 as i64],
        )
        .map_err(db_err)?;

        for badge in gamification::badges_for_points(points as u32) {
            tx.execute(
                "INSERT OR IGNORE INTO account_badges (account_id, badge) VALUES (?1, ?2)",
                params![id.0 as i64, badge],
            )
            .map_err(db_err)?;
        }

        tx.commit().map_err(db_err)?;

        Self::load_account(&conn, id.0 as i64)?.ok_or(AppError::AccountNotFound)
    }
}

impl IssueStore for SqliteStore {
    fn create_issue(&self, new: NewIssue) -> StoreResult<Issue> {
        let conn = self.conn.lock().unwrap();
        let now = Utc::now().to_rfc3339();

        conn.execute(
            "INSERT INTO issues (title, location, image_path, status, reporter, department, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                new.title,
                new.location,
                new.image_path,
                IssueStatus::default().as_str(),
                new.reporter.0 as i64,
                new.department,
                now
            ],
        )
        .map_err(db_err)?;

        let id = conn.last_insert_rowid();
        Self::load_issue(&conn, id)?.ok_or(AppError::IssueNotFound)
    }

    fn get_issue(&self, id: IssueId) -> StoreResult<Option<Issue>> {
        let conn = self.conn.lock().unwrap();
        Self::load_issue(&conn, id.0 as i64)
    }

    fn list_issues(&self) -> StoreResult<Vec<Issue>> {
        let conn = self.conn.lock().unwrap();

        let ids: Vec<i64> = {
            let mut stmt = conn
                .prepare("SELECT id FROM issues ORDER BY id")
                .map_err(db_err)?;
            let ids = stmt
                .query_map([], |row| row.get(0))
                .map_err(db_err)?
                .collect::<Result<_, _>>()
                .map_err(db_err)?;
            ids
        };

        let mut issues = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(issue) = Self::load_issue(&conn, id)? {
                issues.push(issue);
            }
        }
        Ok(issues)
    }

    fn update_issue(&self, id: IssueId, changes: IssueChanges) -> StoreResult<Issue> {
        let conn = self.conn.lock().unwrap();

        if let Some(title) = &changes.title {
            conn.execute(
                "UPDATE issues SET title = ?1 WHERE id = ?2",
                params![title, id.0 as i64],
            )
            .map_err(db_err)?;
        }
        if let Some(location) = &changes.location {
            conn.execute(
                "UPDATE issues SET location = ?1 WHERE id = ?2",
                params![location, id.0 as i64],
            )
            .map_err(db_err)?;
        }
        if let Some(status) = changes.status {
            conn.execute(
                "UPDATE issues SET status = ?1 WHERE id = ?2",
                params![status.as_str(), id.0 as i64],
            )
            .map_err(db_err)?;
        }

        Self::load_issue(&conn, id.0 as i64)?.ok_or(AppError::IssueNotFound)
    }

    fn delete_issue(&self, id: IssueId) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();
        let changed = conn
            .execute("DELETE FROM issues WHERE id = ?1", params![id.0 as i64])
            .map_err(db_err)?;
        if changed == 0 {
            return Err(AppError::IssueNotFound);
        }
        Ok(())
    }

    fn toggle_endorsement(&self, id: IssueId, account: AccountId) -> StoreResult<usize> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction().map_err(db_err)?;

        let exists: bool = tx
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM issues WHERE id = ?1)",
                params![id.0 as i64],
                |row| row.get(0),
            )
            .map_err(db_err)?;
        if !exists {
            return Err(AppError::IssueNotFound);
        }

        let removed = tx
            .execute(
                "DELETE FROM issue_endorsements WHERE issue_id = ?1 AND account_id = ?2",
                params![id.0 as i64, account.0 as i64],
            )
            .map_err(db_err)?;
        if removed == 0 {
            tx.execute(
                "INSERT INTO issue_endorsements (issue_id, account_id) VALUES (?1, ?2)",
                params![id.0 as i64, account.0 as i64],
            )
            .map_err(db_err)?;
        }

        let count: i64 = tx
            .query_row(
                "SELECT COUNT(*) FROM issue_endorsements WHERE issue_id = ?1",
                params![id.0 as i64],
                |row| row.get(0),
            )
            .map_err(db_err)?;

        tx.commit().map_err(db_err)?;
        Ok(count as usize)
    }
}

impl SessionStore for SqliteStore {
    fn create(&self, account_id: AccountId, roles: SessionRoles) -> StoreResult<Session> {
        let conn = self.conn.lock().unwrap();
        let now = Utc::now();
        let session = Session {
            id: SessionId(Uuid::new_v4().to_string()),
            account_id,
            is_solver: roles.is_solver,
            is_admin: roles.is_admin,
            department: roles.department,
            created_at: now,
            expires_at: now + self.session_ttl,
        };

        conn.execute(
            "INSERT INTO sessions (id, account_id, is_solver, is_admin, department, created_at, expires_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                session.id.0,
                session.account_id.0 as i64,
                session.is_solver,
                session.is_admin,
                session.department,
                session.created_at.to_rfc3339(),
                session.expires_at.to_rfc3339()
            ],
        )
        .map_err(db_err)?;

        Ok(session)
    }

    fn get(&self, session_id: &SessionId) -> StoreResult<Option<Session>> {
        let conn = self.conn.lock().unwrap();

        let session = conn
            .query_row(
                "SELECT id, account_id, is_solver, is_admin, department, created_at, expires_at
                 FROM sessions WHERE id = ?1",
                params![session_id.0],
                |row| {
                    let id: String = row.get(0)?;
                    let account_id: i64 = row.get(1)?;
                    let created_at: String = row.get(5)?;
                    let expires_at: String = row.get(6)?;
                    Ok(Session {
                        id: SessionId(id),
                        account_id: AccountId(account_id as u64),
                        is_solver: row.get(2)?,
                        is_admin: row.get(3)?,
                        department: row.get(4)?,
                        created_at: parse_timestamp(&created_at),
                        expires_at: parse_timestamp(&expires_at),
                    })
                },
            )
            .optional()
            .map_err(db_err)?;

        match session {
            Some(session) if session.expires_at > Utc::now() => Ok(Some(session)),
            Some(session) => {
                conn.execute("DELETE FROM sessions WHERE id = ?1", params![session.id.0])
                    .map_err(db_err)?;
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn delete(&self, session_id: &SessionId) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM sessions WHERE id = ?1", params![session_id.0])
            .map_err(db_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_test_store() -> SqliteStore {
        SqliteStore::open(":memory:", Duration::minutes(30)).unwrap()
    }

    #[test]
    fn test_account_roundtrip_with_badges() {
        let store = open_test_store();
        let account = store.create_account("Jane@Example.com", "hash").unwrap();
        assert_eq!(account.email, "jane@example.com");

        for _ in 0..5 {
            store.award_submission(account.id).unwrap();
        }

        let loaded = store.get_account(account.id).unwrap().unwrap();
        assert_eq!(loaded.points, 50);
        assert_eq!(loaded.level, Level::Silver);
        assert!(loaded.badges.contains("Active Citizen"));
        assert!(loaded.badges.contains("Community Hero"));
    }

    #[test]
    fn test_duplicate_email_maps_to_conflict() {
        let store = open_test_store();
        store.create_account("a@example.com", "hash").unwrap();
        let err = store.create_account("a@example.com", "hash").unwrap_err();
        assert!(matches!(err, AppError::EmailAlreadyExists));
    }

    #[test]
    fn test_issue_crud_and_endorsements() {
        let store = open_test_store();
        let reporter = store.create_account("r@example.com", "hash").unwrap();
        let voter = store.create_account("v@example.com", "hash").unwrap();

        let issue = store
            .create_issue(NewIssue {
                title: "Overflowing bin".to_string(),
                location: "12.9,77.6".to_string(),
                image_path: Some("abc.jpg".to_string()),
                reporter: reporter.id,
                department: "Sanitation".to_string(),
            })
            .unwrap();
        assert_eq!(issue.status, IssueStatus::Pending);

        assert_eq!(store.toggle_endorsement(issue.id, voter.id).unwrap(), 1);
        assert_eq!(store.toggle_endorsement(issue.id, voter.id).unwrap(), 0);

        let updated = store
            .update_issue(
                issue.id,
                IssueChanges {
                    status: Some(IssueStatus::InProgress),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.status, IssueStatus::InProgress);
        assert_eq!(updated.image_path.as_deref(), Some("abc.jpg"));

        store.delete_issue(issue.id).unwrap();
        assert!(store.get_issue(issue.id).unwrap().is_none());
    }

    #[test]
    fn test_session_capability_flags_persist() {
        let store = open_test_store();
        let account = store.create_account("s@example.com", "hash").unwrap();

        let session = store
            .create(
                account.id,
                SessionRoles {
                    is_solver: true,
                    is_admin: false,
                    department: Some("Roads".to_string()),
                },
            )
            .unwrap();

        let loaded = SessionStore::get(&store, &session.id).unwrap().unwrap();
        assert!(loaded.is_solver);
        assert_eq!(loaded.department.as_deref(), Some("Roads"));

        SessionStore::delete(&store, &session.id).unwrap();
        assert!(SessionStore::get(&store, &session.id).unwrap().is_none());
    }
}
