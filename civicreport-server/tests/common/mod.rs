//! Common test utilities for service integration tests

use std::sync::{Arc, RwLock};

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use chrono::Duration;
use tempfile::TempDir;

use civicreport_server::{
    routes, AppState, Config, InMemoryAccountStore, InMemoryIssueStore, InMemorySessionStore,
    Notifier,
};

/// A notification captured by the mock notifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentNotification {
    /// "status" or "moderation"
    pub kind: &'static str,
    pub to: String,
    pub issue_title: String,
    pub detail: String,
}

/// Mock notifier that captures outgoing notifications
#[derive(Default, Clone)]
pub struct MockNotifier {
    pub sent: Arc<RwLock<Vec<SentNotification>>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the last notification sent to an address
    pub fn last_for(&self, to: &str) -> Option<SentNotification> {
        self.sent
            .read()
            .unwrap()
            .iter()
            .rev()
            .find(|n| n.to == to)
            .cloned()
    }

    pub fn count(&self) -> usize {
        self.sent.read().unwrap().len()
    }
}

impl Notifier for MockNotifier {
    fn status_changed(&self, to: &str, issue_title: &str, status: &str) -> Result<(), String> {
        self.sent.write().unwrap().push(SentNotification {
            kind: "status",
            to: to.to_string(),
            issue_title: issue_title.to_string(),
            detail: status.to_string(),
        });
        Ok(())
    }

    fn post_moderated(&self, to: &str, issue_title: &str, action: &str) -> Result<(), String> {
        self.sent.write().unwrap().push(SentNotification {
            kind: "moderation",
            to: to.to_string(),
            issue_title: issue_title.to_string(),
            detail: action.to_string(),
        });
        Ok(())
    }
}

/// A test server with handles into its in-memory stores
pub struct TestApp {
    pub server: TestServer,
    pub notifier: MockNotifier,
    pub accounts: Arc<InMemoryAccountStore>,
    pub issues: Arc<InMemoryIssueStore>,
    _uploads: TempDir,
}

/// Create a test server backed by in-memory stores and a mock notifier.
/// Cookies persist across requests, so a test behaves like one browser.
pub fn create_test_app() -> TestApp {
    let uploads = tempfile::tempdir().expect("Failed to create upload dir");
    let config = Config {
        upload_dir: uploads.path().to_str().unwrap().to_string(),
        ..Config::default()
    };

    let notifier = MockNotifier::new();
    let accounts = Arc::new(InMemoryAccountStore::new());
    let issues = Arc::new(InMemoryIssueStore::new());
    let sessions = Arc::new(InMemorySessionStore::new(Duration::minutes(
        config.session_ttl_minutes,
    )));

    let state = Arc::new(AppState::new(
        accounts.clone(),
        issues.clone(),
        sessions,
        notifier.clone(),
        config,
    ));

    let server = TestServer::builder()
        .save_cookies()
        .build(routes::create_router(state))
        .expect("Failed to create test server");

    TestApp {
        server,
        notifier,
        accounts,
        issues,
        _uploads: uploads,
    }
}

/// Sign up a citizen; the session cookie lands in the server's cookie jar
pub async fn signup(server: &TestServer, email: &str, password: &str) {
    let response = server
        .post("/signup")
        .form(&[
            ("email", email),
            ("password", password),
            ("confirm_password", password),
        ])
        .await;
    assert_eq!(response.status_code(), 303);
}

/// Log out whoever is currently signed in
pub async fn logout(server: &TestServer) {
    let response = server.post("/logout").await;
    assert_eq!(response.status_code(), 303);
}

/// Submit an issue as the currently signed-in citizen
pub async fn submit_issue(server: &TestServer, title: &str, location: &str, department: &str) {
    let form = MultipartForm::new()
        .add_text("title", title)
        .add_text("location", location)
        .add_text("department", department);

    let response = server.post("/issues").multipart(form).await;
    assert_eq!(response.status_code(), 303);
}

/// Submit an issue with an attached image
pub async fn submit_issue_with_image(
    server: &TestServer,
    title: &str,
    location: &str,
    department: &str,
    file_name: &str,
    bytes: Vec<u8>,
) {
    let form = MultipartForm::new()
        .add_text("title", title)
        .add_text("location", location)
        .add_text("department", department)
        .add_part(
            "image",
            Part::bytes(bytes).file_name(file_name).mime_type("image/jpeg"),
        );

    let response = server.post("/issues").multipart(form).await;
    assert_eq!(response.status_code(), 303);
}

/// Elevate the current browser to a solver session (default dev token)
pub async fn solver_login(server: &TestServer, email: &str, password: &str, department: &str) {
    let response = server
        .post("/login/solver")
        .form(&[
            ("email", email),
            ("password", password),
            ("token", "solver-token-dev"),
            ("department", department),
        ])
        .await;
    assert_eq!(response.status_code(), 303);
}

/// Elevate the current browser to an admin session (default dev secret)
pub async fn admin_login(server: &TestServer, email: &str, password: &str) {
    let response = server
        .post("/admin/login")
        .form(&[
            ("email", email),
            ("password", password),
            ("secret", "admin-secret-dev"),
        ])
        .await;
    assert_eq!(response.status_code(), 303);
}
