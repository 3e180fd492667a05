//! Tests for issue submission and the gamification award

mod common;

use axum_test::multipart::MultipartForm;
use common::{create_test_app, signup, submit_issue, submit_issue_with_image};
use civicreport_core::{IssueStatus, Level};
use civicreport_server::{AccountStore, IssueStore};

/// Submitting an issue creates it as Pending and awards 10 points plus
/// the first badge
#[tokio::test]
async fn test_first_submission() {
    let app = create_test_app();
    signup(&app.server, "jane@example.com", "janespassword").await;

    submit_issue(&app.server, "Broken streetlight", "12.9,77.6", "Electrical").await;

    let issues = app.issues.list_issues().unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].title, "Broken streetlight");
    assert_eq!(issues[0].status, IssueStatus::Pending);
    assert_eq!(issues[0].department, "Electrical");
    assert!(issues[0].image_path.is_none());

    let account = app
        .accounts
        .get_account_by_email("jane@example.com")
        .unwrap()
        .unwrap();
    assert_eq!(account.points, 10);
    assert_eq!(account.level, Level::Bronze);
    assert!(account.badges.contains("Active Citizen"));
    assert_eq!(issues[0].reporter, account.id);
}

/// An attached image is written under a generated name and recorded
#[tokio::test]
async fn test_submission_with_image() {
    let app = create_test_app();
    signup(&app.server, "jane@example.com", "janespassword").await;

    submit_issue_with_image(
        &app.server,
        "Overflowing bin",
        "near the market",
        "Sanitation",
        "bin.jpg",
        vec![0xFF, 0xD8, 0xFF, 0xE0],
    )
    .await;

    let issues = app.issues.list_issues().unwrap();
    let stored = issues[0].image_path.as_deref().expect("image recorded");
    assert!(stored.ends_with(".jpg"));
    assert_ne!(stored, "bin.jpg");
}

/// Submitting requires a session
#[tokio::test]
async fn test_submission_requires_login() {
    let app = create_test_app();

    let form = MultipartForm::new()
        .add_text("title", "Pothole")
        .add_text("location", "12.9,77.6")
        .add_text("department", "Roads");

    let response = app.server.post("/issues").multipart(form).await;
    assert_eq!(response.status_code(), 303);
    assert_eq!(response.header("location"), "/login");
    assert!(app.issues.list_issues().unwrap().is_empty());
}

/// Required fields are validated
#[tokio::test]
async fn test_submission_missing_title() {
    let app = create_test_app();
    signup(&app.server, "jane@example.com", "janespassword").await;

    let form = MultipartForm::new()
        .add_text("location", "12.9,77.6")
        .add_text("department", "Roads");

    let response = app.server.post("/issues").multipart(form).await;
    assert_eq!(response.status_code(), 400);
    assert!(app.issues.list_issues().unwrap().is_empty());
}
