//! Tests for owner edits and deletes

mod common;

use common::{create_test_app, logout, signup, submit_issue};
use civicreport_core::IssueStatus;
use civicreport_server::IssueStore;

#[tokio::test]
async fn test_owner_can_edit() {
    let app = create_test_app();
    signup(&app.server, "jane@example.com", "janespassword").await;
    submit_issue(&app.server, "Pothole", "12.9,77.6", "Roads").await;

    let response = app
        .server
        .post("/posts/1/edit")
        .form(&[("title", "Large pothole"), ("status", "Resolved")])
        .await;
    assert_eq!(response.status_code(), 303);

    let issues = app.issues.list_issues().unwrap();
    assert_eq!(issues[0].title, "Large pothole");
    assert_eq!(issues[0].status, IssueStatus::Resolved);
    // Untouched fields survive
    assert_eq!(issues[0].location, "12.9,77.6");
}

/// A non-owner citizen gets 403 and the issue is unchanged
#[tokio::test]
async fn test_non_owner_cannot_edit() {
    let app = create_test_app();
    signup(&app.server, "jane@example.com", "janespassword").await;
    submit_issue(&app.server, "Pothole", "12.9,77.6", "Roads").await;
    logout(&app.server).await;

    signup(&app.server, "mallory@example.com", "malloryspass").await;
    let response = app
        .server
        .post("/posts/1/edit")
        .form(&[("title", "Hijacked")])
        .await;
    assert_eq!(response.status_code(), 403);

    let issues = app.issues.list_issues().unwrap();
    assert_eq!(issues[0].title, "Pothole");
}

#[tokio::test]
async fn test_non_owner_cannot_delete() {
    let app = create_test_app();
    signup(&app.server, "jane@example.com", "janespassword").await;
    submit_issue(&app.server, "Pothole", "12.9,77.6", "Roads").await;
    logout(&app.server).await;

    signup(&app.server, "mallory@example.com", "malloryspass").await;
    let response = app.server.post("/posts/1/delete").await;
    assert_eq!(response.status_code(), 403);
    assert_eq!(app.issues.list_issues().unwrap().len(), 1);
}

#[tokio::test]
async fn test_owner_can_delete() {
    let app = create_test_app();
    signup(&app.server, "jane@example.com", "janespassword").await;
    submit_issue(&app.server, "Pothole", "12.9,77.6", "Roads").await;

    let response = app.server.post("/posts/1/delete").await;
    assert_eq!(response.status_code(), 303);
    assert!(app.issues.list_issues().unwrap().is_empty());
}

#[tokio::test]
async fn test_edit_unknown_status_rejected() {
    let app = create_test_app();
    signup(&app.server, "jane@example.com", "janespassword").await;
    submit_issue(&app.server, "Pothole", "12.9,77.6", "Roads").await;

    let response = app
        .server
        .post("/posts/1/edit")
        .form(&[("status", "Closed")])
        .await;
    assert_eq!(response.status_code(), 400);

    let issues = app.issues.list_issues().unwrap();
    assert_eq!(issues[0].status, IssueStatus::Pending);
}

#[tokio::test]
async fn test_edit_missing_issue_is_404() {
    let app = create_test_app();
    signup(&app.server, "jane@example.com", "janespassword").await;

    let response = app
        .server
        .post("/posts/99/edit")
        .form(&[("title", "Ghost")])
        .await;
    assert_eq!(response.status_code(), 404);
}
