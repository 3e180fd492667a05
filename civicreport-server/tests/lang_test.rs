//! Tests for the language preference cookie

mod common;

use common::create_test_app;

#[tokio::test]
async fn test_change_lang_sets_cookie_and_returns_to_referrer() {
    let app = create_test_app();

    let response = app
        .server
        .get("/change-lang/hi")
        .add_header("referer", "/issues")
        .await;

    assert_eq!(response.status_code(), 303);
    assert_eq!(response.header("location"), "/issues");

    let cookie = response.maybe_cookie("lang").expect("lang cookie set");
    assert_eq!(cookie.value(), "hi");
}

#[tokio::test]
async fn test_change_lang_defaults_to_root() {
    let app = create_test_app();

    let response = app.server.get("/change-lang/en").await;
    assert_eq!(response.status_code(), 303);
    assert_eq!(response.header("location"), "/");
}

#[tokio::test]
async fn test_change_lang_rejects_garbage() {
    let app = create_test_app();

    let response = app.server.get("/change-lang/%2e%2e%2fetc").await;
    assert_eq!(response.status_code(), 400);
}
