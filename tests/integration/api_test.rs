//! User and admin API calls through the full pipeline.

use uuid::Uuid;

use warden_client::services::admin::{DEFAULT_LOG_LIMIT, DEFAULT_USER_LOG_LIMIT};
use warden_client::services::user::DEFAULT_LIMIT;

use crate::helpers::{MockApi, TestApp, user_id};

#[tokio::test]
async fn test_moderator_lists_users() {
    let api = MockApi::spawn().await;
    let app = TestApp::signed_in(&api, "moderator").await;

    let page = app.users.list(DEFAULT_LIMIT, 1).await.unwrap();
    assert_eq!(page.total, 3);
    assert_eq!(page.offset, 1);
    let names: Vec<_> = page.users.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, vec!["moderator", "admin"]);
}

#[tokio::test]
async fn test_forbidden_keeps_session() {
    let api = MockApi::spawn().await;
    let app = TestApp::signed_in(&api, "user").await;

    let err = app.users.list(DEFAULT_LIMIT, 0).await.unwrap_err();
    assert_eq!(
        err.message,
        "Access denied. You do not have permission to perform this action."
    );
    assert!(app.session.is_authenticated());
    assert!(app.navigator.history().is_empty());
}

#[tokio::test]
async fn test_expired_session_forces_logout() {
    let api = MockApi::spawn().await;
    let app = TestApp::signed_in(&api, "admin").await;
    app.session.logout();
    app.session
        .login_succeeded("token-expired", crate::helpers::user("admin"))
        .unwrap();

    let err = app.admin.system_stats().await.unwrap_err();
    assert_eq!(err.message, "Authentication failed. Please login again.");
    assert!(!app.session.is_authenticated());
    assert!(app.session.current_user().is_none());
    assert_eq!(app.navigator.history(), vec!["/login"]);
}

#[tokio::test]
async fn test_admin_stats_and_logs() {
    let api = MockApi::spawn().await;
    let app = TestApp::signed_in(&api, "admin").await;

    let stats = app.admin.system_stats().await.unwrap();
    assert_eq!(stats.total_requests, 42);
    assert_eq!(stats.status_codes.get("401"), Some(&2));

    let logs = app.admin.request_logs(DEFAULT_LOG_LIMIT).await.unwrap();
    assert_eq!(logs.limit, DEFAULT_LOG_LIMIT);
    assert_eq!(logs.logs[0].user_id, Some(Uuid::parse_str(user_id("admin")).unwrap()));
}

#[tokio::test]
async fn test_unrouted_user_logs_is_not_found() {
    let api = MockApi::spawn().await;
    let app = TestApp::signed_in(&api, "admin").await;

    let err = app
        .admin
        .request_logs_by_user(Uuid::new_v4(), DEFAULT_USER_LOG_LIMIT)
        .await
        .unwrap_err();
    assert_eq!(err.message, "The requested resource was not found.");
}

#[tokio::test]
async fn test_delete_user() {
    let api = MockApi::spawn().await;
    let app = TestApp::signed_in(&api, "admin").await;

    let done = app
        .users
        .delete(Uuid::parse_str(user_id("user")).unwrap())
        .await
        .unwrap();
    assert_eq!(done.message, "User deleted successfully");

    let err = app
        .users
        .delete(Uuid::parse_str(user_id("admin")).unwrap())
        .await
        .unwrap_err();
    assert_eq!(err.message, "The requested resource was not found.");
}

#[tokio::test]
async fn test_unclassified_status() {
    let api = MockApi::spawn().await;
    let app = TestApp::signed_in(&api, "user").await;

    let err = app
        .client
        .get::<serde_json::Value>("/broken")
        .await
        .unwrap_err();
    assert_eq!(err.message, "Server Error: 502 - Bad Gateway");
    assert!(app.session.is_authenticated());
}
