//! Route guards over a restored session.

use warden_auth::NavigationOutcome;

use crate::helpers::{MockApi, PASSWORD, TestApp};

fn redirected(from: &str, to: &str) -> NavigationOutcome {
    NavigationOutcome::Redirected {
        from: from.to_string(),
        to: to.to_string(),
    }
}

fn allowed(path: &str) -> NavigationOutcome {
    NavigationOutcome::Allowed {
        path: path.to_string(),
    }
}

#[tokio::test]
async fn test_guest_waits_for_restore() {
    let api = MockApi::spawn().await;
    let first = TestApp::new(&api);
    first.auth.login("user@example.com", PASSWORD).await.unwrap();

    let app = std::sync::Arc::new(TestApp::restarted(&api, &first));
    let navigation = {
        let app = app.clone();
        tokio::spawn(async move { app.router.navigate("/login").await })
    };

    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    assert!(!navigation.is_finished());

    app.auth.restore_session().await;
    let outcome = navigation.await.unwrap();
    assert_eq!(outcome, redirected("/login", "/dashboard"));
}

#[tokio::test]
async fn test_routes_by_role() {
    let api = MockApi::spawn().await;

    let app = TestApp::signed_in(&api, "user").await;
    assert_eq!(app.router.navigate("/dashboard").await, allowed("/dashboard"));
    assert_eq!(app.router.navigate("/users").await, redirected("/users", "/dashboard"));
    assert_eq!(app.router.navigate("/admin").await, redirected("/admin", "/dashboard"));

    let app = TestApp::signed_in(&api, "moderator").await;
    assert_eq!(app.router.navigate("/users?page=2").await, allowed("/users"));
    assert_eq!(app.router.navigate("/admin").await, allowed("/admin"));

    let app = TestApp::signed_in(&api, "admin").await;
    assert_eq!(app.router.navigate("/admin").await, allowed("/admin"));
    assert_eq!(app.router.navigate("/login").await, redirected("/login", "/dashboard"));
}

#[tokio::test]
async fn test_anonymous_redirected_to_login() {
    let api = MockApi::spawn().await;
    let app = TestApp::new(&api);
    app.auth.restore_session().await;

    assert_eq!(app.router.navigate("/profile").await, redirected("/profile", "/login"));
    assert_eq!(app.router.navigate("/register").await, allowed("/register"));
    assert_eq!(app.navigator.history(), vec!["/login"]);
}

#[tokio::test]
async fn test_logout_then_navigate() {
    let api = MockApi::spawn().await;
    let app = TestApp::signed_in(&api, "moderator").await;
    app.auth.logout();

    assert_eq!(app.router.navigate("/users").await, redirected("/users", "/login"));
    assert_eq!(app.router.navigate("/login").await, allowed("/login"));
    assert!(app.rbac.has_permission("moderator", "users.read"));
}
