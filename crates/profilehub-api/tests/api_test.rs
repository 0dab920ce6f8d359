//! Integration tests for the HTTP surface.

mod helpers;

use axum::http::StatusCode;

#[tokio::test]
async fn test_profile_before_any_refresh_is_placeholder() {
    let app = helpers::TestApp::new(None).await;

    let response = app.request("GET", "/api/profile", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["last_update"].is_null());
    assert_eq!(response.body["social"]["username"], "unknown");
    assert_eq!(response.body["presence"]["status"], "unknown");
    assert_eq!(app.fetches(), 0);
}

#[tokio::test]
async fn test_snapshot_routes_are_cacheable() {
    let app = helpers::TestApp::new(None).await;
    let expected = format!("public, max-age={}", app.config.server.cache_max_age_seconds);

    for path in ["/api/profile", "/api/profile/social", "/api/profile/presence"] {
        let response = app.request("GET", path, None).await;
        assert_eq!(response.status, StatusCode::OK, "{path}");
        assert_eq!(response.header("cache-control"), Some(expected.as_str()), "{path}");
    }
}

#[tokio::test]
async fn test_fragment_routes() {
    let app = helpers::TestApp::new(None).await;

    let social = app.request("GET", "/api/profile/social", None).await;
    assert_eq!(social.body["user_id"], 1610763045u64);

    let presence = app.request("GET", "/api/profile/presence", None).await;
    assert_eq!(presence.body["user_id"], "822804221425614903");
}

#[tokio::test]
async fn test_refresh_route_not_mounted_without_token() {
    let app = helpers::TestApp::new(None).await;

    let response = app.request("POST", "/api/profile/refresh", Some("anything")).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
    assert_eq!(app.fetches(), 0);
}

#[tokio::test]
async fn test_refresh_requires_token() {
    let app = helpers::TestApp::new(Some("s3cret")).await;

    let missing = app.request("POST", "/api/profile/refresh", None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);

    let wrong = app.request("POST", "/api/profile/refresh", Some("guess")).await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.body["error"], "AUTHENTICATION");

    assert_eq!(app.fetches(), 0);
}

#[tokio::test]
async fn test_manual_refresh_returns_new_snapshot() {
    let app = helpers::TestApp::new(Some("s3cret")).await;

    let response = app.request("POST", "/api/profile/refresh", Some("s3cret")).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["last_update"].is_string());
    assert_eq!(response.body["social"]["friends_count"], 42);
    assert_eq!(response.body["presence"]["status"], "online");
    assert_eq!(response.header("cache-control"), Some("no-store"));
    assert_eq!(app.fetches(), 1);

    let after = app.request("GET", "/api/profile", None).await;
    assert_eq!(after.body, response.body);
}

#[tokio::test]
async fn test_health() {
    let app = helpers::TestApp::new(None).await;

    let response = app.request("GET", "/api/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["service"], "profilehub");
    assert_eq!(response.body["social_user_id"], 1610763045u64);
    assert_eq!(response.body["presence_user_id"], "822804221425614903");
    assert!(response.body["time"].is_string());
    assert_eq!(response.header("cache-control"), Some("no-store"));
}

#[tokio::test]
async fn test_health_detailed_reports_refresh_state() {
    let app = helpers::TestApp::new(Some("s3cret")).await;

    let before = app.request("GET", "/api/health/detailed", None).await;
    assert_eq!(before.body["refresh"]["stale"], true);
    assert_eq!(before.body["refresh"]["in_flight"], false);
    assert!(before.body["refresh"]["last_attempt"].is_null());

    app.request("POST", "/api/profile/refresh", Some("s3cret")).await;

    let after = app.request("GET", "/api/health/detailed", None).await;
    assert_eq!(after.body["status"], "ok");
    assert_eq!(after.body["refresh"]["stale"], false);
    assert!(after.body["refresh"]["last_attempt"].is_string());
    assert!(after.body["refresh"]["last_save_error"].is_null());
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let app = helpers::TestApp::new(None).await;

    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/api/profile")
        .header("Origin", "https://portfolio.example")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app.router.clone(), request)
        .await
        .unwrap();

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn test_unknown_route() {
    let app = helpers::TestApp::new(None).await;

    let response = app.request("GET", "/api/nope", None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "No route for /api/nope");
}
