//! HTTP profile source against a mock backend

use crate::common::ProfileJsonFactory;
use clinic_access::config::ProfileSourceConfig;
use clinic_access::{AccessError, HttpProfileSource, ProfileSource, SessionTokens};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn source_for(server: &MockServer) -> HttpProfileSource {
    let config = ProfileSourceConfig {
        base_url: format!("{}/api/", server.uri()),
        timeout_secs: 5,
        ..ProfileSourceConfig::default()
    };
    HttpProfileSource::new(&config).unwrap()
}

fn tokens(access: &str, refresh: Option<&str>) -> SessionTokens {
    SessionTokens::new(access, refresh.map(str::to_string))
}

#[tokio::test]
async fn test_fetch_profile_with_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/profile"))
        .and(header("authorization", "Bearer access-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ProfileJsonFactory::receptionist()))
        .expect(1)
        .mount(&server)
        .await;

    let source = source_for(&server);
    source.login(tokens("access-1", None));

    let actor = assert_ok!(source.fetch_profile().await).unwrap();
    assert_eq!(actor.id, "42");

    let role = actor.role().unwrap();
    assert_eq!(role.name, "Receptionist");
    assert!(!role.is_system);
    assert_eq!(role.permissions.len(), 2);
}

#[tokio::test]
async fn test_no_tokens_is_anonymous_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let source = source_for(&server);
    assert!(source.fetch_profile().await.unwrap().is_none());
}

#[tokio::test]
async fn test_expired_token_is_refreshed_and_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/profile"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .and(body_json(json!({ "refreshToken": "refresh-1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "accessToken": "fresh" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/auth/profile"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ProfileJsonFactory::admin()))
        .expect(1)
        .mount(&server)
        .await;

    let source = source_for(&server);
    source.login(tokens("stale", Some("refresh-1")));

    let actor = source.fetch_profile().await.unwrap().unwrap();
    assert_eq!(actor.id, "a-1");
    assert!(actor.role().unwrap().is_system);

    // The refresh token survives when the backend does not rotate it
    assert_eq!(source.tokens(), Some(tokens("fresh", Some("refresh-1"))));
}

#[tokio::test]
async fn test_rejected_refresh_ends_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/profile"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let source = source_for(&server);
    source.login(tokens("stale", Some("revoked")));

    assert!(source.fetch_profile().await.unwrap().is_none());
    assert!(source.tokens().is_none());
}

#[tokio::test]
async fn test_unauthorized_without_refresh_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/profile"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let source = source_for(&server);
    source.login(tokens("stale", None));

    assert!(source.fetch_profile().await.unwrap().is_none());
    assert!(source.tokens().is_none());
}

#[tokio::test]
async fn test_server_error_is_fetch_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/profile"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database unavailable"))
        .mount(&server)
        .await;

    let source = source_for(&server);
    source.login(tokens("access-1", None));

    let err = assert_err!(source.fetch_profile().await);
    assert!(matches!(err, AccessError::ProfileFetch(_)));
    assert!(err.to_string().contains("database unavailable"));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_malformed_payloads_are_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/profile"))
        .and(header("authorization", "Bearer not-json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/auth/profile"))
        .and(header("authorization", "Bearer blank-role"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(ProfileJsonFactory::blank_role_name()),
        )
        .mount(&server)
        .await;

    let source = source_for(&server);

    source.login(tokens("not-json", None));
    let err = source.fetch_profile().await.unwrap_err();
    assert!(matches!(err, AccessError::Serialization(_)));

    source.login(tokens("blank-role", None));
    let err = source.fetch_profile().await.unwrap_err();
    assert!(matches!(err, AccessError::Validation(_)));
}

#[tokio::test]
async fn test_logout_during_refresh_is_not_undone() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/profile"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "accessToken": "fresh" }))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let source = Arc::new(source_for(&server));
    source.login(tokens("stale", Some("refresh-1")));

    let fetching = {
        let source = source.clone();
        tokio::spawn(async move { source.fetch_profile().await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;
    source.logout();

    let fetched = assert_ok!(fetching.await.unwrap());
    assert!(fetched.is_none());
    assert!(source.tokens().is_none());
}
