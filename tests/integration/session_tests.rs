//! Session state and gate resolution over a live profile source

use crate::common::ProfileJsonFactory;
use clinic_access::config::ProfileSourceConfig;
use clinic_access::{
    AccessDecision, AuthorizationGate, GatePolicy, HttpProfileSource, ProfileCache,
    ProfileState, SessionContext, SessionTokens,
};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn session_for(server: &MockServer) -> (SessionContext, Arc<HttpProfileSource>) {
    let config = ProfileSourceConfig {
        base_url: server.uri(),
        ..ProfileSourceConfig::default()
    };
    let source = Arc::new(HttpProfileSource::new(&config).unwrap());
    source.login(SessionTokens::new("token", None));

    let session = SessionContext::new(
        "session-1",
        source.clone(),
        ProfileCache::new(10, Duration::from_secs(60)),
    );
    (session, source)
}

#[tokio::test]
async fn test_resolve_fetches_once_for_many_gates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ProfileJsonFactory::receptionist()))
        .expect(1)
        .mount(&server)
        .await;

    let (session, _) = session_for(&server).await;

    let book: AuthorizationGate =
        AuthorizationGate::new(GatePolicy::new().require_permission("appointments", "create"));
    let delete: AuthorizationGate =
        AuthorizationGate::new(GatePolicy::new().require_permission("clients", "delete"));

    assert_eq!(book.resolve(&session).await, AccessDecision::Authorized);
    assert_eq!(delete.resolve(&session).await, AccessDecision::Unauthorized);
    assert_eq!(session.current_actor().unwrap().id, "42");
}

#[tokio::test]
async fn test_unrestricted_gate_does_not_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let (session, _) = session_for(&server).await;
    let open: AuthorizationGate = AuthorizationGate::new(GatePolicy::new());

    assert_eq!(open.resolve(&session).await, AccessDecision::Authorized);
    assert!(session.state().is_loading());
}

#[tokio::test]
async fn test_backend_failure_fails_closed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/profile"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let (session, _) = session_for(&server).await;
    let gate: AuthorizationGate =
        AuthorizationGate::new(GatePolicy::new().require_permission("clients", "read"));

    assert_eq!(gate.resolve(&session).await, AccessDecision::Unauthorized);
    assert!(matches!(session.state(), ProfileState::Failed(_)));
}

#[tokio::test]
async fn test_end_session_drops_tokens() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ProfileJsonFactory::admin()))
        .mount(&server)
        .await;

    let (session, source) = session_for(&server).await;
    let gate: AuthorizationGate = AuthorizationGate::new(GatePolicy::new().system_role_only());

    assert_eq!(gate.resolve(&session).await, AccessDecision::Authorized);

    session.end().await;
    assert!(source.tokens().is_none());
    assert_eq!(gate.resolve(&session).await, AccessDecision::Unauthorized);

    // A refetch after logout stays anonymous
    assert!(matches!(session.refetch().await, ProfileState::Anonymous));
}

#[tokio::test]
async fn test_logout_while_resolving_refuses_access() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/profile"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ProfileJsonFactory::admin())
                .set_delay(Duration::from_millis(150)),
        )
        .mount(&server)
        .await;

    let (session, _) = session_for(&server).await;
    let session = Arc::new(session);
    let gate: AuthorizationGate = AuthorizationGate::new(GatePolicy::new().system_role_only());

    let resolving = {
        let session = session.clone();
        let gate = gate.clone();
        tokio::spawn(async move { gate.resolve(&session).await })
    };
    tokio::time::sleep(Duration::from_millis(30)).await;
    session.end().await;

    assert_eq!(resolving.await.unwrap(), AccessDecision::Unauthorized);
    assert!(session.current_actor().is_none());
    assert_eq!(gate.resolve(&session).await, AccessDecision::Unauthorized);
}
