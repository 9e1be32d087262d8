//! Gate decisions through the public API

use crate::common::{ActorFactory, RoleFactory};
use clinic_access::{
    AccessDecision, AccessError, AuthorizationGate, Config, GatePolicy, GateView, ProfileState,
};
use std::sync::Arc;

fn decide(policy: GatePolicy, state: &ProfileState) -> AccessDecision {
    let gate: AuthorizationGate = AuthorizationGate::new(policy);
    gate.decide(state)
}

#[test]
fn test_receptionist_can_book_but_not_delete_clients() {
    let state = ActorFactory::loaded(ActorFactory::with_role(RoleFactory::receptionist()));

    let book = GatePolicy::new().require_permission("appointments", "create");
    let delete = GatePolicy::new().require_permission("clients", "delete");

    assert_eq!(decide(book, &state), AccessDecision::Authorized);
    assert_eq!(decide(delete, &state), AccessDecision::Unauthorized);
}

#[test]
fn test_admin_passes_every_permission_gate() {
    let state = ActorFactory::loaded(ActorFactory::with_role(RoleFactory::admin()));

    for (resource, action) in [("clients", "delete"), ("settings", "update"), ("reports", "export")] {
        let policy = GatePolicy::new().require_permission(resource, action);
        assert_eq!(decide(policy, &state), AccessDecision::Authorized);
    }
}

#[test]
fn test_exclusion_beats_wildcard_permissions() {
    let state = ActorFactory::loaded(ActorFactory::with_role(RoleFactory::admin()));
    let policy = GatePolicy::new()
        .require_permission("clients", "read")
        .exclude_role("ADMIN");

    assert_eq!(decide(policy, &state), AccessDecision::Unauthorized);
}

#[test]
fn test_allowed_roles_then_permissions() {
    let doctor = ActorFactory::loaded(ActorFactory::with_role(RoleFactory::doctor()));
    let receptionist = ActorFactory::loaded(ActorFactory::with_role(RoleFactory::receptionist()));

    let policy = GatePolicy::new()
        .allow_role("doctor")
        .allow_role("receptionist")
        .require_permission("medical_records", "read");

    assert_eq!(decide(policy.clone(), &doctor), AccessDecision::Authorized);
    // Role allowed, permission missing
    assert_eq!(decide(policy, &receptionist), AccessDecision::Unauthorized);
}

#[test]
fn test_system_gate() {
    let admin = ActorFactory::loaded(ActorFactory::with_role(RoleFactory::admin()));
    let doctor = ActorFactory::loaded(ActorFactory::with_role(RoleFactory::doctor()));
    let policy = GatePolicy::new().system_role_only();

    assert_eq!(decide(policy.clone(), &admin), AccessDecision::Authorized);
    assert_eq!(decide(policy, &doctor), AccessDecision::Unauthorized);
}

#[test]
fn test_roleless_and_anonymous_actors() {
    let roleless = ActorFactory::loaded(ActorFactory::roleless());
    let policy = GatePolicy::new().require_permission("clients", "read");

    assert_eq!(decide(policy.clone(), &roleless), AccessDecision::Unauthorized);
    assert_eq!(decide(policy.clone(), &ProfileState::Anonymous), AccessDecision::Unauthorized);
    assert_eq!(decide(policy, &ProfileState::Loading), AccessDecision::Pending);
}

#[test]
fn test_failed_profile_fails_closed() {
    let failed = ProfileState::Failed(Arc::new(AccessError::profile_fetch("backend down")));
    let policy = GatePolicy::new().require_permission("clients", "read");

    assert_eq!(decide(policy, &failed), AccessDecision::Unauthorized);
}

#[test]
fn test_render_views() {
    let guest = ActorFactory::loaded(ActorFactory::with_role(RoleFactory::guest()));
    let policy = GatePolicy::new().require_permission("clients", "read");

    let with_fallback = AuthorizationGate::new(policy.clone()).with_fallback("Access denied");
    assert!(matches!(with_fallback.render(&guest), GateView::Fallback(&"Access denied")));
    assert!(matches!(with_fallback.render(&ProfileState::Loading), GateView::Loading));

    let hidden: AuthorizationGate<&str> =
        AuthorizationGate::new(policy.hide_on_unauthorized()).with_fallback("Access denied");
    assert!(matches!(hidden.render(&guest), GateView::Nothing));
}

#[test]
fn test_gates_from_config() {
    let yaml = r#"
gates:
  medical_records.view:
    allowed_roles: [doctor, admin]
    required_permissions:
      - resource: medical_records
        action: read
  appointments.manage:
    required_permissions:
      - resource: appointments
        action: create
      - resource: appointments
        action: cancel
    require_all_permissions: true
    exclude_roles: [guest]
"#;
    let config = Config::from_yaml_str(yaml).unwrap();
    let receptionist = ActorFactory::loaded(ActorFactory::with_role(RoleFactory::receptionist()));
    let doctor = ActorFactory::loaded(ActorFactory::with_role(RoleFactory::doctor()));

    let records = config.gate("medical_records.view").unwrap().clone();
    let appointments = config.gate("appointments.manage").unwrap().clone();

    assert_eq!(decide(records.clone(), &doctor), AccessDecision::Authorized);
    assert_eq!(decide(records, &receptionist), AccessDecision::Unauthorized);
    assert_eq!(decide(appointments.clone(), &receptionist), AccessDecision::Authorized);
    assert_eq!(decide(appointments, &doctor), AccessDecision::Unauthorized);
}
