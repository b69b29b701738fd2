use std::sync::Arc;
use std::time::Duration;
use warden_authn::memory::InMemoryAccounts;
use warden_authn::{
    AuthConfig, AuthError, Role, SessionService, Sha256Scheme, TokenError, TokenService,
};

fn token_service() -> TokenService {
    TokenService::new(&AuthConfig::new("integration-test-secret")).expect("token service")
}

fn session_service() -> SessionService {
    SessionService::new(
        &AuthConfig::new("integration-test-secret"),
        Arc::new(InMemoryAccounts::new()),
        Arc::new(Sha256Scheme),
    )
    .expect("session service")
}

#[test]
fn fifteen_minute_token_is_valid_until_the_final_second() {
    let tokens = token_service();
    let issued_at = 1_700_000_000;
    let ttl = Duration::from_secs(15 * 60);
    let token = tokens
        .issue_at("jane@example.com", Role::Authenticated, issued_at, ttl)
        .unwrap();

    // T+14m59s: accepted, canonical uppercase role recovered.
    let claims = tokens
        .verify_at(&token, issued_at + 14 * 60 + 59)
        .expect("still valid");
    assert_eq!(claims.sub, "jane@example.com");
    assert_eq!(claims.role, "AUTHENTICATED");

    // T+15m00s: rejected with expiry. The boundary is exclusive.
    let err = tokens.verify_at(&token, issued_at + 15 * 60).unwrap_err();
    assert_eq!(err, TokenError::Expired);
}

#[test]
fn all_token_failures_are_one_opaque_outcome() {
    let service = session_service();
    let valid = service
        .issue_session("jane@example.com", Role::Authenticated)
        .unwrap();

    // Malformed, mis-signed, and (via a zero-clock reissue) expired
    // tokens must be indistinguishable to the caller.
    let foreign = TokenService::new(&AuthConfig::new("some-other-secret"))
        .unwrap()
        .issue("jane@example.com", Role::Authenticated)
        .unwrap();
    let expired = service
        .tokens()
        .issue_at("jane@example.com", Role::Authenticated, 0, Duration::from_secs(1))
        .unwrap();

    for bad in ["garbage", foreign.as_str(), expired.as_str()] {
        let err = service.authenticate(bad).unwrap_err();
        assert!(matches!(err, AuthError::Unauthenticated));
        assert_eq!(err.to_string(), "authentication failed");
    }

    let (subject, role) = service.authenticate(&valid).unwrap();
    assert_eq!(subject, "jane@example.com");
    assert_eq!(role, Role::Authenticated);
}

#[test]
fn authorization_follows_the_role_order() {
    let service = session_service();

    let admin = service.issue_session("root@example.com", Role::Admin).unwrap();
    let manager = service.issue_session("lead@example.com", Role::Manager).unwrap();
    let member = service.issue_session("jane@example.com", Role::Authenticated).unwrap();

    assert!(service.authorize(&admin, Role::Manager).is_ok());
    assert!(service.authorize(&manager, Role::Manager).is_ok());
    assert!(matches!(
        service.authorize(&member, Role::Manager).unwrap_err(),
        AuthError::InsufficientRole { .. }
    ));

    // Verification failures fail closed through authorize as well.
    assert!(matches!(
        service.authorize("garbage", Role::Anonymous).unwrap_err(),
        AuthError::Unauthenticated
    ));
}

#[test]
fn issuance_is_deterministic_under_a_fixed_clock() {
    let tokens = token_service();
    let ttl = Duration::from_secs(600);
    let a = tokens
        .issue_at("jane@example.com", Role::Manager, 1_700_000_000, ttl)
        .unwrap();
    let b = tokens
        .issue_at("jane@example.com", Role::Manager, 1_700_000_000, ttl)
        .unwrap();
    assert_eq!(a, b);
}
