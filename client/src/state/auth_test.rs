use super::*;
use identity::{AuthPhase, Role};

fn user(role: Role) -> AuthUser {
    AuthUser { id: "u1".to_owned(), name: "Ada Lovelace".to_owned(), email: "ada@example.com".to_owned(), role }
}

#[test]
fn default_state_is_loading_without_user() {
    let state = AuthState::default();
    assert!(state.loading);
    assert!(state.user.is_none());
    assert!(!state.is_authenticated());
}

#[test]
fn from_snapshot_copies_user_and_loading() {
    let snapshot = AuthSnapshot {
        phase: AuthPhase::Authenticated,
        session: None,
        user: Some(user(Role::User)),
        loading: false,
    };
    let state = AuthState::from(&snapshot);
    assert_eq!(state.user, Some(user(Role::User)));
    assert!(!state.loading);
    assert!(state.is_authenticated());
}

#[test]
fn initial_snapshot_maps_to_default_state() {
    assert_eq!(AuthState::from(&AuthSnapshot::default()), AuthState::default());
}

#[test]
fn is_admin_requires_admin_role() {
    let admin = AuthState { user: Some(user(Role::Admin)), loading: false };
    let member = AuthState { user: Some(user(Role::User)), loading: false };
    assert!(admin.is_admin());
    assert!(!member.is_admin());
    assert!(!AuthState::signed_out().is_admin());
}

#[test]
fn nothing_is_granted_while_loading() {
    let state = AuthState { user: Some(user(Role::Admin)), loading: true };
    assert!(!state.is_authenticated());
    assert!(!state.is_admin());
}

#[test]
fn display_name_comes_from_user() {
    let state = AuthState { user: Some(user(Role::User)), loading: false };
    assert_eq!(state.display_name(), Some("Ada Lovelace"));
    assert_eq!(AuthState::signed_out().display_name(), None);
}
