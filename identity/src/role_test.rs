use super::*;

const ADMIN: &str = "eventspark7@gmail.com";

// =============================================================
// Role::from_stored
// =============================================================

#[test]
fn from_stored_reads_admin() {
    assert_eq!(Role::from_stored(Some("admin")), Role::Admin);
}

#[test]
fn from_stored_defaults_missing_to_user() {
    assert_eq!(Role::from_stored(None), Role::User);
}

#[test]
fn from_stored_defaults_unknown_to_user() {
    assert_eq!(Role::from_stored(Some("superuser")), Role::User);
    assert_eq!(Role::from_stored(Some("")), Role::User);
}

#[test]
fn role_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
    assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
    assert_eq!(Role::Admin.to_string(), "admin");
}

// =============================================================
// derive_role
// =============================================================

#[test]
fn admin_email_overrides_stored_user_role() {
    assert_eq!(derive_role(Some(ADMIN), Role::User, ADMIN), Role::Admin);
}

#[test]
fn admin_email_match_is_case_insensitive() {
    assert_eq!(derive_role(Some("EventSpark7@Gmail.COM"), Role::User, ADMIN), Role::Admin);
}

#[test]
fn other_email_keeps_stored_role() {
    assert_eq!(derive_role(Some("ada@example.com"), Role::User, ADMIN), Role::User);
    assert_eq!(derive_role(Some("ada@example.com"), Role::Admin, ADMIN), Role::Admin);
}

#[test]
fn missing_email_keeps_stored_role() {
    assert_eq!(derive_role(None, Role::User, ADMIN), Role::User);
    assert!(!is_admin_email(None, ADMIN));
}
