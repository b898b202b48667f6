use super::*;
use identity::{AuthUser, Role};

fn signed_in(name: &str, role: Role) -> AuthState {
    AuthState {
        user: Some(AuthUser { id: "u1".to_owned(), name: name.to_owned(), email: "x@example.com".to_owned(), role }),
        loading: false,
    }
}

#[test]
fn loading_hides_auth_controls() {
    assert_eq!(auth_slot(&AuthState::default()), AuthSlot::Loading);
    let loading_admin = AuthState { loading: true, ..signed_in("Ada", Role::Admin) };
    assert_eq!(auth_slot(&loading_admin), AuthSlot::Loading);
}

#[test]
fn settled_without_user_is_signed_out() {
    assert_eq!(auth_slot(&AuthState::signed_out()), AuthSlot::SignedOut);
}

#[test]
fn signed_in_carries_name_and_admin_flag() {
    assert_eq!(
        auth_slot(&signed_in("Ada Lovelace", Role::Admin)),
        AuthSlot::SignedIn { name: "Ada Lovelace".to_owned(), admin: true }
    );
    assert_eq!(auth_slot(&signed_in("Bob", Role::User)), AuthSlot::SignedIn { name: "Bob".to_owned(), admin: false });
}

#[test]
fn admin_link_only_for_admin() {
    let admin = auth_slot(&signed_in("Ada", Role::Admin));
    let member = auth_slot(&signed_in("Bob", Role::User));

    let desktop = nav_links(&admin, Layout::Desktop);
    assert!(desktop.contains(&NavLink { label: "Admin", href: ADMIN_PATH }));
    let mobile = nav_links(&admin, Layout::Mobile);
    assert!(mobile.contains(&NavLink { label: "Admin Dashboard", href: ADMIN_PATH }));

    for slot in [member, AuthSlot::SignedOut, AuthSlot::Loading] {
        for layout in [Layout::Desktop, Layout::Mobile] {
            assert!(nav_links(&slot, layout).iter().all(|l| l.href != ADMIN_PATH));
        }
    }
}

#[test]
fn events_link_always_present() {
    for slot in [AuthSlot::Loading, AuthSlot::SignedOut] {
        assert_eq!(nav_links(&slot, Layout::Desktop)[0], NavLink { label: "Events", href: EVENTS_PATH });
    }
}

#[test]
fn logged_out_state_has_no_admin_link() {
    let slot = auth_slot(&AuthState::signed_out());
    assert_eq!(nav_links(&slot, Layout::Desktop).len(), 1);
}

#[test]
fn greeting_differs_by_layout() {
    assert_eq!(greeting("Ada", Layout::Desktop), "Welcome, Ada");
    assert_eq!(greeting("Ada", Layout::Mobile), "Hello, Ada");
}

#[test]
fn navbar_class_tracks_scroll() {
    assert_eq!(navbar_class(false), "navbar");
    assert_eq!(navbar_class(true), "navbar navbar--scrolled");
}
