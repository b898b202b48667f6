//! Top navigation bar with desktop and mobile layouts.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered on every route. Reads `AuthHandle` for the session state and
//! `RwSignal<NavState>` for local toggles; the only backend call it makes is
//! `logout`.
//!
//! DESIGN
//! ======
//! What to show is decided by the plain functions at the top of this module
//! (`auth_slot`, `nav_links`, `greeting`). The components only turn that
//! model into markup. While auth is loading neither layout offers login or
//! logout; the admin link appears only for an admin user.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::notifications::{NotificationBell, NotificationList};
use crate::components::sign_up_modal::SignUpModal;
use crate::state::auth::{AuthHandle, AuthState};
use crate::state::nav::NavState;
use crate::util::viewport::Layout;

pub const BRAND: &str = "Vignan's Event Spark";
pub const EVENTS_PATH: &str = "/events";
pub const ADMIN_PATH: &str = "/admin/dashboard";
pub const LOGIN_PATH: &str = "/login";

/// What the auth corner of the bar shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthSlot {
    Loading,
    SignedOut,
    SignedIn { name: String, admin: bool },
}

#[must_use]
pub fn auth_slot(state: &AuthState) -> AuthSlot {
    if state.loading {
        return AuthSlot::Loading;
    }
    match &state.user {
        Some(user) => AuthSlot::SignedIn { name: user.name.clone(), admin: state.is_admin() },
        None => AuthSlot::SignedOut,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
}

/// Route links for the given auth slot and layout.
#[must_use]
pub fn nav_links(slot: &AuthSlot, layout: Layout) -> Vec<NavLink> {
    let mut links = vec![NavLink { label: "Events", href: EVENTS_PATH }];
    if matches!(slot, AuthSlot::SignedIn { admin: true, .. }) {
        let label = if layout.is_mobile() { "Admin Dashboard" } else { "Admin" };
        links.push(NavLink { label, href: ADMIN_PATH });
    }
    links
}

#[must_use]
pub fn greeting(name: &str, layout: Layout) -> String {
    match layout {
        Layout::Mobile => format!("Hello, {name}"),
        Layout::Desktop => format!("Welcome, {name}"),
    }
}

#[must_use]
pub fn navbar_class(scrolled: bool) -> &'static str {
    if scrolled { "navbar navbar--scrolled" } else { "navbar" }
}

// =============================================================================
// COMPONENTS
// =============================================================================

#[component]
pub fn Navbar() -> impl IntoView {
    let auth = expect_context::<AuthHandle>();
    let state = auth.state();
    let nav = expect_context::<RwSignal<NavState>>();
    let layout = RwSignal::new(Layout::default());
    let navigate = use_navigate();

    #[cfg(feature = "hydrate")]
    {
        use crate::util::viewport::{current_layout, scroll_y};

        Effect::new(move || {
            layout.set(current_layout());
            nav.maybe_update(|n| n.set_scroll(scroll_y()));
        });
        let resize = window_event_listener(leptos::ev::resize, move |_| {
            let next = current_layout();
            if layout.get_untracked() != next {
                layout.set(next);
            }
        });
        let scroll = window_event_listener(leptos::ev::scroll, move |_| {
            nav.maybe_update(|n| n.set_scroll(scroll_y()));
        });
        on_cleanup(move || {
            resize.remove();
            scroll.remove();
        });
    }

    let on_logout = Callback::new(move |()| {
        let auth = auth.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            auth.logout().await;
            navigate(EVENTS_PATH, NavigateOptions::default());
            nav.update(NavState::close_menu);
        });
    });

    view! {
        <nav class=move || navbar_class(nav.get().scrolled)>
            <div class="navbar__inner">
                <a href="/" class="navbar__brand">{BRAND}</a>
                {move || {
                    if layout.get().is_mobile() {
                        view! { <MobileControls state=state nav=nav/> }.into_any()
                    } else {
                        view! { <DesktopNav state=state nav=nav on_logout=on_logout/> }.into_any()
                    }
                }}
            </div>
            <Show when=move || layout.get().is_mobile()>
                <MobileMenu state=state nav=nav on_logout=on_logout/>
            </Show>
        </nav>
        <Show when=move || nav.get().sign_up_open>
            <SignUpModal on_close=Callback::new(move |()| nav.update(NavState::close_sign_up))/>
        </Show>
    }
}

#[component]
fn DesktopNav(state: RwSignal<AuthState>, nav: RwSignal<NavState>, on_logout: Callback<()>) -> impl IntoView {
    move || {
        let slot = auth_slot(&state.get());
        let links = nav_links(&slot, Layout::Desktop)
            .into_iter()
            .map(|link| view! { <a href=link.href class="navbar__link">{link.label}</a> })
            .collect_view();

        let corner = match slot {
            AuthSlot::Loading => view! { <span class="navbar__loading">"Loading..."</span> }.into_any(),
            AuthSlot::SignedOut => view! {
                <a href=LOGIN_PATH class="navbar__link">"Login"</a>
                <button class="btn btn--primary" on:click=move |_| nav.update(NavState::open_sign_up)>
                    "Sign Up"
                </button>
            }
            .into_any(),
            AuthSlot::SignedIn { name, .. } => view! {
                <div class="navbar__bell-wrap">
                    <NotificationBell on_toggle=Callback::new(move |()| nav.update(NavState::toggle_notifications))/>
                    <Show when=move || nav.get().notifications_open>
                        <NotificationList/>
                    </Show>
                </div>
                <span class="navbar__greeting">{greeting(&name, Layout::Desktop)}</span>
                <button class="btn" on:click=move |_| on_logout.run(())>"Logout"</button>
            }
            .into_any(),
        };

        view! { <div class="navbar__links">{links} {corner}</div> }
    }
}

#[component]
fn MobileControls(state: RwSignal<AuthState>, nav: RwSignal<NavState>) -> impl IntoView {
    let signed_in = move || matches!(auth_slot(&state.get()), AuthSlot::SignedIn { .. });

    view! {
        <div class="navbar__mobile-controls">
            <Show when=signed_in>
                <NotificationBell on_toggle=Callback::new(move |()| nav.update(NavState::toggle_notifications))/>
            </Show>
            <button class="navbar__menu-toggle" title="Menu" on:click=move |_| nav.update(NavState::toggle_menu)>
                {move || if nav.get().menu_open { "✕" } else { "☰" }}
            </button>
        </div>
    }
}

#[component]
fn MobileMenu(state: RwSignal<AuthState>, nav: RwSignal<NavState>, on_logout: Callback<()>) -> impl IntoView {
    let close_menu = move |_: leptos::ev::MouseEvent| nav.update(NavState::close_menu);

    let menu = move || {
        if !nav.get().menu_open {
            return None;
        }
        let slot = auth_slot(&state.get());
        let links = nav_links(&slot, Layout::Mobile)
            .into_iter()
            .map(|link| view! { <a href=link.href class="navbar__menu-link" on:click=close_menu>{link.label}</a> })
            .collect_view();

        let footer = match slot {
            AuthSlot::Loading => view! { <span class="navbar__loading">"Loading..."</span> }.into_any(),
            AuthSlot::SignedOut => view! {
                <a href=LOGIN_PATH class="navbar__menu-link" on:click=close_menu>"Login"</a>
                <button class="btn btn--primary" on:click=move |_| nav.update(NavState::open_sign_up)>
                    "Sign Up"
                </button>
            }
            .into_any(),
            AuthSlot::SignedIn { name, .. } => view! {
                <span class="navbar__greeting">{greeting(&name, Layout::Mobile)}</span>
                <button class="btn" on:click=move |_| on_logout.run(())>"Logout"</button>
            }
            .into_any(),
        };

        Some(view! {
            <div class="navbar__menu">
                {links}
                <div class="navbar__menu-footer">{footer}</div>
            </div>
        })
    };

    let sheet_open = move || nav.get().notifications_open && matches!(auth_slot(&state.get()), AuthSlot::SignedIn { .. });

    view! {
        {menu}
        <Show when=sheet_open>
            <NotificationList full_width=true/>
        </Show>
    }
}

#[cfg(test)]
#[path = "navbar_test.rs"]
mod navbar_test;
