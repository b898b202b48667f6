//! Notification bell content.
//!
//! There is no notification feed yet: the list is two fixed placeholder
//! entries, and "View all notifications" does nothing.

use leptos::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placeholder {
    pub title: &'static str,
    pub body: &'static str,
}

pub const PLACEHOLDERS: [Placeholder; 2] = [
    Placeholder { title: "New Event Added", body: "A new tech workshop has been added to the calendar." },
    Placeholder { title: "Event Reminder", body: "The annual tech fest starts tomorrow!" },
];

/// Number shown on the bell badge.
#[must_use]
pub fn badge_count() -> usize {
    PLACEHOLDERS.len()
}

/// Bell button with its badge.
#[component]
pub fn NotificationBell(on_toggle: Callback<()>) -> impl IntoView {
    view! {
        <button class="navbar__bell" title="Notifications" on:click=move |_| on_toggle.run(())>
            "🔔"
            <span class="navbar__badge">{badge_count()}</span>
        </button>
    }
}

/// Placeholder list, used by both the desktop dropdown and the mobile sheet.
#[component]
pub fn NotificationList(#[prop(optional)] full_width: bool) -> impl IntoView {
    let class = if full_width { "notifications notifications--sheet" } else { "notifications notifications--dropdown" };
    view! {
        <div class=class>
            <h3 class="notifications__title">"Notifications"</h3>
            <ul class="notifications__list">
                {PLACEHOLDERS
                    .iter()
                    .map(|n| {
                        view! {
                            <li class="notifications__item">
                                <p class="notifications__item-title">{n.title}</p>
                                <p class="notifications__item-body">{n.body}</p>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
            <button class="notifications__all" type="button">"View all notifications"</button>
        </div>
    }
}

#[cfg(test)]
#[path = "notifications_test.rs"]
mod notifications_test;
