//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::navbar::{BRAND, Navbar};
use crate::components::toaster::Toaster;
use crate::pages::login::LoginPage;
use crate::state::auth::{AuthHandle, AuthState};
use crate::state::nav::NavState;
use crate::state::toast::ToastState;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides auth, navigation, and toast contexts, connects the session
/// adapter in the browser, and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::default());
    let nav = RwSignal::new(NavState::default());
    let toasts = RwSignal::new(ToastState::default());

    #[cfg(feature = "hydrate")]
    let adapter = crate::backend::connect(auth, toasts);
    #[cfg(not(feature = "hydrate"))]
    let adapter = None;

    provide_context(AuthHandle::new(auth, adapter));
    provide_context(nav);
    provide_context(toasts);

    view! {
        <Stylesheet id="leptos" href="/pkg/event-spark.css"/>
        <Title text=BRAND/>

        <Router>
            <Navbar/>
            <Routes fallback=BlankPage>
                <Route path=StaticSegment("") view=BlankPage/>
                <Route path=StaticSegment("events") view=BlankPage/>
                <Route path=StaticSegment("login") view=LoginPage/>
            </Routes>
            <Toaster/>
        </Router>
    }
}

/// Content area for routes whose pages live outside this shell.
#[component]
fn BlankPage() -> impl IntoView {
    view! { <main class="page"></main> }
}
