//! Application shell: auth gate plus the tabbed main layout.

use crate::layout::center::tabs::TabStrip;
use crate::layout::global_context::{AppGlobalContext, Tab as TabData};
use crate::layout::left::sidebar::Sidebar;
use crate::layout::tabs::TabPage;
use crate::layout::Shell;
use crate::system::auth::context::use_auth;
use leptos::logging::log;
use leptos::prelude::*;

/// Sidebar, tab strip and the content of every open tab.
///
/// Syncs the active tab with `?active=...`.
#[component]
fn MainLayout() -> impl IntoView {
    let tabs_store = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    // Initialize router integration. This runs once when the component is created.
    tabs_store.init_router_integration();

    view! {
        <Shell
            left=|| view! { <Sidebar /> }.into_any()
            center=move || {
                view! {
                    <TabStrip />
                    <For
                        each=move || tabs_store.opened.get()
                        key=|tab| tab.key.clone()
                        children=move |tab: TabData| {
                            log!("opening tab content for '{}'", tab.key);
                            view! {
                                <TabPage tab=tab tabs_store=tabs_store />
                            }
                        }
                    />
                }.into_any()
            }
        />
    }
}

/// Shows the console when an `access_token` cookie exists, otherwise a
/// notice (signing in happens outside the console).
#[component]
pub fn AppShell() -> impl IntoView {
    let auth = use_auth();

    view! {
        <Show
            when=move || auth.has_token.get()
            fallback=|| view! {
                <div class="auth-notice">
                    <h1>"Not authenticated"</h1>
                    <p>"Sign in to the ERP to obtain an access token, then reload this page."</p>
                </div>
            }
        >
            <MainLayout />
        </Show>
    }
}
