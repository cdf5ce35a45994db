use crate::app_shell::AppShell;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::toast::{ToastHost, ToastService};
use crate::system::auth::context::AuthContext;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Provide the AppGlobalContext store to the whole app via context.
    provide_context(AppGlobalContext::new());

    // One toast queue for every page
    provide_context(ToastService::new());

    // Current user, loaded once from `auth/user`
    provide_context(AuthContext::new());

    view! {
        <AppShell />
        <ToastHost />
    }
}
