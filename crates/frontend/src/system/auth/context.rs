use contracts::domain::a007_employee::Employee;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};

/// Token presence and the user from `auth/user`.
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub has_token: RwSignal<bool>,
    pub user: RwSignal<Option<Employee>>,
}

impl AuthContext {
    /// Reads the cookie and, when present, loads the current user.
    pub fn new() -> Self {
        let ctx = Self {
            has_token: RwSignal::new(storage::get_access_token().is_some()),
            user: RwSignal::new(None),
        };
        if ctx.has_token.get_untracked() {
            let user = ctx.user;
            spawn_local(async move {
                match api::fetch_current_user().await {
                    Ok(employee) => user.set(Some(employee)),
                    Err(e) => log::warn!("auth/user failed: {}", e),
                }
            });
        }
        ctx
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext not found in component tree")
}
