//! New role panel with a permission checklist.

use contracts::domain::a008_role::{RoleForm, PERMISSIONS};
use contracts::shared::validation::ValidationErrors;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a008_role::api;
use crate::shared::components::form_field::{field_error, FieldError, TextAreaField, TextField};
use crate::shared::submit_guard::{Submit, SubmitGuard};
use crate::shared::toast::use_toast;

#[component]
pub fn RolePanel(on_saved: Callback<()>, on_cancel: Callback<()>) -> impl IntoView {
    let toast = use_toast();
    let role = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let permissions = RwSignal::new(Vec::<String>::new());
    let errors = RwSignal::new(ValidationErrors::new());
    let saving = RwSignal::new(false);
    let guard = StoredValue::new(SubmitGuard::new());

    let toggle = move |permission: &'static str| {
        permissions.update(|current| {
            let mut form = RoleForm {
                permissions: std::mem::take(current),
                ..Default::default()
            };
            form.toggle_permission(permission);
            *current = form.permissions;
        });
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let form = RoleForm {
            role: role.get_untracked(),
            description: description.get_untracked(),
            permissions: permissions.get_untracked(),
        };
        let (payload, ticket) = match guard.with_value(|g| g.submit(form.validate())) {
            Submit::Invalid(e) => {
                errors.set(e);
                return;
            }
            Submit::InFlight => return,
            Submit::Send(payload, ticket) => (payload, ticket),
        };
        errors.set(ValidationErrors::new());
        saving.set(true);
        spawn_local(async move {
            let result = api::create_role(&payload).await;
            drop(ticket);
            saving.set(false);
            match result {
                Ok(message) => {
                    toast.notify_success(message);
                    on_saved.run(());
                }
                Err(e) => toast.notify_error(e),
            }
        });
    };

    view! {
        <div class="drawer">
            <form class="form" on:submit=on_submit>
                <div class="drawer__header">
                    <h2 class="drawer__title">"New role"</h2>
                </div>
                <TextField label="Role" value=role placeholder="e.g. Supervisor"
                    error=field_error(errors, "role") />
                <TextAreaField label="Description" value=description />
                <fieldset class="form__field">
                    <span class="form__label">"Permissions"</span>
                    {PERMISSIONS.iter().map(|&permission| view! {
                        <label class="form__check">
                            <input
                                type="checkbox"
                                prop:checked=move || permissions.with(|p| p.iter().any(|x| x == permission))
                                on:change=move |_| toggle(permission)
                            />
                            <span>{permission}</span>
                        </label>
                    }).collect_view()}
                    <FieldError message=field_error(errors, "permissions") />
                </fieldset>
                <div class="drawer__footer">
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                        "Cancel"
                    </Button>
                    <button class="button button--primary" type="submit" disabled=move || saving.get()>
                        {move || if saving.get() { "Saving..." } else { "Create" }}
                    </button>
                </div>
            </form>
        </div>
    }
}
