//! Records produced quantity for a running process.

use contracts::domain::a003_production_process::{ProductionProcess, ProgressForm};
use contracts::shared::validation::ValidationErrors;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a003_production_process::api;
use crate::shared::components::form_field::{field_error, TextField};
use crate::shared::components::table::format_opt;
use crate::shared::submit_guard::{Submit, SubmitGuard};
use crate::shared::toast::use_toast;

#[component]
pub fn ProgressPanel(
    process: ProductionProcess,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let toast = use_toast();
    let produced = RwSignal::new(String::new());
    let errors = RwSignal::new(ValidationErrors::new());
    let saving = RwSignal::new(false);
    let guard = SubmitGuard::new();

    let title = process.process_name.clone().unwrap_or_else(|| process.id.clone());
    let estimated = format_opt(process.estimated_quantity(), 0);
    let remaining = format_opt(process.remaining_quantity(), 0);
    let process = StoredValue::new(process);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let form = ProgressForm {
            produced_quantity: produced.get_untracked(),
        };
        let (payload, ticket) = match guard.submit(process.with_value(|p| form.validate(p))) {
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
            let result = api::update_progress(&payload).await;
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
                    <h2 class="drawer__title">"Update progress"</h2>
                    <span class="drawer__subtitle">{title}</span>
                </div>
                <dl class="drawer__facts">
                    <dt>"Estimated"</dt><dd>{estimated}</dd>
                    <dt>"Remaining"</dt><dd>{remaining}</dd>
                </dl>
                <TextField label="Produced quantity" value=produced input_type="number"
                    error=field_error(errors, "produced_quantity") />
                <div class="drawer__footer">
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                        "Cancel"
                    </Button>
                    <button class="button button--primary" type="submit" disabled=move || saving.get()>
                        {move || if saving.get() { "Saving..." } else { "Save" }}
                    </button>
                </div>
            </form>
        </div>
    }
}
