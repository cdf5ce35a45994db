//! Assign / re-assign a task panel.

mod view_model;

use contracts::domain::a002_assignment::Assignment;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use self::view_model::AssignFormVm;
use crate::domain::a007_employee::api::{employee_options, fetch_employees};
use crate::shared::components::form_field::{field_error, SelectField, TextAreaField, TextField};
use crate::shared::toast::use_toast;

#[component]
pub fn AssignPanel(
    /// Existing assignment to edit
    #[prop(optional)]
    assignment: Option<Assignment>,
    /// Sale the new task belongs to
    #[prop(optional, into)]
    sale_id: Option<String>,
    /// Shown under the title
    #[prop(optional, into)]
    subtitle: String,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let toast = use_toast();
    let vm = AssignFormVm::new(assignment.as_ref(), sale_id.as_deref());
    let errors = vm.errors;
    let saving = vm.saving;
    let is_edit = vm.is_edit_mode();
    let employees = RwSignal::new(Vec::<(String, String)>::new());

    spawn_local(async move {
        match fetch_employees().await {
            Ok(list) => employees.set(employee_options(&list)),
            Err(e) => toast.notify_error(e),
        }
    });

    let vm_for_save = vm.clone();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        vm_for_save.save_command(toast, on_saved);
    };

    view! {
        <div class="drawer">
            <form class="form" on:submit=on_submit>
                <div class="drawer__header">
                    <h2 class="drawer__title">{if is_edit { "Edit assignment" } else { "Assign task" }}</h2>
                    <span class="drawer__subtitle">{subtitle}</span>
                </div>
                <SelectField label="Employee" value=vm.assined_to options=employees
                    error=field_error(errors, "assined_to") />
                <TextField label="Process" value=vm.assined_process placeholder="e.g. Cutting"
                    error=field_error(errors, "assined_process") />
                <TextAreaField label="Comment" value=vm.assinedby_comment />
                <div class="drawer__footer">
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                        "Cancel"
                    </Button>
                    <button class="button button--primary" type="submit" disabled=move || saving.get()>
                        {move || if saving.get() { "Saving..." } else if is_edit { "Save" } else { "Assign" }}
                    </button>
                </div>
            </form>
        </div>
    }
}
