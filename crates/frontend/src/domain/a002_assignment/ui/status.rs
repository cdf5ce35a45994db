//! Moves a task one step forward: Pending, Under Processing, Completed.

use contracts::domain::a002_assignment::{Assignment, StatusUpdatePayload};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a002_assignment::api;
use crate::shared::components::form_field::TextAreaField;
use crate::shared::components::ui::badge::Badge;
use crate::shared::submit_guard::SubmitGuard;
use crate::shared::toast::use_toast;

#[component]
pub fn StatusPanel(
    assignment: Assignment,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let toast = use_toast();
    let current = assignment.status();
    let next = current.next();
    let comment = RwSignal::new(assignment.assinedto_comment.clone().unwrap_or_default());
    let saving = RwSignal::new(false);
    let guard = SubmitGuard::new();
    let id = assignment.id.clone();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(status) = next else { return };
        let Some(ticket) = guard.try_begin() else {
            return;
        };
        saving.set(true);
        let payload = StatusUpdatePayload::new(status, &comment.get_untracked());
        let id = id.clone();
        spawn_local(async move {
            let result = api::update_status(&id, &payload).await;
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
                    <h2 class="drawer__title">"Update status"</h2>
                    <Badge variant=current.badge()>{current.label()}</Badge>
                </div>
                <TextAreaField label="Comment" value=comment />
                <div class="drawer__footer">
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                        "Cancel"
                    </Button>
                    {match next {
                        Some(status) => view! {
                            <button class="button button--primary" type="submit" disabled=move || saving.get()>
                                {format!("Mark {}", status.label())}
                            </button>
                        }.into_any(),
                        None => view! { <span class="drawer__note">"Task is completed"</span> }.into_any(),
                    }}
                </div>
            </form>
        </div>
    }
}
