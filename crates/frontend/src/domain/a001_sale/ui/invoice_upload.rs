//! Invoice image upload for a sale.

use contracts::domain::a001_sale::Sale;
use contracts::domain::a006_invoice::{InvoiceUpload, ALLOWED_INVOICE_MIME_TYPES, INVOICE_FIELD};
use contracts::shared::validation::ValidationErrors;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use wasm_bindgen::JsCast;
use web_sys::{File, HtmlInputElement};

use crate::domain::a001_sale::api;
use crate::shared::components::form_field::{field_error, FieldError};
use crate::shared::submit_guard::SubmitGuard;
use crate::shared::toast::use_toast;

fn describe(file: &File) -> InvoiceUpload {
    InvoiceUpload {
        file_name: file.name(),
        mime_type: file.type_(),
        size: file.size() as u64,
    }
}

#[component]
pub fn InvoiceUploadPanel(
    sale: Sale,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let toast = use_toast();
    let picked = StoredValue::new_local(None::<File>);
    let file_name = RwSignal::new(None::<String>);
    let errors = RwSignal::new(ValidationErrors::new());
    let saving = RwSignal::new(false);
    let guard = SubmitGuard::new();
    let sale_id = sale.id.clone();
    let order = sale.order_id.clone().unwrap_or_else(|| sale.id.clone());

    let on_pick = move |ev: leptos::ev::Event| {
        let file = ev
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        file_name.set(file.as_ref().map(File::name));
        picked.set_value(file);
        errors.set(ValidationErrors::new());
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let file = picked.get_value();
        let upload = file.as_ref().map(describe);
        if let Err(e) = InvoiceUpload::validate(upload.as_ref()) {
            errors.set(e);
            return;
        }
        let Some(file) = file else { return };
        let Some(ticket) = guard.try_begin() else {
            return;
        };
        saving.set(true);
        let sale_id = sale_id.clone();
        spawn_local(async move {
            let result = api::upload_invoice(&sale_id, &file).await;
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
                    <h2 class="drawer__title">"Upload invoice"</h2>
                    <span class="drawer__subtitle">{order}</span>
                </div>
                <label class="form__field">
                    <span class="form__label">"Invoice image"</span>
                    <input
                        class="form__input"
                        type="file"
                        accept=ALLOWED_INVOICE_MIME_TYPES.join(",")
                        on:change=on_pick
                    />
                    {move || file_name.get().map(|n| view! { <span class="form__hint">{n}</span> })}
                    <FieldError message=field_error(errors, INVOICE_FIELD) />
                </label>
                <div class="drawer__footer">
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                        "Cancel"
                    </Button>
                    <button class="button button--primary" type="submit" disabled=move || saving.get()>
                        {move || if saving.get() { "Uploading..." } else { "Upload" }}
                    </button>
                </div>
            </form>
        </div>
    }
}
