//! Create / edit sale panel.

mod view_model;

use contracts::domain::a001_sale::{GstRate, ModeOfPayment, Sale};
use leptos::prelude::*;
use thaw::*;

use self::view_model::SaleFormVm;
use crate::shared::components::form_field::{field_error, SelectField, TextAreaField, TextField};
use crate::shared::toast::use_toast;

#[component]
pub fn SaleFormPanel(
    /// `None` creates a new sale
    sale: Option<Sale>,
    /// Known parties and products as (id, label), offered as suggestions
    #[prop(into)]
    parties: Signal<Vec<(String, String)>>,
    #[prop(into)]
    products: Signal<Vec<(String, String)>>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let toast = use_toast();
    let vm = SaleFormVm::new(sale.as_ref());
    let errors = vm.errors;
    let saving = vm.saving;
    let is_edit = vm.is_edit_mode();

    let title = match &sale {
        Some(s) => format!("Edit sale {}", s.order_id.clone().unwrap_or_else(|| s.id.clone())),
        None => "New sale".to_string(),
    };

    let gst_options: Vec<(String, String)> = GstRate::ALL
        .iter()
        .map(|r| (r.percent().to_string(), r.label()))
        .collect();
    let mode_options: Vec<(String, String)> = ModeOfPayment::ALL
        .iter()
        .map(|m| (m.as_str().to_string(), m.as_str().to_string()))
        .collect();

    let vm_for_save = vm.clone();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        vm_for_save.save_command(toast, on_saved);
    };

    view! {
        <div class="drawer">
            <form class="form" on:submit=on_submit>
                <div class="drawer__header">
                    <h2 class="drawer__title">{title}</h2>
                </div>

                <datalist id="sale-form-parties">
                    {move || parties.get().into_iter().map(|(id, label)| view! {
                        <option value=id>{label}</option>
                    }).collect_view()}
                </datalist>
                <datalist id="sale-form-products">
                    {move || products.get().into_iter().map(|(id, label)| view! {
                        <option value=id>{label}</option>
                    }).collect_view()}
                </datalist>

                <TextField label="Party" value=vm.party list="sale-form-parties"
                    error=field_error(errors, "party") />
                <TextField label="Product" value=vm.product_id list="sale-form-products"
                    error=field_error(errors, "product_id") />
                <div class="form__row">
                    <TextField label="Price" value=vm.price input_type="number"
                        error=field_error(errors, "price") />
                    <TextField label="Quantity" value=vm.product_qty input_type="number"
                        error=field_error(errors, "product_qty") />
                    <TextField label="UOM" value=vm.uom placeholder="pcs" />
                </div>
                <div class="form__row">
                    <SelectField label="GST" value=vm.gst options=gst_options
                        error=field_error(errors, "GST") />
                    <SelectField label="Mode of payment" value=vm.mode_of_payment options=mode_options
                        error=field_error(errors, "mode_of_payment") />
                </div>
                <TextField label="Terms of delivery" value=vm.terms_of_delivery />
                <TextAreaField label="Comment" value=vm.comment />

                <div class="drawer__footer">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| on_cancel.run(())
                    >
                        "Cancel"
                    </Button>
                    <button class="button button--primary" type="submit" disabled=move || saving.get()>
                        {move || if saving.get() { "Saving..." } else if is_edit { "Save" } else { "Create" }}
                    </button>
                </div>
            </form>
        </div>
    }
}
