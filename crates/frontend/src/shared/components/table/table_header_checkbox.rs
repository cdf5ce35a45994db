//! "Select all" checkbox in a table header.

use crate::shared::selection::{header_state, CheckboxState};
use leptos::prelude::event_target_checked;
use leptos::prelude::*;
use std::collections::HashSet;
use thaw::*;
use wasm_bindgen::JsCast;

/// Shows unchecked / checked / indeterminate for the visible rows.
#[component]
pub fn TableHeaderCheckbox<T>(
    #[prop(into)]
    items: Signal<Vec<T>>,

    #[prop(into)]
    selected: Signal<HashSet<String>>,

    get_id: Callback<T, String>,

    /// true = select all, false = clear all
    on_change: Callback<bool>,
) -> impl IntoView
where
    T: Clone + Send + Sync + 'static,
{
    let checkbox_state = Signal::derive(move || {
        let ids: Vec<String> = items.get().into_iter().map(|item| get_id.run(item)).collect();
        selected.with(|sel| header_state(ids.iter().map(String::as_str), sel))
    });

    let checkbox_ref = NodeRef::<leptos::html::Input>::new();

    Effect::new(move |_| {
        if let Some(input) = checkbox_ref.get() {
            let state = checkbox_state.get();
            if let Some(input_el) = input.dyn_ref::<web_sys::HtmlInputElement>() {
                input_el.set_indeterminate(matches!(state, CheckboxState::Indeterminate));
            }
        }
    });

    view! {
        <TableHeaderCell resizable=false class="fixed-checkbox-column">
            <input
                node_ref=checkbox_ref
                type="checkbox"
                class="table__checkbox"
                prop:checked=move || matches!(checkbox_state.get(), CheckboxState::Checked)
                on:change=move |ev| {
                    let checked = event_target_checked(&ev);
                    on_change.run(checked);
                }
            />
        </TableHeaderCell>
    }
}
