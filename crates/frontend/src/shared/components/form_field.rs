//! Labelled form inputs that show the validation message under the field.

use contracts::shared::validation::ValidationErrors;
use leptos::prelude::*;

/// Message for `field`, if the last validation produced one.
pub fn field_error(errors: RwSignal<ValidationErrors>, field: &'static str) -> Signal<Option<String>> {
    Signal::derive(move || errors.with(|e| e.message_for(field).map(str::to_string)))
}

#[component]
pub fn FieldError(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    move || {
        message
            .get()
            .map(|m| view! { <div class="form__error">{m}</div> })
    }
}

#[component]
pub fn TextField(
    label: &'static str,
    value: RwSignal<String>,
    #[prop(into, optional)]
    error: Signal<Option<String>>,
    #[prop(optional, default = "text")]
    input_type: &'static str,
    #[prop(optional)]
    placeholder: &'static str,
    /// id of a `<datalist>` with suggestions
    #[prop(optional)]
    list: Option<&'static str>,
) -> impl IntoView {
    view! {
        <label class="form__field" class:form__field--invalid=move || error.get().is_some()>
            <span class="form__label">{label}</span>
            <input
                class="form__input"
                type=input_type
                placeholder=placeholder
                list=list
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
            <FieldError message=error />
        </label>
    }
}

/// `options` are (value, label) pairs; an empty first option means "not chosen".
#[component]
pub fn SelectField(
    label: &'static str,
    value: RwSignal<String>,
    #[prop(into)]
    options: Signal<Vec<(String, String)>>,
    #[prop(into, optional)]
    error: Signal<Option<String>>,
) -> impl IntoView {
    view! {
        <label class="form__field" class:form__field--invalid=move || error.get().is_some()>
            <span class="form__label">{label}</span>
            <select
                class="form__input"
                prop:value=move || value.get()
                on:change=move |ev| value.set(event_target_value(&ev))
            >
                <option value="">"Select..."</option>
                {move || options.get().into_iter().map(|(v, l)| {
                    let selected_value = v.clone();
                    view! {
                        <option value=v selected=move || value.get() == selected_value>{l}</option>
                    }
                }).collect_view()}
            </select>
            <FieldError message=error />
        </label>
    }
}

#[component]
pub fn TextAreaField(
    label: &'static str,
    value: RwSignal<String>,
) -> impl IntoView {
    view! {
        <label class="form__field">
            <span class="form__label">{label}</span>
            <textarea
                class="form__input"
                rows="3"
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </label>
    }
}
