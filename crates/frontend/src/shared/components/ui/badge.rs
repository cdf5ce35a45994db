use contracts::domain::common::BadgeVariant;
use leptos::prelude::*;

/// Status pill coloured by `BadgeVariant`.
#[component]
pub fn Badge(
    #[prop(into)]
    variant: Signal<BadgeVariant>,
    children: Children,
) -> impl IntoView {
    view! {
        <span class=move || variant.get().css_class()>
            {children()}
        </span>
    }
}
