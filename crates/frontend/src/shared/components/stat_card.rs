use crate::shared::icons::icon;
use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardTone {
    #[default]
    Neutral,
    Good,
    Warning,
    Bad,
}

/// Dashboard tile: icon, label and a pre-formatted value.
#[component]
pub fn StatCard(
    label: &'static str,
    icon_name: &'static str,
    /// `None` while loading
    #[prop(into)]
    value: Signal<Option<String>>,
    #[prop(into, optional)]
    tone: Signal<CardTone>,
    #[prop(into, optional)]
    subtitle: Signal<Option<String>>,
) -> impl IntoView {
    let status_class = move || match tone.get() {
        CardTone::Good => "stat-card stat-card--success",
        CardTone::Bad => "stat-card stat-card--error",
        CardTone::Warning => "stat-card stat-card--warning",
        CardTone::Neutral => "stat-card",
    };

    view! {
        <div class=status_class>
            <div class="stat-card__icon">
                {icon(icon_name)}
            </div>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">
                    {move || value.get().unwrap_or_else(|| "-".to_string())}
                </div>
                {move || subtitle.get().map(|s| view! { <div class="stat-card__subtitle">{s}</div> })}
            </div>
        </div>
    }
}
