//! BOM and production state of one sales order.

use contracts::domain::a004_bom::BomSalesOrderStatus;
use contracts::domain::common::refs::ref_label;
use contracts::domain::common::BadgeVariant;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a004_bom::api;
use crate::shared::components::ui::badge::Badge;
use crate::shared::toast::use_toast;

#[component]
pub fn SalesOrderStatusLookup(
    /// Fired after a BOM was approved from here
    on_approved: Callback<()>,
) -> impl IntoView {
    let toast = use_toast();
    let sale_id = RwSignal::new(String::new());
    let status = RwSignal::new(None::<BomSalesOrderStatus>);
    let loading = RwSignal::new(false);

    let lookup = move || {
        let id = sale_id.get_untracked().trim().to_string();
        if id.is_empty() || loading.get_untracked() {
            return;
        }
        loading.set(true);
        spawn_local(async move {
            match api::fetch_sales_order_status(&id).await {
                Ok(s) => status.set(Some(s)),
                Err(e) => {
                    status.set(None);
                    toast.notify_error(e);
                }
            }
            loading.set(false);
        });
    };

    let approve = move |bom_id: String| {
        spawn_local(async move {
            let result = api::approve_raw_materials(&bom_id).await;
            toast.report(&result, "Raw materials approved");
            if result.is_ok() {
                on_approved.run(());
                lookup();
            }
        });
    };

    view! {
        <section class="lookup">
            <form class="lookup__form" on:submit=move |ev| {
                ev.prevent_default();
                lookup();
            }>
                <input
                    class="form__input"
                    placeholder="Sale id"
                    prop:value=move || sale_id.get()
                    on:input=move |ev| sale_id.set(event_target_value(&ev))
                />
                <button class="button button--secondary" type="submit" disabled=move || loading.get()>
                    "Check status"
                </button>
            </form>

            {move || status.get().map(|s| {
                let approved = s.approved_count();
                let total = s.boms.len();
                view! {
                    <div class="lookup__result">
                        <p>{format!("BOMs approved: {}/{} · production processes: {}", approved, total, s.production_processes.len())}</p>
                        <ul class="lookup__list">
                            {s.boms.iter().map(|bom| {
                                let id = bom.id.clone();
                                let name = bom.bom_name.clone().unwrap_or_else(|| id.clone());
                                let is_approved = bom.is_inventory_approved;
                                view! {
                                    <li>
                                        {name}" "
                                        {if is_approved {
                                            view! { <Badge variant=BadgeVariant::Success>"Approved"</Badge> }.into_any()
                                        } else {
                                            view! {
                                                <Button size=ButtonSize::Small appearance=ButtonAppearance::Primary
                                                    on_click=move |_| approve(id.clone())>
                                                    "Approve raw materials"
                                                </Button>
                                            }.into_any()
                                        }}
                                    </li>
                                }
                            }).collect_view()}
                        </ul>
                        <ul class="lookup__list">
                            {s.production_processes.iter().map(|p| {
                                let st = p.status();
                                let item = p.finished_good.as_ref().map(|f| ref_label(&f.item)).unwrap_or_else(|| "-".to_string());
                                let name = p.process_name.clone().unwrap_or_else(|| p.id.clone());
                                let (badge, label) = (st.badge(), st.label());
                                view! {
                                    <li>
                                        {name}" · "{item}" "
                                        <Badge variant=badge>{label}</Badge>
                                    </li>
                                }
                            }).collect_view()}
                        </ul>
                    </div>
                }
            })}
        </section>
    }
}
