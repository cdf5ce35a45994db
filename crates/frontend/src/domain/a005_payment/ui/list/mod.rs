use crate::domain::a005_payment::api;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::detail_tab_label;
use crate::shared::components::stat_card::{CardTone, StatCard};
use crate::shared::components::table::{format_rupees, TableCellMoney};
use crate::shared::components::ui::badge::Badge;
use crate::shared::icons::icon;
use crate::shared::list_utils::{cmp_opt_f64, get_sort_class, get_sort_indicator, sort_list, Sortable};
use crate::shared::page_frame::PageFrame;
use crate::shared::toast::use_toast;
use contracts::domain::a005_payment::{Payment, PaymentSummary};
use contracts::domain::common::{BadgeVariant, Entity};
use contracts::shared::dates::format_date;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::cmp::Ordering;
use thaw::*;

impl Sortable for Payment {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "amount" => cmp_opt_f64(self.amount, other.amount),
            "verified" => self.verified.cmp(&other.verified),
            "created_at" => self.created_at.cmp(&other.created_at),
            _ => Ordering::Equal,
        }
    }
}

/// Verification filter of the payments list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifiedFilter {
    All,
    Verified,
    Pending,
}

impl VerifiedFilter {
    pub fn matches(self, p: &Payment) -> bool {
        match self {
            VerifiedFilter::All => true,
            VerifiedFilter::Verified => p.verified,
            VerifiedFilter::Pending => !p.verified,
        }
    }
}

pub fn filter_payments(items: &[Payment], filter: VerifiedFilter) -> Vec<Payment> {
    items.iter().filter(|p| filter.matches(p)).cloned().collect()
}

#[component]
#[allow(non_snake_case)]
pub fn PaymentList() -> impl IntoView {
    let tabs_store =
        use_context::<AppGlobalContext>().expect("AppGlobalContext not found in context");
    let toast = use_toast();
    let payments = RwSignal::new(Vec::<Payment>::new());
    let loading = RwSignal::new(false);
    let filter = RwSignal::new(VerifiedFilter::All);
    let sort_field = RwSignal::new("created_at".to_string());
    let sort_ascending = RwSignal::new(false);

    let load = move || {
        loading.set(true);
        spawn_local(async move {
            match api::fetch_payments().await {
                Ok(items) => payments.set(items),
                Err(e) => {
                    log::warn!("payments: {}", e);
                    toast.notify_error(e);
                }
            }
            loading.set(false);
        });
    };

    let visible = Signal::derive(move || {
        let mut rows = payments.with(|items| filter_payments(items, filter.get()));
        sort_list(&mut rows, &sort_field.get(), sort_ascending.get());
        rows
    });
    let summary = Signal::derive(move || PaymentSummary::from_payments(&visible.get()));

    let toggle_sort = move |field: &'static str| {
        if sort_field.get_untracked() == field {
            sort_ascending.update(|a| *a = !*a);
        } else {
            sort_field.set(field.to_string());
            sort_ascending.set(true);
        }
    };

    let open_detail = move |p: &Payment| {
        tabs_store.open_tab(
            &format!("a005_payment_detail_{}", p.id),
            &detail_tab_label(Payment::element_name(), &p.display_name()),
        );
    };

    load();

    view! {
        <PageFrame page_id="a005_payment--list" category="list">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Payments"</h1>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load()
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        " Refresh"
                    </Button>
                </div>
            </div>

            <div class="stat-row">
                <StatCard label="Payments" icon_name="payments"
                    value=Signal::derive(move || Some(summary.get().count.to_string())) />
                <StatCard label="Received" icon_name="payments" tone=CardTone::Neutral
                    value=Signal::derive(move || Some(format_rupees(summary.get().total))) />
                <StatCard label="Verified" icon_name="shield" tone=CardTone::Good
                    value=Signal::derive(move || Some(format_rupees(summary.get().verified_total))) />
                <StatCard label="Awaiting verification" icon_name="activity" tone=CardTone::Warning
                    value=Signal::derive(move || Some(format_rupees(summary.get().pending_total()))) />
            </div>

            <div class="filter-panel">
                <label class="filter-panel__field">
                    <span>"Show"</span>
                    <select
                        class="form__input"
                        on:change=move |ev| {
                            filter.set(match event_target_value(&ev).as_str() {
                                "verified" => VerifiedFilter::Verified,
                                "pending" => VerifiedFilter::Pending,
                                _ => VerifiedFilter::All,
                            });
                        }
                    >
                        <option value="all">"All"</option>
                        <option value="verified">"Verified"</option>
                        <option value="pending">"Pending"</option>
                    </select>
                </label>
            </div>

            <div class="page__content">
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell>"Sale"</TableHeaderCell>
                            <TableHeaderCell>"Type"</TableHeaderCell>
                            <TableHeaderCell>"Mode"</TableHeaderCell>
                            <TableHeaderCell>
                                "Amount"
                                <span
                                    class=move || get_sort_class(&sort_field.get(), "amount")
                                    on:click=move |_| toggle_sort("amount")
                                >
                                    {move || get_sort_indicator(&sort_field.get(), "amount", sort_ascending.get())}
                                </span>
                            </TableHeaderCell>
                            <TableHeaderCell>
                                "Verified"
                                <span
                                    class=move || get_sort_class(&sort_field.get(), "verified")
                                    on:click=move |_| toggle_sort("verified")
                                >
                                    {move || get_sort_indicator(&sort_field.get(), "verified", sort_ascending.get())}
                                </span>
                            </TableHeaderCell>
                            <TableHeaderCell>
                                "Date"
                                <span
                                    class=move || get_sort_class(&sort_field.get(), "created_at")
                                    on:click=move |_| toggle_sort("created_at")
                                >
                                    {move || get_sort_indicator(&sort_field.get(), "created_at", sort_ascending.get())}
                                </span>
                            </TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || visible.get().into_iter().map(|p| {
                            let amount = p.amount;
                            let row = StoredValue::new(p.clone());
                            let sale = p.sale_id.as_ref().map(|s| s.label()).unwrap_or_else(|| "-".to_string());
                            view! {
                                <TableRow>
                                    <TableCell><TableCellLayout>
                                        <a href="#" class="table__link" on:click=move |e| {
                                            e.prevent_default();
                                            row.with_value(|p| open_detail(p));
                                        }>{sale}</a>
                                    </TableCellLayout></TableCell>
                                    <TableCell><TableCellLayout>{p.payment_type.clone().unwrap_or_else(|| "-".to_string())}</TableCellLayout></TableCell>
                                    <TableCell><TableCellLayout>{p.mode.clone().unwrap_or_else(|| "-".to_string())}</TableCellLayout></TableCell>
                                    <TableCellMoney value=Signal::derive(move || amount) bold=true />
                                    <TableCell><TableCellLayout>
                                        {if p.verified {
                                            view! { <Badge variant=BadgeVariant::Success>"Verified"</Badge> }.into_any()
                                        } else {
                                            view! { <Badge variant=BadgeVariant::Warning>"Pending"</Badge> }.into_any()
                                        }}
                                    </TableCellLayout></TableCell>
                                    <TableCell><TableCellLayout>{format_date(p.created_at.as_deref())}</TableCellLayout></TableCell>
                                </TableRow>
                            }
                        }).collect_view()}
                    </TableBody>
                </Table>
                <Show when=move || !loading.get() && visible.get().is_empty()>
                    <div class="empty-state">"No payments"</div>
                </Show>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verified_filter() {
        let items: Vec<Payment> = serde_json::from_value(serde_json::json!([
            {"_id": "1", "amount": 100, "verified": true},
            {"_id": "2", "amount": 50}
        ]))
        .unwrap();
        assert_eq!(filter_payments(&items, VerifiedFilter::All).len(), 2);
        assert_eq!(filter_payments(&items, VerifiedFilter::Verified)[0].id, "1");
        assert_eq!(filter_payments(&items, VerifiedFilter::Pending)[0].id, "2");
    }
}
