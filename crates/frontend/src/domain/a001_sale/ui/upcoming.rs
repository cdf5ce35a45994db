//! Sales whose delivery falls within the next week.

use chrono::NaiveDate;
use contracts::domain::a001_sale::Sale;
use contracts::domain::common::refs::ref_label;
use contracts::shared::dates::{format_date, is_upcoming, parse_date};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a001_sale::api;
use crate::shared::components::table::format_rupees;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::toast::use_toast;

pub const UPCOMING_WINDOW_DAYS: i64 = 7;

/// Browser-local calendar date.
fn today() -> Option<NaiveDate> {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
}

/// Whole days from `today` to the delivery date; negative when overdue.
pub fn days_until(delivery_date: Option<&str>, today: NaiveDate) -> Option<i64> {
    delivery_date
        .and_then(parse_date)
        .map(|d| (d - today).num_days())
}

pub fn due_label(days: Option<i64>) -> String {
    match days {
        None => "No date".to_string(),
        Some(0) => "Today".to_string(),
        Some(1) => "Tomorrow".to_string(),
        Some(d) if d < 0 => format!("{} days overdue", -d),
        Some(d) => format!("In {} days", d),
    }
}

/// Earliest delivery first; sales within the window come before the rest.
pub fn order_upcoming(mut sales: Vec<Sale>, today: NaiveDate) -> Vec<Sale> {
    sales.sort_by_key(|s| {
        let within = is_upcoming(s.delivery_date.as_deref(), today, UPCOMING_WINDOW_DAYS);
        let days = days_until(s.delivery_date.as_deref(), today).unwrap_or(i64::MAX);
        (!within, days)
    });
    sales
}

#[component]
#[allow(non_snake_case)]
pub fn UpcomingSales() -> impl IntoView {
    let toast = use_toast();
    let sales = RwSignal::new(Vec::<Sale>::new());
    let loading = RwSignal::new(false);

    let load = move || {
        loading.set(true);
        spawn_local(async move {
            match api::fetch_upcoming_sales().await {
                Ok(items) => {
                    let ordered = match today() {
                        Some(day) => order_upcoming(items, day),
                        None => items,
                    };
                    sales.set(ordered);
                }
                Err(e) => {
                    log::warn!("upcoming sales: {}", e);
                    toast.notify_error(e);
                }
            }
            loading.set(false);
        });
    };

    load();

    view! {
        <PageFrame page_id="a001_sale_upcoming--list" category="list">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Upcoming deliveries"</h1>
                    <span class="page__subtitle">
                        {move || format!("{} sales", sales.get().len())}
                    </span>
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

            <div class="page__content">
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell>"Order"</TableHeaderCell>
                            <TableHeaderCell>"Party"</TableHeaderCell>
                            <TableHeaderCell>"Product"</TableHeaderCell>
                            <TableHeaderCell>"Qty"</TableHeaderCell>
                            <TableHeaderCell>"Total"</TableHeaderCell>
                            <TableHeaderCell>"Delivery"</TableHeaderCell>
                            <TableHeaderCell>"Due"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || {
                            let day = today();
                            sales.get().into_iter().map(|sale| {
                                let days = day.and_then(|d| days_until(sale.delivery_date.as_deref(), d));
                                let overdue = days.is_some_and(|d| d < 0);
                                let order = sale.order_id.clone().unwrap_or_else(|| "-".to_string());
                                let party = ref_label(&sale.party);
                                let product = ref_label(&sale.product_id);
                                let qty = format!(
                                    "{} {}",
                                    sale.product_qty.map(|q| q.to_string()).unwrap_or_else(|| "-".to_string()),
                                    sale.uom.clone().unwrap_or_default()
                                );
                                let total = format_rupees(sale.total_with_gst());
                                let delivery = format_date(sale.delivery_date.as_deref());
                                view! {
                                    <TableRow class:table__row--warning=overdue>
                                        <TableCell><TableCellLayout>{order}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{party}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{product}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{qty}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{total}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{delivery}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{due_label(days)}</TableCellLayout></TableCell>
                                    </TableRow>
                                }
                            }).collect_view()
                        }}
                    </TableBody>
                </Table>
                <Show when=move || !loading.get() && sales.get().is_empty()>
                    <div class="empty-state">"No deliveries in the next week"</div>
                </Show>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sale(id: &str, delivery: Option<&str>) -> Sale {
        Sale {
            id: id.to_string(),
            delivery_date: delivery.map(str::to_string),
            ..Sale::default()
        }
    }

    #[test]
    fn test_days_until_and_label() {
        let today = day(2024, 3, 5);
        assert_eq!(days_until(Some("2024-03-08T00:00:00Z"), today), Some(3));
        assert_eq!(days_until(Some("2024-03-03"), today), Some(-2));
        assert_eq!(days_until(None, today), None);
        assert_eq!(due_label(Some(0)), "Today");
        assert_eq!(due_label(Some(1)), "Tomorrow");
        assert_eq!(due_label(Some(3)), "In 3 days");
        assert_eq!(due_label(Some(-2)), "2 days overdue");
        assert_eq!(due_label(None), "No date");
    }

    #[test]
    fn test_order_puts_window_first() {
        let today = day(2024, 3, 5);
        let ordered = order_upcoming(
            vec![
                sale("late", Some("2024-03-30")),
                sale("none", None),
                sale("soon", Some("2024-03-07")),
                sale("overdue", Some("2024-03-01")),
                sale("today", Some("2024-03-05")),
            ],
            today,
        );
        let ids: Vec<&str> = ordered.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["today", "soon", "overdue", "late", "none"]);
    }
}
