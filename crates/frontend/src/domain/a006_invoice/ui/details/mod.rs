//! Invoice lookup by id with line and GST totals.

use contracts::domain::a006_invoice::Invoice;
use contracts::domain::common::refs::ref_label;
use contracts::shared::dates::format_date;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a006_invoice::api;
use crate::shared::api_utils::api_base;
use crate::shared::components::table::{format_opt, format_rupees};
use crate::shared::page_frame::PageFrame;
use crate::shared::toast::use_toast;

/// Absolute link to an uploaded invoice image; relative paths hang off the API host.
pub fn image_href(raw: &str, api_base: &str) -> String {
    let raw = raw.trim();
    if raw.starts_with("http://") || raw.starts_with("https://") {
        return raw.to_string();
    }
    let origin = api_base
        .find("://")
        .and_then(|scheme_end| {
            api_base[scheme_end + 3..]
                .find('/')
                .map(|slash| &api_base[..scheme_end + 3 + slash])
        })
        .unwrap_or(api_base.trim_end_matches('/'));
    format!("{}/{}", origin, raw.trim_start_matches('/'))
}

#[component]
#[allow(non_snake_case)]
pub fn InvoiceLookup() -> impl IntoView {
    let toast = use_toast();
    let invoice_id = RwSignal::new(String::new());
    let invoice = RwSignal::new(None::<Invoice>);
    let loading = RwSignal::new(false);

    let lookup = move || {
        let id = invoice_id.get_untracked().trim().to_string();
        if id.is_empty() || loading.get_untracked() {
            return;
        }
        loading.set(true);
        spawn_local(async move {
            match api::fetch_invoice(&id).await {
                Ok(inv) => invoice.set(Some(inv)),
                Err(e) => {
                    invoice.set(None);
                    toast.notify_error(e);
                }
            }
            loading.set(false);
        });
    };

    view! {
        <PageFrame page_id="a006_invoice--detail" category="detail">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Invoices"</h1>
                </div>
            </div>

            <div class="filter-panel">
                <form class="lookup__form" on:submit=move |ev| {
                    ev.prevent_default();
                    lookup();
                }>
                    <input
                        class="form__input"
                        placeholder="Invoice id"
                        prop:value=move || invoice_id.get()
                        on:input=move |ev| invoice_id.set(event_target_value(&ev))
                    />
                    <button class="button button--primary" type="submit" disabled=move || loading.get()>
                        {move || if loading.get() { "Loading..." } else { "Find" }}
                    </button>
                </form>
            </div>

            {move || invoice.get().map(|inv| {
                let totals = inv.totals();
                let image = inv.invoice_image.clone().filter(|s| !s.trim().is_empty());
                let sale = inv.sale_id.as_ref().map(|r| r.label()).unwrap_or_else(|| "-".to_string());
                let invoice_no = inv.invoice_no.clone().unwrap_or_else(|| inv.id.clone());
                let party = ref_label(&inv.party);
                let date = format_date(inv.created_at.as_deref());
                let rows = inv
                    .items
                    .into_iter()
                    .map(|item| {
                        let t = item.totals();
                        let name = ref_label(&item.item);
                        let qty = format_opt(item.quantity, 0);
                        let price = item.price.map(format_rupees).unwrap_or_else(|| "-".to_string());
                        let gst = item.gst.map(|g| format!("{}%", g)).unwrap_or_else(|| "-".to_string());
                        view! {
                            <TableRow>
                                <TableCell><TableCellLayout>{name}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{qty}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{price}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{gst}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{format_rupees(t.subtotal)}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{format_rupees(t.tax)}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{format_rupees(t.total)}</TableCellLayout></TableCell>
                            </TableRow>
                        }
                    })
                    .collect_view();
                view! {
                    <div class="page__content">
                        <dl class="detail-grid">
                            <dt>"Invoice no"</dt><dd>{invoice_no}</dd>
                            <dt>"Party"</dt><dd>{party}</dd>
                            <dt>"Sale"</dt><dd>{sale}</dd>
                            <dt>"Date"</dt><dd>{date}</dd>
                            <dt>"Image"</dt>
                            <dd>
                                {match image {
                                    Some(raw) => view! {
                                        <a href=image_href(&raw, &api_base()) target="_blank" rel="noopener">"Open"</a>
                                    }.into_any(),
                                    None => view! { <span>"-"</span> }.into_any(),
                                }}
                            </dd>
                        </dl>

                        <Table attr:style="width: 100%;">
                            <TableHeader>
                                <TableRow>
                                    <TableHeaderCell>"Item"</TableHeaderCell>
                                    <TableHeaderCell>"Qty"</TableHeaderCell>
                                    <TableHeaderCell>"Price"</TableHeaderCell>
                                    <TableHeaderCell>"GST"</TableHeaderCell>
                                    <TableHeaderCell>"Subtotal"</TableHeaderCell>
                                    <TableHeaderCell>"Tax"</TableHeaderCell>
                                    <TableHeaderCell>"Total"</TableHeaderCell>
                                </TableRow>
                            </TableHeader>
                            <TableBody>{rows}</TableBody>
                        </Table>

                        <dl class="detail-grid detail-grid--totals">
                            <dt>"Subtotal"</dt><dd>{format_rupees(totals.subtotal)}</dd>
                            <dt>"GST"</dt><dd>{format_rupees(totals.tax)}</dd>
                            <dt>"Total"</dt><dd><strong>{format_rupees(totals.total)}</strong></dd>
                        </dl>
                    </div>
                }
            })}
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::image_href;

    #[test]
    fn test_image_href() {
        let base = "http://localhost:8085/api/";
        assert_eq!(
            image_href("uploads/inv-1.png", base),
            "http://localhost:8085/uploads/inv-1.png"
        );
        assert_eq!(
            image_href("/uploads/inv-1.png", base),
            "http://localhost:8085/uploads/inv-1.png"
        );
        assert_eq!(
            image_href("https://cdn.example.com/i.png", base),
            "https://cdn.example.com/i.png"
        );
    }
}
