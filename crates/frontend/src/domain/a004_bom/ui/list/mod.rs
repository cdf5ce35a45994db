use crate::domain::a004_bom::api;
use crate::domain::a004_bom::ui::sales_order_status::SalesOrderStatusLookup;
use crate::shared::components::table::{format_opt, format_rupees, TableCellMoney};
use crate::shared::components::ui::badge::Badge;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::toast::use_toast;
use contracts::domain::a004_bom::Bom;
use contracts::domain::common::refs::ref_label;
use contracts::domain::common::BadgeVariant;
use contracts::shared::dates::format_date;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

fn bom_sale(b: &Bom) -> String {
    match &b.sale_id {
        Some(r) => r
            .populated()
            .and_then(|s| s.order_id.clone())
            .unwrap_or_else(|| r.id().to_string()),
        None => "-".to_string(),
    }
}

/// (raw material, qty, part cost) as displayed
type MaterialLine = (String, String, String);

fn material_lines(bom: &Bom) -> Vec<MaterialLine> {
    bom.raw_materials
        .iter()
        .map(|rm| {
            (
                ref_label(&rm.item),
                format_opt(rm.quantity, 2),
                rm.total_part_cost.map(format_rupees).unwrap_or_else(|| "-".to_string()),
            )
        })
        .collect()
}

fn bom_breakdown(processes: String, lines: Vec<MaterialLine>, raw_cost: f64) -> impl IntoView {
    let caption = format!("Processes: {}", if processes.is_empty() { "-" } else { processes.as_str() });
    view! {
        <div class="nested">
            <p class="nested__caption">{caption}</p>
            <table class="nested__table">
                <thead>
                    <tr><th>"Raw material"</th><th>"Qty"</th><th>"Part cost"</th></tr>
                </thead>
                <tbody>
                    {lines.into_iter().map(|(name, qty, cost)| view! {
                        <tr><td>{name}</td><td>{qty}</td><td>{cost}</td></tr>
                    }).collect_view()}
                    <tr class="nested__total">
                        <td colspan="2">"Raw material cost"</td>
                        <td>{format_rupees(raw_cost)}</td>
                    </tr>
                </tbody>
            </table>
        </div>
    }
}

#[component]
#[allow(non_snake_case)]
pub fn BomList() -> impl IntoView {
    let toast = use_toast();
    let boms = RwSignal::new(Vec::<Bom>::new());
    let loading = RwSignal::new(false);
    let expanded = RwSignal::new(None::<String>);
    let approving = RwSignal::new(None::<String>);

    let load = move || {
        loading.set(true);
        spawn_local(async move {
            match api::fetch_boms().await {
                Ok(items) => boms.set(items),
                Err(e) => {
                    log::warn!("boms: {}", e);
                    toast.notify_error(e);
                }
            }
            loading.set(false);
        });
    };

    let approve = move |id: String| {
        if approving.get_untracked().is_some() {
            return;
        }
        approving.set(Some(id.clone()));
        spawn_local(async move {
            let result = api::approve_raw_materials(&id).await;
            approving.set(None);
            toast.report(&result, "Raw materials approved");
            if result.is_ok() {
                load();
            }
        });
    };

    load();

    view! {
        <PageFrame page_id="a004_bom--list" category="list">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Bills of materials"</h1>
                    <span class="page__subtitle">{move || format!("{} BOMs", boms.get().len())}</span>
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

            <div class="filter-panel">
                <SalesOrderStatusLookup on_approved=Callback::new(move |_| load()) />
            </div>

            <div class="page__content">
                <Table attr:style="width: 100%; min-width: 900px;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell>"BOM"</TableHeaderCell>
                            <TableHeaderCell>"Name"</TableHeaderCell>
                            <TableHeaderCell>"Finished good"</TableHeaderCell>
                            <TableHeaderCell>"Qty"</TableHeaderCell>
                            <TableHeaderCell>"Sale"</TableHeaderCell>
                            <TableHeaderCell>"Total cost"</TableHeaderCell>
                            <TableHeaderCell>"Inventory"</TableHeaderCell>
                            <TableHeaderCell>"Created"</TableHeaderCell>
                            <TableHeaderCell>""</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || boms.get().into_iter().map(|bom| {
                            let id = bom.id.clone();
                            let id_for_toggle = id.clone();
                            let id_for_approve = id.clone();
                            let id_for_open = id.clone();
                            let is_open = Signal::derive(move || expanded.get().as_deref() == Some(id_for_open.as_str()));
                            let fg = bom.finished_good.clone().unwrap_or_default();
                            let total_cost = bom.total_cost;
                            let approved = bom.is_inventory_approved;
                            let code = bom.bom_id.clone().unwrap_or_else(|| id.clone());
                            let name = bom.bom_name.clone().unwrap_or_else(|| "-".to_string());
                            let item = ref_label(&fg.item);
                            let qty = format_opt(fg.quantity, 0);
                            let sale = bom_sale(&bom);
                            let created = format_date(bom.created_at.as_deref());
                            let processes = StoredValue::new(bom.process_names().join(" → "));
                            let lines = StoredValue::new(material_lines(&bom));
                            let raw_cost = bom.raw_material_cost();
                            let busy = Signal::derive(move || approving.get().as_deref() == Some(id.as_str()));
                            view! {
                                <TableRow>
                                    <TableCell><TableCellLayout>
                                        <a href="#" class="table__link" on:click=move |e| {
                                            e.prevent_default();
                                            let id = id_for_toggle.clone();
                                            expanded.update(|cur| {
                                                *cur = if cur.as_deref() == Some(id.as_str()) { None } else { Some(id) };
                                            });
                                        }>
                                            {code}
                                        </a>
                                    </TableCellLayout></TableCell>
                                    <TableCell><TableCellLayout truncate=true>{name}</TableCellLayout></TableCell>
                                    <TableCell><TableCellLayout truncate=true>{item}</TableCellLayout></TableCell>
                                    <TableCell><TableCellLayout>{qty}</TableCellLayout></TableCell>
                                    <TableCell><TableCellLayout>{sale}</TableCellLayout></TableCell>
                                    <TableCellMoney value=Signal::derive(move || total_cost) bold=true />
                                    <TableCell><TableCellLayout>
                                        {if approved {
                                            view! { <Badge variant=BadgeVariant::Success>"Approved"</Badge> }.into_any()
                                        } else {
                                            view! { <Badge variant=BadgeVariant::Warning>"Awaiting approval"</Badge> }.into_any()
                                        }}
                                    </TableCellLayout></TableCell>
                                    <TableCell><TableCellLayout>{created}</TableCellLayout></TableCell>
                                    <TableCell><TableCellLayout>
                                        {(!approved).then(|| view! {
                                            <Button size=ButtonSize::Small appearance=ButtonAppearance::Primary
                                                disabled=busy
                                                on_click=move |_| approve(id_for_approve.clone())>
                                                "Approve"
                                            </Button>
                                        })}
                                    </TableCellLayout></TableCell>
                                </TableRow>
                                <Show when=move || is_open.get()>
                                    <TableRow class="table__row--nested">
                                        <TableCell attr:colspan="9">
                                            {bom_breakdown(processes.get_value(), lines.get_value(), raw_cost)}
                                        </TableCell>
                                    </TableRow>
                                </Show>
                            }
                        }).collect_view()}
                    </TableBody>
                </Table>
                <Show when=move || !loading.get() && boms.get().is_empty()>
                    <div class="empty-state">"No BOMs"</div>
                </Show>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_material_lines_are_owned_labels() {
        let bom: Bom = serde_json::from_value(json!({
            "_id": "65a1d0000000000000000b01",
            "raw_materials": [
                {"item": {"_id": "65a1c0000000000000000r01", "name": "Steel sheet"}, "quantity": 4, "total_part_cost": 1200},
                {"item": "65a1c0000000000000000r02"},
                {}
            ]
        }))
        .unwrap();

        let lines = material_lines(&bom);
        drop(bom);

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].0, "Steel sheet");
        assert_eq!(lines[0].1, format_opt(Some(4.0), 2));
        assert_eq!(lines[0].2, format_rupees(1200.0));
        assert_eq!(lines[1], ("65a1c0000000000000000r02".to_string(), "-".to_string(), "-".to_string()));
        assert_eq!(lines[2], ("-".to_string(), "-".to_string(), "-".to_string()));
    }
}
