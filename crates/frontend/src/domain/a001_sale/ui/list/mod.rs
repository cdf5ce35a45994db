pub mod state;

use self::state::create_state;
use crate::domain::a001_sale::api;
use crate::domain::a001_sale::ui::details::SaleFormPanel;
use crate::domain::a001_sale::ui::invoice_upload::InvoiceUploadPanel;
use crate::domain::a001_sale::ui::token::{TokenKind, TokenPanel};
use crate::domain::a002_assignment::ui::details::AssignPanel;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::table::{
    format_opt, format_rupees, TableCellCheckbox, TableCellMoney, TableHeaderCheckbox,
};
use crate::shared::components::ui::badge::Badge;
use crate::shared::icons::icon;
use crate::shared::list_utils::{get_sort_class, get_sort_indicator};
use crate::shared::page_frame::PageFrame;
use crate::shared::selection;
use crate::shared::toast::use_toast;
use contracts::domain::a001_sale::{Sale, SaleActions, SaleStage};
use contracts::domain::common::refs::ref_label;
use contracts::shared::dates::format_date;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Side panel next to the table; one at a time.
#[derive(Clone, Debug)]
enum SalePanel {
    Create,
    Edit(Sale),
    Token(Sale),
    HalfToken(Sale),
    Invoice(Sale),
    Assign(Sale),
}

const STAGES: [SaleStage; 7] = [
    SaleStage::Pending,
    SaleStage::TokenReceived,
    SaleStage::TokenVerified,
    SaleStage::InProduction,
    SaleStage::Dispatched,
    SaleStage::Delivered,
    SaleStage::Completed,
];

fn order_label(sale: &Sale) -> String {
    sale.order_id.clone().unwrap_or_else(|| sale.id.clone())
}

#[component]
#[allow(non_snake_case)]
pub fn SaleList() -> impl IntoView {
    let toast = use_toast();
    let state = create_state();
    let panel = RwSignal::new(None::<SalePanel>);
    let loading = RwSignal::new(false);

    let load_page = move |page: usize| {
        loading.set(true);
        spawn_local(async move {
            let result = match api::fetch_sales(page).await {
                Ok(response) => {
                    let mut applied = Ok(());
                    state.update(|s| applied = s.apply_page(response));
                    applied
                }
                Err(e) => Err(e),
            };
            if let Err(e) = result {
                log::warn!("sales page {}: {}", page, e);
                toast.notify_error(e);
            }
            loading.set(false);
        });
    };
    let reload = move || load_page(state.with_untracked(|s| s.page));

    let on_saved = Callback::new(move |_| {
        panel.set(None);
        reload();
    });
    let on_cancel = Callback::new(move |_| panel.set(None));

    let mark_completed = move |sale: Sale| {
        spawn_local(async move {
            let result = api::mark_completed(&sale.id).await;
            toast.report(&result, "Sale completed");
            if result.is_ok() {
                reload();
            }
        });
    };

    let items = Signal::derive(move || state.with(|s| s.visible()));
    let selected = Signal::derive(move || state.with(|s| s.selected_ids.clone()));
    let sort_field = Signal::derive(move || state.with(|s| s.sort_field.clone()));
    let sort_ascending = Signal::derive(move || state.with(|s| s.sort_ascending));
    let toggle_sort = move |field: &'static str| state.update(|s| s.toggle_sort(field));

    let parties = Signal::derive(move || {
        state.with(|s| s.suggestions(|sale| sale.party.as_ref().map(|p| (p.id().to_string(), p.label()))))
    });
    let products = Signal::derive(move || {
        state.with(|s| {
            s.suggestions(|sale| sale.product_id.as_ref().map(|p| (p.id().to_string(), p.label())))
        })
    });

    let selected_total = Signal::derive(move || {
        state.with(|s| {
            let ids: Vec<&str> = s.items.iter().map(|sale| sale.id.as_str()).collect();
            selection::selected_in_order(ids, &s.selected_ids)
                .iter()
                .filter_map(|id| s.items.iter().find(|sale| sale.id == *id))
                .map(Sale::total_with_gst)
                .sum::<f64>()
        })
    });

    let sort_header = move |label: &'static str, field: &'static str| {
        view! {
            <TableHeaderCell>
                {label}
                <span
                    class=move || get_sort_class(&sort_field.get(), field)
                    style="cursor: pointer; margin-left: 4px;"
                    on:click=move |e| {
                        e.stop_propagation();
                        toggle_sort(field);
                    }
                >
                    {move || get_sort_indicator(&sort_field.get(), field, sort_ascending.get())}
                </span>
            </TableHeaderCell>
        }
    };

    load_page(1);

    view! {
        <PageFrame page_id="a001_sale--list" category="list">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Sales orders"</h1>
                    <span class="page__subtitle">{move || state.with(|s| s.rows_label())}</span>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| panel.set(Some(SalePanel::Create))
                    >
                        {icon("plus")}
                        " New sale"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| reload()
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        " Refresh"
                    </Button>
                </div>
            </div>

            <div class="filter-panel">
                <label class="filter-panel__field">
                    <span>"Stage"</span>
                    <select
                        class="form__input"
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            state.update(|s| {
                                s.stage_filter = STAGES.iter().copied().find(|st| st.label() == value);
                            });
                        }
                    >
                        <option value="">"All"</option>
                        {STAGES.iter().map(|st| view! {
                            <option value=st.label()>{st.label()}</option>
                        }).collect_view()}
                    </select>
                </label>
                <Show when=move || !selected.get().is_empty()>
                    <span class="filter-panel__summary">
                        {move || format!(
                            "Selected: {} · {}",
                            selected.get().len(),
                            format_rupees(selected_total.get())
                        )}
                    </span>
                    <Button
                        size=ButtonSize::Small
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| state.update(|s| s.selected_ids.clear())
                    >
                        "Clear"
                    </Button>
                </Show>
                <PaginationControls
                    current_page=Signal::derive(move || state.with(|s| s.page))
                    total_pages=Signal::derive(move || state.with(|s| s.total_pages))
                    total_count=Signal::derive(move || state.with(|s| s.total_count))
                    on_page_change=Callback::new(move |page| load_page(page))
                />
            </div>

            <div class="page__content page__content--split">
                <div class="table-wrapper">
                    <Table attr:style="width: 100%; min-width: 1100px;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCheckbox
                                    items=items
                                    selected=selected
                                    get_id=Callback::new(|sale: Sale| sale.id.clone())
                                    on_change=Callback::new(move |check_all: bool| {
                                        let ids: Vec<String> = items.get_untracked().into_iter().map(|s| s.id).collect();
                                        state.update(|s| {
                                            selection::set_all(&mut s.selected_ids, ids.iter().map(String::as_str), check_all)
                                        });
                                    })
                                />
                                {sort_header("Order", "order_id")}
                                {sort_header("Party", "party")}
                                {sort_header("Product", "product")}
                                {sort_header("Qty", "product_qty")}
                                {sort_header("Price", "price")}
                                <TableHeaderCell>"GST"</TableHeaderCell>
                                {sort_header("Total", "total")}
                                <TableHeaderCell>"Token"</TableHeaderCell>
                                {sort_header("Stage", "stage")}
                                {sort_header("Delivery", "delivery_date")}
                                <TableHeaderCell>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {move || items.get().into_iter().map(|sale| {
                                let stage = SaleStage::of(&sale);
                                let actions = SaleActions::of(&sale);
                                let is_selected = selected.get().contains(&sale.id);
                                let total = sale.total_with_gst();
                                let token = sale.token_amt;
                                let id = sale.id.clone();
                                let order = order_label(&sale);
                                let party = ref_label(&sale.party);
                                let product = ref_label(&sale.product_id);
                                let qty = format!(
                                    "{} {}",
                                    format_opt(sale.product_qty, 0),
                                    sale.uom.clone().unwrap_or_default()
                                );
                                let gst = sale.gst.map(|g| format!("{}%", g)).unwrap_or_else(|| "-".to_string());
                                let delivery = format_date(sale.delivery_date.as_deref());
                                let row = StoredValue::new(sale);
                                let open = move |make: fn(Sale) -> SalePanel| {
                                    panel.set(Some(make(row.get_value())));
                                };
                                view! {
                                    <TableRow class:table__row--selected=is_selected>
                                        <TableCellCheckbox
                                            item_id=id
                                            selected=selected
                                            on_change=Callback::new(move |(id, checked): (String, bool)| {
                                                state.update(|s| selection::toggle(&mut s.selected_ids, &id, checked));
                                            })
                                        />
                                        <TableCell><TableCellLayout>{order}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout truncate=true>{party}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout truncate=true>{product}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{qty}</TableCellLayout></TableCell>
                                        <TableCellMoney value=Signal::derive(move || row.with_value(|s| s.price)) />
                                        <TableCell><TableCellLayout>{gst}</TableCellLayout></TableCell>
                                        <TableCellMoney value=Signal::derive(move || Some(total)) bold=true />
                                        <TableCellMoney value=Signal::derive(move || token) />
                                        <TableCell><TableCellLayout>
                                            <Badge variant=stage.badge()>{stage.label()}</Badge>
                                        </TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{delivery}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>
                                            <div class="table__actions">
                                                {actions.can_edit.then(|| view! {
                                                    <Button size=ButtonSize::Small appearance=ButtonAppearance::Subtle
                                                        on_click=move |_| open(SalePanel::Edit)>"Edit"</Button>
                                                })}
                                                {actions.can_add_token.then(|| view! {
                                                    <Button size=ButtonSize::Small appearance=ButtonAppearance::Subtle
                                                        on_click=move |_| open(SalePanel::Token)>"Token"</Button>
                                                })}
                                                {actions.can_add_half_payment.then(|| view! {
                                                    <Button size=ButtonSize::Small appearance=ButtonAppearance::Subtle
                                                        on_click=move |_| open(SalePanel::HalfToken)>"Half payment"</Button>
                                                })}
                                                {actions.can_assign.then(|| view! {
                                                    <Button size=ButtonSize::Small appearance=ButtonAppearance::Subtle
                                                        on_click=move |_| open(SalePanel::Assign)>"Assign"</Button>
                                                })}
                                                {actions.can_upload_invoice.then(|| view! {
                                                    <Button size=ButtonSize::Small appearance=ButtonAppearance::Subtle
                                                        on_click=move |_| open(SalePanel::Invoice)>"Invoice"</Button>
                                                })}
                                                {actions.can_mark_completed.then(|| view! {
                                                    <Button size=ButtonSize::Small appearance=ButtonAppearance::Primary
                                                        on_click=move |_| mark_completed(row.get_value())>"Complete"</Button>
                                                })}
                                            </div>
                                        </TableCellLayout></TableCell>
                                    </TableRow>
                                }
                            }).collect_view()}
                        </TableBody>
                    </Table>
                    <Show when=move || state.with(|s| s.is_empty())>
                        <div class="empty-state">"No sales yet"</div>
                    </Show>
                </div>

                {move || panel.get().map(|p| match p {
                    SalePanel::Create => view! {
                        <SaleFormPanel sale=None parties=parties products=products
                            on_saved=on_saved on_cancel=on_cancel />
                    }.into_any(),
                    SalePanel::Edit(sale) => view! {
                        <SaleFormPanel sale=Some(sale) parties=parties products=products
                            on_saved=on_saved on_cancel=on_cancel />
                    }.into_any(),
                    SalePanel::Token(sale) => view! {
                        <TokenPanel sale=sale kind=TokenKind::Token on_saved=on_saved on_cancel=on_cancel />
                    }.into_any(),
                    SalePanel::HalfToken(sale) => view! {
                        <TokenPanel sale=sale kind=TokenKind::HalfPayment on_saved=on_saved on_cancel=on_cancel />
                    }.into_any(),
                    SalePanel::Invoice(sale) => view! {
                        <InvoiceUploadPanel sale=sale on_saved=on_saved on_cancel=on_cancel />
                    }.into_any(),
                    SalePanel::Assign(sale) => {
                        let subtitle = format!("Sale {}", order_label(&sale));
                        view! {
                            <AssignPanel sale_id=sale.id.clone() subtitle=subtitle
                                on_saved=on_saved on_cancel=on_cancel />
                        }.into_any()
                    }
                })}
            </div>
        </PageFrame>
    }
}
