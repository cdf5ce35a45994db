pub mod state;

use self::state::create_state;
use crate::domain::a003_production_process::api::{self, ProcessCommand};
use crate::domain::a003_production_process::ui::progress::ProgressPanel;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::detail_tab_label;
use crate::shared::components::table::{format_opt, TableCellCheckbox, TableHeaderCheckbox};
use crate::shared::components::ui::badge::Badge;
use crate::shared::icons::icon;
use crate::shared::list_utils::{get_sort_class, get_sort_indicator};
use crate::shared::page_frame::PageFrame;
use crate::shared::selection;
use crate::shared::toast::use_toast;
use contracts::domain::a003_production_process::{MoveToInventory, ProcessActions, ProductionProcess};
use contracts::domain::common::refs::ref_label;
use contracts::domain::common::Entity;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

fn process_title(p: &ProductionProcess) -> String {
    p.process_name.clone().unwrap_or_else(|| p.id.clone())
}

#[component]
#[allow(non_snake_case)]
pub fn ProductionProcessList() -> impl IntoView {
    let tabs_store =
        use_context::<AppGlobalContext>().expect("AppGlobalContext not found in context");
    let toast = use_toast();
    let state = create_state();
    let progress_for = RwSignal::new(None::<ProductionProcess>);
    let loading = RwSignal::new(false);
    // row id with a command in flight
    let busy_row = RwSignal::new(None::<String>);

    let load = move || {
        loading.set(true);
        spawn_local(async move {
            match api::fetch_processes().await {
                Ok(items) => state.update(|s| s.set_items(items)),
                Err(e) => {
                    log::warn!("production processes: {}", e);
                    toast.notify_error(e);
                }
            }
            loading.set(false);
        });
    };

    let run = move |command: ProcessCommand, id: String| {
        if busy_row.get_untracked().is_some() {
            return;
        }
        busy_row.set(Some(id.clone()));
        spawn_local(async move {
            let result = api::run_command(command, &id).await;
            busy_row.set(None);
            match result {
                Ok(message) => {
                    toast.notify_success(message);
                    load();
                }
                Err(e) => toast.notify_error(e),
            }
        });
    };

    let open_detail = move |p: &ProductionProcess| {
        tabs_store.open_tab(
            &format!("a003_production_process_detail_{}", p.id),
            &detail_tab_label(ProductionProcess::element_name(), &process_title(p)),
        );
    };

    let delete_selected = move || {
        let plan = state.with_untracked(|s| s.bulk_delete_plan());
        if plan.deletable.is_empty() {
            toast.notify_error("Only processes that have not started production can be deleted");
            return;
        }
        let mut prompt = format!("Delete {} process(es)?", plan.deletable.len());
        if plan.blocked > 0 {
            prompt.push_str(&format!(" {} already in production will be kept.", plan.blocked));
        }
        let confirmed = web_sys::window()
            .and_then(|w| w.confirm_with_message(&prompt).ok())
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        spawn_local(async move {
            let result = api::bulk_delete(plan.deletable).await;
            toast.report(&result, "Processes deleted");
            if result.is_ok() {
                state.update(|s| s.selected_ids.clear());
                load();
            }
        });
    };

    let items = Signal::derive(move || state.with(|s| s.visible()));
    let selected = Signal::derive(move || state.with(|s| s.selected_ids.clone()));
    let sort_field = Signal::derive(move || state.with(|s| s.sort_field.clone()));
    let sort_ascending = Signal::derive(move || state.with(|s| s.sort_ascending));
    let toggle_sort = move |field: &'static str| state.update(|s| s.toggle_sort(field));

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

    let on_saved = Callback::new(move |_| {
        progress_for.set(None);
        load();
    });
    let on_cancel = Callback::new(move |_| progress_for.set(None));

    load();

    view! {
        <PageFrame page_id="a003_production_process--list" category="list">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Production status"</h1>
                    <span class="page__subtitle">{move || format!("{} processes", items.get().len())}</span>
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
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| delete_selected()
                        disabled=Signal::derive(move || selected.get().is_empty())
                    >
                        {icon("trash")}
                        {move || format!(" Delete ({})", selected.get().len())}
                    </Button>
                </div>
            </div>

            <div class="filter-panel">
                <input
                    class="form__input"
                    type="search"
                    placeholder="Search process, item or status"
                    prop:value=move || state.with(|s| s.search.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        state.update(|s| s.search = value);
                    }
                />
            </div>

            <div class="page__content page__content--split">
                <div class="table-wrapper">
                    <Table attr:style="width: 100%; min-width: 1000px;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCheckbox
                                    items=items
                                    selected=selected
                                    get_id=Callback::new(|p: ProductionProcess| p.id.clone())
                                    on_change=Callback::new(move |check_all: bool| {
                                        let ids: Vec<String> = items.get_untracked().into_iter().map(|p| p.id).collect();
                                        state.update(|s| {
                                            selection::set_all(&mut s.selected_ids, ids.iter().map(String::as_str), check_all)
                                        });
                                    })
                                />
                                {sort_header("Process", "process_name")}
                                {sort_header("Finished good", "item")}
                                <TableHeaderCell>"Estimated"</TableHeaderCell>
                                <TableHeaderCell>"Remaining"</TableHeaderCell>
                                {sort_header("Progress", "progress")}
                                <TableHeaderCell>"Steps"</TableHeaderCell>
                                {sort_header("Status", "status")}
                                <TableHeaderCell>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {move || items.get().into_iter().map(|p| {
                                let status = p.status();
                                let actions = ProcessActions::of(&p);
                                let id = p.id.clone();
                                let row = StoredValue::new(p.clone());
                                let is_selected = selected.get().contains(&id);
                                let row_busy = {
                                    let id = id.clone();
                                    Signal::derive(move || busy_row.get().as_deref() == Some(id.as_str()))
                                };
                                let command = move |c: ProcessCommand| {
                                    row.with_value(|p| run(c, p.id.clone()))
                                };
                                let item = p.finished_good.as_ref().map(|f| ref_label(&f.item)).unwrap_or_else(|| "-".to_string());
                                let title = process_title(&p);
                                let estimated = format_opt(p.estimated_quantity(), 0);
                                let remaining = format_opt(p.remaining_quantity(), 0);
                                let percent = p.progress_percent();
                                let steps = format!("{}/{}", p.steps_done(), p.processes.len());
                                let badge = status.badge();
                                let status_label = status.label();
                                view! {
                                    <TableRow class:table__row--selected=is_selected>
                                        <TableCellCheckbox
                                            item_id=id.clone()
                                            selected=selected
                                            on_change=Callback::new(move |(id, checked): (String, bool)| {
                                                state.update(|s| selection::toggle(&mut s.selected_ids, &id, checked));
                                            })
                                        />
                                        <TableCell><TableCellLayout>
                                            <a
                                                href="#"
                                                class="table__link"
                                                on:click=move |e| {
                                                    e.prevent_default();
                                                    row.with_value(|p| open_detail(p));
                                                }
                                            >
                                                {title}
                                            </a>
                                        </TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout truncate=true>{item}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{estimated}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{remaining}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>
                                            <div class="progress">
                                                <div class="progress__bar" style=format!("width: {:.0}%", percent)></div>
                                            </div>
                                            <span class="progress__label">{format!("{:.0}%", percent)}</span>
                                        </TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{steps}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>
                                            <Badge variant=badge>{status_label}</Badge>
                                        </TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>
                                            <div class="table__actions">
                                                {actions.request_allocation.then(|| view! {
                                                    <Button size=ButtonSize::Small appearance=ButtonAppearance::Subtle
                                                        disabled=row_busy
                                                        on_click=move |_| command(ProcessCommand::RequestAllocation)>
                                                        "Request allocation"
                                                    </Button>
                                                })}
                                                {actions.start.then(|| view! {
                                                    <Button size=ButtonSize::Small appearance=ButtonAppearance::Primary
                                                        disabled=row_busy
                                                        on_click=move |_| command(ProcessCommand::Start)>
                                                        {actions.start_label()}
                                                    </Button>
                                                })}
                                                {actions.pause.then(|| view! {
                                                    <Button size=ButtonSize::Small appearance=ButtonAppearance::Subtle
                                                        disabled=row_busy
                                                        on_click=move |_| command(ProcessCommand::Pause)>
                                                        "Pause"
                                                    </Button>
                                                })}
                                                {actions.update_progress.then(|| view! {
                                                    <Button size=ButtonSize::Small appearance=ButtonAppearance::Subtle
                                                        on_click=move |_| progress_for.set(Some(row.get_value()))>
                                                        "Progress"
                                                    </Button>
                                                })}
                                                {match actions.move_to_inventory {
                                                    MoveToInventory::Hidden => None,
                                                    MoveToInventory::Enabled => Some(view! {
                                                        <Button size=ButtonSize::Small appearance=ButtonAppearance::Subtle
                                                            disabled=row_busy
                                                            on_click=move |_| command(ProcessCommand::MoveToInventory)>
                                                            "Move to inventory"
                                                        </Button>
                                                    }.into_any()),
                                                    MoveToInventory::Disabled(block) => Some(view! {
                                                        <span title=block.reason()>
                                                            <Button size=ButtonSize::Small appearance=ButtonAppearance::Subtle disabled=true>
                                                                "Move to inventory"
                                                            </Button>
                                                        </span>
                                                    }.into_any()),
                                                }}
                                                {actions.out_finish_goods.then(|| view! {
                                                    <Button size=ButtonSize::Small appearance=ButtonAppearance::Subtle
                                                        disabled=row_busy
                                                        on_click=move |_| command(ProcessCommand::OutFinishGoods)>
                                                        "Out finished goods"
                                                    </Button>
                                                })}
                                            </div>
                                        </TableCellLayout></TableCell>
                                    </TableRow>
                                }
                            }).collect_view()}
                        </TableBody>
                    </Table>
                    <Show when=move || state.with(|s| s.is_loaded && s.visible().is_empty())>
                        <div class="empty-state">"No production processes"</div>
                    </Show>
                </div>

                {move || progress_for.get().map(|p| view! {
                    <ProgressPanel process=p on_saved=on_saved on_cancel=on_cancel />
                })}
            </div>
        </PageFrame>
    }
}
