pub mod state;

use self::state::create_state;
use crate::domain::a002_assignment::api;
use crate::domain::a002_assignment::ui::details::AssignPanel;
use crate::domain::a002_assignment::ui::status::StatusPanel;
use crate::shared::components::ui::badge::Badge;
use crate::shared::icons::icon;
use crate::shared::list_utils::{get_sort_class, get_sort_indicator};
use crate::shared::page_frame::PageFrame;
use crate::shared::toast::use_toast;
use contracts::domain::a002_assignment::{Assignment, TaskStatus};
use contracts::domain::common::refs::ref_label;
use contracts::shared::dates::format_date;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[derive(Clone, Debug)]
enum AssignmentPanel {
    Edit(Assignment),
    Status(Assignment),
}

fn sale_label(a: &Assignment) -> String {
    match &a.sale_id {
        Some(r) => r
            .populated()
            .and_then(|s| s.order_id.clone())
            .unwrap_or_else(|| r.id().to_string()),
        None => "-".to_string(),
    }
}

#[component]
#[allow(non_snake_case)]
pub fn AssignmentList() -> impl IntoView {
    let toast = use_toast();
    let state = create_state();
    let panel = RwSignal::new(None::<AssignmentPanel>);
    let loading = RwSignal::new(false);

    let load = move || {
        loading.set(true);
        spawn_local(async move {
            match api::fetch_assignments().await {
                Ok(items) => state.update(|s| {
                    s.items = items;
                    s.is_loaded = true;
                }),
                Err(e) => {
                    log::warn!("assignments: {}", e);
                    toast.notify_error(e);
                }
            }
            loading.set(false);
        });
    };

    let on_saved = Callback::new(move |_| {
        panel.set(None);
        load();
    });
    let on_cancel = Callback::new(move |_| panel.set(None));

    let delete = move |a: Assignment| {
        let confirmed = web_sys::window()
            .and_then(|w| {
                w.confirm_with_message(&format!(
                    "Delete assignment \"{}\"?",
                    a.assined_process.as_deref().unwrap_or(&a.id)
                ))
                .ok()
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        spawn_local(async move {
            let result = api::delete_assignment(&a.id).await;
            toast.report(&result, "Assignment deleted");
            if result.is_ok() {
                load();
            }
        });
    };

    let toggle_sort = move |field: &'static str| state.update(|s| s.toggle_sort(field));
    let sort_field = Signal::derive(move || state.with(|s| s.sort_field.clone()));
    let sort_ascending = Signal::derive(move || state.with(|s| s.sort_ascending));

    let status_options = [TaskStatus::Pending, TaskStatus::UnderProcessing, TaskStatus::Completed];

    load();

    view! {
        <PageFrame page_id="a002_assignment--list" category="list">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Assignments"</h1>
                    <span class="page__subtitle">
                        {move || state.with(|s| s.counts()
                            .iter()
                            .map(|(status, n)| format!("{}: {}", status.label(), n))
                            .collect::<Vec<_>>()
                            .join(" · "))}
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

            <div class="filter-panel">
                <label class="filter-panel__field">
                    <span>"Status"</span>
                    <select
                        class="form__input"
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            state.update(|s| {
                                s.status_filter = status_options
                                    .iter()
                                    .copied()
                                    .find(|st| st.as_flag() == value);
                            });
                        }
                    >
                        <option value="">"All"</option>
                        {status_options.iter().map(|st| view! {
                            <option value=st.as_flag()>{st.label()}</option>
                        }).collect_view()}
                    </select>
                </label>
            </div>

            <div class="page__content page__content--split">
                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Sale"</TableHeaderCell>
                                <TableHeaderCell>
                                    "Assigned to"
                                    <span
                                        class=move || get_sort_class(&sort_field.get(), "assined_to")
                                        on:click=move |_| toggle_sort("assined_to")
                                    >
                                        {move || get_sort_indicator(&sort_field.get(), "assined_to", sort_ascending.get())}
                                    </span>
                                </TableHeaderCell>
                                <TableHeaderCell>
                                    "Process"
                                    <span
                                        class=move || get_sort_class(&sort_field.get(), "assined_process")
                                        on:click=move |_| toggle_sort("assined_process")
                                    >
                                        {move || get_sort_indicator(&sort_field.get(), "assined_process", sort_ascending.get())}
                                    </span>
                                </TableHeaderCell>
                                <TableHeaderCell>"Assigned by"</TableHeaderCell>
                                <TableHeaderCell>
                                    "Status"
                                    <span
                                        class=move || get_sort_class(&sort_field.get(), "status")
                                        on:click=move |_| toggle_sort("status")
                                    >
                                        {move || get_sort_indicator(&sort_field.get(), "status", sort_ascending.get())}
                                    </span>
                                </TableHeaderCell>
                                <TableHeaderCell>
                                    "Created"
                                    <span
                                        class=move || get_sort_class(&sort_field.get(), "created_at")
                                        on:click=move |_| toggle_sort("created_at")
                                    >
                                        {move || get_sort_indicator(&sort_field.get(), "created_at", sort_ascending.get())}
                                    </span>
                                </TableHeaderCell>
                                <TableHeaderCell>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {move || state.with(|s| s.visible()).into_iter().map(|a| {
                                let status = a.status();
                                let for_edit = a.clone();
                                let for_status = a.clone();
                                let for_delete = a.clone();
                                let sale = sale_label(&a);
                                let assined_to = ref_label(&a.assined_to);
                                let process = a.assined_process.clone().unwrap_or_else(|| "-".to_string());
                                let assined_by = ref_label(&a.assined_by);
                                let created = format_date(a.created_at.as_deref());
                                view! {
                                    <TableRow>
                                        <TableCell><TableCellLayout>{sale}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{assined_to}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{process}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{assined_by}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>
                                            <Badge variant=status.badge()>{status.label()}</Badge>
                                        </TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{created}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>
                                            <div class="table__actions">
                                                <Button
                                                    size=ButtonSize::Small
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| panel.set(Some(AssignmentPanel::Edit(for_edit.clone())))
                                                >
                                                    "Edit"
                                                </Button>
                                                <Show when=move || status != TaskStatus::Completed>
                                                    {
                                                        let for_status = for_status.clone();
                                                        view! {
                                                            <Button
                                                                size=ButtonSize::Small
                                                                appearance=ButtonAppearance::Subtle
                                                                on_click=move |_| panel.set(Some(AssignmentPanel::Status(for_status.clone())))
                                                            >
                                                                "Status"
                                                            </Button>
                                                        }
                                                    }
                                                </Show>
                                                <Button
                                                    size=ButtonSize::Small
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| delete(for_delete.clone())
                                                >
                                                    {icon("trash")}
                                                </Button>
                                            </div>
                                        </TableCellLayout></TableCell>
                                    </TableRow>
                                }
                            }).collect_view()}
                        </TableBody>
                    </Table>
                    <Show when=move || state.with(|s| s.is_loaded && s.visible().is_empty())>
                        <div class="empty-state">"No assignments"</div>
                    </Show>
                </div>

                {move || panel.get().map(|p| match p {
                    AssignmentPanel::Edit(a) => {
                        let subtitle = sale_label(&a);
                        view! {
                            <AssignPanel assignment=a subtitle=subtitle on_saved=on_saved on_cancel=on_cancel />
                        }.into_any()
                    }
                    AssignmentPanel::Status(a) => view! {
                        <StatusPanel assignment=a on_saved=on_saved on_cancel=on_cancel />
                    }.into_any(),
                })}
            </div>
        </PageFrame>
    }
}
