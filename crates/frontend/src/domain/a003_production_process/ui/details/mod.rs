//! Production process detail: finished good, raw materials and steps.

mod view_model;

use contracts::domain::a003_production_process::ProductionProcess;
use contracts::domain::common::refs::ref_label;
use contracts::shared::dates::format_datetime;
use leptos::prelude::*;
use thaw::*;

use self::view_model::ProcessDetailsVm;
use crate::shared::components::table::format_opt;
use crate::shared::components::ui::badge::Badge;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;

fn sale_order(p: &ProductionProcess) -> String {
    match &p.sale_id {
        Some(r) => r
            .populated()
            .and_then(|s| s.order_id.clone())
            .unwrap_or_else(|| r.id().to_string()),
        None => "-".to_string(),
    }
}

#[component]
pub fn ProductionProcessDetails(id: String, on_close: Callback<()>) -> impl IntoView {
    let vm = ProcessDetailsVm::new(id.clone());

    view! {
        <PageFrame page_id="a003_production_process--detail" category="detail">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">
                        {move || vm.process.get()
                            .and_then(|p| p.process_name)
                            .unwrap_or_else(|| "Production process".to_string())}
                    </h1>
                    {move || vm.process.get().map(|p| {
                        let status = p.status();
                        let (badge, label) = (status.badge(), status.label());
                        view! { <Badge variant=badge>{label}</Badge> }
                    })}
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| vm.load(id.clone())
                        disabled=Signal::derive(move || vm.loading.get())
                    >
                        {icon("refresh")}
                        " Refresh"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                        "Close"
                    </Button>
                </div>
            </div>

            {move || vm.error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            {move || vm.process.get().map(|p| {
                let fg = p.finished_good.clone().unwrap_or_default();
                let sale = sale_order(&p);
                let bom = ref_label(&p.bom);
                let item = ref_label(&fg.item);
                let estimated = format_opt(fg.estimated_quantity, 0);
                let produced = format_opt(fg.produced_quantity, 0);
                let remaining = format_opt(fg.remaining_quantity, 0);
                let final_quantity = format_opt(p.final_produce_quantity, 0);
                let progress = format!("{:.0}%", p.progress_percent());
                let created = format_datetime(p.created_at.as_deref());
                let steps_title = format!("Steps ({}/{})", p.steps_done(), p.processes.len());
                let materials = p
                    .raw_materials
                    .into_iter()
                    .map(|rm| {
                        let item = ref_label(&rm.item);
                        let estimated = format_opt(rm.estimated_quantity, 2);
                        let used = format_opt(rm.used_quantity, 2);
                        let remaining = format_opt(rm.remaining_quantity, 2);
                        view! {
                            <TableRow>
                                <TableCell><TableCellLayout>{item}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{estimated}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{used}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{remaining}</TableCellLayout></TableCell>
                            </TableRow>
                        }
                    })
                    .collect_view();
                let steps = p
                    .processes
                    .into_iter()
                    .map(|step| {
                        let done = step.done;
                        let mark = if done { "✓ " } else { "○ " };
                        view! {
                            <li class="step-list__item" class:step-list__item--done=done>
                                {mark}{step.process}
                            </li>
                        }
                    })
                    .collect_view();
                view! {
                    <div class="page__content">
                        <dl class="detail-grid">
                            <dt>"Sale order"</dt><dd>{sale}</dd>
                            <dt>"BOM"</dt><dd>{bom}</dd>
                            <dt>"Finished good"</dt><dd>{item}</dd>
                            <dt>"Estimated"</dt><dd>{estimated}</dd>
                            <dt>"Produced"</dt><dd>{produced}</dd>
                            <dt>"Remaining"</dt><dd>{remaining}</dd>
                            <dt>"Final quantity"</dt><dd>{final_quantity}</dd>
                            <dt>"Progress"</dt><dd>{progress}</dd>
                            <dt>"Created"</dt><dd>{created}</dd>
                        </dl>

                        <h2 class="section__title">"Raw materials"</h2>
                        <Table attr:style="width: 100%;">
                            <TableHeader>
                                <TableRow>
                                    <TableHeaderCell>"Item"</TableHeaderCell>
                                    <TableHeaderCell>"Estimated"</TableHeaderCell>
                                    <TableHeaderCell>"Used"</TableHeaderCell>
                                    <TableHeaderCell>"Remaining"</TableHeaderCell>
                                </TableRow>
                            </TableHeader>
                            <TableBody>{materials}</TableBody>
                        </Table>

                        <h2 class="section__title">{steps_title}</h2>
                        <ul class="step-list">{steps}</ul>
                    </div>
                }
            })}
        </PageFrame>
    }
}
