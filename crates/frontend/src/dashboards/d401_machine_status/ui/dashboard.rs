use crate::dashboards::d401_machine_status::api;
use crate::shared::components::stat_card::{CardTone, StatCard};
use crate::shared::components::table::{format_number_int, format_opt};
use crate::shared::components::ui::badge::Badge;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::toast::use_toast;
use contracts::dashboards::d401_machine_status::{MachineRecord, MachineState, MachineSummary};
use contracts::shared::dates::format_datetime;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Faults first, then stopped, idle, running; by name inside a state.
pub fn order_machines(mut records: Vec<MachineRecord>) -> Vec<MachineRecord> {
    let rank = |s: MachineState| match s {
        MachineState::Fault => 0,
        MachineState::Stopped => 1,
        MachineState::Unknown => 2,
        MachineState::Idle => 3,
        MachineState::Running => 4,
    };
    records.sort_by(|a, b| {
        rank(a.state())
            .cmp(&rank(b.state()))
            .then_with(|| a.label().cmp(&b.label()))
    });
    records
}

#[component]
#[allow(non_snake_case)]
pub fn MachineStatusDashboard() -> impl IntoView {
    let toast = use_toast();
    let machines = RwSignal::new(Vec::<MachineRecord>::new());
    let loading = RwSignal::new(false);
    let loaded = RwSignal::new(false);

    let load = move || {
        loading.set(true);
        spawn_local(async move {
            match api::fetch_machine_data().await {
                Ok(records) => {
                    log::info!("machine snapshot: {} machines", records.len());
                    machines.set(order_machines(records));
                    loaded.set(true);
                }
                Err(e) => {
                    log::warn!("machine data: {}", e);
                    toast.notify_error(e);
                }
            }
            loading.set(false);
        });
    };

    let summary = Signal::derive(move || machines.with(|m| MachineSummary::from_records(m)));
    let when_loaded = move |value: String| loaded.get().then_some(value);

    load();

    view! {
        <PageFrame page_id="d401_machine_status--dashboard" category="dashboard">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Machine status"</h1>
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
                <StatCard label="Machines" icon_name="cpu"
                    value=Signal::derive(move || when_loaded(summary.get().total.to_string()))
                    subtitle=Signal::derive(move || {
                        let s = summary.get();
                        Some(format!("{:.0}% running", s.utilization_percent()))
                    }) />
                <StatCard label="Running" icon_name="activity" tone=CardTone::Good
                    value=Signal::derive(move || when_loaded(summary.get().running.to_string()))
                    subtitle=Signal::derive(move || Some(format!("{} idle", summary.get().idle))) />
                <StatCard label="Stopped / fault" icon_name="activity"
                    tone=Signal::derive(move || if summary.get().fault > 0 { CardTone::Bad } else { CardTone::Neutral })
                    value=Signal::derive(move || {
                        let s = summary.get();
                        when_loaded(format!("{} / {}", s.stopped, s.fault))
                    }) />
                <StatCard label="Avg temperature" icon_name="activity" tone=CardTone::Warning
                    value=Signal::derive(move || summary.get().average_temperature.map(|t| format!("{} °C", format_opt(Some(t), 1)))) />
                <StatCard label="Produced" icon_name="production"
                    value=Signal::derive(move || when_loaded(format_number_int(summary.get().total_produced))) />
            </div>

            <div class="page__content">
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell>"Machine"</TableHeaderCell>
                            <TableHeaderCell>"Status"</TableHeaderCell>
                            <TableHeaderCell>"Temperature"</TableHeaderCell>
                            <TableHeaderCell>"Produced"</TableHeaderCell>
                            <TableHeaderCell>"Updated"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || machines.get().into_iter().map(|m| {
                            let state = m.state();
                            let badge = state.badge();
                            let status = state.label();
                            let name = m.label();
                            let temperature = format_opt(m.temperature, 1);
                            let produced = format_opt(m.produced_count, 0);
                            let updated = format_datetime(m.last_updated.as_deref());
                            view! {
                                <TableRow>
                                    <TableCell><TableCellLayout truncate=true>
                                        <strong>{name}</strong>
                                    </TableCellLayout></TableCell>
                                    <TableCell><TableCellLayout>
                                        <Badge variant=badge>{status}</Badge>
                                    </TableCellLayout></TableCell>
                                    <TableCell><TableCellLayout>{temperature}</TableCellLayout></TableCell>
                                    <TableCell><TableCellLayout>{produced}</TableCellLayout></TableCell>
                                    <TableCell><TableCellLayout>{updated}</TableCellLayout></TableCell>
                                </TableRow>
                            }
                        }).collect_view()}
                    </TableBody>
                </Table>
                <Show when=move || loaded.get() && machines.get().is_empty()>
                    <div class="empty-state">"No machines reported"</div>
                </Show>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_puts_faults_first() {
        let records: Vec<MachineRecord> = serde_json::from_value(serde_json::json!([
            {"machine_id": "m3", "machine_name": "Press", "status": "running"},
            {"machine_id": "m1", "machine_name": "Lathe", "status": "fault"},
            {"machine_id": "m2", "machine_name": "Cutter", "status": "running"},
            {"machine_id": "m4", "machine_name": "Drill", "status": "idle"}
        ]))
        .unwrap();
        let ids: Vec<String> = order_machines(records).into_iter().map(|m| m.machine_id).collect();
        assert_eq!(ids, vec!["m1", "m4", "m2", "m3"]);
    }
}
