use crate::dashboards::d400_sensors::api;
use crate::dashboards::d400_sensors::storage::LocalStorageCounterStore;
use crate::shared::api_utils::api_base;
use crate::shared::components::stat_card::StatCard;
use crate::shared::components::table::format_opt;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::socket::{socket_url, SocketIoClient, SocketStatus};
use crate::shared::toast::use_toast;
use contracts::dashboards::d400_sensors::{
    Actuator, ControlDataUpdate, DeviceDataRecord, SensorReadings, UsageCounters, JOIN_EVENT,
    UPDATE_EVENT,
};
use contracts::shared::dates::format_datetime;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::Value;
use thaw::*;

/// Most recent history row by `createdAt`.
pub fn latest_record(records: &[DeviceDataRecord]) -> Option<&DeviceDataRecord> {
    records.iter().max_by(|a, b| a.created_at.cmp(&b.created_at))
}

/// First event argument as a telemetry update, if it parses to anything.
pub fn parse_update(args: &[Value]) -> Option<ControlDataUpdate> {
    let first = args.first()?;
    match serde_json::from_value::<ControlDataUpdate>(first.clone()) {
        Ok(update) if !update.is_empty() => Some(update),
        Ok(_) => None,
        Err(e) => {
            log::warn!("ignoring malformed {}: {}", UPDATE_EVENT, e);
            None
        }
    }
}

fn switch_label(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "ON",
        Some(false) => "OFF",
        None => "-",
    }
}

#[component]
#[allow(non_snake_case)]
pub fn SensorsDashboard() -> impl IntoView {
    let toast = use_toast();
    let readings = RwSignal::new(SensorReadings::default());
    let counters = RwSignal::new(
        LocalStorageCounterStore::open()
            .map(|store| UsageCounters::load(&store))
            .unwrap_or_default(),
    );
    let status = RwSignal::new(SocketStatus::Connecting);
    let history = RwSignal::new(Vec::<DeviceDataRecord>::new());
    let history_loading = RwSignal::new(false);
    let pending = RwSignal::new(None::<Actuator>);

    let persist = move |c: UsageCounters| {
        if let Some(mut store) = LocalStorageCounterStore::open() {
            c.save(&mut store);
        }
    };

    let apply = move |update: &ControlDataUpdate| {
        let before = readings.get_untracked();
        readings.update(|r| r.merge(update));
        let after = readings.get_untracked();
        let mut next = counters.get_untracked();
        if next.observe(&before, &after) {
            counters.set(next);
            persist(next);
        }
    };

    let load_history = move || {
        history_loading.set(true);
        spawn_local(async move {
            match api::fetch_device_history().await {
                Ok(mut rows) => {
                    // seed the tiles until the first live update arrives
                    if readings.get_untracked() == SensorReadings::default() {
                        if let Some(latest) = latest_record(&rows) {
                            readings.update(|r| r.merge(&latest.data));
                        }
                    }
                    rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                    history.set(rows);
                }
                Err(e) => {
                    log::warn!("device history: {}", e);
                    toast.notify_error(e);
                }
            }
            history_loading.set(false);
        });
    };

    let client = SocketIoClient::new(
        &socket_url(&api_base()),
        vec![JOIN_EVENT.to_string()],
        move |name, args| {
            if name != UPDATE_EVENT {
                log::debug!("unhandled socket event {}", name);
                return;
            }
            if let Some(update) = parse_update(&args) {
                apply(&update);
            }
        },
        move |s| status.set(s),
    );
    client.connect();
    let client = StoredValue::new_local(client);
    on_cleanup(move || {
        client.try_with_value(|c| c.close());
    });

    let toggle = move |actuator: Actuator| {
        if pending.get_untracked().is_some() {
            return;
        }
        let on = !readings.with_untracked(|r| r.switch(actuator).unwrap_or(false));
        let update = ControlDataUpdate::switch(actuator, on);
        pending.set(Some(actuator));
        spawn_local(async move {
            match api::write_control(&update).await {
                Ok(_) => {
                    apply(&update);
                    toast.notify_success(format!("{} turned {}", actuator.label(), switch_label(Some(on))));
                }
                Err(e) => toast.notify_error(e),
            }
            pending.set(None);
        });
    };

    let reset_counters = move |_| {
        counters.set(UsageCounters::default());
        persist(UsageCounters::default());
    };

    load_history();

    view! {
        <PageFrame page_id="d400_sensors--dashboard" category="dashboard">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Sensors"</h1>
                    <span class=move || match status.get() {
                        SocketStatus::Connected => "live-dot live-dot--on",
                        SocketStatus::Connecting => "live-dot live-dot--pending",
                        SocketStatus::Disconnected => "live-dot",
                    }>
                        {move || status.get().label()}
                    </span>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Secondary on_click=reset_counters>
                        "Reset counters"
                    </Button>
                </div>
            </div>

            <div class="stat-row">
                <StatCard label="Temperature" icon_name="activity"
                    value=Signal::derive(move || readings.get().temperature.map(|t| format!("{} °C", format_opt(Some(t), 1)))) />
                <StatCard label="Humidity" icon_name="activity"
                    value=Signal::derive(move || readings.get().humidity.map(|h| format!("{} %", format_opt(Some(h), 1)))) />
                <StatCard label="Gas level" icon_name="activity"
                    value=Signal::derive(move || readings.get().gas_level.map(|g| format_opt(Some(g), 0))) />
                <StatCard label="Last update" icon_name="calendar"
                    value=Signal::derive(move || readings.get().updated_at.map(|u| format_datetime(Some(&u)))) />
            </div>

            <div class="actuator-grid">
                {Actuator::ALL.into_iter().map(|actuator| {
                    let state = Signal::derive(move || readings.with(|r| r.switch(actuator)));
                    view! {
                        <div class="actuator" class:actuator--on=move || state.get() == Some(true)>
                            <div class="actuator__label">{actuator.label()}</div>
                            <div class="actuator__state">{move || switch_label(state.get())}</div>
                            <div class="actuator__count">
                                {move || counters.get().get(actuator)
                                    .map(|n| format!("Turned on {} times", n))
                                    .unwrap_or_default()}
                            </div>
                            <Button
                                size=ButtonSize::Small
                                appearance=ButtonAppearance::Primary
                                disabled=Signal::derive(move || pending.get().is_some())
                                on_click=move |_| toggle(actuator)
                            >
                                {move || if pending.get() == Some(actuator) {
                                    "Sending..."
                                } else if state.get() == Some(true) {
                                    "Turn off"
                                } else {
                                    "Turn on"
                                }}
                            </Button>
                        </div>
                    }
                }).collect_view()}
            </div>

            <div class="page__content">
                <div class="section__header">
                    <h2 class="section__title">"History"</h2>
                    <Button
                        size=ButtonSize::Small
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| load_history()
                        disabled=Signal::derive(move || history_loading.get())
                    >
                        {icon("refresh")}
                    </Button>
                </div>
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell>"Time"</TableHeaderCell>
                            <TableHeaderCell>"Temp"</TableHeaderCell>
                            <TableHeaderCell>"Humidity"</TableHeaderCell>
                            <TableHeaderCell>"Gas"</TableHeaderCell>
                            <TableHeaderCell>"Light"</TableHeaderCell>
                            <TableHeaderCell>"Fan"</TableHeaderCell>
                            <TableHeaderCell>"Motor"</TableHeaderCell>
                            <TableHeaderCell>"Buzzer"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || history.get().into_iter().map(|row| {
                            let d = row.data;
                            view! {
                                <TableRow>
                                    <TableCell><TableCellLayout>{format_datetime(row.created_at.as_deref())}</TableCellLayout></TableCell>
                                    <TableCell><TableCellLayout>{format_opt(d.temperature, 1)}</TableCellLayout></TableCell>
                                    <TableCell><TableCellLayout>{format_opt(d.humidity, 1)}</TableCellLayout></TableCell>
                                    <TableCell><TableCellLayout>{format_opt(d.gas_level, 0)}</TableCellLayout></TableCell>
                                    <TableCell><TableCellLayout>{switch_label(d.light)}</TableCellLayout></TableCell>
                                    <TableCell><TableCellLayout>{switch_label(d.fan)}</TableCellLayout></TableCell>
                                    <TableCell><TableCellLayout>{switch_label(d.motor)}</TableCellLayout></TableCell>
                                    <TableCell><TableCellLayout>{switch_label(d.buzzer)}</TableCellLayout></TableCell>
                                </TableRow>
                            }
                        }).collect_view()}
                    </TableBody>
                </Table>
                <Show when=move || !history_loading.get() && history.get().is_empty()>
                    <div class="empty-state">"No stored readings"</div>
                </Show>
            </div>
        </PageFrame>
    }
}
