//! Sidebar with collapsible menu groups

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_label_for_key;
use crate::shared::icons::icon;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    items: Vec<(&'static str, &'static str, &'static str)>, // (id, label, icon)
}

fn get_menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: "sales",
            label: "Sales",
            icon: "sales",
            items: vec![
                ("a001_sale", tab_label_for_key("a001_sale"), "sales"),
                ("a001_sale_upcoming", tab_label_for_key("a001_sale_upcoming"), "calendar"),
                ("a002_assignment", tab_label_for_key("a002_assignment"), "task"),
            ],
        },
        MenuGroup {
            id: "production",
            label: "Production",
            icon: "production",
            items: vec![
                ("a003_production_process", tab_label_for_key("a003_production_process"), "production"),
                ("a004_bom", tab_label_for_key("a004_bom"), "bom"),
            ],
        },
        MenuGroup {
            id: "accounts",
            label: "Accounts",
            icon: "payments",
            items: vec![
                ("a005_payment", tab_label_for_key("a005_payment"), "payments"),
                ("a006_invoice", tab_label_for_key("a006_invoice"), "invoices"),
            ],
        },
        MenuGroup {
            id: "people",
            label: "Employees",
            icon: "users",
            items: vec![
                ("a007_employee", tab_label_for_key("a007_employee"), "users"),
                ("a008_role", tab_label_for_key("a008_role"), "shield"),
            ],
        },
        MenuGroup {
            id: "dashboards",
            label: "Dashboards",
            icon: "activity",
            items: vec![
                ("d400_sensors", tab_label_for_key("d400_sensors"), "activity"),
                ("d401_machine_status", tab_label_for_key("d401_machine_status"), "cpu"),
            ],
        },
    ]
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let expanded_groups = RwSignal::new(vec!["sales".to_string(), "production".to_string()]);

    let groups = get_menu_groups();

    view! {
        <div class="app-sidebar__content">
            {groups.into_iter().map(|group| {
                    let group_id = group.id.to_string();
                    let group_id_for_exp = group_id.clone();
                    let group_id_for_click = group_id.clone();

                    view! {
                        <div>
                            // Parent item
                            <div
                                class="app-sidebar__item"
                                style:padding-left="12px"
                                on:click=move |_| {
                                    let gid = group_id_for_click.clone();
                                    expanded_groups.update(move |items| {
                                        if let Some(pos) = items.iter().position(|x| x == &gid) {
                                            items.remove(pos);
                                        } else {
                                            items.push(gid);
                                        }
                                    });
                                }
                            >
                                <div class="app-sidebar__item-content">
                                    {icon(group.icon)}
                                    <span>{group.label}</span>
                                </div>
                                <div
                                    class="app-sidebar__chevron"
                                    class:app-sidebar__chevron--expanded=move || expanded_groups.get().contains(&group_id_for_exp)
                                >
                                    {icon("chevron-right")}
                                </div>
                            </div>

                            // Children
                            {
                                let gid_show = group_id.clone();
                                let items_stored = StoredValue::new(group.items.clone());
                                view! {
                                    <Show when=move || expanded_groups.get().contains(&gid_show)>
                                        <div class="app-sidebar__children">
                                            {items_stored.get_value().into_iter().map(|(id, label, icon_name)| {
                                                let item_id = StoredValue::new(id.to_string());
                                                view! {
                                                    <div
                                                        class="app-sidebar__item"
                                                        class:app-sidebar__item--active=move || {
                                                            let iid = item_id.get_value();
                                                            ctx.active.get().as_ref().map(|a| a == &iid).unwrap_or(false)
                                                        }
                                                        style:padding-left="10px"
                                                        on:click=move |_| {
                                                            ctx.open_tab(id, label);
                                                        }
                                                    >
                                                        <div class="app-sidebar__item-content">
                                                            {icon(icon_name)}
                                                            <span>{label}</span>
                                                        </div>
                                                    </div>
                                                }
                                            }).collect_view()}
                                        </div>
                                    </Show>
                                }
                            }
                        </div>
                    }
                }).collect_view()}
        </div>
    }
}
