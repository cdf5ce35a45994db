use crate::domain::a007_employee::api;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::detail_tab_label;
use crate::shared::components::ui::badge::Badge;
use crate::shared::icons::icon;
use crate::shared::list_utils::{get_sort_class, get_sort_indicator, sort_list, Sortable};
use crate::shared::page_frame::PageFrame;
use crate::shared::toast::use_toast;
use contracts::domain::a007_employee::Employee;
use contracts::domain::common::{BadgeVariant, Entity};
use contracts::shared::dates::format_date;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::cmp::Ordering;
use thaw::*;

impl Sortable for Employee {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "name" => self
                .display_name()
                .to_lowercase()
                .cmp(&other.display_name().to_lowercase()),
            "email" => self.email.cmp(&other.email),
            "role" => self.role_label().cmp(&other.role_label()),
            "verified" => self.is_verified.cmp(&other.is_verified),
            "created_at" => self.created_at.cmp(&other.created_at),
            _ => Ordering::Equal,
        }
    }
}

/// Case-insensitive match over name, email, phone and role.
pub fn filter_employees(items: &[Employee], query: &str) -> Vec<Employee> {
    let query = query.trim().to_lowercase();
    items
        .iter()
        .filter(|e| {
            query.is_empty()
                || [
                    e.full_name(),
                    e.email.clone().unwrap_or_default(),
                    e.phone.clone().unwrap_or_default(),
                    e.role_label(),
                ]
                .iter()
                .any(|field| field.to_lowercase().contains(&query))
        })
        .cloned()
        .collect()
}

#[component]
#[allow(non_snake_case)]
pub fn EmployeeList() -> impl IntoView {
    let tabs_store =
        use_context::<AppGlobalContext>().expect("AppGlobalContext not found in context");
    let toast = use_toast();
    let employees = RwSignal::new(Vec::<Employee>::new());
    let loading = RwSignal::new(false);
    let search = RwSignal::new(String::new());
    let sort_field = RwSignal::new("name".to_string());
    let sort_ascending = RwSignal::new(true);

    let load = move || {
        loading.set(true);
        spawn_local(async move {
            match api::fetch_employees().await {
                Ok(items) => {
                    log::info!("employees loaded: {}", items.len());
                    employees.set(items);
                }
                Err(e) => {
                    log::warn!("employees: {}", e);
                    toast.notify_error(e);
                }
            }
            loading.set(false);
        });
    };

    let visible = Signal::derive(move || {
        let mut rows = employees.with(|items| filter_employees(items, &search.get()));
        sort_list(&mut rows, &sort_field.get(), sort_ascending.get());
        rows
    });

    let toggle_sort = move |field: &'static str| {
        if sort_field.get_untracked() == field {
            sort_ascending.update(|a| *a = !*a);
        } else {
            sort_field.set(field.to_string());
            sort_ascending.set(true);
        }
    };

    let sort_header = move |label: &'static str, field: &'static str| {
        view! {
            <TableHeaderCell>
                {label}
                <span
                    class=move || get_sort_class(&sort_field.get(), field)
                    on:click=move |_| toggle_sort(field)
                >
                    {move || get_sort_indicator(&sort_field.get(), field, sort_ascending.get())}
                </span>
            </TableHeaderCell>
        }
    };

    let open_detail = move |e: &Employee| {
        tabs_store.open_tab(
            &format!("a007_employee_detail_{}", e.id),
            &detail_tab_label(Employee::element_name(), &e.display_name()),
        );
    };

    load();

    view! {
        <PageFrame page_id="a007_employee--list" category="list">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Employees"</h1>
                    <span class="page__count">{move || visible.get().len()}</span>
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
                <input
                    class="form__input"
                    placeholder="Search name, email, phone or role"
                    prop:value=move || search.get()
                    on:input=move |ev| search.set(event_target_value(&ev))
                />
            </div>

            <div class="page__content">
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell attr:style="width: 48px;"></TableHeaderCell>
                            {sort_header("Name", "name")}
                            {sort_header("Email", "email")}
                            <TableHeaderCell>"Phone"</TableHeaderCell>
                            {sort_header("Role", "role")}
                            {sort_header("Status", "verified")}
                            {sort_header("Joined", "created_at")}
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || visible.get().into_iter().map(|e| {
                            let initials = e.initials();
                            let name = e.display_name();
                            let email = e.email.clone().unwrap_or_else(|| "-".to_string());
                            let phone = e.phone.clone().unwrap_or_else(|| "-".to_string());
                            let role = e.role_label();
                            let verified = e.is_verified;
                            let joined = format_date(e.created_at.as_deref());
                            let row = StoredValue::new(e);
                            view! {
                                <TableRow>
                                    <TableCell><TableCellLayout>
                                        <span class="avatar">{initials}</span>
                                    </TableCellLayout></TableCell>
                                    <TableCell><TableCellLayout truncate=true>
                                        <a href="#" class="table__link" on:click=move |ev| {
                                            ev.prevent_default();
                                            row.with_value(|e| open_detail(e));
                                        }>{name}</a>
                                    </TableCellLayout></TableCell>
                                    <TableCell><TableCellLayout truncate=true>{email}</TableCellLayout></TableCell>
                                    <TableCell><TableCellLayout>{phone}</TableCellLayout></TableCell>
                                    <TableCell><TableCellLayout>{role}</TableCellLayout></TableCell>
                                    <TableCell><TableCellLayout>
                                        {if verified {
                                            view! { <Badge variant=BadgeVariant::Success>"Verified"</Badge> }.into_any()
                                        } else {
                                            view! { <Badge variant=BadgeVariant::Neutral>"Unverified"</Badge> }.into_any()
                                        }}
                                    </TableCellLayout></TableCell>
                                    <TableCell><TableCellLayout>{joined}</TableCellLayout></TableCell>
                                </TableRow>
                            }
                        }).collect_view()}
                    </TableBody>
                </Table>
                <Show when=move || !loading.get() && visible.get().is_empty()>
                    <div class="empty-state">"No employees"</div>
                </Show>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_employees_matches_role_and_email() {
        let items: Vec<Employee> = serde_json::from_value(serde_json::json!([
            {"_id": "1", "first_name": "Asha", "last_name": "Rao", "email": "asha@example.com",
             "role": {"_id": "r1", "role": "Supervisor"}},
            {"_id": "2", "first_name": "Vikram", "email": "vik@example.com", "role": "r2"}
        ]))
        .unwrap();
        assert_eq!(filter_employees(&items, "").len(), 2);
        assert_eq!(filter_employees(&items, "supervisor")[0].id, "1");
        assert_eq!(filter_employees(&items, "VIK@")[0].id, "2");
        assert!(filter_employees(&items, "nobody").is_empty());
    }

    #[test]
    fn test_sort_by_name() {
        let mut items: Vec<Employee> = serde_json::from_value(serde_json::json!([
            {"_id": "1", "first_name": "vikram"},
            {"_id": "2", "first_name": "Asha"}
        ]))
        .unwrap();
        sort_list(&mut items, "name", true);
        assert_eq!(items[0].id, "2");
    }
}
