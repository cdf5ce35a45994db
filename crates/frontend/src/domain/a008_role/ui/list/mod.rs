use crate::domain::a008_role::api;
use crate::domain::a008_role::ui::details::RolePanel;
use crate::shared::components::ui::badge::Badge;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::toast::use_toast;
use contracts::domain::a008_role::Role;
use contracts::domain::common::BadgeVariant;
use contracts::shared::dates::format_date;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
#[allow(non_snake_case)]
pub fn RoleList() -> impl IntoView {
    let toast = use_toast();
    let roles = RwSignal::new(Vec::<Role>::new());
    let loading = RwSignal::new(false);
    let creating = RwSignal::new(false);

    let load = move || {
        loading.set(true);
        spawn_local(async move {
            match api::fetch_roles().await {
                Ok(mut items) => {
                    items.sort_by(|a, b| a.role.cmp(&b.role));
                    roles.set(items);
                }
                Err(e) => {
                    log::warn!("roles: {}", e);
                    toast.notify_error(e);
                }
            }
            loading.set(false);
        });
    };

    let on_saved = Callback::new(move |_| {
        creating.set(false);
        load();
    });
    let on_cancel = Callback::new(move |_| creating.set(false));

    load();

    view! {
        <PageFrame page_id="a008_role--list" category="list">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Roles"</h1>
                    <span class="page__count">{move || roles.get().len()}</span>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| creating.set(true)>
                        {icon("plus")}
                        " New role"
                    </Button>
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

            <div class="page__content">
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell>"Role"</TableHeaderCell>
                            <TableHeaderCell>"Description"</TableHeaderCell>
                            <TableHeaderCell>"Permissions"</TableHeaderCell>
                            <TableHeaderCell>"Created"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || roles.get().into_iter().map(|r| {
                            let name = r.role.clone().unwrap_or_else(|| r.id.clone());
                            let description = r.description.clone().unwrap_or_else(|| "-".to_string());
                            let created = format_date(r.created_at.as_deref());
                            let chips = r
                                .permissions
                                .into_iter()
                                .map(|p| view! { <Badge variant=BadgeVariant::Info>{p}</Badge> })
                                .collect_view();
                            view! {
                                <TableRow>
                                    <TableCell><TableCellLayout>
                                        <strong>{name}</strong>
                                    </TableCellLayout></TableCell>
                                    <TableCell><TableCellLayout truncate=true>{description}</TableCellLayout></TableCell>
                                    <TableCell><TableCellLayout>
                                        <div class="chip-row">{chips}</div>
                                    </TableCellLayout></TableCell>
                                    <TableCell><TableCellLayout>{created}</TableCellLayout></TableCell>
                                </TableRow>
                            }
                        }).collect_view()}
                    </TableBody>
                </Table>
                <Show when=move || !loading.get() && roles.get().is_empty()>
                    <div class="empty-state">"No roles"</div>
                </Show>
            </div>

            <Show when=move || creating.get()>
                <RolePanel on_saved=on_saved on_cancel=on_cancel />
            </Show>
        </PageFrame>
    }
}
