use contracts::domain::a007_employee::Employee;
use contracts::domain::common::BadgeVariant;
use contracts::shared::dates::format_datetime;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a007_employee::api;
use crate::shared::components::ui::badge::Badge;
use crate::shared::page_frame::PageFrame;

#[component]
pub fn EmployeeDetails(id: String, on_close: Callback<()>) -> impl IntoView {
    let employee = RwSignal::new(None::<Employee>);
    let error = RwSignal::new(None::<String>);

    spawn_local(async move {
        match api::fetch_employee(&id).await {
            Ok(e) => employee.set(Some(e)),
            Err(e) => {
                log::warn!("employee {}: {}", id, e);
                error.set(Some(e));
            }
        }
    });

    view! {
        <PageFrame page_id="a007_employee--detail" category="detail">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">
                        {move || employee.get().map(|e| e.full_name()).filter(|n| !n.is_empty())
                            .unwrap_or_else(|| "Employee".to_string())}
                    </h1>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                        "Close"
                    </Button>
                </div>
            </div>

            {move || error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            {move || employee.get().map(|e| {
                let permissions = e
                    .role
                    .as_ref()
                    .and_then(|r| r.populated())
                    .map(|r| r.permissions.clone())
                    .unwrap_or_default();
                let has_permissions = !permissions.is_empty();
                let chips = permissions
                    .into_iter()
                    .map(|p| view! { <Badge variant=BadgeVariant::Info>{p}</Badge> })
                    .collect_view();
                view! {
                    <div class="page__content">
                        <div class="profile">
                            <span class="avatar avatar--large">{e.initials()}</span>
                        </div>
                        <dl class="detail-grid">
                            <dt>"Email"</dt><dd>{e.email.clone().unwrap_or_else(|| "-".to_string())}</dd>
                            <dt>"Phone"</dt><dd>{e.phone.clone().unwrap_or_else(|| "-".to_string())}</dd>
                            <dt>"Role"</dt><dd>{e.role_label()}</dd>
                            <dt>"Status"</dt>
                            <dd>
                                {if e.is_verified {
                                    view! { <Badge variant=BadgeVariant::Success>"Verified"</Badge> }.into_any()
                                } else {
                                    view! { <Badge variant=BadgeVariant::Neutral>"Unverified"</Badge> }.into_any()
                                }}
                            </dd>
                            <dt>"Joined"</dt><dd>{format_datetime(e.created_at.as_deref())}</dd>
                        </dl>
                        {has_permissions.then(|| view! {
                            <h2 class="section__title">"Permissions"</h2>
                        })}
                        <div class="chip-row">{chips}</div>
                    </div>
                }
            })}
        </PageFrame>
    }
}
