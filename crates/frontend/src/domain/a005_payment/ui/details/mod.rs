use contracts::domain::a005_payment::Payment;
use contracts::domain::common::refs::ref_label;
use contracts::domain::common::BadgeVariant;
use contracts::shared::dates::format_datetime;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a005_payment::api;
use crate::shared::components::table::{format_opt, format_rupees};
use crate::shared::components::ui::badge::Badge;
use crate::shared::page_frame::PageFrame;

#[component]
pub fn PaymentDetails(id: String, on_close: Callback<()>) -> impl IntoView {
    let payment = RwSignal::new(None::<Payment>);
    let error = RwSignal::new(None::<String>);

    spawn_local(async move {
        match api::fetch_payment(&id).await {
            Ok(p) => payment.set(Some(p)),
            Err(e) => {
                log::warn!("payment {}: {}", id, e);
                error.set(Some(e));
            }
        }
    });

    view! {
        <PageFrame page_id="a005_payment--detail" category="detail">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Payment"</h1>
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

            {move || payment.get().map(|p| {
                let sale = p.sale_id.as_ref().and_then(|r| r.populated().cloned());
                view! {
                    <div class="page__content">
                        <dl class="detail-grid">
                            <dt>"Amount"</dt>
                            <dd>{p.amount.map(format_rupees).unwrap_or_else(|| "-".to_string())}</dd>
                            <dt>"Type"</dt><dd>{p.payment_type.clone().unwrap_or_else(|| "-".to_string())}</dd>
                            <dt>"Mode"</dt><dd>{p.mode.clone().unwrap_or_else(|| "-".to_string())}</dd>
                            <dt>"Status"</dt>
                            <dd>
                                {if p.verified {
                                    view! { <Badge variant=BadgeVariant::Success>"Verified"</Badge> }.into_any()
                                } else {
                                    view! { <Badge variant=BadgeVariant::Warning>"Pending"</Badge> }.into_any()
                                }}
                            </dd>
                            <dt>"Received"</dt><dd>{format_datetime(p.created_at.as_deref())}</dd>
                        </dl>
                        {sale.map(|s| view! {
                            <h2 class="section__title">"Sale"</h2>
                            <dl class="detail-grid">
                                <dt>"Order"</dt><dd>{s.order_id.clone().unwrap_or_else(|| s.id.clone())}</dd>
                                <dt>"Party"</dt><dd>{ref_label(&s.party)}</dd>
                                <dt>"Product"</dt><dd>{ref_label(&s.product_id)}</dd>
                                <dt>"Quantity"</dt><dd>{format_opt(s.product_qty, 0)}</dd>
                                <dt>"Total"</dt><dd>{format_rupees(s.total_with_gst())}</dd>
                                <dt>"Balance due"</dt><dd>{format_rupees(s.balance_due())}</dd>
                            </dl>
                        })}
                    </div>
                }
            })}
        </PageFrame>
    }
}
