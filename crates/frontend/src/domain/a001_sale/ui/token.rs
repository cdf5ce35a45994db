//! Token / half-token amount panel.

use contracts::domain::a001_sale::payment::{HalfTokenForm, TokenForm};
use contracts::domain::a001_sale::Sale;
use contracts::shared::validation::ValidationErrors;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a001_sale::api;
use crate::shared::components::form_field::{field_error, TextField};
use crate::shared::components::table::format_rupees;
use crate::shared::submit_guard::{Submit, SubmitGuard};
use crate::shared::toast::use_toast;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Token,
    HalfPayment,
}

impl TokenKind {
    pub fn title(self) -> &'static str {
        match self {
            TokenKind::Token => "Add token",
            TokenKind::HalfPayment => "Add half payment",
        }
    }

    fn field(self) -> &'static str {
        match self {
            TokenKind::Token => "token_amt",
            TokenKind::HalfPayment => "half_payment",
        }
    }
}

#[component]
pub fn TokenPanel(
    sale: Sale,
    kind: TokenKind,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let toast = use_toast();
    let amount = RwSignal::new(String::new());
    let errors = RwSignal::new(ValidationErrors::new());
    let saving = RwSignal::new(false);
    let guard = SubmitGuard::new();

    let sale_id = sale.id.clone();
    let order = sale.order_id.clone().unwrap_or_else(|| sale.id.clone());
    let balance = format_rupees(sale.balance_due());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let raw = amount.get_untracked();
        let validated = match kind {
            TokenKind::Token => TokenForm { token_amt: raw }.validate(),
            TokenKind::HalfPayment => HalfTokenForm { half_payment: raw }.validate(),
        };
        let (payload, ticket) = match guard.submit(validated) {
            Submit::Invalid(e) => {
                errors.set(e);
                return;
            }
            Submit::InFlight => return,
            Submit::Send(p, ticket) => (p, ticket),
        };
        errors.set(ValidationErrors::new());
        saving.set(true);
        let sale_id = sale_id.clone();
        spawn_local(async move {
            let result = api::add_token(&sale_id, &payload).await;
            drop(ticket);
            saving.set(false);
            match result {
                Ok(message) => {
                    toast.notify_success(message);
                    on_saved.run(());
                }
                Err(e) => toast.notify_error(e),
            }
        });
    };

    view! {
        <div class="drawer">
            <form class="form" on:submit=on_submit>
                <div class="drawer__header">
                    <h2 class="drawer__title">{kind.title()}</h2>
                    <span class="drawer__subtitle">{order}" · balance "{balance}</span>
                </div>
                <TextField label="Amount" value=amount input_type="number"
                    error=field_error(errors, kind.field()) />
                <div class="drawer__footer">
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                        "Cancel"
                    </Button>
                    <button class="button button--primary" type="submit" disabled=move || saving.get()>
                        {move || if saving.get() { "Saving..." } else { "Save" }}
                    </button>
                </div>
            </form>
        </div>
    }
}
