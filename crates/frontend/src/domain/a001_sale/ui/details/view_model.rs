use contracts::domain::a001_sale::{Sale, SaleForm, SalePayload};
use contracts::shared::validation::ValidationErrors;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a001_sale::api;
use crate::shared::submit_guard::{Submit, SubmitGuard};
use crate::shared::toast::ToastService;

/// Create/edit sale form state.
#[derive(Clone)]
pub struct SaleFormVm {
    pub sale_id: Option<String>,
    pub party: RwSignal<String>,
    pub product_id: RwSignal<String>,
    pub price: RwSignal<String>,
    pub product_qty: RwSignal<String>,
    pub gst: RwSignal<String>,
    pub mode_of_payment: RwSignal<String>,
    pub terms_of_delivery: RwSignal<String>,
    pub comment: RwSignal<String>,
    pub uom: RwSignal<String>,
    pub errors: RwSignal<ValidationErrors>,
    pub saving: RwSignal<bool>,
    guard: SubmitGuard,
}

impl SaleFormVm {
    pub fn new(sale: Option<&Sale>) -> Self {
        let form = sale.map(SaleForm::from_sale).unwrap_or_default();
        Self {
            sale_id: sale.map(|s| s.id.clone()),
            party: RwSignal::new(form.party),
            product_id: RwSignal::new(form.product_id),
            price: RwSignal::new(form.price),
            product_qty: RwSignal::new(form.product_qty),
            gst: RwSignal::new(form.gst),
            mode_of_payment: RwSignal::new(form.mode_of_payment),
            terms_of_delivery: RwSignal::new(form.terms_of_delivery),
            comment: RwSignal::new(form.comment),
            uom: RwSignal::new(form.uom),
            errors: RwSignal::new(ValidationErrors::new()),
            saving: RwSignal::new(false),
            guard: SubmitGuard::new(),
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.sale_id.is_some()
    }

    fn snapshot(&self) -> SaleForm {
        SaleForm {
            party: self.party.get_untracked(),
            product_id: self.product_id.get_untracked(),
            price: self.price.get_untracked(),
            product_qty: self.product_qty.get_untracked(),
            gst: self.gst.get_untracked(),
            mode_of_payment: self.mode_of_payment.get_untracked(),
            terms_of_delivery: self.terms_of_delivery.get_untracked(),
            comment: self.comment.get_untracked(),
            uom: self.uom.get_untracked(),
        }
    }

    /// Validates, then creates or updates; one request at a time.
    pub fn save_command(&self, toast: ToastService, on_saved: Callback<()>) {
        let (payload, ticket) = match submit_decision(self.snapshot(), &self.guard) {
            Submit::Invalid(errors) => {
                self.errors.set(errors);
                return;
            }
            Submit::InFlight => return,
            Submit::Send(payload, ticket) => (payload, ticket),
        };
        self.errors.set(ValidationErrors::new());
        self.saving.set(true);

        let saving = self.saving;
        let sale_id = self.sale_id.clone();
        spawn_local(async move {
            let result = match &sale_id {
                Some(id) => api::update_sale(id, &payload).await,
                None => api::create_sale(&payload).await,
            };
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
    }
}

fn submit_decision(form: SaleForm, guard: &SubmitGuard) -> Submit<SalePayload> {
    guard.submit(form.validate())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> SaleForm {
        SaleForm {
            party: "65a1b0000000000000000p01".into(),
            product_id: "65a1c0000000000000000r01".into(),
            price: "1500".into(),
            product_qty: "3".into(),
            gst: "12".into(),
            mode_of_payment: "UPI".into(),
            ..SaleForm::default()
        }
    }

    #[test]
    fn test_one_request_per_click_while_saving() {
        let guard = SubmitGuard::new();
        let ticket = match submit_decision(filled_form(), &guard) {
            Submit::Send(payload, ticket) => {
                assert_eq!(payload.product_qty, 3);
                ticket
            }
            _ => panic!("a valid form must be sent"),
        };

        // clicks while the first request is pending send nothing
        for _ in 0..3 {
            assert!(matches!(submit_decision(filled_form(), &guard), Submit::InFlight));
        }

        drop(ticket);
        assert!(matches!(submit_decision(filled_form(), &guard), Submit::Send(..)));
    }

    #[test]
    fn test_invalid_form_reports_errors_even_while_saving() {
        let guard = SubmitGuard::new();
        let _pending = guard.try_begin();
        let form = SaleForm {
            price: "0".into(),
            ..filled_form()
        };
        match submit_decision(form, &guard) {
            Submit::Invalid(errors) => assert_eq!(
                errors.message_for("price"),
                Some("Price must be greater than zero")
            ),
            _ => panic!("expected validation errors"),
        }
    }
}
