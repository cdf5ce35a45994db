use contracts::domain::a002_assignment::{AssignForm, Assignment};
use contracts::shared::validation::ValidationErrors;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a002_assignment::api;
use crate::shared::submit_guard::{Submit, SubmitGuard};
use crate::shared::toast::ToastService;

#[derive(Clone)]
pub struct AssignFormVm {
    pub assignment_id: Option<String>,
    pub sale_id: String,
    pub assined_to: RwSignal<String>,
    pub assined_process: RwSignal<String>,
    pub assinedby_comment: RwSignal<String>,
    pub errors: RwSignal<ValidationErrors>,
    pub saving: RwSignal<bool>,
    guard: SubmitGuard,
}

impl AssignFormVm {
    /// Edits `assignment` when given, otherwise assigns a task for `sale_id`.
    pub fn new(assignment: Option<&Assignment>, sale_id: Option<&str>) -> Self {
        let form = match (assignment, sale_id) {
            (Some(a), _) => AssignForm::from_assignment(a),
            (None, Some(id)) => AssignForm::for_sale(id),
            (None, None) => AssignForm::default(),
        };
        Self {
            assignment_id: assignment.map(|a| a.id.clone()),
            sale_id: form.sale_id,
            assined_to: RwSignal::new(form.assined_to),
            assined_process: RwSignal::new(form.assined_process),
            assinedby_comment: RwSignal::new(form.assinedby_comment),
            errors: RwSignal::new(ValidationErrors::new()),
            saving: RwSignal::new(false),
            guard: SubmitGuard::new(),
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.assignment_id.is_some()
    }

    pub fn save_command(&self, toast: ToastService, on_saved: Callback<()>) {
        let form = AssignForm {
            sale_id: self.sale_id.clone(),
            assined_to: self.assined_to.get_untracked(),
            assined_process: self.assined_process.get_untracked(),
            assinedby_comment: self.assinedby_comment.get_untracked(),
        };
        let (payload, ticket) = match self.guard.submit(form.validate()) {
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
        let assignment_id = self.assignment_id.clone();
        spawn_local(async move {
            let result = match &assignment_id {
                Some(id) => api::update_assignment(id, &payload).await,
                None => api::create_assignment(&payload).await,
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
