use super::aggregate::{Assignment, TaskStatus};
use crate::shared::validation::{non_empty, required_string, ValidationErrors};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignForm {
    pub sale_id: String,
    pub assined_to: String,
    pub assined_process: String,
    pub assinedby_comment: String,
}

/// Body of `assined/create` and `assined/update/:id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_id: Option<String>,
    pub assined_to: String,
    pub assined_process: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assinedby_comment: Option<String>,
}

/// Body of `assined/update-status/:id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusUpdatePayload {
    #[serde(rename = "isCompleted")]
    pub is_completed: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assinedto_comment: Option<String>,
}

impl StatusUpdatePayload {
    pub fn new(status: TaskStatus, comment: &str) -> Self {
        Self {
            is_completed: status.as_flag().to_string(),
            assinedto_comment: non_empty(comment),
        }
    }
}

impl AssignForm {
    pub fn for_sale(sale_id: &str) -> Self {
        Self {
            sale_id: sale_id.to_string(),
            ..Default::default()
        }
    }

    pub fn from_assignment(a: &Assignment) -> Self {
        Self {
            sale_id: a.sale_id.as_ref().map(|r| r.id().to_string()).unwrap_or_default(),
            assined_to: a.assined_to.as_ref().map(|r| r.id().to_string()).unwrap_or_default(),
            assined_process: a.assined_process.clone().unwrap_or_default(),
            assinedby_comment: a.assinedby_comment.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<AssignPayload, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let assined_to =
            required_string(&mut errors, "assined_to", &self.assined_to, "Employee is required");
        let assined_process = required_string(
            &mut errors,
            "assined_process",
            &self.assined_process,
            "Process is required",
        );
        errors.into_result(|| AssignPayload {
            sale_id: non_empty(&self.sale_id),
            assined_to: assined_to.unwrap_or_default(),
            assined_process: assined_process.unwrap_or_default(),
            assinedby_comment: non_empty(&self.assinedby_comment),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_form() {
        let errors = AssignForm::for_sale("s1").validate().unwrap_err();
        assert_eq!(errors.message_for("assined_to"), Some("Employee is required"));
        assert_eq!(errors.message_for("assined_process"), Some("Process is required"));

        let payload = AssignForm {
            sale_id: "s1".into(),
            assined_to: "u2".into(),
            assined_process: " Welding ".into(),
            assinedby_comment: "   ".into(),
        }
        .validate()
        .unwrap();
        assert_eq!(payload.assined_process, "Welding");
        assert_eq!(payload.assinedby_comment, None);
        assert_eq!(payload.sale_id.as_deref(), Some("s1"));
    }

    #[test]
    fn test_status_payload() {
        let body = serde_json::to_value(StatusUpdatePayload::new(TaskStatus::UnderProcessing, "")).unwrap();
        assert_eq!(body, serde_json::json!({"isCompleted": "UnderProcessing"}));
    }
}
