//! Request bodies for the production-process actions.

use super::aggregate::ProductionProcess;
use crate::shared::validation::{check_positive, required_number, ValidationErrors, RULE_POSITIVE};
use serde::{Deserialize, Serialize};

/// `{_id}` body shared by allocation, start, pause, move and out actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessIdPayload {
    #[serde(rename = "_id")]
    pub id: String,
}

impl ProcessIdPayload {
    pub fn new(id: &str) -> Self {
        Self { id: id.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkDeletePayload {
    pub ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressPayload {
    #[serde(rename = "_id")]
    pub id: String,
    pub produced_quantity: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressForm {
    pub produced_quantity: String,
}

impl ProgressForm {
    /// Produced quantity is capped by what the process still has to make.
    pub fn validate(&self, process: &ProductionProcess) -> Result<ProgressPayload, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let quantity = required_number(
            &mut errors,
            "produced_quantity",
            &self.produced_quantity,
            "Produced quantity is required",
            "Produced quantity must be a number",
        )
        .filter(|v| {
            check_positive(
                &mut errors,
                "produced_quantity",
                *v,
                "Produced quantity must be greater than zero",
            )
        });

        if let (Some(q), Some(remaining)) = (quantity, process.remaining_quantity()) {
            if q > remaining {
                errors.add(
                    "produced_quantity",
                    RULE_POSITIVE,
                    "Produced quantity cannot exceed the remaining quantity",
                );
            }
        }

        errors.into_result(|| ProgressPayload {
            id: process.id.clone(),
            produced_quantity: quantity.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a003_production_process::aggregate::ProcessFinishedGood;

    fn running() -> ProductionProcess {
        ProductionProcess {
            id: "pp1".into(),
            finished_good: Some(ProcessFinishedGood {
                estimated_quantity: Some(50.0),
                remaining_quantity: Some(20.0),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_progress_payload() {
        let payload = ProgressForm {
            produced_quantity: "15".into(),
        }
        .validate(&running())
        .unwrap();
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({"_id": "pp1", "produced_quantity": 15.0})
        );
    }

    #[test]
    fn test_progress_bounds() {
        let over = ProgressForm {
            produced_quantity: "21".into(),
        }
        .validate(&running())
        .unwrap_err();
        assert_eq!(
            over.message_for("produced_quantity"),
            Some("Produced quantity cannot exceed the remaining quantity")
        );

        let zero = ProgressForm {
            produced_quantity: "0".into(),
        }
        .validate(&running())
        .unwrap_err();
        assert_eq!(
            zero.message_for("produced_quantity"),
            Some("Produced quantity must be greater than zero")
        );
    }

    #[test]
    fn test_id_bodies() {
        assert_eq!(
            serde_json::to_string(&ProcessIdPayload::new("pp1")).unwrap(),
            r#"{"_id":"pp1"}"#
        );
        let bulk = BulkDeletePayload {
            ids: vec!["a".into(), "b".into()],
        };
        assert_eq!(serde_json::to_string(&bulk).unwrap(), r#"{"ids":["a","b"]}"#);
    }
}
