use crate::domain::a001_sale::Sale;
use crate::domain::common::serde_helpers::opt_text;
use crate::domain::common::{BadgeVariant, Entity, Ref, UserSummary};
use serde::{Deserialize, Serialize};

/// Task handed to an employee for a sale (a002).
///
/// Field names follow the backend (`assined_*`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub sale_id: Option<Ref<Sale>>,
    #[serde(default)]
    pub assined_to: Option<Ref<UserSummary>>,
    #[serde(default)]
    pub assined_by: Option<Ref<UserSummary>>,
    #[serde(default)]
    pub assined_process: Option<String>,
    #[serde(default)]
    pub assinedby_comment: Option<String>,
    #[serde(default)]
    pub assinedto_comment: Option<String>,
    #[serde(rename = "isCompleted", default, deserialize_with = "opt_text")]
    pub is_completed: Option<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
}

impl Assignment {
    pub fn status(&self) -> TaskStatus {
        TaskStatus::from_flag(self.is_completed.as_deref())
    }
}

impl Entity for Assignment {
    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> String {
        self.assined_process.clone().unwrap_or_else(|| self.id.clone())
    }

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "assined"
    }

    fn element_name() -> &'static str {
        "Assignment"
    }

    fn list_name() -> &'static str {
        "Assignments"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    Pending,
    UnderProcessing,
    Completed,
}

impl TaskStatus {
    /// Anything that is not an exact known flag reads as Pending.
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some("Completed") => TaskStatus::Completed,
            Some("UnderProcessing") => TaskStatus::UnderProcessing,
            _ => TaskStatus::Pending,
        }
    }

    /// Value sent to `assined/update-status/:id`
    pub fn as_flag(self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::UnderProcessing => "UnderProcessing",
            TaskStatus::Completed => "Completed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::UnderProcessing => "Under Processing",
            TaskStatus::Completed => "Completed",
        }
    }

    pub fn badge(self) -> BadgeVariant {
        match self {
            TaskStatus::Pending => BadgeVariant::Neutral,
            TaskStatus::UnderProcessing => BadgeVariant::Warning,
            TaskStatus::Completed => BadgeVariant::Success,
        }
    }

    /// Next step an employee can take, if any.
    pub fn next(self) -> Option<TaskStatus> {
        match self {
            TaskStatus::Pending => Some(TaskStatus::UnderProcessing),
            TaskStatus::UnderProcessing => Some(TaskStatus::Completed),
            TaskStatus::Completed => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_task_badges() {
        let done = TaskStatus::from_flag(Some("Completed"));
        assert_eq!(done, TaskStatus::Completed);
        assert_eq!(done.badge(), BadgeVariant::Success);
        assert_eq!(done.label(), "Completed");

        let busy = TaskStatus::from_flag(Some("UnderProcessing"));
        assert_eq!(busy.badge(), BadgeVariant::Warning);
        assert_eq!(busy.label(), "Under Processing");

        for other in [None, Some(""), Some("completed"), Some("false"), Some("Done")] {
            let status = TaskStatus::from_flag(other);
            assert_eq!(status, TaskStatus::Pending);
            assert_eq!(status.badge(), BadgeVariant::Neutral);
            assert_eq!(status.label(), "Pending");
        }
    }

    #[test]
    fn test_flow() {
        assert_eq!(TaskStatus::Pending.next(), Some(TaskStatus::UnderProcessing));
        assert_eq!(TaskStatus::UnderProcessing.next(), Some(TaskStatus::Completed));
        assert_eq!(TaskStatus::Completed.next(), None);
    }

    #[test]
    fn test_reads_populated_assignment() {
        let a: Assignment = serde_json::from_value(json!({
            "_id": "as1",
            "sale_id": {"_id": "s1", "order_id": "SO-1"},
            "assined_to": {"_id": "u2", "first_name": "Asha", "last_name": "Rao"},
            "assined_by": "u1",
            "assined_process": "Cutting",
            "isCompleted": false
        }))
        .unwrap();
        assert_eq!(a.status(), TaskStatus::Pending);
        assert_eq!(a.assined_to.as_ref().map(|r| r.label()), Some("Asha Rao".to_string()));
        assert_eq!(a.sale_id.as_ref().map(|r| r.label()), Some("SO-1".to_string()));
    }
}
