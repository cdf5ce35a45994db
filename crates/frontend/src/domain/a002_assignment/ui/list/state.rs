use contracts::domain::a002_assignment::{Assignment, TaskStatus};
use contracts::domain::common::refs::ref_label;
use leptos::prelude::*;
use std::cmp::Ordering;

use crate::shared::list_utils::{cmp_text, sort_list, Sortable};

impl Sortable for Assignment {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "assined_to" => cmp_text(&ref_label(&self.assined_to), &ref_label(&other.assined_to)),
            "assined_process" => cmp_text(
                self.assined_process.as_deref().unwrap_or(""),
                other.assined_process.as_deref().unwrap_or(""),
            ),
            "status" => (self.status() as u8).cmp(&(other.status() as u8)),
            "created_at" => self.created_at.cmp(&other.created_at),
            _ => Ordering::Equal,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AssignmentListState {
    pub items: Vec<Assignment>,
    pub status_filter: Option<TaskStatus>,
    pub sort_field: String,
    pub sort_ascending: bool,
    pub is_loaded: bool,
}

impl Default for AssignmentListState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            status_filter: None,
            sort_field: "created_at".to_string(),
            sort_ascending: false,
            is_loaded: false,
        }
    }
}

impl AssignmentListState {
    pub fn visible(&self) -> Vec<Assignment> {
        let mut rows: Vec<Assignment> = self
            .items
            .iter()
            .filter(|a| self.status_filter.map_or(true, |s| a.status() == s))
            .cloned()
            .collect();
        sort_list(&mut rows, &self.sort_field, self.sort_ascending);
        rows
    }

    pub fn toggle_sort(&mut self, field: &str) {
        if self.sort_field == field {
            self.sort_ascending = !self.sort_ascending;
        } else {
            self.sort_field = field.to_string();
            self.sort_ascending = true;
        }
    }

    /// Count per status, in flow order.
    pub fn counts(&self) -> [(TaskStatus, usize); 3] {
        let count = |s: TaskStatus| self.items.iter().filter(|a| a.status() == s).count();
        [
            (TaskStatus::Pending, count(TaskStatus::Pending)),
            (TaskStatus::UnderProcessing, count(TaskStatus::UnderProcessing)),
            (TaskStatus::Completed, count(TaskStatus::Completed)),
        ]
    }
}

pub fn create_state() -> RwSignal<AssignmentListState> {
    RwSignal::new(AssignmentListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn state() -> AssignmentListState {
        let items: Vec<Assignment> = serde_json::from_value(json!([
            {"_id": "a1", "assined_process": "Cutting", "isCompleted": "Completed", "createdAt": "2024-03-01"},
            {"_id": "a2", "assined_process": "assembly", "isCompleted": "UnderProcessing", "createdAt": "2024-03-03"},
            {"_id": "a3", "assined_process": "Painting", "isCompleted": "garbage", "createdAt": "2024-03-02"}
        ]))
        .unwrap();
        AssignmentListState {
            items,
            is_loaded: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_filter_and_counts() {
        let mut s = state();
        assert_eq!(
            s.counts(),
            [
                (TaskStatus::Pending, 1),
                (TaskStatus::UnderProcessing, 1),
                (TaskStatus::Completed, 1)
            ]
        );
        s.status_filter = Some(TaskStatus::Pending);
        let ids: Vec<String> = s.visible().into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["a3"]);
    }

    #[test]
    fn test_default_sort_newest_first() {
        let mut s = state();
        let ids: Vec<String> = s.visible().into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["a2", "a3", "a1"]);
        s.toggle_sort("assined_process");
        let ids: Vec<String> = s.visible().into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["a2", "a1", "a3"]);
    }
}
