use contracts::domain::a003_production_process::{ProcessActions, ProductionProcess};
use contracts::domain::common::refs::ref_label;
use leptos::prelude::*;
use std::cmp::Ordering;
use std::collections::HashSet;

use crate::shared::list_utils::{cmp_opt_f64, cmp_text, sort_list, Sortable};
use crate::shared::selection;

impl Sortable for ProductionProcess {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "process_name" => cmp_text(
                self.process_name.as_deref().unwrap_or(""),
                other.process_name.as_deref().unwrap_or(""),
            ),
            "item" => cmp_text(
                &self.finished_good.as_ref().map(|f| ref_label(&f.item)).unwrap_or_default(),
                &other.finished_good.as_ref().map(|f| ref_label(&f.item)).unwrap_or_default(),
            ),
            "status" => cmp_text(self.status().as_str(), other.status().as_str()),
            "progress" => cmp_opt_f64(Some(self.progress_percent()), Some(other.progress_percent())),
            "created_at" => self.created_at.cmp(&other.created_at),
            _ => Ordering::Equal,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ProcessListState {
    pub items: Vec<ProductionProcess>,
    pub search: String,
    pub sort_field: String,
    pub sort_ascending: bool,
    pub selected_ids: HashSet<String>,
    pub is_loaded: bool,
}

impl Default for ProcessListState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            search: String::new(),
            sort_field: "created_at".to_string(),
            sort_ascending: false,
            selected_ids: HashSet::new(),
            is_loaded: false,
        }
    }
}

/// Split of the selection for bulk delete.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BulkDeletePlan {
    /// In row order
    pub deletable: Vec<String>,
    pub blocked: usize,
}

impl ProcessListState {
    pub fn set_items(&mut self, items: Vec<ProductionProcess>) {
        self.items = items;
        selection::retain_existing(&mut self.selected_ids, self.items.iter().map(|p| p.id.as_str()));
        self.is_loaded = true;
    }

    /// Rows matching the search text (process name, item or status).
    pub fn visible(&self) -> Vec<ProductionProcess> {
        let needle = self.search.trim().to_lowercase();
        let mut rows: Vec<ProductionProcess> = self
            .items
            .iter()
            .filter(|p| {
                needle.is_empty()
                    || p.process_name.as_deref().unwrap_or("").to_lowercase().contains(&needle)
                    || p.status().as_str().to_lowercase().contains(&needle)
                    || p.finished_good
                        .as_ref()
                        .map(|f| ref_label(&f.item).to_lowercase().contains(&needle))
                        .unwrap_or(false)
            })
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

    /// Only processes that have not reached the shop floor may be deleted.
    pub fn bulk_delete_plan(&self) -> BulkDeletePlan {
        let mut plan = BulkDeletePlan::default();
        for process in self.items.iter().filter(|p| self.selected_ids.contains(&p.id)) {
            if ProcessActions::of(process).deletable {
                plan.deletable.push(process.id.clone());
            } else {
                plan.blocked += 1;
            }
        }
        plan
    }
}

pub fn create_state() -> RwSignal<ProcessListState> {
    RwSignal::new(ProcessListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn items() -> Vec<ProductionProcess> {
        serde_json::from_value(json!([
            {"_id": "p1", "process_name": "Frame", "status": "raw material approval pending", "createdAt": "2024-03-01"},
            {"_id": "p2", "process_name": "Panel", "status": "production in progress", "createdAt": "2024-03-02",
             "finished_good": {"item": {"_id": "i1", "name": "Steel panel"}, "estimated_quantity": 10, "remaining_quantity": 4}},
            {"_id": "p3", "process_name": "Door", "status": "Allowed to produce", "createdAt": "2024-03-03"}
        ]))
        .unwrap()
    }

    #[test]
    fn test_bulk_delete_skips_running_processes() {
        let mut state = ProcessListState::default();
        state.set_items(items());
        for id in ["p3", "p2", "p1"] {
            state.selected_ids.insert(id.to_string());
        }
        let plan = state.bulk_delete_plan();
        assert_eq!(plan.deletable, vec!["p1".to_string(), "p3".to_string()]);
        assert_eq!(plan.blocked, 1);
    }

    #[test]
    fn test_search_and_reload_selection() {
        let mut state = ProcessListState::default();
        state.set_items(items());
        state.search = "steel".to_string();
        let ids: Vec<String> = state.visible().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["p2"]);

        state.search = "PROGRESS".to_string();
        assert_eq!(state.visible().len(), 1);

        state.selected_ids.insert("p9".to_string());
        state.set_items(items());
        assert!(state.selected_ids.is_empty());
    }
}
