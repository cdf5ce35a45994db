use contracts::domain::a001_sale::{Sale, SaleStage};
use contracts::shared::api::ApiResponse;
use leptos::prelude::*;
use std::collections::HashSet;

use crate::shared::list_utils::{cmp_opt_f64, cmp_text, sort_list, Sortable};
use crate::shared::selection;
use contracts::domain::common::refs::ref_label;
use std::cmp::Ordering;

impl Sortable for Sale {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "order_id" => cmp_text(
                self.order_id.as_deref().unwrap_or(""),
                other.order_id.as_deref().unwrap_or(""),
            ),
            "party" => cmp_text(&ref_label(&self.party), &ref_label(&other.party)),
            "product" => cmp_text(&ref_label(&self.product_id), &ref_label(&other.product_id)),
            "price" => cmp_opt_f64(self.price, other.price),
            "product_qty" => cmp_opt_f64(self.product_qty, other.product_qty),
            "total" => cmp_opt_f64(Some(self.total_with_gst()), Some(other.total_with_gst())),
            "stage" => (SaleStage::of(self) as u8).cmp(&(SaleStage::of(other) as u8)),
            "delivery_date" => self.delivery_date.cmp(&other.delivery_date),
            "created_at" => self.created_at.cmp(&other.created_at),
            _ => Ordering::Equal,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SaleListState {
    pub items: Vec<Sale>,
    pub stage_filter: Option<SaleStage>,
    pub sort_field: String,
    pub sort_ascending: bool,
    pub selected_ids: HashSet<String>,
    pub is_loaded: bool,
    /// 1-based
    pub page: usize,
    pub total_count: usize,
    pub total_pages: usize,
}

impl Default for SaleListState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            stage_filter: None,
            sort_field: "created_at".to_string(),
            sort_ascending: false,
            selected_ids: HashSet::new(),
            is_loaded: false,
            page: 1,
            total_count: 0,
            total_pages: 0,
        }
    }
}

/// Rows per `sale/getAll` page on the backend
pub const BACKEND_PAGE_SIZE: usize = 10;

impl SaleListState {
    /// Stores one page; `total` falls back to the row count.
    pub fn apply_page(&mut self, response: ApiResponse<Vec<Sale>>) -> Result<(), String> {
        let total = response.total;
        let page = response.page;
        let items = response.into_result()?;
        self.total_count = total.unwrap_or(items.len()).max(items.len());
        self.total_pages = if total.is_some() {
            self.total_count.div_ceil(BACKEND_PAGE_SIZE).max(1)
        } else {
            1
        };
        if let Some(page) = page {
            self.page = page.max(1);
        }
        self.items = items;
        selection::retain_existing(
            &mut self.selected_ids,
            self.items.iter().map(|s| s.id.as_str()),
        );
        self.is_loaded = true;
        Ok(())
    }

    /// Rows after the stage filter, in the current sort order.
    pub fn visible(&self) -> Vec<Sale> {
        let mut rows: Vec<Sale> = self
            .items
            .iter()
            .filter(|s| self.stage_filter.map_or(true, |stage| SaleStage::of(s) == stage))
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

    /// Distinct (id, label) pairs of a reference column, for form suggestions.
    pub fn suggestions<F>(&self, pick: F) -> Vec<(String, String)>
    where
        F: Fn(&Sale) -> Option<(String, String)>,
    {
        let mut seen = HashSet::new();
        self.items
            .iter()
            .filter_map(pick)
            .filter(|(id, _)| !id.is_empty() && seen.insert(id.clone()))
            .collect()
    }

    pub fn rows_label(&self) -> String {
        match self.visible().len() {
            1 => "1 row".to_string(),
            n => format!("{} rows", n),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.is_loaded && self.visible().is_empty()
    }
}

pub fn create_state() -> RwSignal<SaleListState> {
    RwSignal::new(SaleListState::default())
}
