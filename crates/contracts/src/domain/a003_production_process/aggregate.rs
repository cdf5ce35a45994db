use super::status::ProcessStatus;
use crate::domain::a001_sale::Sale;
use crate::domain::a004_bom::Bom;
use crate::domain::common::serde_helpers::{bool_or_false, opt_number};
use crate::domain::common::{Entity, ProductSummary, Ref};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessFinishedGood {
    #[serde(default)]
    pub item: Option<Ref<ProductSummary>>,
    #[serde(default, deserialize_with = "opt_number")]
    pub estimated_quantity: Option<f64>,
    #[serde(default, deserialize_with = "opt_number")]
    pub produced_quantity: Option<f64>,
    #[serde(default, deserialize_with = "opt_number")]
    pub remaining_quantity: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessRawMaterial {
    #[serde(default)]
    pub item: Option<Ref<ProductSummary>>,
    #[serde(default, deserialize_with = "opt_number")]
    pub estimated_quantity: Option<f64>,
    #[serde(default, deserialize_with = "opt_number")]
    pub used_quantity: Option<f64>,
    #[serde(default, deserialize_with = "opt_number")]
    pub remaining_quantity: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessStep {
    #[serde(default)]
    pub process: String,
    #[serde(default, deserialize_with = "bool_or_false")]
    pub done: bool,
}

/// Production run of a BOM for a sale (a003)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductionProcess {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub process_name: Option<String>,
    #[serde(default)]
    pub bom: Option<Ref<Bom>>,
    #[serde(default)]
    pub sale_id: Option<Ref<Sale>>,
    /// Backend status string, see [`ProcessStatus`]
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub finished_good: Option<ProcessFinishedGood>,
    #[serde(default)]
    pub raw_materials: Vec<ProcessRawMaterial>,
    #[serde(default, deserialize_with = "opt_number")]
    pub final_produce_quantity: Option<f64>,
    #[serde(default)]
    pub processes: Vec<ProcessStep>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
}

impl ProductionProcess {
    pub fn status(&self) -> ProcessStatus {
        ProcessStatus::parse(self.status.as_deref().unwrap_or(""))
    }

    pub fn estimated_quantity(&self) -> Option<f64> {
        self.finished_good.as_ref().and_then(|fg| fg.estimated_quantity)
    }

    pub fn remaining_quantity(&self) -> Option<f64> {
        self.finished_good.as_ref().and_then(|fg| fg.remaining_quantity)
    }

    /// Share of finished-good quantity produced so far, 0..=100.
    pub fn progress_percent(&self) -> f64 {
        match (self.estimated_quantity(), self.remaining_quantity()) {
            (Some(est), Some(rem)) if est > 0.0 => ((est - rem) / est * 100.0).clamp(0.0, 100.0),
            _ => 0.0,
        }
    }

    pub fn steps_done(&self) -> usize {
        self.processes.iter().filter(|p| p.done).count()
    }
}

impl Entity for ProductionProcess {
    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> String {
        self.process_name.clone().unwrap_or_else(|| self.id.clone())
    }

    fn aggregate_index() -> &'static str {
        "a003"
    }

    fn collection_name() -> &'static str {
        "production-process"
    }

    fn element_name() -> &'static str {
        "Production process"
    }

    fn list_name() -> &'static str {
        "Production status"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reads_process_document() {
        let p: ProductionProcess = serde_json::from_value(json!({
            "_id": "pp1",
            "process_name": "Steel rack batch",
            "bom": {"_id": "b1", "bom_name": "Rack 4ft"},
            "status": "production in progress",
            "finished_good": {
                "item": "prod-7",
                "estimated_quantity": 100,
                "produced_quantity": "40",
                "remaining_quantity": 60
            },
            "raw_materials": [{"item": {"_id": "rm1", "name": "Sheet"}, "estimated_quantity": 20}],
            "processes": [{"process": "Cutting", "done": true}, {"process": "Welding", "done": false}],
            "final_produce_quantity": 40
        }))
        .unwrap();

        assert_eq!(p.status(), ProcessStatus::ProductionInProgress);
        assert_eq!(p.progress_percent(), 40.0);
        assert_eq!(p.steps_done(), 1);
        assert_eq!(p.raw_materials[0].item.as_ref().map(|i| i.label()), Some("Sheet".to_string()));
        assert_eq!(p.bom.as_ref().map(|b| b.label()), Some("Rack 4ft".to_string()));
    }
}
