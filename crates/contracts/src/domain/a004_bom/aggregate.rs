use crate::domain::a001_sale::Sale;
use crate::domain::a003_production_process::ProductionProcess;
use crate::domain::common::serde_helpers::{bool_or_false, opt_number};
use crate::domain::common::{Entity, ProductSummary, Ref};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BomFinishedGood {
    #[serde(default)]
    pub item: Option<Ref<ProductSummary>>,
    #[serde(default, deserialize_with = "opt_number")]
    pub quantity: Option<f64>,
    #[serde(default, deserialize_with = "opt_number")]
    pub cost: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BomRawMaterial {
    #[serde(default)]
    pub item: Option<Ref<ProductSummary>>,
    #[serde(default, deserialize_with = "opt_number")]
    pub quantity: Option<f64>,
    #[serde(default, deserialize_with = "opt_number")]
    pub total_part_cost: Option<f64>,
}

/// Bill of materials (a004)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bom {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub bom_id: Option<String>,
    #[serde(default)]
    pub bom_name: Option<String>,
    #[serde(default)]
    pub finished_good: Option<BomFinishedGood>,
    #[serde(default)]
    pub raw_materials: Vec<BomRawMaterial>,
    /// Process names, or objects with a `process` field
    #[serde(default)]
    pub processes: Vec<Value>,
    #[serde(default)]
    pub sale_id: Option<Ref<Sale>>,
    #[serde(default, deserialize_with = "opt_number")]
    pub total_cost: Option<f64>,
    #[serde(default, deserialize_with = "bool_or_false")]
    pub is_inventory_approved: bool,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
}

impl Bom {
    pub fn process_names(&self) -> Vec<String> {
        self.processes
            .iter()
            .filter_map(|p| match p {
                Value::String(s) => Some(s.clone()),
                Value::Object(map) => map.get("process").and_then(Value::as_str).map(str::to_string),
                _ => None,
            })
            .collect()
    }

    /// Sum of raw material part costs.
    pub fn raw_material_cost(&self) -> f64 {
        self.raw_materials.iter().filter_map(|rm| rm.total_part_cost).sum()
    }
}

impl Entity for Bom {
    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> String {
        self.bom_name
            .clone()
            .or_else(|| self.bom_id.clone())
            .unwrap_or_else(|| self.id.clone())
    }

    fn aggregate_index() -> &'static str {
        "a004"
    }

    fn collection_name() -> &'static str {
        "bom"
    }

    fn element_name() -> &'static str {
        "BOM"
    }

    fn list_name() -> &'static str {
        "BOMs"
    }
}

/// Answer of `bom/sales-order-status/:id`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BomSalesOrderStatus {
    #[serde(default)]
    pub sale_id: Option<String>,
    #[serde(default)]
    pub boms: Vec<Bom>,
    #[serde(default)]
    pub production_processes: Vec<ProductionProcess>,
}

impl BomSalesOrderStatus {
    pub fn approved_count(&self) -> usize {
        self.boms.iter().filter(|b| b.is_inventory_approved).count()
    }

    pub fn awaiting_approval(&self) -> Vec<&Bom> {
        self.boms.iter().filter(|b| !b.is_inventory_approved).collect()
    }
}

/// Body of `bom/approve/inventory/raw-materials`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApproveRawMaterialsPayload {
    #[serde(rename = "_id")]
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reads_bom() {
        let bom: Bom = serde_json::from_value(json!({
            "_id": "b1",
            "bom_id": "BOM-001",
            "bom_name": "Rack 4ft",
            "raw_materials": [
                {"item": "rm1", "quantity": 4, "total_part_cost": 400},
                {"item": "rm2", "quantity": "2", "total_part_cost": "150.5"}
            ],
            "processes": ["Cutting", {"process": "Welding", "done": false}, 3],
            "total_cost": 1200,
            "is_inventory_approved": "true"
        }))
        .unwrap();
        assert_eq!(bom.process_names(), vec!["Cutting".to_string(), "Welding".to_string()]);
        assert_eq!(bom.raw_material_cost(), 550.5);
        assert!(bom.is_inventory_approved);
        assert_eq!(bom.display_name(), "Rack 4ft");
    }

    #[test]
    fn test_sales_order_status() {
        let status: BomSalesOrderStatus = serde_json::from_value(json!({
            "sale_id": "s1",
            "boms": [
                {"_id": "b1", "is_inventory_approved": true},
                {"_id": "b2", "is_inventory_approved": false}
            ]
        }))
        .unwrap();
        assert_eq!(status.approved_count(), 1);
        assert_eq!(status.awaiting_approval()[0].id, "b2");
    }
}
