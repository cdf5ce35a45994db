use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use contracts::domain::a001_sale::Sale;
use contracts::domain::a003_production_process::{
    ProcessFinishedGood, ProcessRawMaterial, ProcessStatus, ProcessStep, ProductionProcess,
};
use contracts::domain::a004_bom::{ApproveRawMaterialsPayload, Bom, BomSalesOrderStatus};
use contracts::domain::common::Ref;
use serde_json::Value;

use crate::shared::error::{ok, ok_message, ApiError, ApiResult};
use crate::shared::state::AppState;
use crate::shared::store::{new_id, now_rfc3339};

/// GET bom/
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Bom>> {
    let store = state.store.read().await;
    let mut rows: Vec<Bom> = store.boms.iter().map(|b| store.populated_bom(b)).collect();
    rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    ok(rows)
}

/// GET bom/sales-order-status/:id
pub async fn sales_order_status(
    State(state): State<AppState>,
    Path(sale_id): Path<String>,
) -> ApiResult<BomSalesOrderStatus> {
    let store = state.store.read().await;
    if store.sale(&sale_id).is_none() {
        return Err(ApiError::NotFound("Sale"));
    }

    let belongs = |r: &Option<Ref<Sale>>| r.as_ref().is_some_and(|r| r.id() == sale_id);
    let boms = store
        .boms
        .iter()
        .filter(|b| belongs(&b.sale_id))
        .map(|b| store.populated_bom(b))
        .collect();
    let production_processes = store
        .processes
        .iter()
        .filter(|p| belongs(&p.sale_id))
        .map(|p| store.populated_process(p))
        .collect();

    ok(BomSalesOrderStatus {
        sale_id: Some(sale_id),
        boms,
        production_processes,
    })
}

/// Production run planned from an approved BOM.
pub fn process_from_bom(bom: &Bom) -> ProductionProcess {
    let finished_good = bom.finished_good.as_ref().map(|fg| ProcessFinishedGood {
        item: fg.item.clone(),
        estimated_quantity: fg.quantity,
        produced_quantity: Some(0.0),
        remaining_quantity: fg.quantity,
    });
    let raw_materials = bom
        .raw_materials
        .iter()
        .map(|rm| ProcessRawMaterial {
            item: rm.item.clone(),
            estimated_quantity: rm.quantity,
            used_quantity: Some(0.0),
            remaining_quantity: rm.quantity,
        })
        .collect();
    let processes = bom
        .process_names()
        .into_iter()
        .map(|process| ProcessStep { process, done: false })
        .collect();

    ProductionProcess {
        id: new_id(),
        process_name: bom.bom_name.clone(),
        bom: Some(Ref::Id(bom.id.clone())),
        sale_id: bom.sale_id.as_ref().map(|r| Ref::Id(r.id().to_string())),
        status: Some(ProcessStatus::InventoryAllocated.as_str().to_string()),
        finished_good,
        raw_materials,
        final_produce_quantity: None,
        processes,
        created_at: Some(now_rfc3339()),
    }
}

/// POST bom/approve/inventory/raw-materials
///
/// Approval allocates the raw materials, plans a production process and
/// links the BOM to its sale.
pub async fn approve_raw_materials(
    State(state): State<AppState>,
    payload: Result<Json<ApproveRawMaterialsPayload>, JsonRejection>,
) -> ApiResult<Bom> {
    let Json(payload) = payload?;
    let mut store = state.store.write().await;

    let bom = store
        .boms
        .iter_mut()
        .find(|b| b.id == payload.id)
        .ok_or(ApiError::NotFound("BOM"))?;
    if bom.is_inventory_approved {
        return Err(ApiError::bad_request("Raw materials already approved"));
    }
    bom.is_inventory_approved = true;
    let bom = bom.clone();

    let process = process_from_bom(&bom);
    tracing::info!(bom_id = %bom.id, process_id = %process.id, "raw materials approved");
    store.processes.push(process);

    if let Some(sale_id) = bom.sale_id.as_ref().map(|r| r.id().to_string()) {
        if let Some(sale) = store.sale_mut(&sale_id) {
            let linked = sale.boms.iter().any(|b| b.as_str() == Some(bom.id.as_str()));
            if !linked {
                sale.boms.push(Value::String(bom.id.clone()));
            }
        }
    }

    ok_message(store.populated_bom(&bom), "Raw materials approved")
}
