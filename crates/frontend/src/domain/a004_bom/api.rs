use contracts::domain::a004_bom::{ApproveRawMaterialsPayload, Bom, BomSalesOrderStatus};
use gloo_net::http::Method;

use crate::shared::api_utils::{get_json, send_json};

pub async fn fetch_boms() -> Result<Vec<Bom>, String> {
    get_json::<Vec<Bom>>("bom/").await
}

pub async fn fetch_sales_order_status(sale_id: &str) -> Result<BomSalesOrderStatus, String> {
    get_json::<BomSalesOrderStatus>(&format!("bom/sales-order-status/{}", sale_id)).await
}

pub async fn approve_raw_materials(bom_id: &str) -> Result<String, String> {
    let payload = ApproveRawMaterialsPayload {
        id: bom_id.to_string(),
    };
    send_json(Method::POST, "bom/approve/inventory/raw-materials", &payload).await
}
