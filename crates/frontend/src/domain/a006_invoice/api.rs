use contracts::domain::a006_invoice::Invoice;

use crate::shared::api_utils::get_json;

pub async fn fetch_invoice(id: &str) -> Result<Invoice, String> {
    get_json::<Invoice>(&format!("invoice/{}", id)).await
}
