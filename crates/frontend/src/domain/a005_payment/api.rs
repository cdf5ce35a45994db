use contracts::domain::a005_payment::Payment;

use crate::shared::api_utils::get_json;

pub async fn fetch_payments() -> Result<Vec<Payment>, String> {
    get_json::<Vec<Payment>>("payment/all").await
}

pub async fn fetch_payment(id: &str) -> Result<Payment, String> {
    get_json::<Payment>(&format!("payment/{}", id)).await
}
