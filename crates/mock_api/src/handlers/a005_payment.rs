use axum::extract::{Path, State};
use contracts::domain::a005_payment::Payment;

use crate::shared::error::{ok, ApiError, ApiResult};
use crate::shared::state::AppState;

/// GET payment/all, newest first
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Payment>> {
    let store = state.store.read().await;
    let mut rows: Vec<Payment> = store
        .payments
        .iter()
        .map(|p| store.populated_payment(p))
        .collect();
    rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    ok(rows)
}

/// GET payment/:id
pub async fn get_by_id(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Payment> {
    let store = state.store.read().await;
    let payment = store
        .payments
        .iter()
        .find(|p| p.id == id)
        .ok_or(ApiError::NotFound("Payment"))?;
    ok(store.populated_payment(payment))
}

#[cfg(test)]
mod tests {
    use crate::test_support::{read_json, send, test_app};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_payment_lookup() {
        let app = test_app();
        let response = send(&app, Method::GET, "/api/payment/65a2e0000000000000000y01", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["data"]["payment_type"], json!("token"));
        assert_eq!(body["data"]["sale_id"]["order_id"], json!("SO-0002"));

        let response = send(&app, Method::GET, "/api/payment/unknown", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(read_json(response).await["message"], json!("Payment not found"));
    }
}
