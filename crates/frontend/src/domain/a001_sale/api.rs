use contracts::domain::a001_sale::payment::TokenPayload;
use contracts::domain::a001_sale::{Sale, SalePayload};
use contracts::domain::a006_invoice::INVOICE_FIELD;
use contracts::shared::api::ApiResponse;
use gloo_net::http::Method;
use web_sys::{File, FormData};

use crate::shared::api_utils::{get_envelope, get_json, send_empty, send_form, send_json};

/// One page of `sale/getAll`, pages start at 1
pub async fn fetch_sales(page: usize) -> Result<ApiResponse<Vec<Sale>>, String> {
    get_envelope::<Vec<Sale>>(&format!("sale/getAll?page={}", page)).await
}

pub async fn fetch_upcoming_sales() -> Result<Vec<Sale>, String> {
    get_json::<Vec<Sale>>("sale/upcoming-sales").await
}

pub async fn create_sale(payload: &SalePayload) -> Result<String, String> {
    send_json(Method::POST, "sale/create", payload).await
}

pub async fn update_sale(id: &str, payload: &SalePayload) -> Result<String, String> {
    send_json(Method::PUT, &format!("sale/update/{}", id), payload).await
}

/// Token or half-token amount
pub async fn add_token(id: &str, payload: &TokenPayload) -> Result<String, String> {
    send_json(Method::PATCH, &format!("sale/addToken/{}", id), payload).await
}

pub async fn upload_invoice(id: &str, file: &File) -> Result<String, String> {
    let form = FormData::new().map_err(|e| format!("Failed to build form: {:?}", e))?;
    form.append_with_blob_and_filename(INVOICE_FIELD, file, &file.name())
        .map_err(|e| format!("Failed to attach file: {:?}", e))?;
    send_form(Method::PATCH, &format!("sale/upload-image/{}", id), form).await
}

pub async fn mark_completed(id: &str) -> Result<String, String> {
    send_empty(Method::PATCH, &format!("sale/mark-completed/{}", id)).await
}
