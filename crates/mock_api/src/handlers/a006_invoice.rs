use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use contracts::domain::a006_invoice::Invoice;

use crate::shared::error::{ok, ApiError, ApiResult};
use crate::shared::state::AppState;

/// GET invoice/:id
///
/// An invoice without its own image falls back to the one uploaded on
/// the sale.
pub async fn get_by_id(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Invoice> {
    let store = state.store.read().await;
    let invoice = store
        .invoices
        .iter()
        .find(|i| i.id == id)
        .ok_or(ApiError::NotFound("Invoice"))?;

    let mut out = store.populated_invoice(invoice);
    if out.invoice_image.is_none() {
        out.invoice_image = invoice
            .sale_id
            .as_ref()
            .and_then(|r| store.sale(r.id()))
            .and_then(|s| s.invoice.clone());
    }
    ok(out)
}

/// GET /uploads/:name, served without auth like the backend's static dir
pub async fn serve_upload(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, ApiError> {
    let store = state.store.read().await;
    let file = store.uploads.get(&name).ok_or(ApiError::NotFound("File"))?;
    Ok((
        [(header::CONTENT_TYPE, file.content_type.clone())],
        Body::from(file.bytes.clone()),
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use crate::test_support::{read_json, send, test_app};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_invoice_is_populated() {
        let app = test_app();
        let response = send(&app, Method::GET, "/api/invoice/65a2f0000000000000000i01", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["data"]["invoice_no"], json!("INV-2024-0001"));
        assert_eq!(body["data"]["party"]["company_name"], json!("Mehta Steel Works"));
        assert!(body["data"]["items"][0]["item"]["name"].is_string());
    }

    #[tokio::test]
    async fn test_unknown_upload_is_404() {
        let app = test_app();
        let response = send(&app, Method::GET, "/uploads/missing.png", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
