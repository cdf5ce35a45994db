use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Multipart, Path, Query, State};
use axum::Json;
use chrono::Utc;
use contracts::domain::a001_sale::payment::TokenPayload;
use contracts::domain::a001_sale::{Sale, SaleActions, SalePayload, SaleStage};
use contracts::domain::a005_payment::Payment;
use contracts::domain::a006_invoice::upload::is_allowed_mime;
use contracts::domain::a006_invoice::INVOICE_FIELD;
use contracts::domain::common::{PartySummary, Ref};
use contracts::shared::api::ApiResponse;
use contracts::shared::dates::is_upcoming;
use serde::Deserialize;

use crate::shared::error::{ok, ok_message, ApiError, ApiResult};
use crate::shared::state::AppState;
use crate::shared::store::{new_id, now_rfc3339, StoredFile};

pub const PAGE_SIZE: usize = 10;
pub const UPCOMING_DAYS: i64 = 7;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<usize>,
}

/// GET sale/getAll?page= (1-based, newest first)
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<Vec<Sale>> {
    let Query(query) = query?;
    let page = query.page.unwrap_or(1).max(1);
    let store = state.store.read().await;

    let mut sales: Vec<&Sale> = store.sales.iter().collect();
    sales.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    let total = sales.len();
    let rows = sales
        .into_iter()
        .skip((page - 1) * PAGE_SIZE)
        .take(PAGE_SIZE)
        .map(|s| store.populated_sale(s))
        .collect();

    Ok(Json(ApiResponse::ok(rows).with_page(page, total)))
}

/// GET sale/upcoming-sales
pub async fn upcoming(State(state): State<AppState>) -> ApiResult<Vec<Sale>> {
    let today = Utc::now().date_naive();
    let store = state.store.read().await;
    let rows = store
        .sales
        .iter()
        .filter(|s| SaleStage::of(s) != SaleStage::Completed)
        .filter(|s| is_upcoming(s.delivery_date.as_deref(), today, UPCOMING_DAYS))
        .map(|s| store.populated_sale(s))
        .collect();
    ok(rows)
}

fn check_payload(payload: &SalePayload) -> Result<(), ApiError> {
    if payload.party.trim().is_empty() {
        return Err(ApiError::bad_request("Party is required"));
    }
    if payload.product_id.trim().is_empty() {
        return Err(ApiError::bad_request("Product is required"));
    }
    if payload.price <= 0.0 {
        return Err(ApiError::bad_request("Price must be greater than zero"));
    }
    if payload.product_qty == 0 {
        return Err(ApiError::bad_request("Product quantity must be greater than zero"));
    }
    Ok(())
}

fn apply_payload(party: Ref<PartySummary>, sale: &mut Sale, payload: &SalePayload) {
    sale.party = Some(party);
    sale.price = Some(payload.price);
    sale.product_qty = Some(payload.product_qty as f64);
    sale.gst = Some(payload.gst.percent() as f64);
    sale.mode_of_payment = Some(payload.mode_of_payment.as_str().to_string());
    sale.terms_of_delivery = payload.terms_of_delivery.clone();
    sale.comment = payload.comment.clone();
    sale.uom = payload.uom.clone();
}

/// POST sale/create
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<SalePayload>, JsonRejection>,
) -> ApiResult<Sale> {
    let Json(payload) = payload?;
    check_payload(&payload)?;

    let mut store = state.store.write().await;
    let now = now_rfc3339();
    let mut sale = Sale {
        id: new_id(),
        order_id: Some(store.next_order_id()),
        product_id: Some(Ref::Id(payload.product_id.trim().to_string())),
        user_id: store.current_user().map(|u| Ref::Id(u.id.clone())),
        created_at: Some(now.clone()),
        updated_at: Some(now),
        ..Default::default()
    };
    apply_payload(Ref::Id(payload.party.trim().to_string()), &mut sale, &payload);

    tracing::info!(sale_id = %sale.id, order_id = ?sale.order_id, "sale created");
    let out = store.populated_sale(&sale);
    store.sales.push(sale);
    ok_message(out, "Sale created successfully")
}

/// PUT sale/update/:id; only before the token is verified
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<SalePayload>, JsonRejection>,
) -> ApiResult<Sale> {
    let Json(payload) = payload?;
    check_payload(&payload)?;

    let mut store = state.store.write().await;
    let sale = store.sale_mut(&id).ok_or(ApiError::NotFound("Sale"))?;
    if !SaleActions::of(sale).can_edit {
        return Err(ApiError::bad_request("Sale can no longer be edited"));
    }
    apply_payload(Ref::Id(payload.party.trim().to_string()), sale, &payload);
    sale.product_id = Some(Ref::Id(payload.product_id.trim().to_string()));
    sale.updated_at = Some(now_rfc3339());

    let sale = sale.clone();
    ok_message(store.populated_sale(&sale), "Sale updated successfully")
}

/// PATCH sale/addToken/:id with either `token_amt` or `half_payment`.
///
/// Accounts verification is immediate here, so the next payment step
/// unlocks right away.
pub async fn add_token(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<TokenPayload>, JsonRejection>,
) -> ApiResult<Sale> {
    let Json(payload) = payload?;
    let (amount, kind) = match (payload.token_amt, payload.half_payment) {
        (Some(amount), None) => (amount, "token"),
        (None, Some(amount)) => (amount, "half"),
        _ => return Err(ApiError::bad_request("Send either token_amt or half_payment")),
    };
    if amount <= 0.0 {
        return Err(ApiError::bad_request("Amount must be greater than zero"));
    }

    let mut store = state.store.write().await;
    let sale = store.sale_mut(&id).ok_or(ApiError::NotFound("Sale"))?;
    let actions = SaleActions::of(sale);
    match kind {
        "token" if !actions.can_add_token => {
            return Err(ApiError::bad_request("Token amount already recorded"));
        }
        "half" if !actions.can_add_half_payment => {
            return Err(ApiError::bad_request("Half payment needs a verified token first"));
        }
        "token" => {
            sale.token_amt = Some(amount);
            sale.token_status = true;
        }
        _ => {
            sale.half_payment = Some(amount);
            sale.half_payment_status = true;
        }
    }
    let now = now_rfc3339();
    sale.updated_at = Some(now.clone());
    let mode = sale.mode_of_payment.clone();
    let sale = sale.clone();

    store.payments.push(Payment {
        id: new_id(),
        sale_id: Some(Ref::Id(id.clone())),
        amount: Some(amount),
        mode,
        payment_type: Some(kind.to_string()),
        verified: true,
        created_at: Some(now),
    });
    tracing::info!(sale_id = %id, kind, amount, "payment recorded");

    let message = if kind == "token" {
        "Token amount added"
    } else {
        "Half payment added"
    };
    ok_message(store.populated_sale(&sale), message)
}

/// PATCH sale/upload-image/:id, multipart field `invoice`
pub async fn upload_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> ApiResult<Sale> {
    if state.store.read().await.sale(&id).is_none() {
        return Err(ApiError::NotFound("Sale"));
    }

    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(INVOICE_FIELD) {
            continue;
        }
        let content_type = field.content_type().unwrap_or_default().to_string();
        let file_name = field.file_name().unwrap_or("invoice").to_string();
        if !is_allowed_mime(&content_type) {
            return Err(ApiError::bad_request("Only JPEG, PNG and GIF images are allowed"));
        }
        let bytes = field.bytes().await?;
        upload = Some((file_name, content_type, bytes.to_vec()));
        break;
    }
    let (file_name, content_type, bytes) =
        upload.ok_or_else(|| ApiError::bad_request("Invoice file is required"))?;

    let stored_name = format!("{}-{}", id, sanitize_file_name(&file_name));
    let mut store = state.store.write().await;
    store.uploads.insert(
        stored_name.clone(),
        StoredFile {
            content_type,
            bytes,
        },
    );
    let sale = store.sale_mut(&id).ok_or(ApiError::NotFound("Sale"))?;
    sale.invoice = Some(format!("uploads/{}", stored_name));
    sale.updated_at = Some(now_rfc3339());
    let sale = sale.clone();

    tracing::info!(sale_id = %id, file = %stored_name, "invoice uploaded");
    ok_message(store.populated_sale(&sale), "Invoice uploaded")
}

/// PATCH sale/mark-completed/:id
pub async fn mark_completed(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Sale> {
    let mut store = state.store.write().await;
    let sale = store.sale_mut(&id).ok_or(ApiError::NotFound("Sale"))?;
    if !SaleActions::of(sale).can_mark_completed {
        return Err(ApiError::bad_request("Sale cannot be completed yet"));
    }
    sale.is_completed = Some("Completed".to_string());
    sale.updated_at = Some(now_rfc3339());
    let sale = sale.clone();
    ok_message(store.populated_sale(&sale), "Sale marked as completed")
}

/// Keeps `[A-Za-z0-9._-]`, everything else becomes `_`.
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.').to_string();
    if cleaned.is_empty() {
        "invoice".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{read_json, send, send_multipart, test_app};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    const PENDING_SALE: &str = "65a2a0000000000000000s01";
    const DELIVERED_SALE: &str = "65a2a0000000000000000s04";

    fn sale_body() -> serde_json::Value {
        json!({
            "party": "65a1b0000000000000000p03",
            "product_id": "65a1c0000000000000000r01",
            "price": 9500,
            "product_qty": 4,
            "GST": 18,
            "mode_of_payment": "UPI"
        })
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("scan 01.png"), "scan_01.png");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "_.._etc_passwd");
        assert_eq!(sanitize_file_name(""), "invoice");
    }

    #[tokio::test]
    async fn test_list_is_paged_envelope() {
        let app = test_app();
        let response = send(&app, Method::GET, "/api/sale/getAll?page=1", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["total"], json!(5));
        assert_eq!(body["page"], json!(1));
        assert_eq!(body["data"].as_array().map(Vec::len), Some(5));
        // newest first, references populated
        assert_eq!(body["data"][0]["order_id"], json!("SO-0003"));
        assert_eq!(body["data"][0]["party"]["company_name"], json!("Sunrise Agro Foods"));

        let response = send(&app, Method::GET, "/api/sale/getAll?page=2", None).await;
        let body = read_json(response).await;
        assert_eq!(body["data"], json!([]));
    }

    #[tokio::test]
    async fn test_sale_lifecycle() {
        let app = test_app();

        let response = send(&app, Method::POST, "/api/sale/create", Some(sale_body())).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["message"], json!("Sale created successfully"));
        assert_eq!(body["data"]["order_id"], json!("SO-0006"));
        let id = body["data"]["_id"].as_str().unwrap().to_string();

        let mut edit = sale_body();
        edit["price"] = json!(9900);
        let response = send(&app, Method::PUT, &format!("/api/sale/update/{}", id), Some(edit)).await;
        assert_eq!(read_json(response).await["data"]["price"], json!(9900.0));

        let response = send(
            &app,
            Method::PATCH,
            &format!("/api/sale/addToken/{}", id),
            Some(json!({"half_payment": 100})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = send(
            &app,
            Method::PATCH,
            &format!("/api/sale/addToken/{}", id),
            Some(json!({"token_amt": 5000})),
        )
        .await;
        let body = read_json(response).await;
        assert_eq!(body["data"]["token_status"], json!(true));

        // verified token locks the form
        let response = send(&app, Method::PUT, &format!("/api/sale/update/{}", id), Some(sale_body())).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(response).await["message"], json!("Sale can no longer be edited"));

        let response = send(&app, Method::GET, "/api/payment/all", None).await;
        let payments = read_json(response).await["data"].as_array().cloned().unwrap();
        assert!(payments.iter().any(|p| p["sale_id"]["_id"] == json!(id) && p["amount"] == json!(5000.0)));
    }

    #[tokio::test]
    async fn test_create_rejects_bad_payloads() {
        let app = test_app();

        let mut body = sale_body();
        body["GST"] = json!(7);
        let response = send(&app, Method::POST, "/api/sale/create", Some(body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(response).await["success"], json!(false));

        let mut body = sale_body();
        body["price"] = json!(0);
        let response = send(&app, Method::POST, "/api/sale/create", Some(body)).await;
        assert_eq!(
            read_json(response).await["message"],
            json!("Price must be greater than zero")
        );
    }

    #[tokio::test]
    async fn test_upload_checks_mime_type() {
        let app = test_app();
        let uri = format!("/api/sale/upload-image/{}", PENDING_SALE);

        let response = send_multipart(&app, &uri, INVOICE_FIELD, "bill.pdf", "application/pdf", b"%PDF").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            read_json(response).await["message"],
            json!("Only JPEG, PNG and GIF images are allowed")
        );

        let response = send_multipart(&app, &uri, "other", "bill.png", "image/png", b"png").await;
        assert_eq!(read_json(response).await["message"], json!("Invoice file is required"));

        let response = send_multipart(&app, &uri, INVOICE_FIELD, "bill 1.png", "image/png", b"png").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        let path = format!("uploads/{}-bill_1.png", PENDING_SALE);
        assert_eq!(body["data"]["invoice"], json!(path));

        let response = send(&app, Method::GET, &format!("/{}", path), None).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_mark_completed_once() {
        let app = test_app();
        let uri = format!("/api/sale/mark-completed/{}", DELIVERED_SALE);
        let response = send(&app, Method::PATCH, &uri, None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await["data"]["isCompleted"], json!("Completed"));

        let response = send(&app, Method::PATCH, &uri, None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = send(&app, Method::PATCH, "/api/sale/mark-completed/nope", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(read_json(response).await["message"], json!("Sale not found"));
    }
}
