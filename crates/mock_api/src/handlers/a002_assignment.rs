use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use contracts::domain::a002_assignment::{AssignPayload, Assignment, StatusUpdatePayload, TaskStatus};
use contracts::domain::common::Ref;

use crate::shared::error::{ok, ok_message, ApiError, ApiResult};
use crate::shared::state::AppState;
use crate::shared::store::{new_id, now_rfc3339, Store};

/// GET assined/get-assined, newest first
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Assignment>> {
    let store = state.store.read().await;
    let mut rows: Vec<Assignment> = store
        .assignments
        .iter()
        .map(|a| store.populated_assignment(a))
        .collect();
    rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    ok(rows)
}

fn check_payload(store: &Store, payload: &AssignPayload) -> Result<(), ApiError> {
    if payload.assined_to.trim().is_empty() {
        return Err(ApiError::bad_request("Employee is required"));
    }
    if payload.assined_process.trim().is_empty() {
        return Err(ApiError::bad_request("Process is required"));
    }
    if store.user_summary(payload.assined_to.trim()).is_none() {
        return Err(ApiError::NotFound("Employee"));
    }
    Ok(())
}

/// POST assined/create
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<AssignPayload>, JsonRejection>,
) -> ApiResult<Assignment> {
    let Json(payload) = payload?;
    let mut store = state.store.write().await;
    check_payload(&store, &payload)?;

    let sale_id = payload
        .sale_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::bad_request("Sale is required"))?;
    if store.sale(sale_id).is_none() {
        return Err(ApiError::NotFound("Sale"));
    }

    let assignment = Assignment {
        id: new_id(),
        sale_id: Some(Ref::Id(sale_id.to_string())),
        assined_to: Some(Ref::Id(payload.assined_to.trim().to_string())),
        assined_by: store.current_user().map(|u| Ref::Id(u.id.clone())),
        assined_process: Some(payload.assined_process.trim().to_string()),
        assinedby_comment: payload.assinedby_comment.clone(),
        assinedto_comment: None,
        is_completed: Some(TaskStatus::Pending.as_flag().to_string()),
        created_at: Some(now_rfc3339()),
    };
    tracing::info!(assignment_id = %assignment.id, sale_id, "task assigned");

    let out = store.populated_assignment(&assignment);
    store.assignments.push(assignment);
    ok_message(out, "Task assigned successfully")
}

/// PATCH assined/update/:id; the sale link is fixed once created
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<AssignPayload>, JsonRejection>,
) -> ApiResult<Assignment> {
    let Json(payload) = payload?;
    let mut store = state.store.write().await;
    check_payload(&store, &payload)?;

    let assignment = store
        .assignments
        .iter_mut()
        .find(|a| a.id == id)
        .ok_or(ApiError::NotFound("Assignment"))?;
    assignment.assined_to = Some(Ref::Id(payload.assined_to.trim().to_string()));
    assignment.assined_process = Some(payload.assined_process.trim().to_string());
    assignment.assinedby_comment = payload.assinedby_comment.clone();

    let assignment = assignment.clone();
    ok_message(store.populated_assignment(&assignment), "Task updated successfully")
}

/// PATCH assined/update-status/:id
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<StatusUpdatePayload>, JsonRejection>,
) -> ApiResult<Assignment> {
    let Json(payload) = payload?;
    let status = match payload.is_completed.as_str() {
        "Pending" | "UnderProcessing" | "Completed" => TaskStatus::from_flag(Some(&payload.is_completed)),
        other => return Err(ApiError::bad_request(format!("Unknown status {}", other))),
    };

    let mut store = state.store.write().await;
    let assignment = store
        .assignments
        .iter_mut()
        .find(|a| a.id == id)
        .ok_or(ApiError::NotFound("Assignment"))?;
    assignment.is_completed = Some(status.as_flag().to_string());
    if payload.assinedto_comment.is_some() {
        assignment.assinedto_comment = payload.assinedto_comment.clone();
    }
    tracing::info!(assignment_id = %id, status = status.as_flag(), "task status changed");

    let assignment = assignment.clone();
    ok_message(store.populated_assignment(&assignment), "Status updated")
}

/// DELETE assined/delete/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<String> {
    let mut store = state.store.write().await;
    let before = store.assignments.len();
    store.assignments.retain(|a| a.id != id);
    if store.assignments.len() == before {
        return Err(ApiError::NotFound("Assignment"));
    }
    ok_message(id, "Task deleted successfully")
}

#[cfg(test)]
mod tests {
    use crate::test_support::{read_json, send, test_app};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    const SALE: &str = "65a2a0000000000000000s01";
    const WORKER: &str = "65a1e0000000000000000e02";

    #[tokio::test]
    async fn test_assign_then_progress_and_delete() {
        let app = test_app();
        let body = json!({
            "sale_id": SALE,
            "assined_to": WORKER,
            "assined_process": "Painting",
            "assinedby_comment": "Two coats"
        });
        let response = send(&app, Method::POST, "/api/assined/create", Some(body)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let created = read_json(response).await["data"].clone();
        assert_eq!(created["isCompleted"], json!("Pending"));
        assert_eq!(created["assined_by"]["first_name"], json!("Asha"));
        assert_eq!(created["sale_id"]["order_id"], json!("SO-0001"));
        let id = created["_id"].as_str().unwrap().to_string();

        let response = send(
            &app,
            Method::PATCH,
            &format!("/api/assined/update-status/{}", id),
            Some(json!({"isCompleted": "UnderProcessing", "assinedto_comment": "Primer done"})),
        )
        .await;
        let updated = read_json(response).await["data"].clone();
        assert_eq!(updated["isCompleted"], json!("UnderProcessing"));
        assert_eq!(updated["assinedto_comment"], json!("Primer done"));

        let response = send(
            &app,
            Method::PATCH,
            &format!("/api/assined/update-status/{}", id),
            Some(json!({"isCompleted": "Done"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let uri = format!("/api/assined/delete/{}", id);
        assert_eq!(send(&app, Method::DELETE, &uri, None).await.status(), StatusCode::OK);
        assert_eq!(send(&app, Method::DELETE, &uri, None).await.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_requires_known_employee() {
        let app = test_app();
        let body = json!({"sale_id": SALE, "assined_to": "nobody", "assined_process": "Cutting"});
        let response = send(&app, Method::POST, "/api/assined/create", Some(body)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(read_json(response).await["message"], json!("Employee not found"));

        let body = json!({"assined_to": WORKER, "assined_process": "Cutting"});
        let response = send(&app, Method::POST, "/api/assined/create", Some(body)).await;
        assert_eq!(read_json(response).await["message"], json!("Sale is required"));
    }
}
