use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use contracts::domain::a003_production_process::{
    BulkDeletePayload, MoveToInventory, ProcessActions, ProcessIdPayload, ProcessStatus,
    ProductionProcess, ProgressPayload,
};

use crate::shared::error::{ok, ok_message, ApiError, ApiResult};
use crate::shared::state::AppState;

/// GET production-process/all
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<ProductionProcess>> {
    let store = state.store.read().await;
    let mut rows: Vec<ProductionProcess> = store
        .processes
        .iter()
        .map(|p| store.populated_process(p))
        .collect();
    rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    ok(rows)
}

/// GET production-process/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ProductionProcess> {
    let store = state.store.read().await;
    let process = store
        .processes
        .iter()
        .find(|p| p.id == id)
        .ok_or(ApiError::NotFound("Production process"))?;
    ok(store.populated_process(process))
}

/// Moves a process to the status `next` returns, when `allowed` says the
/// current status permits it.
async fn transition(
    state: &AppState,
    payload: Result<Json<ProcessIdPayload>, JsonRejection>,
    allowed: fn(&ProcessActions) -> Result<(), ApiError>,
    next: fn(&ProcessStatus) -> ProcessStatus,
    message: &'static str,
) -> ApiResult<ProductionProcess> {
    let Json(payload) = payload?;
    let mut store = state.store.write().await;
    let process = store
        .process_mut(&payload.id)
        .ok_or(ApiError::NotFound("Production process"))?;

    allowed(&ProcessActions::of(process))?;
    let from = process.status();
    let to = next(&from);
    process.status = Some(to.as_str().to_string());
    tracing::info!(process_id = %process.id, from = from.as_str(), to = to.as_str(), "process status changed");

    let process = process.clone();
    ok_message(store.populated_process(&process), message)
}

fn not_allowed(what: &str) -> ApiError {
    ApiError::bad_request(format!("{} is not allowed in the current status", what))
}

/// POST production-process/allocation; stores grant the request at once
pub async fn request_allocation(
    State(state): State<AppState>,
    payload: Result<Json<ProcessIdPayload>, JsonRejection>,
) -> ApiResult<ProductionProcess> {
    transition(
        &state,
        payload,
        |a| a.request_allocation.then_some(()).ok_or_else(|| not_allowed("Allocation request")),
        |_| ProcessStatus::AllowedToProduce,
        "Inventory allocation approved",
    )
    .await
}

/// PUT production-process/start-production, also resumes a paused run
pub async fn start(
    State(state): State<AppState>,
    payload: Result<Json<ProcessIdPayload>, JsonRejection>,
) -> ApiResult<ProductionProcess> {
    transition(
        &state,
        payload,
        |a| a.start.then_some(()).ok_or_else(|| not_allowed("Starting production")),
        |from| match from {
            ProcessStatus::ProductionPaused => ProcessStatus::ProductionInProgress,
            _ => ProcessStatus::ProductionStarted,
        },
        "Production started",
    )
    .await
}

/// PUT production-process/pause
pub async fn pause(
    State(state): State<AppState>,
    payload: Result<Json<ProcessIdPayload>, JsonRejection>,
) -> ApiResult<ProductionProcess> {
    transition(
        &state,
        payload,
        |a| a.pause.then_some(()).ok_or_else(|| not_allowed("Pausing")),
        |_| ProcessStatus::ProductionPaused,
        "Production paused",
    )
    .await
}

/// PUT production-process/move-to-inventory
pub async fn move_to_inventory(
    State(state): State<AppState>,
    payload: Result<Json<ProcessIdPayload>, JsonRejection>,
) -> ApiResult<ProductionProcess> {
    transition(
        &state,
        payload,
        |a| match a.move_to_inventory {
            MoveToInventory::Enabled => Ok(()),
            MoveToInventory::Disabled(block) => Err(ApiError::bad_request(block.reason())),
            MoveToInventory::Hidden => Err(not_allowed("Moving to inventory")),
        },
        |_| ProcessStatus::MovedToInventory,
        "Moved to inventory",
    )
    .await
}

/// PUT production-process/out-finish-goods
pub async fn out_finish_goods(
    State(state): State<AppState>,
    payload: Result<Json<ProcessIdPayload>, JsonRejection>,
) -> ApiResult<ProductionProcess> {
    transition(
        &state,
        payload,
        |a| a.out_finish_goods.then_some(()).ok_or_else(|| not_allowed("Out finished goods")),
        |_| ProcessStatus::OutFinishedGoods,
        "Finished goods released",
    )
    .await
}

/// PUT production-process/update-status
///
/// Adds `produced_quantity` to the finished good, capped at what is still
/// remaining. Reaching zero remaining completes the process.
pub async fn update_progress(
    State(state): State<AppState>,
    payload: Result<Json<ProgressPayload>, JsonRejection>,
) -> ApiResult<ProductionProcess> {
    let Json(payload) = payload?;
    if !(payload.produced_quantity > 0.0) {
        return Err(ApiError::bad_request("Produced quantity must be greater than zero"));
    }

    let mut store = state.store.write().await;
    let process = store
        .process_mut(&payload.id)
        .ok_or(ApiError::NotFound("Production process"))?;
    if !ProcessActions::of(process).update_progress {
        return Err(not_allowed("Updating progress"));
    }

    let estimated = process.estimated_quantity().unwrap_or(0.0);
    let remaining = process.remaining_quantity().unwrap_or(estimated);
    let produced = payload.produced_quantity.min(remaining);
    let left = remaining - produced;

    let fg = process.finished_good.get_or_insert_with(Default::default);
    fg.produced_quantity = Some(fg.produced_quantity.unwrap_or(0.0) + produced);
    fg.remaining_quantity = Some(left);
    process.final_produce_quantity = Some(process.final_produce_quantity.unwrap_or(0.0) + produced);
    process.status = Some(
        if left <= 0.0 {
            ProcessStatus::Completed
        } else {
            ProcessStatus::ProductionInProgress
        }
        .as_str()
        .to_string(),
    );
    tracing::info!(process_id = %payload.id, produced, left, "production progress recorded");

    let process = process.clone();
    ok_message(store.populated_process(&process), "Production progress updated")
}

/// POST production-process/bulk-delete
///
/// Only processes that have not reached the shop floor are removed; the
/// rest are reported as skipped.
pub async fn bulk_delete(
    State(state): State<AppState>,
    payload: Result<Json<BulkDeletePayload>, JsonRejection>,
) -> ApiResult<Vec<String>> {
    let Json(payload) = payload?;
    if payload.ids.is_empty() {
        return Err(ApiError::bad_request("Select at least one process"));
    }

    let mut store = state.store.write().await;
    let deleted: Vec<String> = store
        .processes
        .iter()
        .filter(|p| payload.ids.contains(&p.id) && ProcessActions::of(p).deletable)
        .map(|p| p.id.clone())
        .collect();
    store.processes.retain(|p| !deleted.contains(&p.id));

    let skipped = payload.ids.len() - deleted.len();
    tracing::info!(deleted = deleted.len(), skipped, "processes deleted");
    let message = if skipped == 0 {
        format!("{} process(es) deleted", deleted.len())
    } else {
        format!("{} process(es) deleted, {} skipped", deleted.len(), skipped)
    };
    ok_message(deleted, message)
}

#[cfg(test)]
mod tests {
    use crate::test_support::{read_json, send, test_app};
    use axum::http::{Method, StatusCode};
    use serde_json::{json, Value};

    const IN_PROGRESS: &str = "65a2d0000000000000000q01";
    const ALLOCATED: &str = "65a2d0000000000000000q03";
    const ALLOWED: &str = "65a2d0000000000000000q04";
    const APPROVAL_PENDING: &str = "65a2d0000000000000000q05";

    async fn command(app: &axum::Router, method: Method, path: &str, id: &str) -> (StatusCode, Value) {
        let response = send(
            app,
            method,
            &format!("/api/production-process/{}", path),
            Some(json!({"_id": id})),
        )
        .await;
        (response.status(), read_json(response).await)
    }

    #[tokio::test]
    async fn test_run_pause_resume_and_finish() {
        let app = test_app();

        let (status, body) = command(&app, Method::PUT, "start-production", ALLOWED).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], json!("production started"));

        let response = send(
            &app,
            Method::PUT,
            "/api/production-process/update-status",
            Some(json!({"_id": ALLOWED, "produced_quantity": 5})),
        )
        .await;
        let body = read_json(response).await;
        assert_eq!(body["data"]["status"], json!("production in progress"));
        assert_eq!(body["data"]["finished_good"]["remaining_quantity"], json!(15.0));

        let (_, body) = command(&app, Method::PUT, "pause", ALLOWED).await;
        assert_eq!(body["data"]["status"], json!("production paused"));
        let (status, _) = command(&app, Method::PUT, "pause", ALLOWED).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, body) = command(&app, Method::PUT, "start-production", ALLOWED).await;
        assert_eq!(body["data"]["status"], json!("production in progress"));

        // more than remaining is capped
        let response = send(
            &app,
            Method::PUT,
            "/api/production-process/update-status",
            Some(json!({"_id": ALLOWED, "produced_quantity": 50})),
        )
        .await;
        let body = read_json(response).await;
        assert_eq!(body["data"]["status"], json!("completed"));
        assert_eq!(body["data"]["final_produce_quantity"], json!(20.0));

        let (_, body) = command(&app, Method::PUT, "move-to-inventory", ALLOWED).await;
        assert_eq!(body["data"]["status"], json!("moved to inventory"));
        let (_, body) = command(&app, Method::PUT, "out-finish-goods", ALLOWED).await;
        assert_eq!(body["data"]["status"], json!("out finished goods"));
    }

    #[tokio::test]
    async fn test_move_blocked_until_something_produced() {
        let app = test_app();
        let (status, body) = command(&app, Method::PUT, "move-to-inventory", IN_PROGRESS).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], json!("Nothing has been produced yet"));
    }

    #[tokio::test]
    async fn test_allocation_request_is_granted() {
        let app = test_app();
        let (_, body) = command(&app, Method::POST, "allocation", ALLOCATED).await;
        assert_eq!(body["data"]["status"], json!("allowed to produce"));

        let (status, body) = command(&app, Method::POST, "allocation", ALLOCATED).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], json!(false));

        let (status, _) = command(&app, Method::POST, "allocation", "missing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_bulk_delete_skips_running_processes() {
        let app = test_app();
        let response = send(
            &app,
            Method::POST,
            "/api/production-process/bulk-delete",
            Some(json!({"ids": [ALLOCATED, APPROVAL_PENDING, IN_PROGRESS]})),
        )
        .await;
        let body = read_json(response).await;
        assert_eq!(body["message"], json!("2 process(es) deleted, 1 skipped"));
        assert_eq!(body["data"], json!([ALLOCATED, APPROVAL_PENDING]));

        let response = send(&app, Method::GET, "/api/production-process/all", None).await;
        let rows = read_json(response).await["data"].as_array().cloned().unwrap_or_default();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().any(|p| p["_id"] == json!(IN_PROGRESS)));

        let response = send(
            &app,
            Method::POST,
            "/api/production-process/bulk-delete",
            Some(json!({"ids": []})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
