use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use contracts::dashboards::d400_sensors::{ControlDataUpdate, DeviceDataRecord};

use crate::shared::error::{ok, ok_message, ApiError, ApiResult};
use crate::shared::state::AppState;
use crate::shared::store::{new_id, now_rfc3339};

/// GET devicedata/get-device-data
pub async fn history(State(state): State<AppState>) -> ApiResult<Vec<DeviceDataRecord>> {
    let store = state.store.read().await;
    ok(store.device_data.clone())
}

/// Stores a reading or actuator command and fans it out to joined sockets.
pub async fn record(state: &AppState, mut update: ControlDataUpdate) -> DeviceDataRecord {
    let now = now_rfc3339();
    if update.timestamp.is_none() {
        update.timestamp = Some(now.clone());
    }
    let record = DeviceDataRecord {
        id: new_id(),
        data: update.clone(),
        created_at: Some(now),
    };
    state.store.write().await.push_device_data(record.clone());
    state.publish(update);
    record
}

/// POST devicedata/dashboardtodb
pub async fn write_control(
    State(state): State<AppState>,
    payload: Result<Json<ControlDataUpdate>, JsonRejection>,
) -> ApiResult<DeviceDataRecord> {
    let Json(update) = payload?;
    if update.is_empty() {
        return Err(ApiError::bad_request("Nothing to update"));
    }
    let record = record(&state, update).await;
    tracing::info!(record_id = %record.id, "control data stored");
    ok_message(record, "Control data saved")
}

#[cfg(test)]
mod tests {
    use crate::test_support::{read_json, send, test_app_with_state};
    use axum::http::{Method, StatusCode};
    use contracts::dashboards::d400_sensors::{Actuator, ControlDataUpdate};
    use serde_json::json;

    #[tokio::test]
    async fn test_write_is_stored_and_broadcast() {
        let (app, state) = test_app_with_state();
        let mut rx = state.telemetry.subscribe();

        let response = send(
            &app,
            Method::POST,
            "/api/devicedata/dashboardtodb",
            Some(json!({"motor": "ON"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let update = rx.try_recv().unwrap();
        assert_eq!(update.motor, ControlDataUpdate::switch(Actuator::Motor, true).motor);
        assert!(update.timestamp.is_some());

        let body = read_json(send(&app, Method::GET, "/api/devicedata/get-device-data", None).await).await;
        let rows = body["data"].as_array().cloned().unwrap_or_default();
        assert_eq!(rows.len(), 4);
    }

    #[tokio::test]
    async fn test_empty_write_is_rejected() {
        let (app, _) = test_app_with_state();
        let response = send(&app, Method::POST, "/api/devicedata/dashboardtodb", Some(json!({}))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(response).await["message"], json!("Nothing to update"));
    }
}
