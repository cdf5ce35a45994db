use axum::extract::State;
use contracts::dashboards::d401_machine_status::MachineRecord;

use crate::shared::error::{ok, ApiResult};
use crate::shared::state::AppState;

/// GET dashboard/machine-data
pub async fn machine_data(State(state): State<AppState>) -> ApiResult<Vec<MachineRecord>> {
    let store = state.store.read().await;
    ok(store.machines.clone())
}

#[cfg(test)]
mod tests {
    use crate::test_support::{read_json, send, test_app};
    use axum::http::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_machine_snapshot() {
        let app = test_app();
        let body = read_json(send(&app, Method::GET, "/api/dashboard/machine-data", None).await).await;
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["data"][0]["machine_id"], json!("M-01"));
        assert_eq!(body["data"].as_array().map(Vec::len), Some(4));
    }
}
