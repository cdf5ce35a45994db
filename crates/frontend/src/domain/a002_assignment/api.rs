use contracts::domain::a002_assignment::{AssignPayload, Assignment, StatusUpdatePayload};
use gloo_net::http::Method;

use crate::shared::api_utils::{get_json, send_empty, send_json};

pub async fn fetch_assignments() -> Result<Vec<Assignment>, String> {
    get_json::<Vec<Assignment>>("assined/get-assined").await
}

pub async fn create_assignment(payload: &AssignPayload) -> Result<String, String> {
    send_json(Method::POST, "assined/create", payload).await
}

pub async fn update_assignment(id: &str, payload: &AssignPayload) -> Result<String, String> {
    send_json(Method::PATCH, &format!("assined/update/{}", id), payload).await
}

pub async fn update_status(id: &str, payload: &StatusUpdatePayload) -> Result<String, String> {
    send_json(Method::PATCH, &format!("assined/update-status/{}", id), payload).await
}

pub async fn delete_assignment(id: &str) -> Result<String, String> {
    send_empty(Method::DELETE, &format!("assined/delete/{}", id)).await
}
