use axum::extract::{Path, State};
use contracts::domain::a007_employee::Employee;

use crate::shared::error::{ok, ApiError, ApiResult};
use crate::shared::state::AppState;

/// GET auth/user, the signed-in console user
pub async fn current_user(State(state): State<AppState>) -> ApiResult<Employee> {
    let store = state.store.read().await;
    let user = store.current_user().ok_or(ApiError::NotFound("User"))?;
    ok(store.populated_employee(user))
}

/// GET auth/user/:id
pub async fn get_by_id(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Employee> {
    let store = state.store.read().await;
    let employee = store
        .employees
        .iter()
        .find(|e| e.id == id)
        .ok_or(ApiError::NotFound("User"))?;
    ok(store.populated_employee(employee))
}

/// GET auth/all
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Employee>> {
    let store = state.store.read().await;
    ok(store
        .employees
        .iter()
        .map(|e| store.populated_employee(e))
        .collect())
}

#[cfg(test)]
mod tests {
    use crate::test_support::{read_json, send, test_app};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_current_user_has_role_populated() {
        let app = test_app();
        let body = read_json(send(&app, Method::GET, "/api/auth/user", None).await).await;
        assert_eq!(body["data"]["email"], json!("asha.rao@example.com"));
        assert_eq!(body["data"]["role"]["role"], json!("Admin"));
    }

    #[tokio::test]
    async fn test_employee_lookup() {
        let app = test_app();
        let body = read_json(send(&app, Method::GET, "/api/auth/all", None).await).await;
        assert_eq!(body["data"].as_array().map(Vec::len), Some(3));

        let response = send(&app, Method::GET, "/api/auth/user/nobody", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(read_json(response).await["message"], json!("User not found"));
    }
}
