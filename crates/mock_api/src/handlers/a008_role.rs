use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use contracts::domain::a008_role::{Role, RolePayload, PERMISSIONS};

use crate::shared::error::{ok, ok_message, ApiError, ApiResult};
use crate::shared::state::AppState;
use crate::shared::store::{new_id, now_rfc3339};

/// GET role/
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Role>> {
    let store = state.store.read().await;
    ok(store.roles.clone())
}

/// POST role/
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<RolePayload>, JsonRejection>,
) -> ApiResult<Role> {
    let Json(payload) = payload?;
    let name = payload.role.trim();
    if name.is_empty() {
        return Err(ApiError::bad_request("Role name is required"));
    }
    if let Some(unknown) = payload
        .permissions
        .iter()
        .find(|p| !PERMISSIONS.contains(&p.as_str()))
    {
        return Err(ApiError::bad_request(format!("Unknown permission {}", unknown)));
    }

    let mut store = state.store.write().await;
    let taken = store
        .roles
        .iter()
        .any(|r| r.role.as_deref().is_some_and(|existing| existing.eq_ignore_ascii_case(name)));
    if taken {
        return Err(ApiError::bad_request("Role already exists"));
    }

    let role = Role {
        id: new_id(),
        role: Some(name.to_string()),
        description: payload.description.clone(),
        permissions: payload.permissions.clone(),
        created_at: Some(now_rfc3339()),
    };
    tracing::info!(role_id = %role.id, role = name, "role created");
    store.roles.push(role.clone());
    ok_message(role, "Role created successfully")
}

#[cfg(test)]
mod tests {
    use crate::test_support::{read_json, send, test_app};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_create_role() {
        let app = test_app();
        let body = json!({"role": " Quality Inspector ", "permissions": ["production", "bom"]});
        let response = send(&app, Method::POST, "/api/role/", Some(body)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let created = read_json(response).await;
        assert_eq!(created["data"]["role"], json!("Quality Inspector"));

        for name in ["quality inspector", "SUPERVISOR"] {
            let response = send(&app, Method::POST, "/api/role", Some(json!({"role": name}))).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(read_json(response).await["message"], json!("Role already exists"));
        }

        let body = json!({"role": "Auditor", "permissions": ["everything"]});
        let response = send(&app, Method::POST, "/api/role/", Some(body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let roles = read_json(send(&app, Method::GET, "/api/role/", None).await).await;
        assert_eq!(roles["data"].as_array().map(Vec::len), Some(4));
    }
}
