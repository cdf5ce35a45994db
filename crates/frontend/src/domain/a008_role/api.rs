use contracts::domain::a008_role::{Role, RolePayload};
use gloo_net::http::Method;

use crate::shared::api_utils::{get_json, send_json};

pub async fn fetch_roles() -> Result<Vec<Role>, String> {
    get_json::<Vec<Role>>("role/").await
}

pub async fn create_role(payload: &RolePayload) -> Result<String, String> {
    send_json(Method::POST, "role/", payload).await
}
