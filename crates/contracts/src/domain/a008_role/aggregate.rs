use crate::domain::common::Entity;
use crate::shared::validation::{non_empty, required_string, ValidationErrors, RULE_ONE_OF};
use serde::{Deserialize, Serialize};

/// Console sections a role can be granted.
pub const PERMISSIONS: [&str; 8] = [
    "sales",
    "production",
    "bom",
    "payments",
    "invoices",
    "employees",
    "sensors",
    "machines",
];

/// Role (a008)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Role {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
}

impl Entity for Role {
    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> String {
        self.role.clone().unwrap_or_else(|| self.id.clone())
    }

    fn aggregate_index() -> &'static str {
        "a008"
    }

    fn collection_name() -> &'static str {
        "role"
    }

    fn element_name() -> &'static str {
        "Role"
    }

    fn list_name() -> &'static str {
        "Roles"
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoleForm {
    pub role: String,
    pub description: String,
    pub permissions: Vec<String>,
}

/// Body of `POST role/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RolePayload {
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl RoleForm {
    pub fn toggle_permission(&mut self, permission: &str) {
        if let Some(pos) = self.permissions.iter().position(|p| p == permission) {
            self.permissions.remove(pos);
        } else {
            self.permissions.push(permission.to_string());
        }
    }

    pub fn validate(&self) -> Result<RolePayload, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let role = required_string(&mut errors, "role", &self.role, "Role name is required");
        if self
            .permissions
            .iter()
            .any(|p| !PERMISSIONS.contains(&p.as_str()))
        {
            errors.add("permissions", RULE_ONE_OF, "Select valid permissions");
        }
        errors.into_result(|| RolePayload {
            role: role.unwrap_or_default(),
            description: non_empty(&self.description),
            permissions: self.permissions.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_form() {
        let mut form = RoleForm {
            role: " Supervisor ".into(),
            ..Default::default()
        };
        form.toggle_permission("production");
        form.toggle_permission("sales");
        form.toggle_permission("sales");
        let payload = form.validate().unwrap();
        assert_eq!(payload.role, "Supervisor");
        assert_eq!(payload.permissions, vec!["production".to_string()]);

        let errors = RoleForm::default().validate().unwrap_err();
        assert_eq!(errors.message_for("role"), Some("Role name is required"));

        let errors = RoleForm {
            role: "x".into(),
            permissions: vec!["root".into()],
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors.message_for("permissions"), Some("Select valid permissions"));
    }
}
