use crate::domain::a008_role::Role;
use crate::domain::common::serde_helpers::bool_or_false;
use crate::domain::common::{Entity, Ref};
use serde::{Deserialize, Serialize};

/// Console user / employee (a007), served by `auth/*`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: Option<Ref<Role>>,
    #[serde(rename = "isVerified", default, deserialize_with = "bool_or_false")]
    pub is_verified: bool,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        let name = format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        );
        name.trim().to_string()
    }

    pub fn initials(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter_map(|part| part.trim().chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }

    pub fn role_label(&self) -> String {
        self.role.as_ref().map(|r| r.label()).unwrap_or_else(|| "-".to_string())
    }
}

impl Entity for Employee {
    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> String {
        let name = self.full_name();
        if name.is_empty() {
            self.email.clone().unwrap_or_else(|| self.id.clone())
        } else {
            name
        }
    }

    fn aggregate_index() -> &'static str {
        "a007"
    }

    fn collection_name() -> &'static str {
        "auth"
    }

    fn element_name() -> &'static str {
        "Employee"
    }

    fn list_name() -> &'static str {
        "Employees"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reads_employee_with_populated_role() {
        let e: Employee = serde_json::from_value(json!({
            "_id": "u1",
            "first_name": "asha",
            "last_name": "Rao",
            "email": "asha@example.com",
            "role": {"_id": "r1", "role": "Supervisor", "permissions": ["production"]},
            "isVerified": true
        }))
        .unwrap();
        assert_eq!(e.display_name(), "asha Rao");
        assert_eq!(e.initials(), "AR");
        assert_eq!(e.role_label(), "Supervisor");
        assert!(e.is_verified);
    }

    #[test]
    fn test_role_as_id() {
        let e: Employee = serde_json::from_value(json!({"_id": "u2", "role": "r9"})).unwrap();
        assert_eq!(e.role_label(), "r9");
        assert_eq!(e.display_name(), "u2");
    }
}
