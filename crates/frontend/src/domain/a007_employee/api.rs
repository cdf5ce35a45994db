use contracts::domain::a007_employee::Employee;

use crate::shared::api_utils::get_json;

pub async fn fetch_employees() -> Result<Vec<Employee>, String> {
    get_json::<Vec<Employee>>("auth/all").await
}

pub async fn fetch_employee(id: &str) -> Result<Employee, String> {
    get_json::<Employee>(&format!("auth/user/{}", id)).await
}

/// (id, full name) pairs for pickers.
pub fn employee_options(employees: &[Employee]) -> Vec<(String, String)> {
    employees
        .iter()
        .map(|e| {
            let name = e.full_name();
            let label = if name.is_empty() {
                e.email.clone().unwrap_or_else(|| e.id.clone())
            } else {
                name
            };
            (e.id.clone(), label)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_options_fall_back_to_email() {
        let employees: Vec<Employee> = serde_json::from_value(serde_json::json!([
            {"_id": "e1", "first_name": "Asha", "last_name": "Rao"},
            {"_id": "e2", "email": "ops@example.com"},
            {"_id": "e3"}
        ]))
        .unwrap();
        assert_eq!(
            employee_options(&employees),
            vec![
                ("e1".to_string(), "Asha Rao".to_string()),
                ("e2".to_string(), "ops@example.com".to_string()),
                ("e3".to_string(), "e3".to_string()),
            ]
        );
    }
}
