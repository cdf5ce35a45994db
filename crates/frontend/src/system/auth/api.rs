use contracts::domain::a007_employee::Employee;

use crate::shared::api_utils::get_json;

/// Fetch the signed-in user
pub async fn fetch_current_user() -> Result<Employee, String> {
    get_json::<Employee>("auth/user").await
}
