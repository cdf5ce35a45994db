//! The `{success, message, data}` envelope every backend endpoint answers with.

use serde::{Deserialize, Serialize};

pub const FALLBACK_ERROR: &str = "Something went wrong";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    // no `default` here, it would bound `T: Default`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            total: None,
            page: None,
        }
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::ok(data)
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            total: None,
            page: None,
        }
    }

    pub fn with_page(mut self, page: usize, total: usize) -> Self {
        self.page = Some(page);
        self.total = Some(total);
        self
    }

    /// The backend's `success` flag and `message` are the whole error channel.
    pub fn into_result(self) -> Result<T, String> {
        if !self.success {
            return Err(non_blank(self.message).unwrap_or_else(|| FALLBACK_ERROR.to_string()));
        }
        self.data
            .ok_or_else(|| non_blank(self.message).unwrap_or_else(|| FALLBACK_ERROR.to_string()))
    }

    /// For mutations where only the confirmation text matters.
    pub fn into_message(self) -> Result<String, String> {
        if self.success {
            Ok(non_blank(self.message).unwrap_or_else(|| "Done".to_string()))
        } else {
            Err(non_blank(self.message).unwrap_or_else(|| FALLBACK_ERROR.to_string()))
        }
    }
}

/// Message to show for a non-2xx response body.
pub fn error_message_from_body(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(msg) = value.get("message").and_then(|m| m.as_str()) {
            if !msg.trim().is_empty() {
                return msg.to_string();
            }
        }
    }
    match status {
        401 => "Not authenticated".to_string(),
        403 => "Access denied".to_string(),
        404 => "Not found".to_string(),
        _ => FALLBACK_ERROR.to_string(),
    }
}

fn non_blank(s: Option<String>) -> Option<String> {
    s.filter(|m| !m.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::DeserializeOwned;

    fn parse<T: DeserializeOwned>(body: &str) -> Result<T, String> {
        serde_json::from_str::<ApiResponse<T>>(body)
            .map_err(|e| e.to_string())?
            .into_result()
    }

    #[derive(Debug, PartialEq, Deserialize)]
    struct Row {
        name: String,
    }

    #[test]
    fn test_generic_envelope_decoding() {
        let rows: Vec<Row> = parse(r#"{"success": true, "data": [{"name": "a"}]}"#).unwrap();
        assert_eq!(rows, vec![Row { name: "a".into() }]);
        assert_eq!(
            parse::<Row>(r#"{"success": false, "message": "Role already exists"}"#).unwrap_err(),
            "Role already exists"
        );
        assert!(parse::<Row>(r#"{"success": true}"#).is_err());
    }

    #[test]
    fn test_success_with_data() {
        let resp: ApiResponse<Vec<i32>> =
            serde_json::from_str(r#"{"success": true, "data": [1, 2, 3]}"#).unwrap();
        assert_eq!(resp.into_result().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_failure_uses_backend_message() {
        let resp: ApiResponse<Vec<i32>> =
            serde_json::from_str(r#"{"success": false, "message": "Sale not found"}"#).unwrap();
        assert_eq!(resp.into_result().unwrap_err(), "Sale not found");
    }

    #[test]
    fn test_failure_without_message_falls_back() {
        let resp: ApiResponse<i32> = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert_eq!(resp.into_result().unwrap_err(), FALLBACK_ERROR);
        let resp: ApiResponse<i32> =
            serde_json::from_str(r#"{"success": false, "message": "  "}"#).unwrap();
        assert_eq!(resp.into_result().unwrap_err(), FALLBACK_ERROR);
    }

    #[test]
    fn test_success_without_data_is_an_error_for_queries() {
        let resp: ApiResponse<i32> = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(resp.into_result().is_err());
    }

    #[test]
    fn test_into_message() {
        let resp: ApiResponse<serde_json::Value> =
            serde_json::from_str(r#"{"success": true, "message": "Token added"}"#).unwrap();
        assert_eq!(resp.into_message().unwrap(), "Token added");
    }

    #[test]
    fn test_error_message_from_body() {
        assert_eq!(
            error_message_from_body(400, r#"{"success":false,"message":"Invalid GST"}"#),
            "Invalid GST"
        );
        assert_eq!(error_message_from_body(401, "<html>"), "Not authenticated");
        assert_eq!(error_message_from_body(500, ""), FALLBACK_ERROR);
    }
}
