use axum::extract::multipart::MultipartError;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::shared::api::ApiResponse;
use contracts::shared::validation::ValidationErrors;
use thiserror::Error;

/// Handler error, rendered as `{success: false, message}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Not authorized, token missing")]
    Unauthorized,

    #[error("{0} not found")]
    NotFound(&'static str),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

/// First field message; the console shows one toast per failure.
impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let message = errors
            .iter()
            .next()
            .map(|e| e.message.clone())
            .unwrap_or_else(|| "Invalid request".to_string());
        ApiError::BadRequest(message)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        ApiError::BadRequest(format!("Invalid upload: {}", e))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_client_error() {
            tracing::debug!(status = status.as_u16(), error = %self, "request rejected");
        }
        let body = ApiResponse::<()>::failure(self.to_string());
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

pub fn ok<T>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::ok(data)))
}

pub fn ok_message<T>(data: T, message: impl Into<String>) -> ApiResult<T> {
    Ok(Json(ApiResponse::ok_with_message(data, message)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::validation::RULE_REQUIRED;

    #[test]
    fn test_validation_errors_keep_first_message() {
        let mut errors = ValidationErrors::new();
        errors.add("party", RULE_REQUIRED, "Party is required");
        errors.add("price", RULE_REQUIRED, "Price is required");
        let err = ApiError::from(errors);
        assert_eq!(err.to_string(), "Party is required");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound("Sale").to_string(), "Sale not found");
    }
}
