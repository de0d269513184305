//! HTTP Error Handling

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::ApplicationError;

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub errno: i32,
    pub error: String,
    pub data: Option<()>,
    /// 稍后重试是否可能成功
    pub retryable: bool,
}

impl ErrorResponse {
    pub fn new(errno: i32, error: impl Into<String>, retryable: bool) -> Self {
        Self {
            errno,
            error: error.into(),
            data: None,
            retryable,
        }
    }
}

/// 错误码定义
pub mod errno {
    pub const BAD_REQUEST: i32 = 400;
    pub const UNPROCESSABLE: i32 = 422;
    pub const TOO_MANY_REQUESTS: i32 = 429;
    pub const SERVICE_UNAVAILABLE: i32 = 503;
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    /// 上游成功但内容不可用，可以重试
    Unprocessable(String),
    /// 配额或限流，稍后再试
    TooManyRequests(String),
    /// 配置或上游故障，服务不可用
    ServiceUnavailable(String),
}

impl ApiError {
    fn parts(&self) -> (StatusCode, i32, &str, bool) {
        match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, errno::BAD_REQUEST, msg, false),
            ApiError::Unprocessable(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                errno::UNPROCESSABLE,
                msg,
                true,
            ),
            ApiError::TooManyRequests(msg) => (
                StatusCode::TOO_MANY_REQUESTS,
                errno::TOO_MANY_REQUESTS,
                msg,
                true,
            ),
            ApiError::ServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                errno::SERVICE_UNAVAILABLE,
                msg,
                false,
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, msg, retryable) = self.parts();

        if status.is_server_error() {
            tracing::error!(errno = code, error = %msg, "Request failed");
        } else {
            tracing::warn!(errno = code, error = %msg, "Request rejected");
        }

        let body = ErrorResponse::new(code, msg, retryable);
        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        match e {
            ApplicationError::InvalidInput(msg) => ApiError::BadRequest(msg),
            ApplicationError::QuotaExceeded => {
                ApiError::TooManyRequests("API quota exceeded. Please try again later.".to_string())
            }
            ApplicationError::EmptyContent => ApiError::Unprocessable(
                "No paragraphs found in the generated story. Please try again.".to_string(),
            ),
            ApplicationError::NotConfigured => {
                ApiError::ServiceUnavailable("Generation service is not configured".to_string())
            }
            ApplicationError::InvalidCredential => {
                ApiError::ServiceUnavailable("Invalid API key configuration".to_string())
            }
            ApplicationError::Unknown(detail) => {
                tracing::error!(detail = %detail, "Upstream failure");
                ApiError::ServiceUnavailable("Generation service unavailable".to_string())
            }
        }
    }
}

/// 请求体无法解析（非 JSON、字段类型不符）按调用方错误处理
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_error_mapping() {
        let cases = [
            (ApplicationError::invalid_input("x"), StatusCode::BAD_REQUEST, false),
            (ApplicationError::QuotaExceeded, StatusCode::TOO_MANY_REQUESTS, true),
            (ApplicationError::EmptyContent, StatusCode::UNPROCESSABLE_ENTITY, true),
            (ApplicationError::NotConfigured, StatusCode::SERVICE_UNAVAILABLE, false),
            (ApplicationError::InvalidCredential, StatusCode::SERVICE_UNAVAILABLE, false),
            (
                ApplicationError::Unknown("boom".into()),
                StatusCode::SERVICE_UNAVAILABLE,
                false,
            ),
        ];

        for (err, status, retryable) in cases {
            let api = ApiError::from(err);
            let (actual_status, _, _, actual_retryable) = api.parts();
            assert_eq!(actual_status, status);
            assert_eq!(actual_retryable, retryable);
        }
    }

    #[test]
    fn test_unknown_detail_not_leaked() {
        let api = ApiError::from(ApplicationError::Unknown("secret upstream body".into()));
        let (_, _, msg, _) = api.parts();
        assert!(!msg.contains("secret"));
    }
}
