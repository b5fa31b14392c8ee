//! HTTP mapping for `UserSvcError`.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use usersvc_core::error::{ClientCode, UserSvcError};

/// Response-side wrapper so the core error can become an axum `Response`.
#[derive(Debug)]
pub struct ApiError(pub UserSvcError);

impl From<UserSvcError> for ApiError {
    fn from(e: UserSvcError) -> Self {
        Self(e)
    }
}

// Extractor failures are input errors, reported before any store call.
impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        Self(UserSvcError::Validation(e.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(e: QueryRejection) -> Self {
        Self(UserSvcError::Validation(e.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(e: PathRejection) -> Self {
        Self(UserSvcError::Validation(e.body_text()))
    }
}

pub fn status_for(code: ClientCode) -> StatusCode {
    match code {
        ClientCode::Validation => StatusCode::UNPROCESSABLE_ENTITY,
        ClientCode::NotFound => StatusCode::NOT_FOUND,
        ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.client_code();
        let status = status_for(code);
        if status.is_server_error() {
            tracing::warn!(error = %self.0, "request failed");
        }
        let body = Json(json!({
            "error": code.as_str(),
            "detail": self.0.to_string(),
        }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_map_to_statuses() {
        assert_eq!(status_for(ClientCode::Validation), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(status_for(ClientCode::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_for(ClientCode::Internal), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn store_error_is_500() {
        let resp = ApiError(UserSvcError::Store("boom".into())).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
