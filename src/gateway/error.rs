use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::constants::PLAGCHECK_STATUS_HEADER;
use crate::detection::DetectionError;
use crate::storage::StoreError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Invalid file ID: {0}")]
    InvalidIdentifier(String),

    #[error("File not found or not eligible: {0}")]
    NotFound(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("unsupported content type: {0}")]
    UnsupportedContentType(String),

    #[error("storage error: {0}")]
    StorageError(String),

    #[error("internal error: {0}")]
    InternalError(String),
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::InvalidIdentifier(_)
            | GatewayError::InvalidRequest(_)
            | GatewayError::UnsupportedContentType(_) => StatusCode::BAD_REQUEST,
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::StorageError(_) | GatewayError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::InvalidIdentifier(_) => "invalid_identifier",
            GatewayError::NotFound(_) => "not_found",
            GatewayError::InvalidRequest(_) => "invalid_request",
            GatewayError::UnsupportedContentType(_) => "unsupported_content_type",
            GatewayError::StorageError(_) => "storage_error",
            GatewayError::InternalError(_) => "unexpected",
        }
    }
}

impl From<DetectionError> for GatewayError {
    fn from(err: DetectionError) -> Self {
        match err {
            DetectionError::InvalidIdentifier { value } => GatewayError::InvalidIdentifier(value),
            DetectionError::NotFound { id } => GatewayError::NotFound(id),
            DetectionError::Unexpected(msg) => GatewayError::InternalError(msg),
        }
    }
}

impl From<StoreError> for GatewayError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { id } => GatewayError::NotFound(id),
            StoreError::InvalidId { value } => GatewayError::InvalidIdentifier(value),
            other => GatewayError::StorageError(other.to_string()),
        }
    }
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: &'static str,
    pub code: u16,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let kind = self.kind();

        let mut headers = HeaderMap::new();
        headers.insert(PLAGCHECK_STATUS_HEADER, HeaderValue::from_static(kind));

        let body = Json(ErrorResponse {
            error: self.to_string(),
            kind,
            code: status.as_u16(),
        });

        (status, headers, body).into_response()
    }
}
