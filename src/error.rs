// Error handling for Media Gateway
//
// This module defines the gateway error type. Every variant renders as the
// same two-field ErrorEnvelope, so callers always receive JSON.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::Value;
use thiserror::Error;

use crate::models::ErrorEnvelope;

/// Errors that can occur while forwarding a request
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Error when processing multipart form data
    #[error("Form error: {0}")]
    FormError(String),

    /// Error when no file was provided in the upload field
    #[error("No file provided in field '{0}'")]
    NoFile(String),

    /// Error when the upload field carries more than one file
    #[error("More than one file provided in field '{0}'")]
    MultipleFiles(String),

    /// Error when the declared content type cannot be forwarded
    #[error("Invalid content type: {0}")]
    InvalidContentType(String),

    /// Error when the request body is not JSON
    #[error("Invalid JSON body: {0}")]
    InvalidJson(String),

    /// Error when reading the request body fails
    #[error("Payload error: {0}")]
    PayloadError(String),

    /// Error when the request body exceeds the configured ceiling
    #[error("Payload too large: {0} bytes exceeds limit of {1} bytes")]
    PayloadTooLarge(usize, usize),

    /// The upstream answered with a non-success status
    #[error("Upstream responded with status {status}")]
    UpstreamStatus { status: u16, details: Value },

    /// The upstream could not be reached or did not answer in time
    #[error("Upstream unreachable: {0}")]
    Unreachable(String),
}

impl GatewayError {
    /// Create a new FormError
    pub fn form_error<S: Into<String>>(msg: S) -> Self {
        Self::FormError(msg.into())
    }

    fn details(&self) -> Option<Value> {
        match self {
            GatewayError::UpstreamStatus { details, .. } if !details.is_null() => {
                Some(details.clone())
            }
            _ => None,
        }
    }
}

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::FormError(_)
            | GatewayError::NoFile(_)
            | GatewayError::MultipleFiles(_)
            | GatewayError::InvalidContentType(_)
            | GatewayError::InvalidJson(_)
            | GatewayError::PayloadError(_) => StatusCode::BAD_REQUEST,
            GatewayError::PayloadTooLarge(_, _) => StatusCode::PAYLOAD_TOO_LARGE,
            GatewayError::UpstreamStatus { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            GatewayError::Unreachable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorEnvelope {
            error: self.to_string(),
            details: self.details(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use serde_json::json;

    async fn render(err: GatewayError) -> (StatusCode, Value) {
        let response = err.error_response();
        let status = response.status();
        let body = to_bytes(response.into_body()).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[actix_web::test]
    async fn upstream_status_is_propagated_with_details() {
        let (status, body) = render(GatewayError::UpstreamStatus {
            status: 404,
            details: json!({"msg": "not found"}),
        })
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({
                "error": "Upstream responded with status 404",
                "details": {"msg": "not found"}
            })
        );
    }

    #[actix_web::test]
    async fn unreachable_has_null_details() {
        let (status, body) = render(GatewayError::Unreachable("connection refused".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["details"], Value::Null);
        assert_eq!(body.as_object().unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn caller_errors_are_client_errors() {
        let (status, body) = render(GatewayError::NoFile("file".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No file provided in field 'file'");

        let (status, _) = render(GatewayError::PayloadTooLarge(20, 10)).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn unknown_upstream_status_falls_back_to_500() {
        let err = GatewayError::UpstreamStatus {
            status: 1000,
            details: Value::Null,
        };
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
