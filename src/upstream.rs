// Upstream client for Media Gateway
//
// This module issues the single outbound call behind each gateway operation and
// classifies what came back. Nothing here retries or caches.

use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::web::Bytes;
use actix_web::HttpResponse;
use log::{error, info, warn};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Request};
use serde::de::IgnoredAny;
use serde_json::Value;
use uuid::Uuid;

use crate::config::UpstreamTarget;
use crate::error::GatewayError;
use crate::models::UploadedFile;

/// Header carrying the per-call correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// What an upstream call produced
#[derive(Debug)]
pub enum UpstreamOutcome {
    /// 2xx response
    Ok { status: u16, body: Bytes },
    /// Any other status the upstream chose to send
    Upstream { status: u16, body: Bytes },
    /// No usable response: connection, DNS or timeout failure
    Unreachable { reason: String },
}

impl UpstreamOutcome {
    /// Turns the outcome into the relayed response or a normalized error
    pub fn into_response(self) -> Result<HttpResponse, GatewayError> {
        match self {
            UpstreamOutcome::Ok { status, body } => {
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::OK);
                Ok(HttpResponse::build(status)
                    .content_type("application/json")
                    .body(relay_body(body)))
            }
            UpstreamOutcome::Upstream { status, body } => Err(GatewayError::UpstreamStatus {
                status,
                details: error_details(&body),
            }),
            UpstreamOutcome::Unreachable { reason } => Err(GatewayError::Unreachable(reason)),
        }
    }
}

/// Upstream JSON passes through untouched; anything else is sent as a JSON string
fn relay_body(body: Bytes) -> Bytes {
    if serde_json::from_slice::<IgnoredAny>(&body).is_ok() {
        return body;
    }
    let text = String::from_utf8_lossy(&body);
    Bytes::from(Value::String(text.into_owned()).to_string())
}

fn error_details(body: &Bytes) -> Value {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()))
}

/// Shared HTTP client for all upstream calls
#[derive(Clone, Debug)]
pub struct UpstreamClient {
    client: Client,
    timeout: Option<Duration>,
}

impl UpstreamClient {
    /// Create a client; `None` leaves calls without a timeout
    pub fn new(timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            timeout,
        })
    }

    /// GET `target?id=<job_id>`
    pub async fn get_job(&self, target: &UpstreamTarget, job_id: &str) -> UpstreamOutcome {
        let request = self
            .client
            .get(target.url())
            .query(&[("id", job_id)])
            .build();
        self.dispatch(request).await
    }

    /// POST a JSON document, byte for byte
    pub async fn post_json(&self, target: &UpstreamTarget, body: Bytes) -> UpstreamOutcome {
        let request = self
            .client
            .post(target.url())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .build();
        self.dispatch(request).await
    }

    /// POST a single file as multipart/form-data
    pub async fn post_file(&self, target: &UpstreamTarget, form: Form) -> UpstreamOutcome {
        let request = self.client.post(target.url()).multipart(form).build();
        self.dispatch(request).await
    }

    async fn dispatch(&self, request: reqwest::Result<Request>) -> UpstreamOutcome {
        let mut request = match request {
            Ok(request) => request,
            Err(e) => {
                error!("Failed to build upstream request: {}", e);
                return UpstreamOutcome::Unreachable {
                    reason: e.to_string(),
                };
            }
        };

        let request_id = Uuid::new_v4().to_string();
        if let Ok(value) = HeaderValue::from_str(&request_id) {
            request.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        let method = request.method().clone();
        let url = request.url().to_string();
        info!("[{}] {} {}", request_id, method, url);

        let response = match self.client.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                let reason = self.describe_failure(&e);
                error!("[{}] {} {} failed: {}", request_id, method, url, reason);
                return UpstreamOutcome::Unreachable { reason };
            }
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) if status.is_success() => {
                let reason = self.describe_failure(&e);
                error!(
                    "[{}] {} {} body could not be read: {}",
                    request_id, method, url, reason
                );
                return UpstreamOutcome::Unreachable { reason };
            }
            Err(e) => {
                warn!("[{}] Discarding unreadable error body: {}", request_id, e);
                Bytes::new()
            }
        };

        if status.is_success() {
            info!(
                "[{}] {} {} -> {} ({} bytes)",
                request_id,
                method,
                url,
                status.as_u16(),
                body.len()
            );
            UpstreamOutcome::Ok {
                status: status.as_u16(),
                body,
            }
        } else {
            warn!(
                "[{}] {} {} -> {}: {}",
                request_id,
                method,
                url,
                status.as_u16(),
                String::from_utf8_lossy(&body)
            );
            UpstreamOutcome::Upstream {
                status: status.as_u16(),
                body,
            }
        }
    }

    fn describe_failure(&self, e: &reqwest::Error) -> String {
        match self.timeout {
            Some(timeout) if e.is_timeout() => format!(
                "request timed out after {} seconds",
                timeout.as_secs_f64()
            ),
            _ => e.to_string(),
        }
    }
}

/// Rebuilds the multipart body the conversion service expects
pub fn file_form(file: UploadedFile) -> Result<Form, GatewayError> {
    let UploadedFile {
        field_name,
        filename,
        content_type,
        data,
    } = file;

    let mut part = Part::bytes(data);
    if let Some(filename) = filename {
        part = part.file_name(filename);
    }
    if let Some(content_type) = content_type {
        part = part
            .mime_str(&content_type)
            .map_err(|_| GatewayError::InvalidContentType(content_type))?;
    }
    Ok(Form::new().part(field_name, part))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use serde_json::json;

    #[actix_web::test]
    async fn ok_outcome_relays_body_and_status_verbatim() {
        let raw = Bytes::from_static(br#"{"b":1,  "a":[true]}"#);
        let response = UpstreamOutcome::Ok {
            status: 201,
            body: raw.clone(),
        }
        .into_response()
        .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(to_bytes(response.into_body()).await.unwrap(), raw);
    }

    #[actix_web::test]
    async fn non_json_success_body_becomes_json_string() {
        let response = UpstreamOutcome::Ok {
            status: 200,
            body: Bytes::from_static(b"1 line of srt"),
        }
        .into_response()
        .unwrap();
        let body = to_bytes(response.into_body()).await.unwrap();
        assert_eq!(
            serde_json::from_slice::<Value>(&body).unwrap(),
            json!("1 line of srt")
        );
    }

    #[test]
    fn upstream_outcome_nests_body_in_details() {
        let err = UpstreamOutcome::Upstream {
            status: 404,
            body: Bytes::from_static(br#"{"msg":"not found"}"#),
        }
        .into_response()
        .unwrap_err();
        match err {
            GatewayError::UpstreamStatus { status, details } => {
                assert_eq!(status, 404);
                assert_eq!(details, json!({"msg": "not found"}));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn error_details_handle_text_and_empty_bodies() {
        assert_eq!(error_details(&Bytes::new()), Value::Null);
        assert_eq!(error_details(&Bytes::from_static(b" \n")), Value::Null);
        assert_eq!(
            error_details(&Bytes::from_static(b"Bad Gateway")),
            json!("Bad Gateway")
        );
    }

    #[test]
    fn unreachable_outcome_maps_to_unreachable_error() {
        let err = UpstreamOutcome::Unreachable {
            reason: "connection refused".to_string(),
        }
        .into_response()
        .unwrap_err();
        assert!(matches!(err, GatewayError::Unreachable(reason) if reason == "connection refused"));
    }

    #[test]
    fn invalid_content_type_is_rejected() {
        let err = file_form(UploadedFile {
            field_name: "file".to_string(),
            filename: Some("a.mp4".to_string()),
            content_type: Some("not a mime".to_string()),
            data: b"abc".to_vec(),
        })
        .unwrap_err();
        assert!(matches!(err, GatewayError::InvalidContentType(_)));
    }
}
