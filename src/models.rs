// Media Gateway data models
//
// This module contains the data models exchanged by the gateway: the error
// envelope returned to callers, the uploaded file carried to the conversion
// service, and the gateway status report.

use serde::Serialize;
use serde_json::Value;

use crate::config::UpstreamTable;

/// Normalized failure body returned for every gateway error
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    /// Human-readable error message
    pub error: String,
    /// Upstream response body, or null when the upstream produced none
    pub details: Option<Value>,
}

/// A file received from the client, ready to be re-encoded for the upstream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Multipart field name the file arrived in
    pub field_name: String,
    /// Original filename, if the client declared one
    pub filename: Option<String>,
    /// Declared MIME type, if any
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

/// Report served by the gateway status endpoint
#[derive(Debug, Serialize)]
pub struct GatewayStatusResponse {
    pub server: ServerInfo,
    pub limits: LimitsInfo,
    pub upstreams: UpstreamsInfo,
}

#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub listen: String,
    pub workers: usize,
}

#[derive(Debug, Serialize)]
pub struct LimitsInfo {
    /// Upstream timeout in seconds, null when disabled
    pub upstream_timeout: Option<u64>,
    /// Inbound body ceiling in bytes, null when unlimited
    pub max_body_size: Option<usize>,
}

/// Resolved upstream URLs per service and phase
#[derive(Debug, Serialize)]
pub struct UpstreamsInfo {
    pub conversion: PhaseUrls,
    pub subtitles: PhaseUrls,
}

#[derive(Debug, Serialize)]
pub struct PhaseUrls {
    pub submit: String,
    pub status: String,
    pub result: String,
}

impl From<&UpstreamTable> for UpstreamsInfo {
    fn from(table: &UpstreamTable) -> Self {
        Self {
            conversion: PhaseUrls {
                submit: table.conversion.submit.url(),
                status: table.conversion.status.url(),
                result: table.conversion.result.url(),
            },
            subtitles: PhaseUrls {
                submit: table.subtitles.submit.url(),
                status: table.subtitles.status.url(),
                result: table.subtitles.result.url(),
            },
        }
    }
}
