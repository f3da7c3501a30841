// Gateway state for Media Gateway
//
// The Gateway bundles the read-only upstream table with the shared client.
// It is built once at startup and shared by every worker through web::Data.

use actix_web::web::Bytes;
use actix_web::HttpResponse;
use log::info;

use crate::config::{Backend, GatewayConfig, Operation, Phase, UpstreamTable};
use crate::error::GatewayError;
use crate::models::{GatewayStatusResponse, LimitsInfo, ServerInfo, UploadedFile, UpstreamsInfo};
use crate::upstream::{file_form, UpstreamClient};

/// Shared, immutable gateway state
#[derive(Debug, Clone)]
pub struct Gateway {
    config: GatewayConfig,
    upstreams: UpstreamTable,
    client: UpstreamClient,
}

impl Gateway {
    pub fn new(config: GatewayConfig) -> Result<Self, reqwest::Error> {
        let client = UpstreamClient::new(config.upstream_timeout())?;
        let upstreams = config.upstreams();
        Ok(Self {
            config,
            upstreams,
            client,
        })
    }

    pub fn upstreams(&self) -> &UpstreamTable {
        &self.upstreams
    }

    /// Inbound body ceiling, `None` when unlimited
    pub fn max_body_size(&self) -> Option<usize> {
        self.config.max_body_size()
    }

    /// submit-conversion: forward the uploaded file as multipart
    pub async fn submit_file(&self, file: UploadedFile) -> Result<HttpResponse, GatewayError> {
        let operation = Operation::new(Backend::Conversion, Phase::Submit);
        info!(
            "{}: {} ({} bytes, {})",
            operation,
            file.filename.as_deref().unwrap_or("<unnamed>"),
            file.data.len(),
            file.content_type.as_deref().unwrap_or("no content type")
        );
        let form = file_form(file)?;
        self.client
            .post_file(self.upstreams.target(operation), form)
            .await
            .into_response()
    }

    /// submit-subtitling: forward the JSON descriptor unchanged
    pub async fn submit_json(&self, body: Bytes) -> Result<HttpResponse, GatewayError> {
        let operation = Operation::new(Backend::Subtitles, Phase::Submit);
        info!("{}: {} bytes of JSON", operation, body.len());
        self.client
            .post_json(self.upstreams.target(operation), body)
            .await
            .into_response()
    }

    /// status-* and fetch-*: forward the job id as the `id` query parameter
    pub async fn job_lookup(
        &self,
        backend: Backend,
        phase: Phase,
        job_id: &str,
    ) -> Result<HttpResponse, GatewayError> {
        debug_assert!(phase != Phase::Submit, "job lookups are status or fetch only");
        let operation = Operation::new(backend, phase);
        info!("{}: job {}", operation, job_id);
        self.client
            .get_job(self.upstreams.target(operation), job_id)
            .await
            .into_response()
    }

    /// Snapshot of the gateway configuration for the status endpoint
    pub fn status(&self) -> GatewayStatusResponse {
        GatewayStatusResponse {
            server: ServerInfo {
                name: env!("CARGO_PKG_NAME"),
                version: env!("CARGO_PKG_VERSION"),
                listen: self.config.bind_address(),
                workers: self.config.worker_count(),
            },
            limits: LimitsInfo {
                upstream_timeout: self.config.upstream_timeout().map(|t| t.as_secs()),
                max_body_size: self.max_body_size(),
            },
            upstreams: UpstreamsInfo::from(&self.upstreams),
        }
    }
}
