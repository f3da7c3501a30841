// API route handlers for Media Gateway
//
// Each handler maps one public endpoint onto exactly one upstream operation.

use actix_multipart::Multipart;
use actix_web::{get, post, web, HttpResponse};

use crate::config::{Backend, Phase};
use crate::error::GatewayError;
use crate::gateway::Gateway;
use crate::handlers::form::{extract_file, read_json_body};

/// Handler for media uploads to the conversion service
///
/// Accepts a multipart body with a single `file` field and forwards it,
/// filename and content type included, to the conversion job endpoint.
#[post("/api/conversion/post")]
pub async fn submit_conversion(
    form: Multipart,
    gateway: web::Data<Gateway>,
) -> Result<HttpResponse, GatewayError> {
    let file = extract_file(form, gateway.max_body_size()).await?;
    gateway.submit_file(file).await
}

#[get("/api/conversion/status/{job_id:.*}")]
pub async fn conversion_status(
    job_id: web::Path<String>,
    gateway: web::Data<Gateway>,
) -> Result<HttpResponse, GatewayError> {
    gateway
        .job_lookup(Backend::Conversion, Phase::Status, &job_id)
        .await
}

#[get("/api/conversion/get/{job_id:.*}")]
pub async fn conversion_result(
    job_id: web::Path<String>,
    gateway: web::Data<Gateway>,
) -> Result<HttpResponse, GatewayError> {
    gateway
        .job_lookup(Backend::Conversion, Phase::Result, &job_id)
        .await
}

/// Handler for subtitling project creation
///
/// The JSON body is only checked for well-formedness; its fields are the
/// subtitling service's business.
#[post("/api/subtitles/post")]
pub async fn submit_subtitles(
    payload: web::Payload,
    gateway: web::Data<Gateway>,
) -> Result<HttpResponse, GatewayError> {
    let body = read_json_body(payload, gateway.max_body_size()).await?;
    gateway.submit_json(body).await
}

#[get("/api/subtitles/status/{job_id:.*}")]
pub async fn subtitles_status(
    job_id: web::Path<String>,
    gateway: web::Data<Gateway>,
) -> Result<HttpResponse, GatewayError> {
    gateway
        .job_lookup(Backend::Subtitles, Phase::Status, &job_id)
        .await
}

#[get("/api/subtitles/get/{job_id:.*}")]
pub async fn subtitles_result(
    job_id: web::Path<String>,
    gateway: web::Data<Gateway>,
) -> Result<HttpResponse, GatewayError> {
    gateway
        .job_lookup(Backend::Subtitles, Phase::Result, &job_id)
        .await
}

/// Gateway status endpoint
///
/// Reports the listen address, limits and resolved upstream URLs.
/// No upstream is contacted.
#[get("/api/status")]
pub async fn gateway_status(gateway: web::Data<Gateway>) -> HttpResponse {
    HttpResponse::Ok().json(gateway.status())
}
