// Request body processing for Media Gateway
//
// This module reads inbound bodies: the multipart upload for the conversion
// service and the raw JSON document for the subtitling service.

use actix_multipart::Multipart;
use actix_web::web::{self, Bytes, BytesMut};
use futures::{StreamExt, TryStreamExt};
use log::{debug, info};
use serde::de::IgnoredAny;

use crate::config::defaults;
use crate::error::GatewayError;
use crate::models::UploadedFile;

fn check_size(total: usize, limit: Option<usize>) -> Result<(), GatewayError> {
    match limit {
        Some(limit) if total > limit => Err(GatewayError::PayloadTooLarge(total, limit)),
        _ => Ok(()),
    }
}

/// Extract the single file carried in the `file` field
///
/// # Arguments
///
/// * `form` - The multipart form from the HTTP request
/// * `limit` - Optional ceiling on the file size in bytes
///
/// # Returns
///
/// * `Result<UploadedFile, GatewayError>` - The file with its name and type, or an error
///
/// Other fields, and a `file` part without a filename, are drained and
/// ignored. A second file in `file` is rejected.
pub async fn extract_file(
    mut form: Multipart,
    limit: Option<usize>,
) -> Result<UploadedFile, GatewayError> {
    let mut uploaded: Option<UploadedFile> = None;

    while let Some(mut field) = form
        .try_next()
        .await
        .map_err(|e| GatewayError::form_error(e.to_string()))?
    {
        let (field_name, filename) = match field.content_disposition() {
            Some(cd) => (
                cd.get_name().unwrap_or_default().to_string(),
                cd.get_filename().map(str::to_string),
            ),
            None => (String::new(), None),
        };

        if field_name != defaults::FILE_FIELD {
            debug!("Skipping multipart field '{}'", field_name);
            while field.next().await.is_some() {}
            continue;
        }

        // A part without a filename is a plain text field, not a file
        if filename.is_none() {
            debug!("Skipping '{}' part without a filename", field_name);
            while field.next().await.is_some() {}
            continue;
        }

        if uploaded.is_some() {
            return Err(GatewayError::MultipleFiles(field_name));
        }

        let content_type = field.content_type().map(|mime| mime.to_string());
        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| {
                GatewayError::form_error(format!("Error processing file upload: {}", e))
            })?;
            check_size(data.len() + chunk.len(), limit)?;
            data.extend_from_slice(&chunk);
        }

        info!(
            "Received file '{}' ({} bytes)",
            filename.as_deref().unwrap_or("<unnamed>"),
            data.len()
        );
        uploaded = Some(UploadedFile {
            field_name,
            filename,
            content_type,
            data,
        });
    }

    uploaded.ok_or_else(|| GatewayError::NoFile(defaults::FILE_FIELD.to_string()))
}

/// Read the whole request body and make sure it is a JSON document
///
/// The bytes are returned untouched so the upstream receives exactly what the
/// client sent.
pub async fn read_json_body(
    mut payload: web::Payload,
    limit: Option<usize>,
) -> Result<Bytes, GatewayError> {
    let mut body = BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|e| GatewayError::PayloadError(e.to_string()))?;
        check_size(body.len() + chunk.len(), limit)?;
        body.extend_from_slice(&chunk);
    }

    serde_json::from_slice::<IgnoredAny>(&body)
        .map_err(|e| GatewayError::InvalidJson(e.to_string()))?;
    Ok(body.freeze())
}
