//! HTTP handlers for lifecycle-service
//!
//! The media edge calls the live/transcode webhooks on publish, unpublish
//! and transcoder hand-off; the recorder calls archive submission; the
//! webhook dispatcher calls signature verification before honoring a
//! privileged transcode-location change.

use crate::error::AppError;
use crate::services::LifecycleService;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub struct LiveStatusRequest {
    pub channel_id: String,
    pub is_live: bool,
}

#[derive(Debug, Deserialize)]
pub struct TranscodeStatusRequest {
    pub channel_id: String,
    pub transcoded: bool,
    pub location: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SaveArchiveRequest {
    pub channel_id: String,
    pub location: String,
    pub duration: f64,
    #[serde(default)]
    pub thumbnails: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct VerifySignatureRequest {
    pub channel_id: String,
    pub data_hex: String,
    pub signature: String,
    pub signing_ts: String,
}

/// POST /api/v1/streams/live
pub async fn set_live_status(
    service: web::Data<LifecycleService>,
    body: web::Json<LiveStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let record = service
        .set_live_status(&body.channel_id, body.is_live)
        .await?;
    Ok(HttpResponse::Ok().json(record))
}

/// POST /api/v1/streams/transcode
pub async fn set_transcode_status(
    service: web::Data<LifecycleService>,
    body: web::Json<TranscodeStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let location = match (body.transcoded, body.location.as_deref()) {
        (true, Some(location)) => Some(location),
        (true, None) => {
            return Err(AppError::BadRequest(
                "location is required when transcoded is true".to_string(),
            ))
        }
        (false, _) => None,
    };

    match service
        .set_transcode_status(&body.channel_id, location)
        .await?
    {
        Some(record) => Ok(HttpResponse::Ok().json(record)),
        None => Ok(HttpResponse::Ok().json(json!({
            "updated": false,
            "reason": "unknown streamer",
        }))),
    }
}

/// GET /api/v1/streams/{channel_id}/archive
pub async fn check_archive(
    service: web::Data<LifecycleService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let channel_id = path.into_inner();
    let archiving = service.check_archive(&channel_id).await?;
    Ok(HttpResponse::Ok().json(json!({
        "channel_id": channel_id.to_lowercase(),
        "archiving": archiving,
    })))
}

/// POST /api/v1/streams/archive
pub async fn save_archive(
    service: web::Data<LifecycleService>,
    body: web::Json<SaveArchiveRequest>,
) -> Result<HttpResponse, AppError> {
    service
        .save_archive(
            &body.channel_id,
            &body.location,
            body.duration,
            &body.thumbnails,
        )
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "accepted": true })))
}

/// POST /api/v1/streams/verify
pub async fn verify_signature(
    service: web::Data<LifecycleService>,
    body: web::Json<VerifySignatureRequest>,
) -> Result<HttpResponse, AppError> {
    let is_valid = service
        .verify_signature(
            &body.channel_id,
            &body.data_hex,
            &body.signature,
            &body.signing_ts,
        )
        .await;
    Ok(HttpResponse::Ok().json(json!({ "is_valid": is_valid })))
}

/// GET /health
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}
