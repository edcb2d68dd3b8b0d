//! Submission API Handlers
//!
//! Two bindings onto the relay service:
//! - `POST /api/submit` carries credentials and payload in a JSON envelope.
//! - `POST /api/submit/raw` carries the payload as the request body with
//!   basic auth, and returns the response payload byte for byte.

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{Query, State},
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use conduit_core::codec;
use conduit_core::domain::credentials::Credentials;
use conduit_core::domain::submission::{PayloadEncoding, SubmissionRequest};
use conduit_core::dto::submit::{SubmitRequest, SubmitResponse};
use serde::Deserialize;

use crate::api::error::{ApiError, ApiResult};
use crate::service::relay_service::RelayService;

pub const RETURN_CODE_HEADER: HeaderName = HeaderName::from_static("x-conduit-return-code");
pub const JOB_ID_HEADER: HeaderName = HeaderName::from_static("x-conduit-job-id");
pub const JOB_ID_BASE64_HEADER: HeaderName = HeaderName::from_static("x-conduit-job-id-base64");

/// POST /api/submit
/// Relay a workflow described by a JSON envelope
pub async fn submit(
    State(relay): State<Arc<RelayService>>,
    Json(req): Json<SubmitRequest>,
) -> ApiResult<Json<SubmitResponse>> {
    tracing::info!(
        "Submission from {} ({} encoding)",
        req.username,
        req.encoding
    );

    let result = relay.submit(req.into()).await?;

    let response = SubmitResponse::try_from(result).map_err(|_| {
        ApiError::BadGateway(
            "job server response is not valid UTF-8; resubmit with base64 encoding".to_string(),
        )
    })?;

    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
pub struct RawSubmitQuery {
    #[serde(default)]
    pub encoding: PayloadEncoding,
}

/// POST /api/submit/raw
/// Relay a workflow sent as the request body
///
/// Query parameters:
/// - `encoding` (optional): `plain` (default) or `base64`
pub async fn submit_raw(
    State(relay): State<Arc<RelayService>>,
    Query(params): Query<RawSubmitQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Response> {
    let credentials = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(Credentials::from_basic_auth)
        .ok_or_else(|| ApiError::Unauthorized("basic authorization required".to_string()))?;

    tracing::info!(
        "Raw submission from {} ({} encoding, {} bytes)",
        credentials.username,
        params.encoding,
        body.len()
    );

    let request = SubmissionRequest::new(
        credentials.username,
        credentials.password,
        body.to_vec(),
        params.encoding,
    );
    let result = relay.submit(request).await?;

    let content_type = match params.encoding {
        PayloadEncoding::Plain => "application/octet-stream",
        PayloadEncoding::Base64 => "text/plain; charset=utf-8",
    };

    let mut response_headers = HeaderMap::new();
    response_headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    response_headers.insert(RETURN_CODE_HEADER, HeaderValue::from(result.return_code));

    if let Some(job_id) = &result.job_id {
        let (name, value) = job_id_header(job_id);
        response_headers.insert(name, value);
    }

    Ok((StatusCode::OK, response_headers, result.payload).into_response())
}

/// Header carrying the job id
///
/// Ids made of printable ASCII go out verbatim. Anything else is sent
/// base64-encoded under a separate header so the caller still gets it.
fn job_id_header(job_id: &str) -> (HeaderName, HeaderValue) {
    let printable = !job_id.is_empty() && job_id.bytes().all(|b| b.is_ascii_graphic() || b == b' ');
    if printable {
        if let Ok(value) = HeaderValue::from_str(job_id) {
            return (JOB_ID_HEADER, value);
        }
    }

    let encoded = codec::encode(job_id.as_bytes(), PayloadEncoding::Base64);
    let value = HeaderValue::from_bytes(&encoded)
        .unwrap_or_else(|_| HeaderValue::from_static(""));
    (JOB_ID_BASE64_HEADER, value)
}
