use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::constants::{
    PLAGCHECK_STATUS_CLEAN, PLAGCHECK_STATUS_HEADER, PLAGCHECK_STATUS_PLAGIARISED,
};
use crate::detection::Verdict;
use crate::gateway::error::GatewayError;
use crate::gateway::state::AppState;
use crate::storage::{DocumentId, DocumentMeta, DocumentStore, NewDocument, Submitter};

pub const UPLOAD_CHECKED_MESSAGE: &str = "Upload successful and plagiarism check completed.";
pub const UPLOAD_CHECK_FAILED_MESSAGE: &str =
    "File uploaded successfully, but plagiarism check failed.";
pub const DELETED_MESSAGE: &str = "File deleted";
pub const DUPLICATE_FOUND_MESSAGE: &str = "100% plagiarism detected";
pub const DUPLICATE_NONE_MESSAGE: &str = "No plagiarism detected";

/// Query string accompanying a raw upload body.
#[derive(Debug, Default, Deserialize)]
pub struct UploadParams {
    pub filename: Option<String>,
    pub team_name: Option<String>,
    pub team_leader: Option<String>,
    pub team_email: Option<String>,
}

impl UploadParams {
    /// Returns `(filename, submitter)` or names the first missing field.
    pub fn into_parts(self) -> Result<(String, Submitter), GatewayError> {
        fn required(value: Option<String>, name: &str) -> Result<String, GatewayError> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| GatewayError::InvalidRequest(format!("missing metadata: {name}")))
        }

        let filename = required(self.filename, "filename")?;
        let submitter = Submitter {
            team_name: required(self.team_name, "team_name")?,
            team_leader: required(self.team_leader, "team_leader")?,
            team_email: required(self.team_email, "team_email")?,
        };
        Ok((filename, submitter))
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum PlagiarismReport {
    Completed(Verdict),
    Failed { error: String },
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: &'static str,
    #[serde(rename = "fileId")]
    pub file_id: DocumentId,
    #[serde(rename = "plagiarismReport")]
    pub plagiarism_report: PlagiarismReport,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: &'static str,
    #[serde(rename = "fileId")]
    pub file_id: DocumentId,
}

#[derive(Debug, Serialize)]
pub struct DuplicateResponse {
    #[serde(rename = "fileId")]
    pub file_id: DocumentId,
    pub duplicates: Vec<DocumentId>,
    pub message: &'static str,
}

fn parse_id(raw: &str) -> Result<DocumentId, GatewayError> {
    Ok(raw.parse::<DocumentId>()?)
}

fn verdict_headers(verdict: &Verdict) -> HeaderMap {
    let status = if verdict.plagiarised {
        PLAGCHECK_STATUS_PLAGIARISED
    } else {
        PLAGCHECK_STATUS_CLEAN
    };
    let mut headers = HeaderMap::new();
    headers.insert(PLAGCHECK_STATUS_HEADER, HeaderValue::from_static(status));
    headers
}

/// Media type of a `Content-Type` header value, without parameters.
pub fn media_type(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

#[instrument(skip(state))]
pub async fn nlp_check_handler<S>(
    State(state): State<AppState<S>>,
    Path(file_id): Path<String>,
) -> Result<Response, GatewayError>
where
    S: DocumentStore + Clone + 'static,
{
    let verdict = state.detector.check(&file_id).await?;
    let headers = verdict_headers(&verdict);
    Ok((StatusCode::OK, headers, Json(verdict)).into_response())
}

#[instrument(skip(state, headers, body), fields(bytes = body.len()))]
pub async fn upload_handler<S>(
    State(state): State<AppState<S>>,
    Query(params): Query<UploadParams>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, GatewayError>
where
    S: DocumentStore + Clone + 'static,
{
    let (filename, submitter) = params.into_parts()?;

    let eligible = state.eligible_content_type();
    match media_type(&headers) {
        Some(ct) if ct.eq_ignore_ascii_case(eligible) => {}
        other => {
            return Err(GatewayError::UnsupportedContentType(format!(
                "expected {eligible}, got {}",
                other.unwrap_or("none")
            )));
        }
    }

    if body.is_empty() {
        return Err(GatewayError::InvalidRequest("empty upload".to_string()));
    }

    let document = NewDocument::new(filename, eligible, body.to_vec()).with_submitter(submitter);
    let meta = state.store().put(document).await?;
    info!(document_id = %meta.id, filename = %meta.filename, "Document uploaded");

    let (message, report, headers) = match state.detector.check_id(&meta.id).await {
        Ok(verdict) => {
            let headers = verdict_headers(&verdict);
            (
                UPLOAD_CHECKED_MESSAGE,
                PlagiarismReport::Completed(verdict),
                headers,
            )
        }
        Err(e) => {
            warn!(document_id = %meta.id, error = %e, "Plagiarism check after upload failed");
            (
                UPLOAD_CHECK_FAILED_MESSAGE,
                PlagiarismReport::Failed {
                    error: e.to_string(),
                },
                HeaderMap::new(),
            )
        }
    };

    Ok((
        StatusCode::OK,
        headers,
        Json(UploadResponse {
            message,
            file_id: meta.id,
            plagiarism_report: report,
        }),
    )
        .into_response())
}

#[instrument(skip(state))]
pub async fn list_files_handler<S>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<DocumentMeta>>, GatewayError>
where
    S: DocumentStore + Clone + 'static,
{
    Ok(Json(state.store().list().await?))
}

#[instrument(skip(state))]
pub async fn raw_file_handler<S>(
    State(state): State<AppState<S>>,
    Path(file_id): Path<String>,
) -> Result<Response, GatewayError>
where
    S: DocumentStore + Clone + 'static,
{
    let id = parse_id(&file_id)?;
    let meta = state.store().metadata(&id).await?;
    if !meta.is_eligible(state.eligible_content_type()) {
        return Err(GatewayError::NotFound(id.to_string()));
    }

    let bytes = state.store().fetch(&id).await?;
    let content_type = HeaderValue::from_str(&meta.content_type)
        .map_err(|e| GatewayError::InternalError(e.to_string()))?;

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, content_type);
    Ok((StatusCode::OK, headers, Bytes::from(bytes)).into_response())
}

#[instrument(skip(state))]
pub async fn delete_file_handler<S>(
    State(state): State<AppState<S>>,
    Path(file_id): Path<String>,
) -> Result<Json<DeleteResponse>, GatewayError>
where
    S: DocumentStore + Clone + 'static,
{
    let id = parse_id(&file_id)?;
    state.store().delete(&id).await?;
    info!(document_id = %id, "Document deleted on request");

    Ok(Json(DeleteResponse {
        message: DELETED_MESSAGE,
        file_id: id,
    }))
}

#[instrument(skip(state))]
pub async fn check_duplicate_handler<S>(
    State(state): State<AppState<S>>,
    Path(file_id): Path<String>,
) -> Result<Json<DuplicateResponse>, GatewayError>
where
    S: DocumentStore + Clone + 'static,
{
    let id = parse_id(&file_id)?;
    let duplicates = state.detector.find_duplicates(&id).await?;

    let message = if duplicates.is_empty() {
        DUPLICATE_NONE_MESSAGE
    } else {
        DUPLICATE_FOUND_MESSAGE
    };

    Ok(Json(DuplicateResponse {
        file_id: id,
        duplicates,
        message,
    }))
}
