use axum::{
    Json,
    extract::{
        Multipart, Path, Query, State,
        multipart::{MultipartError, MultipartRejection},
        rejection::JsonRejection,
    },
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use super::AppState;
use super::error::ApiError;
use crate::error::PlaintsError;
use crate::intake::{Submission, Upload};
use crate::model::{Complaint, ComplaintStatus, OptionKind, Priority, TaxonomyOption};
use crate::taxonomy::Resolved;
use crate::validation::MAX_ATTACHMENT_BYTES;

pub const OPTIONS_SOURCE_HEADER: &str = "x-options-source";

type ApiResult<T> = Result<T, ApiError>;

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

// =============================================================================
// Taxonomy
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsQuery {
    #[serde(rename = "type")]
    kind: Option<String>,
    parent_category: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OptionView {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    kind: Option<OptionKind>,
    value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl OptionView {
    fn brief(option: TaxonomyOption) -> Self {
        let code = match option.kind {
            OptionKind::Department => option.code,
            _ => None,
        };
        Self {
            kind: None,
            value: option.value,
            parent_category: None,
            code,
        }
    }

    fn full(option: TaxonomyOption) -> Self {
        Self {
            kind: Some(option.kind),
            value: option.value,
            parent_category: option.parent_category,
            code: option.code,
        }
    }
}

fn options_response(resolved: Resolved, view: fn(TaxonomyOption) -> OptionView) -> Response {
    let origin = resolved.origin.as_str();
    let body: Vec<OptionView> = resolved.options.into_iter().map(view).collect();
    (
        [(
            HeaderName::from_static(OPTIONS_SOURCE_HEADER),
            HeaderValue::from_static(origin),
        )],
        Json(body),
    )
        .into_response()
}

/// GET /options
pub async fn list_options(
    State(state): State<AppState>,
    Query(query): Query<OptionsQuery>,
) -> ApiResult<Response> {
    let Some(kind) = query.kind.as_deref().filter(|k| !k.trim().is_empty()) else {
        return Ok(options_response(state.resolver.list_all(), OptionView::full));
    };

    let kind: OptionKind = kind.parse().map_err(|_| {
        PlaintsError::MalformedRequest(
            "type must be one of category, department, subCategory".to_string(),
        )
    })?;

    let parent = query
        .parent_category
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty());

    if kind == OptionKind::SubCategory && parent.is_none() {
        return Err(PlaintsError::MalformedRequest(
            "parentCategory is required when type=subCategory".to_string(),
        )
        .into());
    }

    Ok(options_response(
        state.resolver.list(kind, parent),
        OptionView::brief,
    ))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityQuery {
    #[serde(default)]
    category: String,
    #[serde(default)]
    sub_category: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityPreview {
    category: String,
    sub_category: String,
    priority: Priority,
}

/// GET /priority
pub async fn preview_priority(
    State(state): State<AppState>,
    Query(query): Query<PriorityQuery>,
) -> Json<PriorityPreview> {
    let priority = state
        .resolver
        .derive_priority(&query.category, &query.sub_category);
    Json(PriorityPreview {
        category: query.category,
        sub_category: query.sub_category,
        priority,
    })
}

// =============================================================================
// Complaints
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    tracking_id: String,
    message: String,
}

/// POST /complaints
pub async fn submit_complaint(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<(StatusCode, Json<SubmitResponse>)> {
    let multipart = multipart.map_err(|e| PlaintsError::MalformedRequest(e.body_text()))?;
    let submission = read_submission(multipart).await?;

    let complaint = state.intake.submit(submission)?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            message: format!(
                "Complaint submitted successfully. Your tracking ID is {}",
                complaint.tracking_id
            ),
            tracking_id: complaint.tracking_id,
        }),
    ))
}

async fn read_submission(mut multipart: Multipart) -> Result<Submission, PlaintsError> {
    let mut submission = Submission::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();

        if name == "file" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().map(str::to_string);
            let bytes = field.bytes().await.map_err(multipart_error)?;
            let upload = Upload {
                file_name,
                content_type,
                bytes: bytes.to_vec(),
            };

            // Browsers send an empty part for an untouched file input
            if upload.is_blank() {
                continue;
            }
            if submission.attachment.is_some() {
                return Err(PlaintsError::MalformedRequest(
                    "Only one attachment is allowed".to_string(),
                ));
            }
            submission.attachment = Some(upload);
            continue;
        }

        let value = field.text().await.map_err(multipart_error)?;
        match name.as_str() {
            "email" => submission.email = value,
            "department" => submission.department = value,
            "category" => submission.category = value,
            "subCategory" => submission.sub_category = value,
            "subOther" => submission.sub_other = Some(value),
            "description" => submission.description = value,
            "priority" => submission.priority = Some(value),
            other => tracing::debug!(field = other, "Ignoring unknown form field"),
        }
    }

    Ok(submission)
}

fn multipart_error(err: MultipartError) -> PlaintsError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        PlaintsError::FileTooLarge {
            limit: MAX_ATTACHMENT_BYTES,
        }
    } else {
        PlaintsError::MalformedRequest(err.body_text())
    }
}

#[derive(Debug, Deserialize)]
pub struct ComplaintsQuery {
    email: Option<String>,
}

/// GET /complaints
pub async fn list_complaints(
    State(state): State<AppState>,
    Query(query): Query<ComplaintsQuery>,
) -> ApiResult<Json<Vec<Complaint>>> {
    let complaints = match query.email.as_deref().map(str::trim) {
        Some(email) if !email.is_empty() => state.complaints.list_by_email(email)?,
        _ => state.complaints.list()?,
    };
    Ok(Json(complaints))
}

/// GET /complaints/{id}
pub async fn get_complaint(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Complaint>> {
    Ok(Json(state.complaints.get(&id)?))
}

/// GET /complaints/by-tracking/{trackingId}
pub async fn get_by_tracking_id(
    State(state): State<AppState>,
    Path(tracking_id): Path<String>,
) -> ApiResult<Json<Complaint>> {
    Ok(Json(state.complaints.find_by_tracking_id(&tracking_id)?))
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    status: String,
}

/// PUT /complaints/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Result<Json<StatusUpdate>, JsonRejection>,
) -> ApiResult<Json<Complaint>> {
    require_staff(&state, &headers)?;
    let Json(update) = body.map_err(|e| PlaintsError::MalformedRequest(e.body_text()))?;
    let status: ComplaintStatus = update.status.parse()?;

    let mut complaint = state.complaints.get(&id)?;
    let previous = complaint.status;
    complaint.set_status(status);
    state.complaints.update(&complaint)?;

    tracing::info!(
        tracking_id = %complaint.tracking_id,
        from = %previous,
        to = %status,
        "Complaint status changed"
    );
    Ok(Json(complaint))
}

fn require_staff(state: &AppState, headers: &HeaderMap) -> Result<(), PlaintsError> {
    let Some(expected) = state.staff_token.as_deref() else {
        return Ok(());
    };
    let provided = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim);

    if provided == Some(expected) {
        Ok(())
    } else {
        Err(PlaintsError::Unauthorized(
            "a staff token is required to change complaint status".to_string(),
        ))
    }
}
