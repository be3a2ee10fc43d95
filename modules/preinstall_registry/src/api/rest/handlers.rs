//! HTTP request handlers - thin layer that delegates to domain service

use super::{
    dto::*,
    error::{map_domain_error, Problem},
    extract::{Attachment, SubmitForm},
};
use crate::contract::{RegistryError, SubmissionPayload, UploadedFiles};
use crate::domain::{FileIntake, Service};
use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

// ===== Submission Handlers =====

/// Accept a registration form, storing any attached files first
pub async fn submit(
    service: Arc<Service>,
    intake: Arc<dyn FileIntake>,
    form: SubmitForm,
) -> Result<(StatusCode, Json<SubmitResponse>), Problem> {
    let payload: SubmissionPayload = form.request.into();

    // Reject before touching the upload directory
    service.validate(&payload).map_err(map_domain_error)?;

    let mut files = UploadedFiles::default();
    let mut stored_names = Vec::with_capacity(form.files.len());
    for part in form.files {
        let stored = match intake
            .store(part.attachment.form_name(), &part.file_name, part.content)
            .await
        {
            Ok(stored) => stored,
            Err(e) => {
                discard_uploads(intake.as_ref(), &stored_names).await;
                return Err(RegistryError::storage("Failed to store uploaded file", e).into());
            }
        };
        stored_names.push(stored.clone());
        match part.attachment {
            Attachment::Phasing => files.phasing_file = Some(stored),
            Attachment::TimingPlans => files.timing_plans_file = Some(stored),
        }
    }

    match service.submit(payload, files).await {
        Ok(receipt) => Ok((StatusCode::CREATED, Json(receipt.into()))),
        Err(e) => {
            discard_uploads(intake.as_ref(), &stored_names).await;
            Err(map_domain_error(e))
        }
    }
}

/// Drop files written for a submission that was not saved
async fn discard_uploads(intake: &dyn FileIntake, names: &[String]) {
    for name in names {
        if let Err(e) = intake.discard(name).await {
            tracing::warn!(stored = %name, error = ?e, "Failed to discard orphaned upload");
        }
    }
}

/// List submissions with optional search, filters and pagination
pub async fn list_submissions(
    service: Arc<Service>,
    Query(query): Query<ListSubmissionsQuery>,
) -> Result<Json<SubmissionsListResponse>, Problem> {
    let (filter, page) = query.into_parts();

    let page = service
        .list_submissions(filter, page)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(page.into()))
}

/// Get a specific submission
pub async fn get_submission(
    service: Arc<Service>,
    Path(id): Path<String>,
) -> Result<Json<SubmissionDto>, Problem> {
    let id = parse_id(&id)?;

    let submission = service
        .get_submission(id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(submission.into()))
}

/// Delete a submission
pub async fn delete_submission(
    service: Arc<Service>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, Problem> {
    let id = parse_id(&id)?;

    service
        .delete_submission(id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(DeleteResponse {
        success: true,
        message: "Submission deleted successfully".to_string(),
    }))
}

// ===== Filter Handlers =====

/// Distinct values for the dashboard dropdowns
pub async fn list_filters(service: Arc<Service>) -> Json<FiltersResponse> {
    Json(service.filter_values().await.into())
}

/// Ids that are not integers cannot exist in the store
fn parse_id(raw: &str) -> Result<i32, Problem> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| map_domain_error(RegistryError::not_found(raw)))
}
