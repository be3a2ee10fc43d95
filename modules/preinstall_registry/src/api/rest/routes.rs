//! Route registration and OpenAPI document

use super::{dto::*, error::Problem, extract::{SubmitForm, UploadLimit}, handlers};
use crate::domain::{FileIntake, Service};
use axum::{
    extract::{DefaultBodyLimit, Path, Query},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use std::sync::Arc;
use utoipa::OpenApi;

/// Schemas of every request and response body served under `/api`
#[derive(OpenApi)]
#[openapi(
    info(title = "Pre-install registration API"),
    components(schemas(
        SubmissionDto,
        SubmitRequest,
        SubmitResponse,
        DeleteResponse,
        SubmissionsListResponse,
        FiltersResponse
    ))
)]
pub struct ApiDoc;

/// Register all REST routes
pub fn register_routes(
    router: Router,
    service: Arc<Service>,
    intake: Arc<dyn FileIntake>,
    max_upload_bytes: usize,
) -> Router {
    // Two attachments plus the text fields
    let body_limit = max_upload_bytes.saturating_mul(2).saturating_add(1024 * 1024);

    router
        .route("/api/submit", post(submit_handler))
        .route("/api/submissions", get(list_submissions_handler))
        .route(
            "/api/submissions/{id}",
            get(get_submission_handler).delete(delete_submission_handler),
        )
        .route("/api/filters", get(list_filters_handler))
        .route("/api/openapi.json", get(openapi_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(Extension(UploadLimit(max_upload_bytes)))
        .layer(Extension(intake))
        .layer(Extension(service))
}

// ===== Handler wrappers that extract shared state from Extension =====

async fn submit_handler(
    Extension(service): Extension<Arc<Service>>,
    Extension(intake): Extension<Arc<dyn FileIntake>>,
    form: SubmitForm,
) -> Result<(StatusCode, Json<SubmitResponse>), Problem> {
    handlers::submit(service, intake, form).await
}

async fn list_submissions_handler(
    Extension(service): Extension<Arc<Service>>,
    query: Query<ListSubmissionsQuery>,
) -> Result<Json<SubmissionsListResponse>, Problem> {
    handlers::list_submissions(service, query).await
}

async fn get_submission_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<String>,
) -> Result<Json<SubmissionDto>, Problem> {
    handlers::get_submission(service, path).await
}

async fn delete_submission_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<String>,
) -> Result<Json<DeleteResponse>, Problem> {
    handlers::delete_submission(service, path).await
}

async fn list_filters_handler(
    Extension(service): Extension<Arc<Service>>,
) -> Json<FiltersResponse> {
    handlers::list_filters(service).await
}

async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
