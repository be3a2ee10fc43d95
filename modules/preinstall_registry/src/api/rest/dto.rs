//! REST DTOs with serde derives for HTTP API

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ===== Submission DTOs =====

/// Stored submission, keyed by column names as the dashboard reads them
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmissionDto {
    pub id: i32,

    #[schema(example = "Main St & 1st Ave")]
    pub intersection_name: String,

    #[schema(example = "Springfield")]
    pub city: String,

    #[schema(example = "IL")]
    pub state: String,

    pub end_user: String,
    pub distributor: String,
    pub cabinet_type: String,
    pub tls_connection: String,
    pub detection_io: Option<String>,

    /// Free text and/or `File: <name>`
    pub phasing: Option<String>,

    /// `File: <name>` or free text
    pub timing_plans: Option<String>,

    /// Insert timestamp
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}

/// Registration form body (JSON, urlencoded, or the text parts of multipart)
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    #[schema(example = "Main St & 1st Ave")]
    pub intersection_name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub end_user: Option<String>,

    /// A listed distributor or "Other"
    pub distributor: Option<String>,
    pub other_distributor: Option<String>,

    pub cabinet_type: Option<String>,
    pub other_cabinet_type: Option<String>,

    pub tls_connection: Option<String>,
    pub other_tls_connection: Option<String>,

    #[serde(rename = "detectionIO")]
    pub detection_io: Option<String>,
    #[serde(rename = "otherDetectionIO")]
    pub other_detection_io: Option<String>,

    pub phasing_text: Option<String>,
    pub timing_plans: Option<String>,
}

/// Successful submit response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmitResponse {
    pub success: bool,

    #[schema(example = "Form submitted successfully!")]
    pub message: String,

    pub id: i32,
}

/// Successful delete response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub success: bool,

    #[schema(example = "Submission deleted successfully")]
    pub message: String,
}

// ===== Query DTOs =====

/// Query string of the submissions listing.
///
/// Page and limit stay strings so that junk input falls back to defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSubmissionsQuery {
    pub search: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub cabinet_type: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// One page of submissions
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionsListResponse {
    pub submissions: Vec<SubmissionDto>,

    /// Matching submissions across all pages
    pub total: u64,

    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

/// Distinct values for the dashboard filter dropdowns
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FiltersResponse {
    pub cities: Vec<String>,
    pub states: Vec<String>,
    pub cabinet_types: Vec<String>,
}

// Note: Conversion implementations live in mapper.rs
