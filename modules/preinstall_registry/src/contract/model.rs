//! Contract models for the pre-install registry
//!
//! These models are transport-agnostic and used for inter-module communication.
//! NO serde derives - these are pure domain models.

use chrono::{DateTime, Utc};

/// Stored pre-install registration record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Store-assigned identifier, never reused
    pub id: i32,
    pub intersection_name: String,
    pub city: String,
    pub state: String,
    pub end_user: String,
    pub distributor: String,
    pub cabinet_type: String,
    pub tls_connection: String,
    pub detection_io: Option<String>,
    /// Free text and/or an embedded `File: <name>` reference
    pub phasing: Option<String>,
    /// Embedded `File: <name>` reference or free text
    pub timing_plans: Option<String>,
    /// Set once by the store at insert time
    pub submitted_at: DateTime<Utc>,
}

/// Normalized submission ready to be persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubmission {
    pub intersection_name: String,
    pub city: String,
    pub state: String,
    pub end_user: String,
    pub distributor: String,
    pub cabinet_type: String,
    pub tls_connection: String,
    pub detection_io: Option<String>,
    pub phasing: Option<String>,
    pub timing_plans: Option<String>,
}

/// Raw form payload as received from the registration form
///
/// Every field is optional here; presence rules are enforced by the domain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionPayload {
    pub intersection_name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub end_user: Option<String>,
    pub distributor: Option<String>,
    pub other_distributor: Option<String>,
    pub cabinet_type: Option<String>,
    pub other_cabinet_type: Option<String>,
    pub tls_connection: Option<String>,
    pub other_tls_connection: Option<String>,
    pub detection_io: Option<String>,
    pub other_detection_io: Option<String>,
    pub phasing_text: Option<String>,
    pub timing_plans: Option<String>,
}

/// Server-generated names of files accepted alongside a submission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadedFiles {
    pub phasing_file: Option<String>,
    pub timing_plans_file: Option<String>,
}

/// Confirmation returned after a successful submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub id: i32,
    pub message: String,
}

/// Optional predicates narrowing which submissions are returned
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionFilter {
    /// Case-sensitive substring over intersection name, city, end user and distributor
    pub search: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub cabinet_type: Option<String>,
}

impl SubmissionFilter {
    /// Drop blank predicates so that `?city=` behaves like no city filter
    pub fn normalized(self) -> Self {
        fn non_blank(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }

        Self {
            search: non_blank(self.search),
            city: non_blank(self.city),
            state: non_blank(self.state),
            cabinet_type: non_blank(self.cabinet_type),
        }
    }
}

/// Requested page; unset values fall back to configured defaults
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// One page of submissions plus pagination metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionPage {
    pub submissions: Vec<Submission>,
    /// Matching rows, independent of pagination
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

/// Distinct values for populating dashboard filter controls
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterValues {
    pub cities: Vec<String>,
    pub states: Vec<String>,
    pub cabinet_types: Vec<String>,
}

/// Columns that expose distinct-value lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterColumn {
    City,
    State,
    CabinetType,
}

impl FilterColumn {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::City => "city",
            Self::State => "state",
            Self::CabinetType => "cabinet_type",
        }
    }
}
