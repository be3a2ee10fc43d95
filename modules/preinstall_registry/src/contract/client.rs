//! Native client trait for inter-module communication
//!
//! This trait defines the API that other modules use to interact with the registry.
//! NO HTTP - direct function calls.

use super::{
    error::RegistryError,
    model::{
        FilterValues, PageRequest, Submission, SubmissionFilter, SubmissionPage,
        SubmissionPayload, SubmitReceipt, UploadedFiles,
    },
};
use async_trait::async_trait;

/// Pre-install registry API for inter-module communication
#[async_trait]
pub trait RegistryApi: Send + Sync {
    /// Validate, normalize and persist a form submission
    async fn submit(
        &self,
        payload: SubmissionPayload,
        files: UploadedFiles,
    ) -> Result<SubmitReceipt, RegistryError>;

    /// Get a single submission
    async fn get_submission(&self, id: i32) -> Result<Submission, RegistryError>;

    /// Delete a submission
    async fn delete_submission(&self, id: i32) -> Result<(), RegistryError>;

    /// Filtered, paginated listing, newest first
    async fn list_submissions(
        &self,
        filter: SubmissionFilter,
        page: PageRequest,
    ) -> Result<SubmissionPage, RegistryError>;

    /// Distinct city, state and cabinet type values
    async fn filter_values(&self) -> FilterValues;
}
