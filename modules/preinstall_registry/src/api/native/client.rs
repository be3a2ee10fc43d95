//! Native client implementation - wraps domain service for in-process calls

use crate::contract::{
    FilterValues, PageRequest, RegistryApi, RegistryError, Submission, SubmissionFilter,
    SubmissionPage, SubmissionPayload, SubmitReceipt, UploadedFiles,
};
use crate::domain::Service;
use async_trait::async_trait;
use std::sync::Arc;

/// Native client implementation that directly calls the domain service
///
/// Used for in-process communication without HTTP overhead.
#[derive(Clone)]
pub struct NativeClient {
    service: Arc<Service>,
}

impl NativeClient {
    /// Create a new native client
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl RegistryApi for NativeClient {
    async fn submit(
        &self,
        payload: SubmissionPayload,
        files: UploadedFiles,
    ) -> Result<SubmitReceipt, RegistryError> {
        self.service.submit(payload, files).await
    }

    async fn get_submission(&self, id: i32) -> Result<Submission, RegistryError> {
        self.service.get_submission(id).await
    }

    async fn delete_submission(&self, id: i32) -> Result<(), RegistryError> {
        self.service.delete_submission(id).await
    }

    async fn list_submissions(
        &self,
        filter: SubmissionFilter,
        page: PageRequest,
    ) -> Result<SubmissionPage, RegistryError> {
        self.service.list_submissions(filter, page).await
    }

    async fn filter_values(&self) -> FilterValues {
        self.service.filter_values().await
    }
}
