//! Domain service - business logic orchestration

use super::repository::SubmissionRepository;
use super::validation::{check_required, normalize_submission};
use crate::config::Config;
use crate::contract::{
    FilterColumn, FilterValues, PageRequest, RegistryError, Submission, SubmissionFilter,
    SubmissionPage, SubmissionPayload, SubmitReceipt, UploadedFiles,
};
use std::sync::Arc;

/// Confirmation returned with every accepted submission
pub const SUBMIT_SUCCESS_MESSAGE: &str = "Form submitted successfully!";

/// Domain service for pre-install registrations
pub struct Service {
    repo: Arc<dyn SubmissionRepository>,
    config: Config,
}

impl Service {
    /// Create a new service instance
    pub fn new(repo: Arc<dyn SubmissionRepository>, config: Config) -> Self {
        Self { repo, config }
    }

    // ===== Submission Operations =====

    /// Required-field check alone, for callers that must reject early
    pub fn validate(&self, payload: &SubmissionPayload) -> Result<(), RegistryError> {
        check_required(payload, self.config.require_detection_io)
    }

    /// Validate, normalize and persist one form submission
    pub async fn submit(
        &self,
        payload: SubmissionPayload,
        files: UploadedFiles,
    ) -> Result<SubmitReceipt, RegistryError> {
        let record = normalize_submission(payload, &files, self.config.require_detection_io)?;

        let stored = self
            .repo
            .insert(&record)
            .await
            .map_err(|e| RegistryError::storage("Failed to save submission", e))?;

        tracing::info!(
            id = stored.id,
            intersection = %stored.intersection_name,
            "Submission stored"
        );

        Ok(SubmitReceipt {
            id: stored.id,
            message: SUBMIT_SUCCESS_MESSAGE.to_string(),
        })
    }

    /// Delete a submission; deleting a missing id reports not found
    pub async fn delete_submission(&self, id: i32) -> Result<(), RegistryError> {
        let removed = self
            .repo
            .delete_by_id(id)
            .await
            .map_err(|e| RegistryError::storage("Failed to delete submission", e))?;

        if removed == 0 {
            return Err(RegistryError::not_found(id));
        }

        tracing::info!(id, "Submission deleted");
        Ok(())
    }

    // ===== Query Operations =====

    /// Get a specific submission
    pub async fn get_submission(&self, id: i32) -> Result<Submission, RegistryError> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(|e| RegistryError::storage("Failed to fetch submission", e))?
            .ok_or_else(|| RegistryError::not_found(id))
    }

    /// Filtered, paginated listing with page metadata
    pub async fn list_submissions(
        &self,
        filter: SubmissionFilter,
        page: PageRequest,
    ) -> Result<SubmissionPage, RegistryError> {
        let filter = filter.normalized();
        let (page, limit) = clamp_page(page, self.config.default_page_size, self.config.max_page_size);
        let offset = (page - 1).saturating_mul(limit);

        tracing::debug!(?filter, page, limit, "Listing submissions");

        let total = self
            .repo
            .count(&filter)
            .await
            .map_err(|e| RegistryError::storage("Failed to count submissions", e))?;

        // Pages past the end are empty; the offset never reaches the store
        let submissions = if offset >= total {
            Vec::new()
        } else {
            self.repo
                .list(&filter, limit, offset)
                .await
                .map_err(|e| RegistryError::storage("Failed to fetch submissions", e))?
        };

        Ok(SubmissionPage {
            submissions,
            total,
            page,
            limit,
            total_pages: total.div_ceil(limit),
        })
    }

    /// Distinct dashboard filter values; a failing category comes back empty
    pub async fn filter_values(&self) -> FilterValues {
        let (cities, states, cabinet_types) = tokio::join!(
            self.distinct_or_empty(FilterColumn::City),
            self.distinct_or_empty(FilterColumn::State),
            self.distinct_or_empty(FilterColumn::CabinetType),
        );

        FilterValues {
            cities,
            states,
            cabinet_types,
        }
    }

    async fn distinct_or_empty(&self, column: FilterColumn) -> Vec<String> {
        match self.repo.distinct_values(column).await {
            Ok(values) => values,
            Err(e) => {
                tracing::warn!(column = column.as_str(), error = ?e, "Failed to fetch filter values");
                Vec::new()
            }
        }
    }
}

/// Resolve the requested page and page size: page >= 1, 1 <= limit <= max
pub fn clamp_page(request: PageRequest, default_limit: u64, max_limit: u64) -> (u64, u64) {
    let max_limit = i64::try_from(max_limit).unwrap_or(i64::MAX).max(1);
    let default_limit = i64::try_from(default_limit).unwrap_or(i64::MAX);
    let page = request.page.unwrap_or(1).max(1) as u64;
    let limit = request.limit.unwrap_or(default_limit).clamp(1, max_limit) as u64;
    (page, limit)
}
