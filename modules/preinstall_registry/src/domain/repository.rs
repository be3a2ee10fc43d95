//! Repository traits for data access
//!
//! These traits define the interface for data access operations.
//! Implementations are in infra/storage/repositories.rs

use crate::contract::{FilterColumn, NewSubmission, Submission, SubmissionFilter};
use anyhow::Result;
use async_trait::async_trait;

/// Record store for submissions
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// Append a record; `submitted_at` is stamped by the store
    async fn insert(&self, submission: &NewSubmission) -> Result<Submission>;

    /// Find a submission by id
    async fn find_by_id(&self, id: i32) -> Result<Option<Submission>>;

    /// Remove a submission, returning the number of rows deleted (0 or 1)
    async fn delete_by_id(&self, id: i32) -> Result<u64>;

    /// Matching submissions, newest `submitted_at` first, ties by descending id
    async fn list(
        &self,
        filter: &SubmissionFilter,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Submission>>;

    /// Total matching submissions, independent of pagination
    async fn count(&self, filter: &SubmissionFilter) -> Result<u64>;

    /// Distinct values of one column in ascending order
    async fn distinct_values(&self, column: FilterColumn) -> Result<Vec<String>>;
}
