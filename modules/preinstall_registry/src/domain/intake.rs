//! File intake collaborator
//!
//! Stores uploaded files and hands back the generated name that gets embedded
//! into the submission. Implementation lives in infra/uploads.rs

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;

#[async_trait]
pub trait FileIntake: Send + Sync {
    /// Persist `content` received in form field `field` and return the stored filename
    async fn store(&self, field: &str, original_name: &str, content: Bytes) -> Result<String>;

    /// Remove a file previously returned by `store`; a missing file is not an error
    async fn discard(&self, stored_name: &str) -> Result<()>;
}
