//! Local disk file intake for phasing and timing plan attachments

use crate::domain::FileIntake;
use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use rand::Rng;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// Writes uploads under one directory with server-generated unique names
#[derive(Debug, Clone)]
pub struct LocalFileIntake {
    dir: PathBuf,
}

impl LocalFileIntake {
    /// Open the upload directory, creating it when missing
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("failed to create upload directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// `<field>-<unix millis>-<random>` plus the original extension when it is plain alphanumeric
pub fn unique_filename(field: &str, original_name: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix: u32 = rand::rng().random_range(0..1_000_000_000);
    format!("{field}-{millis}-{suffix}{}", extension_of(original_name))
}

fn extension_of(original_name: &str) -> String {
    Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default()
}

#[async_trait]
impl FileIntake for LocalFileIntake {
    async fn store(&self, field: &str, original_name: &str, content: Bytes) -> Result<String> {
        let name = unique_filename(field, original_name);
        let path = self.dir.join(&name);

        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .with_context(|| format!("failed to create {}", path.display()))?;
        let written = async {
            file.write_all(&content).await?;
            file.flush().await
        }
        .await;
        if let Err(e) = written {
            drop(file);
            if let Err(cleanup) = tokio::fs::remove_file(&path).await {
                tracing::warn!(path = %path.display(), error = %cleanup, "Failed to remove partial upload");
            }
            return Err(e).with_context(|| format!("failed to write {}", path.display()));
        }

        tracing::debug!(field, original_name, stored = %name, bytes = content.len(), "Upload stored");
        Ok(name)
    }

    async fn discard(&self, stored_name: &str) -> Result<()> {
        // Only bare names handed out by `store` live in the upload dir
        if Path::new(stored_name).file_name().and_then(|n| n.to_str()) != Some(stored_name) {
            anyhow::bail!("invalid upload name {stored_name:?}");
        }

        let path = self.dir.join(stored_name);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(stored = %stored_name, "Upload discarded");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("failed to remove {}", path.display())),
        }
    }
}
