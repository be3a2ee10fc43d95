//! Common test utilities: sample form payloads and throwaway SQLite stores
#![allow(dead_code)]

use preinstall_registry::{Config, RegistryModule, SubmissionPayload};
use std::path::Path;
use tempfile::TempDir;

/// A complete form as a traffic engineer would send it
pub fn sample_payload(intersection: &str, city: &str) -> SubmissionPayload {
    SubmissionPayload {
        intersection_name: Some(intersection.to_string()),
        city: Some(city.to_string()),
        state: Some("IL".to_string()),
        end_user: Some("City Traffic Department".to_string()),
        distributor: Some("Orange Traffic".to_string()),
        cabinet_type: Some("TS2 Type 1".to_string()),
        tls_connection: Some("Fiber".to_string()),
        detection_io: Some("Loops".to_string()),
        ..Default::default()
    }
}

/// Config pointing the database and uploads into `dir`
pub fn temp_config(dir: &Path) -> Config {
    Config {
        database_url: format!("sqlite://{}?mode=rwc", dir.join("submissions.db").display()),
        upload_dir: dir.join("uploads"),
        ..Config::default()
    }
}

/// Fully initialized module over a fresh database file
pub async fn temp_module(config: impl FnOnce(Config) -> Config) -> (TempDir, RegistryModule) {
    let dir = tempfile::tempdir().unwrap();
    let module = RegistryModule::init(config(temp_config(dir.path())))
        .await
        .unwrap();
    (dir, module)
}
