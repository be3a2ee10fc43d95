//! Configuration for the pre-install registry module

use serde::Deserialize;
use std::path::PathBuf;

/// Registry module configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// SQLite connection URL
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Directory receiving uploaded phasing and timing plan files
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,

    /// Maximum size of a single uploaded file in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    /// Treat detection I/O as a required form field
    #[serde(default)]
    pub require_detection_io: bool,

    /// Page size used when the caller gives none
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,

    /// Upper bound applied to caller-supplied page sizes
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            upload_dir: default_upload_dir(),
            max_upload_bytes: default_max_upload_bytes(),
            require_detection_io: false,
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

fn default_database_url() -> String {
    "sqlite://form_submissions.db?mode=rwc".to_string()
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024 // 10MB
}

fn default_page_size() -> u64 {
    50
}

fn default_max_page_size() -> u64 {
    500
}
