//! Pre-install Registry Module
//!
//! Intake, storage and querying of traffic-signal cabinet pre-install
//! registrations submitted through the registration form.

// Public exports
pub mod contract;
pub use contract::{
    client::RegistryApi, error::RegistryError, FilterValues, PageRequest, Submission,
    SubmissionFilter, SubmissionPage, SubmissionPayload, SubmitReceipt, UploadedFiles,
};

pub mod module;
pub use module::RegistryModule;

pub mod config;
pub use config::Config;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
