//! Domain layer - business logic and services

pub mod intake;
pub mod repository;
pub mod service;
pub mod validation;

pub use intake::FileIntake;
pub use repository::SubmissionRepository;
pub use service::Service;
