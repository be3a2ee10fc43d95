//! Infrastructure layer - persistence and file intake adapters

pub mod storage;
pub mod uploads;
