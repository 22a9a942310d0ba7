//! Core types for the intake crate.
//!
//! - **Errors**: Application error types with thiserror derives
//! - **Config**: Business hours, submission endpoint and observability settings

mod config;
mod errors;

pub use config::{
    Config, HourWindow, ObservabilityConfig, ScheduleConfig, SubmissionConfig,
    SCRIPT_URL_ENV, SCRIPT_URL_PLACEHOLDER,
};
pub use errors::{Error, Result, SUBMISSION_RETRY_MESSAGE};
