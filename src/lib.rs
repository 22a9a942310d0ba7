//! # CEJUSC Intake - Mediation Service Request Form
//!
//! Intake for the judicial mediation center's four services (divorce,
//! civil-union dissolution, marriage registration, child support):
//! - Per-service field rules with explicit email format tags
//! - Appointment slot checks against a configurable weekly hours table
//! - Submission of validated requests to a spreadsheet endpoint
//!
//! ## Flow
//!
//! ```text
//!   IntakeForm ──validate──▶ FormValidator ──▶ ValidationResult
//!       │                                            │ valid
//!       └──────────── SubmissionPayload ◀────────────┘
//!                            │
//!                            ▼
//!                 Submitter (SheetsClient) ──POST──▶ Apps Script
//! ```

// Enforce strict safety at compile time
#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]

pub mod form;
pub mod format;
pub mod intake;
pub mod submission;
pub mod types;
pub mod validation;

// Internal utilities
pub mod observability;

pub use form::{FieldSet, ScheduleWindow, ServiceCategory};
pub use intake::{IntakeForm, SubmitOutcome};
pub use types::{Config, Error, Result};
pub use validation::{ErrorKind, FormValidator, ValidationResult};
