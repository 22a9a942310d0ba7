//! Delivery of validated intake requests to the spreadsheet backend.

mod client;
mod payload;

pub use client::{SheetsClient, Submitter};
pub use payload::{pt_br_timestamp, SubmissionPayload};
