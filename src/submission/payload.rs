//! JSON body posted to the spreadsheet endpoint.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::form::{FieldSet, ScheduleWindow, ServiceCategory, DATE_FIELD, TIME_FIELD};

/// Keys owned by the payload itself; same-named form fields are dropped.
const RESERVED_KEYS: [&str; 5] = [
    "tipoServico",
    DATE_FIELD,
    TIME_FIELD,
    "dataHoraPreferida",
    "timestamp",
];

/// One intake request, flattened into a single JSON object so each key maps
/// to a spreadsheet column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionPayload {
    #[serde(rename = "tipoServico")]
    pub service: ServiceCategory,

    /// Trimmed form values.
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,

    /// `YYYY-MM-DD`, as entered.
    #[serde(rename = "data_preferida", skip_serializing_if = "Option::is_none")]
    pub preferred_date: Option<String>,

    /// `HH:MM`, as entered.
    #[serde(rename = "hora_preferida", skip_serializing_if = "Option::is_none")]
    pub preferred_time: Option<String>,

    /// `dd/mm/yyyy HH:MM`, only when both date and time are known.
    #[serde(rename = "dataHoraPreferida", skip_serializing_if = "Option::is_none")]
    pub preferred_slot: Option<String>,

    /// pt-BR local timestamp of the submission.
    pub timestamp: String,
}

impl SubmissionPayload {
    pub fn build(
        service: ServiceCategory,
        fields: &FieldSet,
        schedule: &ScheduleWindow,
        now: NaiveDateTime,
    ) -> Self {
        let mut values = fields.trimmed();
        values.retain(|k, _| !RESERVED_KEYS.contains(&k.as_str()));

        Self {
            service,
            fields: values,
            preferred_date: schedule.date.map(|d| d.format("%Y-%m-%d").to_string()),
            preferred_time: schedule.time.map(|t| t.format("%H:%M").to_string()),
            preferred_slot: schedule.combined(),
            timestamp: pt_br_timestamp(now),
        }
    }
}

/// `dd/mm/yyyy, HH:MM:SS`, the pt-BR locale rendering of a date-time.
pub fn pt_br_timestamp(now: NaiveDateTime) -> String {
    now.format("%d/%m/%Y, %H:%M:%S").to_string()
}
