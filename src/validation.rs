//! Intake form validation.
//!
//! [`FormValidator::validate`] is a pure function of its inputs: the selected
//! category, the field values, the appointment slot and an injected `today`.
//! Every failing field is reported, not just the first, so callers can show
//! all errors at once.

use chrono::{Datelike, NaiveDate, Timelike};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::form::{
    FieldRequirement, FieldRule, FieldSet, ScheduleWindow, ServiceCategory, DATE_FIELD,
    TIME_FIELD,
};
use crate::types::ScheduleConfig;

static EMAIL_SHAPE: OnceLock<Regex> = OnceLock::new();

/// `local@domain.tld`, no whitespace and a single `@`.
#[allow(clippy::expect_used)]
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_SHAPE
        .get_or_init(|| {
            Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid literal")
        })
        .is_match(value)
}

// =============================================================================
// Results
// =============================================================================

/// Why a field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    MissingField,
    InvalidEmailFormat,
    MissingDate,
    PastDate,
    MissingTime,
    ClosedDay,
    OutsideBusinessHours,
}

impl ErrorKind {
    pub fn default_message(self) -> &'static str {
        match self {
            ErrorKind::MissingField => "Campo obrigatório",
            ErrorKind::InvalidEmailFormat => "Informe um e-mail válido",
            ErrorKind::MissingDate => "Informe a data preferida",
            ErrorKind::PastDate => "A data não pode ser no passado",
            ErrorKind::MissingTime => "Informe o horário preferido",
            ErrorKind::ClosedDay => "Não há atendimento neste dia",
            ErrorKind::OutsideBusinessHours => "Fora do horário de funcionamento",
        }
    }
}

/// A failed check on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub kind: ErrorKind,
    /// Overrides the kind's default text (date/time failures).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_message: Option<String>,
}

impl FieldError {
    fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            custom_message: None,
        }
    }

    fn with_message(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            custom_message: Some(message.into()),
        }
    }

    /// Text to display next to the field.
    pub fn message(&self) -> &str {
        self.custom_message
            .as_deref()
            .unwrap_or_else(|| self.kind.default_message())
    }
}

/// Outcome of checking a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOutcome {
    pub field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<FieldError>,
}

/// Verdict for a whole form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    /// Every checked field, in check order.
    pub fields: Vec<FieldOutcome>,
}

impl ValidationResult {
    fn from_outcomes(fields: Vec<FieldOutcome>) -> Self {
        let valid = fields.iter().all(|o| o.error.is_none());
        Self { valid, fields }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Failing fields only.
    pub fn errors(&self) -> impl Iterator<Item = (&str, &FieldError)> {
        self.fields
            .iter()
            .filter_map(|o| o.error.as_ref().map(|e| (o.field.as_str(), e)))
    }

    pub fn error_for(&self, field: &str) -> Option<&FieldError> {
        self.fields
            .iter()
            .find(|o| o.field == field)
            .and_then(|o| o.error.as_ref())
    }
}

// =============================================================================
// Validator
// =============================================================================

/// Checks intake forms against the category rule table and business hours.
#[derive(Debug, Clone, Default)]
pub struct FormValidator {
    hours: ScheduleConfig,
}

impl FormValidator {
    pub fn new(hours: ScheduleConfig) -> Self {
        Self { hours }
    }

    pub fn hours(&self) -> &ScheduleConfig {
        &self.hours
    }

    /// Validate the category's fields and the appointment slot.
    pub fn validate(
        &self,
        category: ServiceCategory,
        fields: &FieldSet,
        schedule: &ScheduleWindow,
        today: NaiveDate,
    ) -> ValidationResult {
        let mut outcomes = Vec::new();
        check_fields(category.requirement(), fields, &mut outcomes);
        self.check_schedule(schedule, today, &mut outcomes);

        let result = ValidationResult::from_outcomes(outcomes);
        tracing::debug!(
            category = %category,
            valid = result.valid,
            errors = result.errors().count(),
            "form validated"
        );
        result
    }

    /// Like [`validate`](Self::validate) but takes the raw category tag. An
    /// unrecognised tag has no field rules, so only the schedule is checked.
    pub fn validate_tagged(
        &self,
        tag: &str,
        fields: &FieldSet,
        schedule: &ScheduleWindow,
        today: NaiveDate,
    ) -> ValidationResult {
        match tag.parse::<ServiceCategory>() {
            Ok(category) => self.validate(category, fields, schedule, today),
            Err(_) => {
                tracing::warn!(tag, "unrecognised service category, checking schedule only");
                let mut outcomes = Vec::new();
                self.check_schedule(schedule, today, &mut outcomes);
                ValidationResult::from_outcomes(outcomes)
            }
        }
    }

    fn check_schedule(
        &self,
        schedule: &ScheduleWindow,
        today: NaiveDate,
        outcomes: &mut Vec<FieldOutcome>,
    ) {
        let date_error = match schedule.date {
            None => Some(FieldError::new(ErrorKind::MissingDate)),
            Some(date) if date < today => Some(FieldError::with_message(
                ErrorKind::PastDate,
                ErrorKind::PastDate.default_message(),
            )),
            Some(_) => None,
        };
        outcomes.push(FieldOutcome {
            field: DATE_FIELD.to_string(),
            error: date_error,
        });

        outcomes.push(FieldOutcome {
            field: TIME_FIELD.to_string(),
            error: self.check_time(schedule),
        });
    }

    /// Presence and business-hours check for the preferred time.
    ///
    /// A time given without a date is only checked for presence: there is no
    /// weekday to pick a window from, and the date outcome already fails.
    fn check_time(&self, schedule: &ScheduleWindow) -> Option<FieldError> {
        let Some(time) = schedule.time else {
            return Some(FieldError::new(ErrorKind::MissingTime));
        };
        let day = schedule.date?.weekday();

        match self.hours.hours_for(day) {
            None => Some(FieldError::with_message(
                ErrorKind::ClosedDay,
                self.hours.closed_message(day),
            )),
            Some(window) if !window.contains_hour(time.hour()) => {
                Some(FieldError::with_message(
                    ErrorKind::OutsideBusinessHours,
                    self.hours.outside_hours_message(day, window),
                ))
            }
            Some(_) => None,
        }
    }
}

fn check_fields(
    requirement: FieldRequirement,
    fields: &FieldSet,
    outcomes: &mut Vec<FieldOutcome>,
) {
    for rule in requirement.required().chain(requirement.optional()) {
        outcomes.push(FieldOutcome {
            field: rule.id.to_string(),
            error: check_field(rule, fields),
        });
    }
}

fn check_field(rule: &FieldRule, fields: &FieldSet) -> Option<FieldError> {
    match fields.value(rule.id) {
        None if rule.required => Some(FieldError::new(ErrorKind::MissingField)),
        None => None,
        Some(value) if rule.requires_email_format && !is_valid_email(value) => {
            Some(FieldError::new(ErrorKind::InvalidEmailFormat))
        }
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn today() -> NaiveDate {
        // Sunday
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn slot(y: i32, m: u32, d: u32, h: u32, min: u32) -> ScheduleWindow {
        ScheduleWindow::new(
            NaiveDate::from_ymd_opt(y, m, d),
            NaiveTime::from_hms_opt(h, min, 0),
        )
    }

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("ana@example.com"));
        assert!(is_valid_email("a.b+c@sub.example.com.br"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("ana@example"));
        assert!(!is_valid_email("ana @example.com"));
        assert!(!is_valid_email("ana@@example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_blank_required_field_is_missing() {
        let fields: FieldSet = [("solicitante_nome", "   ")].into_iter().collect();
        let rule = ServiceCategory::Divorce
            .requirement()
            .rule("solicitante_nome")
            .copied()
            .unwrap();
        assert_eq!(
            check_field(&rule, &fields).map(|e| e.kind),
            Some(ErrorKind::MissingField)
        );
    }

    #[test]
    fn test_required_email_is_format_checked_after_trim() {
        let rule = ServiceCategory::Divorce
            .requirement()
            .rule("solicitante_email")
            .copied()
            .unwrap();
        let ok: FieldSet = [("solicitante_email", " ana@example.com ")].into_iter().collect();
        let bad: FieldSet = [("solicitante_email", "ana.example.com")].into_iter().collect();
        assert_eq!(check_field(&rule, &ok), None);
        assert_eq!(
            check_field(&rule, &bad).map(|e| e.kind),
            Some(ErrorKind::InvalidEmailFormat)
        );
    }

    #[test]
    fn test_missing_date_and_time() {
        let validator = FormValidator::default();
        let schedule = ScheduleWindow::default();
        let result = validator.validate_tagged("", &FieldSet::new(), &schedule, today());
        assert!(!result.is_valid());
        assert_eq!(
            result.error_for(DATE_FIELD).map(|e| e.kind),
            Some(ErrorKind::MissingDate)
        );
        assert_eq!(
            result.error_for(TIME_FIELD).map(|e| e.kind),
            Some(ErrorKind::MissingTime)
        );
    }

    #[test]
    fn test_time_without_date_only_flags_date() {
        let validator = FormValidator::default();
        let schedule = ScheduleWindow::new(None, NaiveTime::from_hms_opt(3, 0, 0));
        let result = validator.validate_tagged("x", &FieldSet::new(), &schedule, today());
        assert_eq!(result.errors().count(), 1);
        assert!(result.error_for(TIME_FIELD).is_none());
    }

    #[test]
    fn test_today_is_not_past() {
        let validator = FormValidator::default();
        let monday = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let schedule = slot(2026, 10, 19, 10, 0);
        let result = validator.validate_tagged("x", &FieldSet::new(), &schedule, monday);
        assert!(result.is_valid());
    }

    #[test]
    fn test_saturday_window_follows_config() {
        let saturday = slot(2026, 10, 24, 8, 30);
        let strict = FormValidator::default();
        let result = strict.validate_tagged("x", &FieldSet::new(), &saturday, today());
        let err = result.error_for(TIME_FIELD).unwrap();
        assert_eq!(err.kind, ErrorKind::OutsideBusinessHours);
        assert_eq!(err.message(), "Sábado: funcionamento de 09:00 às 18:00");

        let extended = FormValidator::new(ScheduleConfig {
            saturday: Some(crate::types::HourWindow::new(8, 23)),
            ..ScheduleConfig::default()
        });
        assert!(extended
            .validate_tagged("x", &FieldSet::new(), &saturday, today())
            .is_valid());
    }

    #[test]
    fn test_validator_exposes_configured_hours() {
        let hours = ScheduleConfig {
            sunday: Some(crate::types::HourWindow::new(10, 14)),
            ..ScheduleConfig::default()
        };
        let validator = FormValidator::new(hours.clone());
        assert_eq!(validator.hours(), &hours);
        assert_eq!(
            validator.hours().hours_for(chrono::Weekday::Sun),
            Some(crate::types::HourWindow::new(10, 14))
        );
    }

    #[test]
    fn test_sunday_message() {
        let validator = FormValidator::default();
        let schedule = slot(2026, 10, 25, 10, 0);
        let result = validator.validate_tagged("x", &FieldSet::new(), &schedule, today());
        let err = result.error_for(TIME_FIELD).unwrap();
        assert_eq!(err.kind, ErrorKind::ClosedDay);
        assert_eq!(err.message(), "Não funcionamos aos domingos");
    }

    #[test]
    fn test_default_message_used_without_override() {
        let err = FieldError::new(ErrorKind::MissingField);
        assert_eq!(err.message(), "Campo obrigatório");
    }
}
