//! One submission attempt: the selected service, the entered values and the
//! validate-then-submit flow.

use chrono::{NaiveDate, NaiveDateTime};

use crate::form::{FieldSet, ScheduleWindow, ServiceCategory};
use crate::submission::{SubmissionPayload, Submitter};
use crate::types::{Error, Result};
use crate::validation::{FormValidator, ValidationResult};

/// What happened to a submit attempt that did not fail in transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent.
    Rejected(ValidationResult),
    /// The payload was delivered and the form was reset.
    Submitted(SubmissionPayload),
}

/// Intake form state.
///
/// Values entered under one category are kept when the requester switches to
/// another; only the selected category's rules apply at validation time.
#[derive(Debug, Clone, Default)]
pub struct IntakeForm {
    category: Option<ServiceCategory>,
    fields: FieldSet,
    schedule: ScheduleWindow,
}

impl IntakeForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the service category, replacing any previous choice.
    pub fn select(&mut self, category: ServiceCategory) {
        if self.category != Some(category) {
            tracing::debug!(category = %category, "service selected");
        }
        self.category = Some(category);
    }

    pub fn selected(&self) -> Option<ServiceCategory> {
        self.category
    }

    pub fn set_field(&mut self, id: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(id, value);
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    /// Set the preferred slot from raw `YYYY-MM-DD` / `HH:MM` input.
    pub fn set_schedule_raw(&mut self, date: &str, time: &str) {
        self.schedule = ScheduleWindow::from_raw(date, time);
    }

    pub fn set_schedule(&mut self, schedule: ScheduleWindow) {
        self.schedule = schedule;
    }

    pub fn schedule(&self) -> &ScheduleWindow {
        &self.schedule
    }

    pub fn validate(
        &self,
        validator: &FormValidator,
        today: NaiveDate,
    ) -> Result<ValidationResult> {
        let category = self.category.ok_or(Error::NoServiceSelected)?;
        Ok(validator.validate(category, &self.fields, &self.schedule, today))
    }

    /// Validate, then hand the payload to `submitter`. The form is cleared
    /// only after a successful delivery.
    pub async fn submit<S>(
        &mut self,
        validator: &FormValidator,
        submitter: &S,
        now: NaiveDateTime,
    ) -> Result<SubmitOutcome>
    where
        S: Submitter + ?Sized,
    {
        let category = self.category.ok_or(Error::NoServiceSelected)?;
        let result = validator.validate(category, &self.fields, &self.schedule, now.date());
        if !result.is_valid() {
            tracing::info!(
                category = %category,
                errors = result.errors().count(),
                "intake request rejected by validation"
            );
            return Ok(SubmitOutcome::Rejected(result));
        }

        let payload = SubmissionPayload::build(category, &self.fields, &self.schedule, now);
        submitter.submit(&payload).await?;
        self.reset();
        Ok(SubmitOutcome::Submitted(payload))
    }

    /// Clear selection, values and slot.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ErrorKind;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct Recording(Mutex<Vec<SubmissionPayload>>);

    #[async_trait]
    impl Submitter for Recording {
        async fn submit(&self, payload: &SubmissionPayload) -> Result<()> {
            self.0.lock().unwrap().push(payload.clone());
            Ok(())
        }
    }

    #[derive(Debug)]
    struct Offline;

    #[async_trait]
    impl Submitter for Offline {
        async fn submit(&self, _payload: &SubmissionPayload) -> Result<()> {
            Err(Error::Io(std::io::Error::other("connection refused")))
        }
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    fn filled_child_support() -> IntakeForm {
        let mut form = IntakeForm::new();
        form.select(ServiceCategory::ChildSupport);
        form.set_field("pensao_solicitante_nome", "Carla Dias");
        form.set_field("pensao_solicitante_telefone", "(11) 98765-4321");
        form.set_field("pensao_solicitante_email", "carla@example.com");
        form.set_field("pensao_solicitado_nome", "Paulo Dias");
        form.set_field("pensao_solicitado_telefone", "(11) 91234-5678");
        form.set_schedule_raw("2026-10-21", "10:00");
        form
    }

    #[test]
    fn test_validate_requires_selection() {
        let form = IntakeForm::new();
        let err = form
            .validate(&FormValidator::default(), now().date())
            .unwrap_err();
        assert!(matches!(err, Error::NoServiceSelected));
    }

    #[test]
    fn test_reselect_replaces_category() {
        let mut form = filled_child_support();
        form.select(ServiceCategory::Divorce);
        assert_eq!(form.selected(), Some(ServiceCategory::Divorce));
        let result = form.validate(&FormValidator::default(), now().date()).unwrap();
        assert_eq!(
            result.error_for("solicitante_nome").map(|e| e.kind),
            Some(ErrorKind::MissingField)
        );
    }

    #[test]
    fn test_submit_delivers_and_resets() {
        let mut form = filled_child_support();
        let sink = Recording::default();

        let validator = FormValidator::default();

        let outcome = tokio_test::block_on(form.submit(&validator, &sink, now())).unwrap();

        assert!(matches!(outcome, SubmitOutcome::Submitted(_)));
        let sent = sink.0.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].preferred_slot.as_deref(), Some("21/10/2026 10:00"));
        assert_eq!(form.selected(), None);
        assert!(form.fields().is_empty());
    }

    #[test]
    fn test_submit_rejected_sends_nothing() {
        let mut form = filled_child_support();
        form.set_field("pensao_solicitante_email", "carla");
        let sink = Recording::default();

        let validator = FormValidator::default();

        let outcome = tokio_test::block_on(form.submit(&validator, &sink, now())).unwrap();

        match outcome {
            SubmitOutcome::Rejected(result) => assert_eq!(result.errors().count(), 1),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(sink.0.lock().unwrap().is_empty());
        assert_eq!(form.selected(), Some(ServiceCategory::ChildSupport));
    }

    #[test]
    fn test_transport_failure_keeps_form() {
        let mut form = filled_child_support();
        let validator = FormValidator::default();
        let err = tokio_test::block_on(form.submit(&validator, &Offline, now())).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(form.fields().len(), 5);
    }
}
