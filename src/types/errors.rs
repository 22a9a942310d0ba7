//! Application error types.
//!
//! All errors use `thiserror` for automatic Error trait derivation. Field
//! validation failures are NOT errors: they are data in
//! [`ValidationResult`](crate::validation::ValidationResult). This enum covers
//! the operational paths around validation (selection, config, submission).

use thiserror::Error;

/// Application result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Generic text shown to the user when a submission cannot be delivered.
pub const SUBMISSION_RETRY_MESSAGE: &str = "Erro ao enviar a solicitação. Tente novamente.";

/// Main error enum for the intake crate.
#[derive(Error, Debug)]
pub enum Error {
    /// No service category was selected before validating or submitting.
    #[error("no service category selected")]
    NoServiceSelected,

    /// A category tag did not match any known service.
    #[error("unknown service category: {0}")]
    UnknownCategory(String),

    /// Invalid or unreadable configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport failure talking to the spreadsheet endpoint.
    #[error("submission failed: {0}")]
    Submission(#[from] reqwest::Error),

    /// I/O errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Message suitable for showing to the person filling in the form.
    pub fn user_message(&self) -> String {
        match self {
            Error::NoServiceSelected => "Por favor, selecione um tipo de serviço.".to_string(),
            Error::Submission(_) => SUBMISSION_RETRY_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

// Convenience constructors
impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn unknown_category(tag: impl Into<String>) -> Self {
        Self::UnknownCategory(tag.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_for_missing_selection() {
        assert_eq!(
            Error::NoServiceSelected.user_message(),
            "Por favor, selecione um tipo de serviço."
        );
    }

    #[test]
    fn test_io_errors_convert_with_question_mark() {
        fn read_missing() -> Result<String> {
            Ok(std::fs::read_to_string("/nonexistent/cejusc.json")?)
        }
        let err = read_missing().unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.user_message().starts_with("io error: "));
    }

    #[test]
    fn test_user_message_falls_back_to_display() {
        let err = Error::unknown_category("inventario");
        assert_eq!(err.user_message(), "unknown service category: inventario");
    }
}
