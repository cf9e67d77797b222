pub mod chunking;
pub mod classify;
pub mod corpus;
pub mod domain;
pub mod error;
pub mod ingest;

#[cfg(test)]
mod tests {
    use super::error::{AppError, ValidationWarning};

    #[test]
    fn app_error_is_structured() {
        let err = AppError::new("INGEST_TEST", "ingest failed").with_details("path=/tmp/x");
        assert_eq!(err.code, "INGEST_TEST");
        assert_eq!(err.message, "ingest failed");
        assert_eq!(err.details.as_deref(), Some("path=/tmp/x"));
        assert!(!err.retryable);
        assert_eq!(format!("{err}"), "[INGEST_TEST] ingest failed");
    }

    #[test]
    fn validation_warning_carries_optional_details() {
        let w = ValidationWarning::new("INGEST_ROW_SKIPPED", "row skipped");
        assert!(w.details.is_none());
        let w = w.with_details("row=3");
        assert_eq!(w.details.as_deref(), Some("row=3"));
    }
}
