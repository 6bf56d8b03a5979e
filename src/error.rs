//! Fatal errors.
//!
//! The scheduling core never fails: unplaceable courses and missing
//! references are recovered locally and reported in the [`Schedule`].
//! Only structurally invalid input surfaces as a [`TimetableError`].
//!
//! [`Schedule`]: crate::models::Schedule

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors raised while loading input or writing output.
#[derive(Debug, Error)]
pub enum TimetableError {
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid input: {}", summarize(.0))]
    Invalid(Vec<ValidationError>),
}

impl TimetableError {
    /// Creates a parse error.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result alias for fallible I/O-layer operations.
pub type Result<T> = std::result::Result<T, TimetableError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_display() {
        let e = TimetableError::parse(3, "expected a number");
        assert_eq!(e.to_string(), "parse error at line 3: expected a number");

        let e = TimetableError::Invalid(vec![
            ValidationError::new(ValidationErrorKind::DuplicateId, "Duplicate room ID: R1"),
            ValidationError::new(ValidationErrorKind::InvalidSlot, "Slot 'S' ends before it starts"),
        ]);
        assert_eq!(
            e.to_string(),
            "invalid input: Duplicate room ID: R1; Slot 'S' ends before it starts"
        );
    }
}
