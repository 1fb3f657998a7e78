//! Unified error hierarchy for LiftRS
//!
//! Module-local error enums convert into this top-level type via `#[from]`;
//! severity mapping and user-facing messages live here so the CLI can report
//! failures consistently.

use thiserror::Error;

use crate::analytics::AnalyticsError;
use crate::database::DatabaseError;
use crate::export::ExportError;
use crate::habits::HabitError;
use crate::import::ImportError;
use crate::records::RecordError;

/// Top-level error type for all LiftRS operations
#[derive(Debug, Error)]
pub enum LiftRsError {
    /// Database operation errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Record evaluation errors
    #[error("Record error: {0}")]
    Record(#[from] RecordError),

    /// Analytics errors
    #[error("Analytics error: {0}")]
    Analytics(#[from] AnalyticsError),

    /// Habit tracking errors
    #[error("Habit tracking error: {0}")]
    Habit(#[from] HabitError),

    /// History import errors
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// Report export errors
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Data validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for LiftRS operations
pub type Result<T> = std::result::Result<T, LiftRsError>;

impl LiftRsError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            LiftRsError::Database(DatabaseError::NotFound(_)) => ErrorSeverity::Warning,
            LiftRsError::Database(DatabaseError::Duplicate(_)) => ErrorSeverity::Warning,
            LiftRsError::Analytics(AnalyticsError::UnknownAthlete(_)) => ErrorSeverity::Warning,
            LiftRsError::Habit(HabitError::UnknownAthlete(_)) => ErrorSeverity::Warning,
            LiftRsError::Validation(_) => ErrorSeverity::Warning,
            LiftRsError::Database(DatabaseError::InvalidValue(_)) => ErrorSeverity::Critical,
            _ => ErrorSeverity::Error,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            LiftRsError::Database(DatabaseError::NotFound(what)) => {
                format!("Could not find {}", what)
            }
            LiftRsError::Analytics(AnalyticsError::UnknownAthlete(id))
            | LiftRsError::Habit(HabitError::UnknownAthlete(id)) => {
                format!(
                    "Unknown athlete '{}'. Register one with 'liftrs athlete add'.",
                    id
                )
            }
            LiftRsError::Database(DatabaseError::InvalidValue(_)) => {
                "Stored data could not be decoded. The database may be corrupted.".to_string()
            }
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Critical system error requiring immediate attention
    Critical,
    /// Error that prevents operation but system can continue
    Error,
    /// Warning that doesn't prevent operation
    Warning,
}

impl ErrorSeverity {
    /// Convert to tracing level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Critical | ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_severity() {
        let err = LiftRsError::Database(DatabaseError::NotFound("exercise 'Deadlift'".to_string()));
        assert_eq!(err.severity(), ErrorSeverity::Warning);

        let err = LiftRsError::Database(DatabaseError::InvalidValue("decimal 'x'".to_string()));
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_user_messages() {
        let err = LiftRsError::Habit(HabitError::UnknownAthlete("a1".to_string()));
        assert!(err.user_message().contains("Unknown athlete"));

        let err = LiftRsError::Database(DatabaseError::NotFound("exercise 'Row'".to_string()));
        assert!(err.user_message().contains("Could not find"));
    }
}
