// Library interface for LiftRS modules
// This allows integration tests to access the core functionality

pub mod analytics;
pub mod config;
pub mod database;
pub mod error;
pub mod export;
pub mod habits;
pub mod import;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod records;

// Re-export commonly used types for convenience
pub use analytics::{ProgressAnalyzer, ProgressReport, DEFAULT_WINDOW_DAYS};
pub use config::AppConfig;
pub use database::Database;
pub use error::{LiftRsError, Result};
pub use habits::{HabitTracker, StreakTracker, WeeklyGoalTracker, DEFAULT_WEEKLY_TARGET};
pub use import::HistoryImporter;
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use models::*;
pub use records::{RecordEvaluator, E1RM_REP_CUTOFF};
