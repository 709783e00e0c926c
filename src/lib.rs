//! University Timetable System
//!
//! A console tool for keeping courses, instructors, classes and compensatory
//! classes in flat comma-delimited files, with a generator that merges the
//! class lists into a single timetable file.

pub mod codec;
pub mod collection;
pub mod config;
pub mod logging;
pub mod report;
pub mod shell;
pub mod store;

// Re-export core types for convenience
pub use crate::error::{Result, TimetableError};
pub use collection::{EntityKind, EntitySchema, Record, RecordCollection};
pub use config::Config;
pub use report::TimetableReport;
pub use shell::TimetableSystem;
pub use store::FlatFileStore;

/// Core error handling types for the timetable system
pub mod error {
    use std::fmt;

    /// Result type for timetable operations
    pub type Result<T> = std::result::Result<T, TimetableError>;

    /// Every failure the system can report
    #[derive(Debug, Clone, PartialEq)]
    pub enum TimetableError {
        // Recoverable, reported to the user
        FieldCountMismatch { entity: String, fields: Vec<String> },
        InvalidIndex { entity: String },

        // Fatal
        InvalidNumber(String),
        Io { path: String, message: String },
        Malformed { path: String, line: usize, message: String },
        Config(String),
    }

    impl TimetableError {
        /// Errors the shell reports and recovers from
        pub fn is_recoverable(&self) -> bool {
            matches!(
                self,
                TimetableError::FieldCountMismatch { .. } | TimetableError::InvalidIndex { .. }
            )
        }
    }

    impl fmt::Display for TimetableError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                TimetableError::FieldCountMismatch { entity, fields } => write!(
                    f,
                    "Error: {} requires the following fields: {}",
                    entity,
                    fields.join(", ")
                ),
                TimetableError::InvalidIndex { entity } => {
                    write!(f, "Invalid index. {} not found.", entity)
                }
                TimetableError::InvalidNumber(input) => {
                    write!(f, "invalid literal for an index: '{}'", input)
                }
                TimetableError::Io { path, message } => write!(f, "{}: {}", path, message),
                TimetableError::Malformed { path, line, message } => {
                    write!(f, "{}:{}: {}", path, line, message)
                }
                TimetableError::Config(message) => write!(f, "Configuration error: {}", message),
            }
        }
    }

    impl std::error::Error for TimetableError {}

    impl From<std::io::Error> for TimetableError {
        fn from(err: std::io::Error) -> Self {
            TimetableError::Io {
                path: "<console>".to_string(),
                message: err.to_string(),
            }
        }
    }

}
