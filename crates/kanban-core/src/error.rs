use std::fmt;

use crate::model::task::ParseEnumError;
use crate::store::StoreError;

/// Machine-readable error codes for scripts and the JSON error envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    StoreReadFailed,
    TaskNotFound,
    SubtaskNotFound,
    DuplicateTask,
    InvalidField,
    InvalidEnumValue,
    CorruptStore,
    StoreWriteFailed,
    LockContention,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::StoreReadFailed => "E1002",
            Self::TaskNotFound => "E2001",
            Self::SubtaskNotFound => "E2002",
            Self::DuplicateTask => "E2003",
            Self::InvalidField => "E2004",
            Self::InvalidEnumValue => "E2005",
            Self::CorruptStore => "E3001",
            Self::StoreWriteFailed => "E5001",
            Self::LockContention => "E5002",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::StoreReadFailed => "Board file could not be read",
            Self::TaskNotFound => "Task not found",
            Self::SubtaskNotFound => "Subtask not found",
            Self::DuplicateTask => "Task name already exists",
            Self::InvalidField => "Invalid or missing field",
            Self::InvalidEnumValue => "Invalid status/priority value",
            Self::CorruptStore => "Corrupt board file",
            Self::StoreWriteFailed => "Board file write failed",
            Self::LockContention => "Lock contention",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to the user.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in .kanban/config.toml and retry."),
            Self::StoreReadFailed => Some("Check that the board file exists and is readable."),
            Self::TaskNotFound => Some("Run `kb board` to list task names."),
            Self::SubtaskNotFound => Some("Run `kb show <task>` to list subtask numbers."),
            Self::DuplicateTask => Some("Pick a different task name."),
            Self::InvalidField => Some("Fill in every field; subtask labels may not contain ';' or ':'."),
            Self::InvalidEnumValue => {
                Some("Status: todo, doing, done. Priority: high, medium, low.")
            }
            Self::CorruptStore => Some("Fix the reported row in the board file and retry."),
            Self::StoreWriteFailed => Some("Check disk space and write permissions."),
            Self::LockContention => Some("Retry after the other `kb` process exits."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// User input rejected before any state change.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("{field} must be a single line")]
    Multiline { field: &'static str },

    #[error("subtask label '{label}' contains reserved delimiter '{delimiter}'")]
    ReservedDelimiter { label: String, delimiter: char },

    #[error("a task named '{name}' already exists")]
    DuplicateTask { name: String },

    #[error(transparent)]
    InvalidEnum(#[from] ParseEnumError),
}

impl ValidationError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::EmptyField { .. } | Self::Multiline { .. } | Self::ReservedDelimiter { .. } => {
                ErrorCode::InvalidField
            }
            Self::DuplicateTask { .. } => ErrorCode::DuplicateTask,
            Self::InvalidEnum(_) => ErrorCode::InvalidEnumValue,
        }
    }
}

/// Every failure a board operation can report.
#[derive(Debug, thiserror::Error)]
pub enum KanbanError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("task not found: '{name}'")]
    TaskNotFound { name: String },

    #[error("task '{task}' has no subtask at index {index} ({len} subtasks)")]
    SubtaskNotFound {
        task: String,
        index: usize,
        len: usize,
    },

    #[error(transparent)]
    Persistence(#[from] StoreError),
}

impl KanbanError {
    #[must_use]
    pub fn task_not_found(name: impl Into<String>) -> Self {
        Self::TaskNotFound { name: name.into() }
    }

    /// Machine-readable code for this error.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::Validation(err) => err.code(),
            Self::TaskNotFound { .. } => ErrorCode::TaskNotFound,
            Self::SubtaskNotFound { .. } => ErrorCode::SubtaskNotFound,
            Self::Persistence(err) => err.code(),
        }
    }

    /// Remediation text, falling back to the code's generic message.
    #[must_use]
    pub fn suggestion(&self) -> String {
        let code = self.error_code();
        code.hint().unwrap_or_else(|| code.message()).to_string()
    }

    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
