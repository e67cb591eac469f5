//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    EmptyField,
    InvalidFormat,

    // Not found errors
    RoomNotFound,
    StoryNotFound,

    // Precondition violations
    IdentityMismatch,
    StoryNotSelected,
    StoryAlreadyRevealed,
    StoryNotRevealed,
    VisitorForbidden,

    // Defensive errors (should never surface in correct operation)
    InvariantViolation,

    // Infrastructure errors
    StorageError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::EmptyField => "EMPTY_FIELD",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::RoomNotFound => "ROOM_NOT_FOUND",
            ErrorCode::StoryNotFound => "STORY_NOT_FOUND",
            ErrorCode::IdentityMismatch => "IDENTITY_MISMATCH",
            ErrorCode::StoryNotSelected => "STORY_NOT_SELECTED",
            ErrorCode::StoryAlreadyRevealed => "STORY_ALREADY_REVEALED",
            ErrorCode::StoryNotRevealed => "STORY_NOT_REVEALED",
            ErrorCode::VisitorForbidden => "VISITOR_FORBIDDEN",
            ErrorCode::InvariantViolation => "INVARIANT_VIOLATION",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::ValidationFailed,
            message: message.into(),
            details: HashMap::new(),
        }
        .with_detail("field", field.into())
    }

    /// Creates an invariant-violation error.
    ///
    /// Raised by the event applier when an event references nonexistent
    /// state. Events are only ever produced by handlers that already
    /// validated their targets, so this indicates a programming error.
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvariantViolation, message)
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("room_id");
        assert_eq!(format!("{}", err), "Field 'room_id' cannot be empty");
    }

    #[test]
    fn validation_error_invalid_format_displays_correctly() {
        let err = ValidationError::invalid_format("story_id", "not a uuid");
        assert_eq!(
            format!("{}", err),
            "Field 'story_id' has invalid format: not a uuid"
        );
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::RoomNotFound, "Room not found");
        assert_eq!(format!("{}", err), "[ROOM_NOT_FOUND] Room not found");
    }

    #[test]
    fn domain_error_with_detail_adds_detail() {
        let err = DomainError::new(ErrorCode::ValidationFailed, "Validation failed")
            .with_detail("field", "value")
            .with_detail("reason", "out of deck");

        assert_eq!(err.details.get("field"), Some(&"value".to_string()));
        assert_eq!(err.details.get("reason"), Some(&"out of deck".to_string()));
    }

    #[test]
    fn invariant_constructor_uses_invariant_code() {
        let err = DomainError::invariant("event referenced unknown story");
        assert_eq!(err.code, ErrorCode::InvariantViolation);
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::RoomNotFound), "ROOM_NOT_FOUND");
        assert_eq!(
            format!("{}", ErrorCode::StoryAlreadyRevealed),
            "STORY_ALREADY_REVEALED"
        );
    }
}
