//! Room-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, RoomId, StoryId, UserId};

/// Room-specific errors.
///
/// Dispatch-layer failures (`NotFound`), precondition violations (one
/// variant per rule), and defensive/infrastructure failures are distinct
/// classes; `is_precondition_violation` tells them apart for callers.
#[derive(Debug, Clone, PartialEq)]
pub enum RoomError {
    /// Target room does not exist.
    NotFound(RoomId),
    /// Payload-declared user does not match the authenticated actor.
    IdentityMismatch { declared: UserId, actor: UserId },
    /// Command targets a story other than the currently selected one.
    StoryNotSelected(StoryId),
    /// Story was already revealed.
    AlreadyRevealed(StoryId),
    /// Story is not revealed (required for starting a new round).
    NotRevealed(StoryId),
    /// Visitors cannot act on estimations.
    VisitorForbidden(UserId),
    /// Story id is not part of the room.
    UnknownStory(StoryId),
    /// Event applier received an event referencing nonexistent state.
    InvariantViolation(String),
    /// Repository or publisher failure.
    Infrastructure(String),
}

impl RoomError {
    pub fn identity_mismatch(declared: UserId, actor: UserId) -> Self {
        RoomError::IdentityMismatch { declared, actor }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        RoomError::Infrastructure(message.into())
    }

    /// True for failures raised by a handler precondition; false for
    /// room-not-found and internal failures.
    pub fn is_precondition_violation(&self) -> bool {
        matches!(
            self,
            RoomError::IdentityMismatch { .. }
                | RoomError::StoryNotSelected(_)
                | RoomError::AlreadyRevealed(_)
                | RoomError::NotRevealed(_)
                | RoomError::VisitorForbidden(_)
                | RoomError::UnknownStory(_)
        )
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            RoomError::NotFound(_) => ErrorCode::RoomNotFound,
            RoomError::IdentityMismatch { .. } => ErrorCode::IdentityMismatch,
            RoomError::StoryNotSelected(_) => ErrorCode::StoryNotSelected,
            RoomError::AlreadyRevealed(_) => ErrorCode::StoryAlreadyRevealed,
            RoomError::NotRevealed(_) => ErrorCode::StoryNotRevealed,
            RoomError::VisitorForbidden(_) => ErrorCode::VisitorForbidden,
            RoomError::UnknownStory(_) => ErrorCode::StoryNotFound,
            RoomError::InvariantViolation(_) => ErrorCode::InvariantViolation,
            RoomError::Infrastructure(_) => ErrorCode::StorageError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            RoomError::NotFound(id) => format!("Room not found: {}", id),
            RoomError::IdentityMismatch { declared, actor } => format!(
                "Estimate declared for user {} but issued by {}",
                declared, actor
            ),
            RoomError::StoryNotSelected(id) => {
                format!("Story {} is not the currently selected story", id)
            }
            RoomError::AlreadyRevealed(id) => {
                format!("Story {} was already revealed", id)
            }
            RoomError::NotRevealed(id) => {
                format!("Story {} has not been revealed yet", id)
            }
            RoomError::VisitorForbidden(user) => {
                format!("Visitor {} cannot act on estimations", user)
            }
            RoomError::UnknownStory(id) => format!("Story {} is not part of the room", id),
            RoomError::InvariantViolation(msg) => format!("Invariant violation: {}", msg),
            RoomError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for RoomError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for RoomError {}

impl From<DomainError> for RoomError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::InvariantViolation => RoomError::InvariantViolation(err.message),
            _ => RoomError::Infrastructure(err.to_string()),
        }
    }
}
