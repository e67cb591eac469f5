//! Foundation module - Shared domain primitives.
//!
//! Contains the value objects, identifiers, event infrastructure, and
//! error types that form the vocabulary of the estimation-room domain.

mod command;
mod errors;
mod events;
mod ids;
mod timestamp;

pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{
    domain_event, DomainEvent, EventEnvelope, EventId, EventMetadata, SerializableDomainEvent,
};
pub use ids::{RoomId, StoryId, UserId};
pub use timestamp::Timestamp;
