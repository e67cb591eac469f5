//! Room domain events.
//!
//! Events emitted by the room command handlers:
//! - `StoryEstimateGiven` - a participant estimated the selected story
//! - `StoryRevealed` - a story's estimates were disclosed (manually or by
//!   the all-estimated rule)
//! - `StorySelected` - a story became the one open for estimation
//! - `EstimationRoundStarted` - a revealed story's estimation cycle restarted

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    domain_event, EventEnvelope, EventId, RoomId, SerializableDomainEvent, StoryId, Timestamp,
    UserId,
};

use super::aggregate::EstimateValue;

/// Emitted when a participant gives (or overwrites) an estimate for the
/// currently selected story.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryEstimateGiven {
    /// Unique identifier for this event.
    pub event_id: EventId,

    /// Room the story belongs to.
    pub room_id: RoomId,

    /// Estimated story.
    pub story_id: StoryId,

    /// Estimating participant.
    pub user_id: UserId,

    /// The numeric estimate.
    pub value: EstimateValue,

    /// When the estimate was given.
    pub given_at: Timestamp,
}

domain_event!(
    StoryEstimateGiven,
    event_type = "room.story_estimate_given.v1",
    schema_version = 1,
    aggregate_id = room_id,
    aggregate_type = "Room",
    occurred_at = given_at,
    event_id = event_id
);

/// Emitted when a story's estimates are disclosed.
///
/// `manually` records provenance only: true for an explicit reveal
/// command, false for the automatic all-estimated rule. It has no effect
/// on state and exists for downstream auditing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryRevealed {
    /// Unique identifier for this event.
    pub event_id: EventId,

    /// Room the story belongs to.
    pub room_id: RoomId,

    /// Revealed story.
    pub story_id: StoryId,

    /// True if triggered by explicit user action, false if automatic.
    pub manually: bool,

    /// When the reveal happened.
    pub revealed_at: Timestamp,
}

domain_event!(
    StoryRevealed,
    event_type = "room.story_revealed.v1",
    schema_version = 1,
    aggregate_id = room_id,
    aggregate_type = "Room",
    occurred_at = revealed_at,
    event_id = event_id
);

/// Emitted when a story becomes the one open for estimation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorySelected {
    /// Unique identifier for this event.
    pub event_id: EventId,

    /// Room the story belongs to.
    pub room_id: RoomId,

    /// Newly selected story.
    pub story_id: StoryId,

    /// When the selection happened.
    pub selected_at: Timestamp,
}

domain_event!(
    StorySelected,
    event_type = "room.story_selected.v1",
    schema_version = 1,
    aggregate_id = room_id,
    aggregate_type = "Room",
    occurred_at = selected_at,
    event_id = event_id
);

/// Emitted when a revealed story's estimation cycle restarts.
///
/// Application clears the story's estimations and resets its revealed
/// flag; this is the only transition that reverts a reveal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimationRoundStarted {
    /// Unique identifier for this event.
    pub event_id: EventId,

    /// Room the story belongs to.
    pub room_id: RoomId,

    /// Story whose round restarted.
    pub story_id: StoryId,

    /// When the new round started.
    pub started_at: Timestamp,
}

domain_event!(
    EstimationRoundStarted,
    event_type = "room.estimation_round_started.v1",
    schema_version = 1,
    aggregate_id = room_id,
    aggregate_type = "Room",
    occurred_at = started_at,
    event_id = event_id
);

/// Sum type the event applier and dispatcher fold over.
///
/// Ordering matters: handlers return these in the exact order they must
/// be applied and published.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoomEvent {
    StoryEstimateGiven(StoryEstimateGiven),
    StoryRevealed(StoryRevealed),
    StorySelected(StorySelected),
    EstimationRoundStarted(EstimationRoundStarted),
}

impl RoomEvent {
    /// The routing type string of the wrapped event.
    pub fn event_type(&self) -> &'static str {
        use crate::domain::foundation::DomainEvent;
        match self {
            RoomEvent::StoryEstimateGiven(e) => e.event_type(),
            RoomEvent::StoryRevealed(e) => e.event_type(),
            RoomEvent::StorySelected(e) => e.event_type(),
            RoomEvent::EstimationRoundStarted(e) => e.event_type(),
        }
    }

    /// Room the wrapped event belongs to.
    pub fn room_id(&self) -> &RoomId {
        match self {
            RoomEvent::StoryEstimateGiven(e) => &e.room_id,
            RoomEvent::StoryRevealed(e) => &e.room_id,
            RoomEvent::StorySelected(e) => &e.room_id,
            RoomEvent::EstimationRoundStarted(e) => &e.room_id,
        }
    }

    /// Story the wrapped event targets.
    pub fn story_id(&self) -> &StoryId {
        match self {
            RoomEvent::StoryEstimateGiven(e) => &e.story_id,
            RoomEvent::StoryRevealed(e) => &e.story_id,
            RoomEvent::StorySelected(e) => &e.story_id,
            RoomEvent::EstimationRoundStarted(e) => &e.story_id,
        }
    }

    /// Wraps the event for transport.
    pub fn to_envelope(&self) -> EventEnvelope {
        match self {
            RoomEvent::StoryEstimateGiven(e) => e.to_envelope(),
            RoomEvent::StoryRevealed(e) => e.to_envelope(),
            RoomEvent::StorySelected(e) => e.to_envelope(),
            RoomEvent::EstimationRoundStarted(e) => e.to_envelope(),
        }
    }
}
