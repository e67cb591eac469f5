//! Room command handlers.
//!
//! Each command type has one handler pairing a pure precondition with a
//! reaction that produces the ordered event list. Handlers never mutate
//! state; the dispatcher folds the returned events into the aggregate.

mod give_story_estimate;
mod reveal_story;
mod select_story;
mod start_estimation_round;

pub use give_story_estimate::GiveStoryEstimateHandler;
pub use reveal_story::RevealStoryHandler;
pub use select_story::SelectStoryHandler;
pub use start_estimation_round::StartEstimationRoundHandler;

use crate::domain::foundation::UserId;
use crate::domain::room::{Room, RoomError, RoomEvent};

/// Contract every room command handler implements.
///
/// `check_precondition` is read-only and side-effect-free; any violation
/// aborts the command with zero events. `react` runs only after the
/// precondition passed and returns events in the exact order they must be
/// applied and published.
pub trait RoomCommandHandler {
    type Command;

    /// Whether the dispatcher must resolve an existing room before
    /// running this handler. Commands that bootstrap a room return false.
    fn requires_existing_room(&self) -> bool {
        true
    }

    /// Validates the command against current room state and the
    /// authenticated actor.
    fn check_precondition(
        &self,
        room: &Room,
        command: &Self::Command,
        actor: &UserId,
    ) -> Result<(), RoomError>;

    /// Produces the ordered events for a validated command. May be empty
    /// for idempotent no-ops.
    fn react(&self, room: &Room, command: &Self::Command) -> Vec<RoomEvent>;
}
