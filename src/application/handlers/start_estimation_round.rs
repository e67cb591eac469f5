//! StartEstimationRoundHandler - restarts estimation on a revealed story.
//!
//! Clearing the estimates and the revealed flag in one event keeps the
//! round boundary atomic: observers never see a half-reset story.

use crate::domain::foundation::{EventId, Timestamp, UserId};
use crate::domain::room::{EstimationRoundStarted, Room, RoomError, RoomEvent, StartEstimationRound};

use super::RoomCommandHandler;

/// Handler for starting a fresh estimation round.
pub struct StartEstimationRoundHandler;

impl RoomCommandHandler for StartEstimationRoundHandler {
    type Command = StartEstimationRound;

    fn check_precondition(
        &self,
        room: &Room,
        command: &StartEstimationRound,
        actor: &UserId,
    ) -> Result<(), RoomError> {
        if room.selected_story() != Some(&command.story_id) {
            return Err(RoomError::StoryNotSelected(command.story_id));
        }

        let story = room
            .story(&command.story_id)
            .ok_or(RoomError::UnknownStory(command.story_id))?;
        if !story.is_revealed() {
            return Err(RoomError::NotRevealed(command.story_id));
        }

        if room.user(actor).is_some_and(|u| u.is_visitor()) {
            return Err(RoomError::VisitorForbidden(actor.clone()));
        }

        Ok(())
    }

    fn react(&self, _room: &Room, command: &StartEstimationRound) -> Vec<RoomEvent> {
        vec![RoomEvent::EstimationRoundStarted(EstimationRoundStarted {
            event_id: EventId::new(),
            room_id: command.room_id.clone(),
            story_id: command.story_id,
            started_at: Timestamp::now(),
        })]
    }
}
