//! SelectStoryHandler - opens a story for estimation.
//!
//! Selecting the story that is already selected is a deliberate no-op:
//! no event is emitted so no redundant history accumulates.

use crate::domain::foundation::{EventId, Timestamp, UserId};
use crate::domain::room::{Room, RoomError, RoomEvent, SelectStory, StorySelected};

use super::RoomCommandHandler;

/// Handler for selecting the story open for estimation.
pub struct SelectStoryHandler;

impl RoomCommandHandler for SelectStoryHandler {
    type Command = SelectStory;

    fn check_precondition(
        &self,
        room: &Room,
        command: &SelectStory,
        _actor: &UserId,
    ) -> Result<(), RoomError> {
        if !room.has_story(&command.story_id) {
            return Err(RoomError::UnknownStory(command.story_id));
        }
        Ok(())
    }

    fn react(&self, room: &Room, command: &SelectStory) -> Vec<RoomEvent> {
        if room.selected_story() == Some(&command.story_id) {
            // no change, no event
            return Vec::new();
        }

        vec![RoomEvent::StorySelected(StorySelected {
            event_id: EventId::new(),
            room_id: command.room_id.clone(),
            story_id: command.story_id,
            selected_at: Timestamp::now(),
        })]
    }
}
