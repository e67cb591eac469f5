//! GiveStoryEstimateHandler - a participant estimates the selected story.
//!
//! Estimates are only accepted for the currently selected, unrevealed
//! story, only from the authenticated user themselves, and never from
//! visitors. As soon as every eligible participant has estimated, the
//! reaction additionally emits an automatic reveal.

use crate::domain::foundation::{EventId, Timestamp, UserId};
use crate::domain::room::{
    GiveStoryEstimate, Room, RoomError, RoomEvent, StoryEstimateGiven, StoryRevealed,
};

use super::RoomCommandHandler;

/// Handler for giving story estimates.
pub struct GiveStoryEstimateHandler;

impl RoomCommandHandler for GiveStoryEstimateHandler {
    type Command = GiveStoryEstimate;

    fn check_precondition(
        &self,
        room: &Room,
        command: &GiveStoryEstimate,
        actor: &UserId,
    ) -> Result<(), RoomError> {
        if &command.user_id != actor {
            return Err(RoomError::identity_mismatch(
                command.user_id.clone(),
                actor.clone(),
            ));
        }

        if room.selected_story() != Some(&command.story_id) {
            return Err(RoomError::StoryNotSelected(command.story_id));
        }

        let story = room
            .story(&command.story_id)
            .ok_or(RoomError::UnknownStory(command.story_id))?;
        if story.is_revealed() {
            return Err(RoomError::AlreadyRevealed(command.story_id));
        }

        if room.user(actor).is_some_and(|u| u.is_visitor()) {
            return Err(RoomError::VisitorForbidden(actor.clone()));
        }

        Ok(())
    }

    fn react(&self, room: &Room, command: &GiveStoryEstimate) -> Vec<RoomEvent> {
        let mut events = vec![RoomEvent::StoryEstimateGiven(StoryEstimateGiven {
            event_id: EventId::new(),
            room_id: command.room_id.clone(),
            story_id: command.story_id,
            user_id: command.user_id.clone(),
            value: command.value,
            given_at: Timestamp::now(),
        })];

        // Evaluated on the post-apply state: the acting user counts even
        // though their estimate is not in the map yet.
        let all_estimated = room
            .all_eligible_users_estimated_including(&command.story_id, Some(&command.user_id));
        if all_estimated {
            events.push(RoomEvent::StoryRevealed(StoryRevealed {
                event_id: EventId::new(),
                room_id: command.room_id.clone(),
                story_id: command.story_id,
                manually: false,
                revealed_at: Timestamp::now(),
            }));
        }

        events
    }
}
