//! RevealStoryHandler - explicit disclosure of the selected story's
//! estimates, before every eligible participant has responded.

use crate::domain::foundation::{EventId, Timestamp, UserId};
use crate::domain::room::{RevealStory, Room, RoomError, RoomEvent, StoryRevealed};

use super::RoomCommandHandler;

/// Handler for manually revealing the selected story.
pub struct RevealStoryHandler;

impl RoomCommandHandler for RevealStoryHandler {
    type Command = RevealStory;

    fn check_precondition(
        &self,
        room: &Room,
        command: &RevealStory,
        actor: &UserId,
    ) -> Result<(), RoomError> {
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

    fn react(&self, _room: &Room, command: &RevealStory) -> Vec<RoomEvent> {
        vec![RoomEvent::StoryRevealed(StoryRevealed {
            event_id: EventId::new(),
            room_id: command.room_id.clone(),
            story_id: command.story_id,
            manually: true,
            revealed_at: Timestamp::now(),
        })]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{RoomId, StoryId};
    use crate::domain::room::{Story, StorySelected, User};

    fn user_id(name: &str) -> UserId {
        UserId::new(name).unwrap()
    }

    fn selected_room() -> (Room, StoryId) {
        let mut room = Room::new(RoomId::new("room-1").unwrap());
        let story_id = StoryId::new();
        room.add_story(Story::new(story_id, "Checkout flow"));
        room.add_user(User::new(user_id("alice")));
        room.add_user(User::visitor(user_id("carol")));
        room.apply(&RoomEvent::StorySelected(StorySelected {
            event_id: EventId::new(),
            room_id: room.id().clone(),
            story_id,
            selected_at: Timestamp::now(),
        }))
        .unwrap();
        (room, story_id)
    }

    fn command(room: &Room, story_id: StoryId) -> RevealStory {
        RevealStory {
            room_id: room.id().clone(),
            story_id,
        }
    }

    #[test]
    fn reveals_selected_unrevealed_story() {
        let (room, story_id) = selected_room();
        let cmd = command(&room, story_id);

        assert!(RevealStoryHandler
            .check_precondition(&room, &cmd, &user_id("alice"))
            .is_ok());

        let events = RevealStoryHandler.react(&room, &cmd);
        assert_eq!(events.len(), 1);
        match &events[0] {
            RoomEvent::StoryRevealed(revealed) => assert!(revealed.manually),
            other => panic!("expected manual reveal, got {:?}", other),
        }
    }

    #[test]
    fn rejects_unselected_story() {
        let (mut room, _) = selected_room();
        let other = StoryId::new();
        room.add_story(Story::new(other, "Other"));

        let result =
            RevealStoryHandler.check_precondition(&room, &command(&room, other), &user_id("alice"));
        assert!(matches!(result, Err(RoomError::StoryNotSelected(_))));
    }

    #[test]
    fn rejects_already_revealed_story() {
        let (mut room, story_id) = selected_room();
        let cmd = command(&room, story_id);
        for event in RevealStoryHandler.react(&room, &cmd) {
            room.apply(&event).unwrap();
        }

        let result = RevealStoryHandler.check_precondition(&room, &cmd, &user_id("alice"));
        assert!(matches!(result, Err(RoomError::AlreadyRevealed(_))));
    }

    #[test]
    fn rejects_visitor() {
        let (room, story_id) = selected_room();
        let result = RevealStoryHandler.check_precondition(
            &room,
            &command(&room, story_id),
            &user_id("carol"),
        );
        assert!(matches!(result, Err(RoomError::VisitorForbidden(_))));
    }
}
