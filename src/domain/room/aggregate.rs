//! Room aggregate entity.
//!
//! The room is the root aggregate of one collaborative estimation session:
//! participants, stories, the currently selected story, and per-story
//! estimation/reveal state.
//!
//! # Invariants
//!
//! - `selected_story`, if set, references a story present in `stories`
//! - a story accepts estimations only while `revealed` is false
//! - `revealed` only reverts to false through an `EstimationRoundStarted`
//!   event, which also clears the story's estimations
//!
//! Rooms, users, and stories are created by room-setup logic outside this
//! core; [`Room::apply`] only consumes events produced by validated
//! commands and never creates or deletes them.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, RoomId, StoryId, UserId};

use super::events::RoomEvent;

/// A numeric estimate for a story.
///
/// Fractional card values (0.5 and the like) are legal, hence the float.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EstimateValue(f64);

impl EstimateValue {
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl From<f64> for EstimateValue {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

/// A participant of an estimation room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    visitor: bool,
    disconnected: bool,
}

impl User {
    /// Creates a new connected, estimating participant.
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            visitor: false,
            disconnected: false,
        }
    }

    /// Creates a new connected visitor. Visitors never estimate.
    pub fn visitor(id: UserId) -> Self {
        Self {
            id,
            visitor: true,
            disconnected: false,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn is_visitor(&self) -> bool {
        self.visitor
    }

    pub fn is_disconnected(&self) -> bool {
        self.disconnected
    }

    /// A user counts toward the auto-reveal quorum iff they are neither a
    /// visitor nor disconnected.
    pub fn is_eligible(&self) -> bool {
        !self.visitor && !self.disconnected
    }
}

/// A work item open for estimation within a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    id: StoryId,
    title: String,
    estimations: HashMap<UserId, EstimateValue>,
    revealed: bool,
}

impl Story {
    /// Creates a new unrevealed story with no estimations.
    pub fn new(id: StoryId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            estimations: HashMap::new(),
            revealed: false,
        }
    }

    pub fn id(&self) -> &StoryId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the user's estimate for this story's current round, or
    /// `None` if they have not estimated yet. Absence from the map is the
    /// only "not estimated" signal.
    pub fn estimate_of(&self, user_id: &UserId) -> Option<EstimateValue> {
        self.estimations.get(user_id).copied()
    }

    pub fn has_estimated(&self, user_id: &UserId) -> bool {
        self.estimations.contains_key(user_id)
    }

    pub fn estimation_count(&self) -> usize {
        self.estimations.len()
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }
}

/// Room aggregate - one collaborative estimation session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    id: RoomId,
    selected_story: Option<StoryId>,
    users: HashMap<UserId, User>,
    // insertion order matters for display, not for any rule below
    stories: IndexMap<StoryId, Story>,
}

impl Room {
    /// Creates a new empty room.
    pub fn new(id: RoomId) -> Self {
        Self {
            id,
            selected_story: None,
            users: HashMap::new(),
            stories: IndexMap::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &RoomId {
        &self.id
    }

    pub fn selected_story(&self) -> Option<&StoryId> {
        self.selected_story.as_ref()
    }

    pub fn user(&self, id: &UserId) -> Option<&User> {
        self.users.get(id)
    }

    pub fn story(&self, id: &StoryId) -> Option<&Story> {
        self.stories.get(id)
    }

    pub fn has_story(&self, id: &StoryId) -> bool {
        self.stories.contains_key(id)
    }

    /// Stories in insertion (display) order.
    pub fn stories(&self) -> impl Iterator<Item = &Story> {
        self.stories.values()
    }

    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    /// Users who count toward the auto-reveal quorum.
    pub fn eligible_users(&self) -> impl Iterator<Item = &User> {
        self.users.values().filter(|u| u.is_eligible())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Room setup (external collaborator surface, not command-driven)
    // ─────────────────────────────────────────────────────────────────────

    /// Adds a participant, replacing any existing user with the same id.
    pub fn add_user(&mut self, user: User) {
        self.users.insert(user.id().clone(), user);
    }

    /// Adds a story at the end of the display order, replacing any
    /// existing story with the same id.
    pub fn add_story(&mut self, story: Story) {
        self.stories.insert(*story.id(), story);
    }

    /// Marks a user connected or disconnected.
    pub fn set_user_disconnected(
        &mut self,
        user_id: &UserId,
        disconnected: bool,
    ) -> Result<(), DomainError> {
        let user = self
            .users
            .get_mut(user_id)
            .ok_or_else(|| DomainError::invariant(format!("unknown user {}", user_id)))?;
        user.disconnected = disconnected;
        Ok(())
    }

    /// Marks a user as visitor or estimating participant.
    pub fn set_user_visitor(&mut self, user_id: &UserId, visitor: bool) -> Result<(), DomainError> {
        let user = self
            .users
            .get_mut(user_id)
            .ok_or_else(|| DomainError::invariant(format!("unknown user {}", user_id)))?;
        user.visitor = visitor;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Auto-reveal predicate
    // ─────────────────────────────────────────────────────────────────────

    /// Checks whether every eligible user has estimated the given story.
    ///
    /// Membership check per eligible user, not a cardinality comparison:
    /// estimations left behind by users who were later marked visitor or
    /// disconnected stay in the map but neither block nor trigger the
    /// reveal. False when no user is eligible, so a room of visitors can
    /// never reveal vacuously.
    pub fn all_eligible_users_estimated(&self, story_id: &StoryId) -> bool {
        self.all_eligible_users_estimated_including(story_id, None)
    }

    /// Same predicate, with `pending` treated as having estimated.
    ///
    /// Used by the estimate handler to evaluate the post-apply state
    /// without cloning the room: the acting user counts even though their
    /// estimate is not in the map yet.
    pub fn all_eligible_users_estimated_including(
        &self,
        story_id: &StoryId,
        pending: Option<&UserId>,
    ) -> bool {
        let Some(story) = self.stories.get(story_id) else {
            return false;
        };

        let mut any_eligible = false;
        for user in self.eligible_users() {
            any_eligible = true;
            let estimated = story.has_estimated(user.id()) || pending == Some(user.id());
            if !estimated {
                return false;
            }
        }
        any_eligible
    }

    // ─────────────────────────────────────────────────────────────────────
    // Event applier
    // ─────────────────────────────────────────────────────────────────────

    /// Folds one event into the room state.
    ///
    /// Pure state transition, no validation: callers only feed events that
    /// a command handler approved. An event referencing nonexistent state
    /// is an `InvariantViolation` and indicates a programming error, not a
    /// recoverable condition.
    pub fn apply(&mut self, event: &RoomEvent) -> Result<(), DomainError> {
        match event {
            RoomEvent::StoryEstimateGiven(e) => {
                let story = self.story_for_event_mut(&e.story_id)?;
                story.estimations.insert(e.user_id.clone(), e.value);
            }
            RoomEvent::StoryRevealed(e) => {
                let story = self.story_for_event_mut(&e.story_id)?;
                story.revealed = true;
            }
            RoomEvent::StorySelected(e) => {
                if !self.stories.contains_key(&e.story_id) {
                    return Err(DomainError::invariant(format!(
                        "selected story {} is not part of room {}",
                        e.story_id, self.id
                    )));
                }
                self.selected_story = Some(e.story_id);
            }
            RoomEvent::EstimationRoundStarted(e) => {
                let story = self.story_for_event_mut(&e.story_id)?;
                story.estimations.clear();
                story.revealed = false;
            }
        }
        Ok(())
    }

    fn story_for_event_mut(&mut self, story_id: &StoryId) -> Result<&mut Story, DomainError> {
        let room_id = self.id.clone();
        self.stories.get_mut(story_id).ok_or_else(|| {
            DomainError::invariant(format!(
                "event references story {} missing from room {}",
                story_id, room_id
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{EventId, Timestamp};
    use crate::domain::room::events::{
        EstimationRoundStarted, StoryEstimateGiven, StoryRevealed, StorySelected,
    };
    use proptest::prelude::*;

    fn user_id(name: &str) -> UserId {
        UserId::new(name).unwrap()
    }

    fn test_room() -> (Room, StoryId) {
        let mut room = Room::new(RoomId::new("room-1").unwrap());
        let story_id = StoryId::new();
        room.add_story(Story::new(story_id, "Checkout flow"));
        room.add_user(User::new(user_id("alice")));
        room.add_user(User::new(user_id("bob")));
        room.add_user(User::visitor(user_id("carol")));
        (room, story_id)
    }

    fn estimate_event(room: &Room, story_id: StoryId, user: &str, value: f64) -> RoomEvent {
        RoomEvent::StoryEstimateGiven(StoryEstimateGiven {
            event_id: EventId::new(),
            room_id: room.id().clone(),
            story_id,
            user_id: user_id(user),
            value: EstimateValue::new(value),
            given_at: Timestamp::now(),
        })
    }

    fn select_event(room: &Room, story_id: StoryId) -> RoomEvent {
        RoomEvent::StorySelected(StorySelected {
            event_id: EventId::new(),
            room_id: room.id().clone(),
            story_id,
            selected_at: Timestamp::now(),
        })
    }

    fn reveal_event(room: &Room, story_id: StoryId, manually: bool) -> RoomEvent {
        RoomEvent::StoryRevealed(StoryRevealed {
            event_id: EventId::new(),
            room_id: room.id().clone(),
            story_id,
            manually,
            revealed_at: Timestamp::now(),
        })
    }

    fn round_event(room: &Room, story_id: StoryId) -> RoomEvent {
        RoomEvent::EstimationRoundStarted(EstimationRoundStarted {
            event_id: EventId::new(),
            room_id: room.id().clone(),
            story_id,
            started_at: Timestamp::now(),
        })
    }

    // Event applier

    #[test]
    fn apply_estimate_inserts_value() {
        let (mut room, story_id) = test_room();
        room.apply(&estimate_event(&room, story_id, "alice", 5.0))
            .unwrap();

        let story = room.story(&story_id).unwrap();
        assert_eq!(story.estimate_of(&user_id("alice")), Some(EstimateValue::new(5.0)));
        assert_eq!(story.estimation_count(), 1);
    }

    #[test]
    fn apply_estimate_overwrites_prior_value() {
        let (mut room, story_id) = test_room();
        room.apply(&estimate_event(&room, story_id, "alice", 5.0))
            .unwrap();
        room.apply(&estimate_event(&room, story_id, "alice", 8.0))
            .unwrap();

        let story = room.story(&story_id).unwrap();
        assert_eq!(story.estimate_of(&user_id("alice")), Some(EstimateValue::new(8.0)));
        assert_eq!(story.estimation_count(), 1);
    }

    #[test]
    fn apply_revealed_sets_flag() {
        let (mut room, story_id) = test_room();
        room.apply(&reveal_event(&room, story_id, false))
            .unwrap();
        assert!(room.story(&story_id).unwrap().is_revealed());
    }

    #[test]
    fn apply_selected_sets_selected_story() {
        let (mut room, story_id) = test_room();
        room.apply(&select_event(&room, story_id)).unwrap();
        assert_eq!(room.selected_story(), Some(&story_id));
    }

    #[test]
    fn apply_selected_unknown_story_is_invariant_violation() {
        let (mut room, _) = test_room();
        let result = room.apply(&select_event(&room, StoryId::new()));
        assert!(result.is_err());
    }

    #[test]
    fn apply_round_started_clears_estimations_and_reveal() {
        let (mut room, story_id) = test_room();
        room.apply(&estimate_event(&room, story_id, "alice", 5.0))
            .unwrap();
        room.apply(&reveal_event(&room, story_id, true))
            .unwrap();
        room.apply(&round_event(&room, story_id)).unwrap();

        let story = room.story(&story_id).unwrap();
        assert_eq!(story.estimation_count(), 0);
        assert!(!story.is_revealed());
    }

    #[test]
    fn apply_estimate_for_unknown_story_is_invariant_violation() {
        let (mut room, _) = test_room();
        let result = room.apply(&estimate_event(&room, StoryId::new(), "alice", 3.0));
        assert!(result.is_err());
    }

    // Auto-reveal predicate

    #[test]
    fn predicate_false_while_any_eligible_user_missing() {
        let (mut room, story_id) = test_room();
        room.apply(&estimate_event(&room, story_id, "alice", 5.0))
            .unwrap();
        assert!(!room.all_eligible_users_estimated(&story_id));
    }

    #[test]
    fn predicate_true_once_every_eligible_user_estimated() {
        let (mut room, story_id) = test_room();
        room.apply(&estimate_event(&room, story_id, "alice", 5.0))
            .unwrap();
        room.apply(&estimate_event(&room, story_id, "bob", 3.0))
            .unwrap();
        // carol is a visitor and does not count
        assert!(room.all_eligible_users_estimated(&story_id));
    }

    #[test]
    fn predicate_counts_pending_user_as_estimated() {
        let (mut room, story_id) = test_room();
        room.apply(&estimate_event(&room, story_id, "alice", 5.0))
            .unwrap();
        assert!(room.all_eligible_users_estimated_including(&story_id, Some(&user_id("bob"))));
    }

    #[test]
    fn disconnection_shrinks_quorum() {
        let (mut room, story_id) = test_room();
        room.apply(&estimate_event(&room, story_id, "alice", 5.0))
            .unwrap();
        assert!(!room.all_eligible_users_estimated(&story_id));

        room.set_user_disconnected(&user_id("bob"), true).unwrap();
        assert!(room.all_eligible_users_estimated(&story_id));
    }

    #[test]
    fn stale_estimate_from_demoted_user_does_not_count() {
        let (mut room, story_id) = test_room();
        room.apply(&estimate_event(&room, story_id, "alice", 5.0))
            .unwrap();
        // alice estimated, then became a visitor; her entry stays in the
        // map but bob alone now decides the quorum
        room.set_user_visitor(&user_id("alice"), true).unwrap();

        assert!(room.story(&story_id).unwrap().has_estimated(&user_id("alice")));
        assert!(!room.all_eligible_users_estimated(&story_id));

        room.apply(&estimate_event(&room, story_id, "bob", 2.0))
            .unwrap();
        assert!(room.all_eligible_users_estimated(&story_id));
    }

    #[test]
    fn predicate_false_with_no_eligible_users() {
        let mut room = Room::new(RoomId::new("visitors-only").unwrap());
        let story_id = StoryId::new();
        room.add_story(Story::new(story_id, "Story"));
        room.add_user(User::visitor(user_id("carol")));
        assert!(!room.all_eligible_users_estimated(&story_id));
    }

    #[test]
    fn predicate_false_for_unknown_story() {
        let (room, _) = test_room();
        assert!(!room.all_eligible_users_estimated(&StoryId::new()));
    }

    proptest! {
        // The quorum holds exactly when the estimated set covers the
        // eligible set, regardless of visitors, disconnections, or stale
        // entries.
        #[test]
        fn quorum_iff_eligible_subset_of_estimated(
            flags in proptest::collection::vec((any::<bool>(), any::<bool>(), any::<bool>()), 1..8)
        ) {
            let mut room = Room::new(RoomId::new("prop-room").unwrap());
            let story_id = StoryId::new();
            room.add_story(Story::new(story_id, "Prop story"));

            let mut expected = true;
            let mut any_eligible = false;
            for (i, (visitor, disconnected, estimated)) in flags.iter().enumerate() {
                let id = UserId::new(format!("user-{}", i)).unwrap();
                let mut user = if *visitor { User::visitor(id.clone()) } else { User::new(id.clone()) };
                if *disconnected {
                    user.disconnected = true;
                }
                let eligible = user.is_eligible();
                room.add_user(user);
                if *estimated {
                    let event = RoomEvent::StoryEstimateGiven(StoryEstimateGiven {
                        event_id: EventId::new(),
                        room_id: room.id().clone(),
                        story_id,
                        user_id: id,
                        value: EstimateValue::new(3.0),
                        given_at: Timestamp::now(),
                    });
                    room.apply(&event).unwrap();
                }
                if eligible {
                    any_eligible = true;
                    if !*estimated {
                        expected = false;
                    }
                }
            }

            prop_assert_eq!(
                room.all_eligible_users_estimated(&story_id),
                expected && any_eligible
            );
        }
    }
}
