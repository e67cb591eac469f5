//! Room commands - the intents the dispatcher accepts.
//!
//! Payloads are transport-agnostic; the authenticated acting user arrives
//! separately via `CommandMetadata`.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{RoomId, StoryId, UserId};

use super::aggregate::EstimateValue;

/// A participant gives an estimate for the currently selected story.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiveStoryEstimate {
    pub room_id: RoomId,
    pub story_id: StoryId,
    /// Declared estimating user; must match the authenticated actor.
    pub user_id: UserId,
    pub value: EstimateValue,
}

/// Opens a story for estimation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectStory {
    pub room_id: RoomId,
    pub story_id: StoryId,
}

/// Explicitly discloses the selected story's estimates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevealStory {
    pub room_id: RoomId,
    pub story_id: StoryId,
}

/// Restarts the estimation cycle of a revealed story.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartEstimationRound {
    pub room_id: RoomId,
    pub story_id: StoryId,
}

/// Sum type the dispatcher routes on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoomCommand {
    GiveStoryEstimate(GiveStoryEstimate),
    SelectStory(SelectStory),
    RevealStory(RevealStory),
    StartEstimationRound(StartEstimationRound),
}

impl RoomCommand {
    /// Target room of the command.
    pub fn room_id(&self) -> &RoomId {
        match self {
            RoomCommand::GiveStoryEstimate(c) => &c.room_id,
            RoomCommand::SelectStory(c) => &c.room_id,
            RoomCommand::RevealStory(c) => &c.room_id,
            RoomCommand::StartEstimationRound(c) => &c.room_id,
        }
    }

    /// Stable command name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            RoomCommand::GiveStoryEstimate(_) => "give_story_estimate",
            RoomCommand::SelectStory(_) => "select_story",
            RoomCommand::RevealStory(_) => "reveal_story",
            RoomCommand::StartEstimationRound(_) => "start_estimation_round",
        }
    }
}
