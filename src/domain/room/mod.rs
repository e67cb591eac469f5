//! Room module - the estimation session aggregate.
//!
//! A room holds the participants of one collaborative estimation session,
//! the stories they estimate, and the estimation/reveal state of each
//! story. All mutation flows through [`Room::apply`] with events produced
//! by the command handlers in the application layer.

mod aggregate;
mod commands;
mod errors;
mod events;

pub use aggregate::{EstimateValue, Room, Story, User};
pub use commands::{
    GiveStoryEstimate, RevealStory, RoomCommand, SelectStory, StartEstimationRound,
};
pub use errors::RoomError;
pub use events::{
    EstimationRoundStarted, RoomEvent, StoryEstimateGiven, StoryRevealed, StorySelected,
};
