//! Application layer - command handlers and the room dispatcher.

mod dispatcher;
pub mod handlers;

pub use dispatcher::{CommandOutcome, RoomCommandDispatcher};
