//! Domain layer - aggregates, events, and shared vocabulary.

pub mod foundation;
pub mod room;
