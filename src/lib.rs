//! Storypoints - Collaborative Planning Poker Estimation Core
//!
//! This crate implements the command/event core of a shared estimation
//! session ("room"): participants submit numeric estimates for the
//! currently selected story and the room reveals all estimates once every
//! eligible participant has responded.
//!
//! The crate is transport-agnostic and exposes in-process contracts only:
//! a command dispatcher that validates commands against room state and
//! folds the resulting events into the aggregate, plus the ports a hosting
//! transport layer implements for persistence and event fan-out.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
