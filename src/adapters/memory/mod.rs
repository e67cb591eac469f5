//! In-memory adapters for tests and single-process deployments.

mod event_bus;
mod room_repository;

pub use event_bus::InMemoryEventBus;
pub use room_repository::InMemoryRoomRepository;
