//! Ports - interfaces the hosting transport/persistence layer implements.

mod event_publisher;
mod room_repository;

pub use event_publisher::EventPublisher;
pub use room_repository::RoomRepository;
