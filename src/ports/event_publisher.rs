//! EventPublisher port - fan-out seam for room events.
//!
//! The core publishes the event sequence of each accepted command through
//! this port; broadcasting to the room's connected participants is the
//! transport layer's responsibility.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Port for publishing domain events.
///
/// Implementations must preserve the order of `publish_all` within one
/// call; the dispatcher relies on it to broadcast a command's events in
/// emission order.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a single event.
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Publish multiple events in order.
    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError>;
}
