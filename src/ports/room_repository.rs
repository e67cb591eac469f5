//! RoomRepository port - persistence seam for room aggregates.
//!
//! The core never decides where rooms live; it loads and stores them
//! through this port. Room creation and teardown belong to room-lifecycle
//! logic outside this crate, which uses `save`.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, RoomId};
use crate::domain::room::Room;

/// Port for loading and storing room aggregates.
///
/// Implementations must return the latest stored state from
/// `find_by_id`; the dispatcher's per-room sequencing guarantees no
/// concurrent writer for the same room id.
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Stores a newly created room.
    async fn save(&self, room: &Room) -> Result<(), DomainError>;

    /// Replaces the stored state of an existing room.
    async fn update(&self, room: &Room) -> Result<(), DomainError>;

    /// Loads a room by id, `None` if it does not exist.
    async fn find_by_id(&self, id: &RoomId) -> Result<Option<Room>, DomainError>;

    /// Checks room existence without loading it.
    async fn exists(&self, id: &RoomId) -> Result<bool, DomainError>;
}
