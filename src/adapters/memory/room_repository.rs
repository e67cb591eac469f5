//! In-memory room repository implementation for testing.
//!
//! # Security Note
//!
//! This adapter is for **testing only** and should not be used in
//! production. It uses `.expect()` on lock operations which will panic if
//! locks are poisoned.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, RoomId};
use crate::domain::room::Room;
use crate::ports::RoomRepository;

/// In-memory room store keyed by room id.
///
/// # Panics
///
/// Methods may panic if internal locks are poisoned. This is acceptable
/// for test code but this adapter should NOT be used in production.
pub struct InMemoryRoomRepository {
    rooms: RwLock<HashMap<RoomId, Room>>,
}

impl InMemoryRoomRepository {
    /// Creates a new empty repository.
    pub fn new() -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
        }
    }

    // === Test Helpers ===

    /// Inserts a room directly, bypassing the save/update distinction.
    pub fn insert(&self, room: Room) {
        self.rooms
            .write()
            .expect("InMemoryRoomRepository: rooms write lock poisoned")
            .insert(room.id().clone(), room);
    }

    /// Returns the number of stored rooms.
    pub fn room_count(&self) -> usize {
        self.rooms
            .read()
            .expect("InMemoryRoomRepository: rooms lock poisoned")
            .len()
    }

    /// Returns a snapshot of the stored room, if any.
    pub fn get(&self, id: &RoomId) -> Option<Room> {
        self.rooms
            .read()
            .expect("InMemoryRoomRepository: rooms lock poisoned")
            .get(id)
            .cloned()
    }
}

impl Default for InMemoryRoomRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn save(&self, room: &Room) -> Result<(), DomainError> {
        let mut rooms = self
            .rooms
            .write()
            .expect("InMemoryRoomRepository: rooms write lock poisoned");
        if rooms.contains_key(room.id()) {
            return Err(DomainError::new(
                ErrorCode::StorageError,
                format!("Room already exists: {}", room.id()),
            ));
        }
        rooms.insert(room.id().clone(), room.clone());
        Ok(())
    }

    async fn update(&self, room: &Room) -> Result<(), DomainError> {
        let mut rooms = self
            .rooms
            .write()
            .expect("InMemoryRoomRepository: rooms write lock poisoned");
        if !rooms.contains_key(room.id()) {
            return Err(DomainError::new(
                ErrorCode::StorageError,
                format!("Room does not exist: {}", room.id()),
            ));
        }
        rooms.insert(room.id().clone(), room.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &RoomId) -> Result<Option<Room>, DomainError> {
        Ok(self
            .rooms
            .read()
            .expect("InMemoryRoomRepository: rooms lock poisoned")
            .get(id)
            .cloned())
    }

    async fn exists(&self, id: &RoomId) -> Result<bool, DomainError> {
        Ok(self
            .rooms
            .read()
            .expect("InMemoryRoomRepository: rooms lock poisoned")
            .contains_key(id))
    }
}
