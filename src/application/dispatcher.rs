//! RoomCommandDispatcher - the single entry point for room commands.
//!
//! For every command the dispatcher resolves the target room, runs the
//! matching handler's precondition, folds the reaction's events into the
//! aggregate, persists the new state, and publishes the events. Commands
//! for the same room are serialized through a per-room lock, so handlers
//! always see the state left behind by the previous command.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, PoisonError};

use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, warn};

use crate::domain::foundation::{CommandMetadata, EventEnvelope, RoomId, UserId};
use crate::domain::room::{Room, RoomCommand, RoomError, RoomEvent};
use crate::ports::{EventPublisher, RoomRepository};

use super::handlers::{
    GiveStoryEstimateHandler, RevealStoryHandler, RoomCommandHandler, SelectStoryHandler,
    StartEstimationRoundHandler,
};

/// What an accepted command produced: the room state after all events
/// were applied, and the events themselves in emission order. Rejected
/// commands produce neither.
#[derive(Debug, Clone)]
pub struct CommandOutcome {
    pub room: Room,
    pub events: Vec<RoomEvent>,
}

/// Routes room commands to their handlers and owns the
/// validate-apply-persist-publish cycle.
pub struct RoomCommandDispatcher {
    repository: Arc<dyn RoomRepository>,
    publisher: Arc<dyn EventPublisher>,
    // one lock per room id; commands for different rooms run concurrently
    room_locks: StdMutex<HashMap<RoomId, Arc<AsyncMutex<()>>>>,
}

impl RoomCommandDispatcher {
    pub fn new(repository: Arc<dyn RoomRepository>, publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            repository,
            publisher,
            room_locks: StdMutex::new(HashMap::new()),
        }
    }

    /// Dispatches one command on behalf of the authenticated user in
    /// `metadata`.
    ///
    /// All-or-nothing: either every event of the command is applied,
    /// persisted, and published, or the command fails with no effect.
    /// An empty reaction (idempotent no-op) succeeds without touching
    /// the repository or the publisher.
    pub async fn dispatch(
        &self,
        command: RoomCommand,
        metadata: CommandMetadata,
    ) -> Result<CommandOutcome, RoomError> {
        let room_id = command.room_id().clone();
        let lock = self.room_lock(&room_id);
        let _guard = lock.lock().await;

        debug!(
            room_id = %room_id,
            command = command.name(),
            user_id = %metadata.user_id,
            "dispatching room command"
        );

        let actor = metadata.user_id.clone();
        let result = match &command {
            RoomCommand::GiveStoryEstimate(c) => {
                self.execute(&GiveStoryEstimateHandler, c, &room_id, &actor).await
            }
            RoomCommand::SelectStory(c) => {
                self.execute(&SelectStoryHandler, c, &room_id, &actor).await
            }
            RoomCommand::RevealStory(c) => {
                self.execute(&RevealStoryHandler, c, &room_id, &actor).await
            }
            RoomCommand::StartEstimationRound(c) => {
                self.execute(&StartEstimationRoundHandler, c, &room_id, &actor)
                    .await
            }
        };

        let (room, events, is_new) = match result {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(
                    room_id = %room_id,
                    command = command.name(),
                    error = %err,
                    "room command rejected"
                );
                return Err(err);
            }
        };

        if events.is_empty() {
            return Ok(CommandOutcome { room, events });
        }

        if is_new {
            self.repository.save(&room).await?;
        } else {
            self.repository.update(&room).await?;
        }

        let correlation_id = metadata.correlation_id();
        let envelopes: Vec<EventEnvelope> = events
            .iter()
            .map(|event| {
                event
                    .to_envelope()
                    .with_correlation_id(correlation_id.clone())
                    .with_user_id(metadata.user_id.to_string())
            })
            .collect();
        self.publisher.publish_all(envelopes).await?;

        debug!(
            room_id = %room_id,
            command = command.name(),
            event_count = events.len(),
            "room command accepted"
        );

        Ok(CommandOutcome { room, events })
    }

    /// Validate-and-apply for one handler. Returns the post-apply room,
    /// the emitted events, and whether the room was created by this
    /// command (and therefore needs `save` instead of `update`).
    async fn execute<H: RoomCommandHandler>(
        &self,
        handler: &H,
        command: &H::Command,
        room_id: &RoomId,
        actor: &UserId,
    ) -> Result<(Room, Vec<RoomEvent>, bool), RoomError> {
        let (mut room, is_new) = match self.repository.find_by_id(room_id).await? {
            Some(room) => (room, false),
            None if handler.requires_existing_room() => {
                return Err(RoomError::NotFound(room_id.clone()));
            }
            None => (Room::new(room_id.clone()), true),
        };

        handler.check_precondition(&room, command, actor)?;

        let events = handler.react(&room, command);
        for event in &events {
            room.apply(event)?;
        }

        Ok((room, events, is_new))
    }

    fn room_lock(&self, room_id: &RoomId) -> Arc<AsyncMutex<()>> {
        let mut locks = self
            .room_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        locks.entry(room_id.clone()).or_default().clone()
    }
}
