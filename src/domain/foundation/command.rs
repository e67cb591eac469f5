//! Command metadata shared by all command handlers.
//!
//! Every command arrives with an authenticated acting-user identifier
//! supplied by the transport layer. It is carried here, next to
//! correlation and audit context, rather than inside command payloads.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;

/// Context that flows with a command through the dispatch pipeline.
///
/// The `user_id` is the authenticated actor; preconditions compare it
/// against payload-declared user ids. Correlation and source fields are
/// propagated onto the emitted event envelopes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// The authenticated user executing this command.
    pub user_id: UserId,

    /// Links related operations across a single user request.
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,

    /// Source of this command (e.g. "websocket", "test").
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

impl CommandMetadata {
    /// Creates new command metadata for the given authenticated user.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            correlation_id: None,
            source: None,
        }
    }

    /// Builder: add correlation id for request tracing.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Builder: add source identifier.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns the correlation id, generating one if not set.
    ///
    /// Ensures every command has a correlation id for tracing even when
    /// the transport layer did not provide one.
    pub fn correlation_id(&self) -> String {
        self.correlation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }

    /// Returns the correlation id only if explicitly set.
    pub fn correlation_id_opt(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }

    /// Returns the source if set.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

#[cfg(test)]
impl CommandMetadata {
    /// Creates a test fixture with a fixed user and correlation id.
    pub fn test_fixture() -> Self {
        Self::new(UserId::new("test-user").unwrap())
            .with_correlation_id("test-correlation-id")
            .with_source("test")
    }
}
