//! Avatar Service Seam
//!
//! Defines the contract for the remote streaming-avatar service. The
//! concrete HTTP client lives in the API service; the simulation core only
//! depends on this trait, which keeps the state machine testable with a
//! mocked client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A live handle to the remote avatar service, scoped to one character.
///
/// The descriptor is also what the display layer needs to mount the
/// embeddable avatar widget, so it is passed through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarSession {
    pub session_id: String,
    pub access_token: String,
    pub url: String,
}

/// Errors surfaced by the remote avatar service.
#[derive(Debug, thiserror::Error)]
pub enum AvatarError {
    /// The API key was missing or rejected.
    #[error("avatar service rejected the credential")]
    Unauthorized,
    /// The credential is valid but lacks permission for the operation.
    #[error("avatar service denied access to the resource")]
    Forbidden,
    /// Transport-level failure before any service response.
    #[error("network failure talking to the avatar service: {0}")]
    Network(String),
    /// The service answered with a non-success status and a message.
    #[error("avatar service error (status {status}): {message}")]
    Service { status: u16, message: String },
}

/// Contract for any client that can drive the remote avatar service.
///
/// All operations are single attempts with no retry; the caller decides
/// whether a failure is fatal (`stop_session` failures never are).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AvatarClient: Send + Sync {
    /// Establishes a new streaming session for the given avatar and
    /// knowledge base.
    async fn create_session(
        &self,
        avatar_id: &str,
        knowledge_base_id: &str,
    ) -> Result<AvatarSession, AvatarError>;

    /// Sends `text` to the session as a synchronous talk task.
    async fn speak(&self, session: &AvatarSession, text: &str) -> Result<(), AvatarError>;

    /// Tears down the session. Best-effort from the caller's point of view.
    async fn stop_session(&self, session: &AvatarSession) -> Result<(), AvatarError>;
}
