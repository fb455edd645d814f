//! Session service port
//!
//! Validates the stored credential against the remote authority. The
//! implementation owns reading the credential; the resolver only sees the
//! outcome.

use async_trait::async_trait;
use thiserror::Error;

use crate::error::ErrorKind;
use crate::session::SessionStatus;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Nothing stored locally; a fresh install or a signed-out device.
    #[error("no stored credential")]
    NoCredential,

    #[error("credential rejected")]
    Unauthorized,

    #[error("session expired")]
    Expired,

    #[error("network error: {0}")]
    Network(String),

    #[error("session service failed: {0}")]
    Other(String),
}

impl SessionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionError::NoCredential | SessionError::Unauthorized => ErrorKind::Authorization,
            SessionError::Expired => ErrorKind::SessionExpired,
            SessionError::Network(_) => ErrorKind::TransientNetwork,
            SessionError::Other(_) => ErrorKind::Other,
        }
    }

    /// Whether another attempt may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, SessionError::Network(_))
    }
}

#[async_trait]
pub trait SessionServicePort: Send + Sync {
    /// Validate the stored credential. Idempotent.
    async fn validate(&self) -> Result<SessionStatus, SessionError>;

    /// Clear server-side / session-local credentials.
    async fn logout(&self) -> Result<(), SessionError>;
}
