use async_trait::async_trait;
use thiserror::Error;

use crate::error::ErrorKind;
use crate::ids::UserId;
use crate::profile::{ProfileAttributes, ProfileStatus, ProfileUpdate};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("profile request unauthorized")]
    Unauthorized,

    #[error("session expired")]
    Expired,

    #[error("network error: {0}")]
    Network(String),

    #[error("profile service failed: {0}")]
    Other(String),
}

impl ProfileError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProfileError::Unauthorized => ErrorKind::Authorization,
            ProfileError::Expired => ErrorKind::SessionExpired,
            ProfileError::Network(_) => ErrorKind::TransientNetwork,
            ProfileError::Other(_) => ErrorKind::Other,
        }
    }

    /// Authorization / expiry class errors force a logout.
    pub fn is_authorization(&self) -> bool {
        self.kind().forces_logout()
    }
}

#[async_trait]
pub trait ProfileServicePort: Send + Sync {
    /// Fetch completion state and attributes for `user_id`.
    async fn get_status(&self, user_id: &UserId) -> Result<ProfileStatus, ProfileError>;

    /// Apply a partial update and return the resulting attributes.
    async fn update(
        &self,
        user_id: &UserId,
        update: &ProfileUpdate,
    ) -> Result<ProfileAttributes, ProfileError>;
}
