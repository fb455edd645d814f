//! Persistent flag store port
//!
//! Durable key-value storage surviving process restarts. Every call is
//! best-effort from the resolver's point of view: read failures degrade to
//! "absent", write failures are logged.

use async_trait::async_trait;
use thiserror::Error;

/// Keys written by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagKey {
    UserToken,
    UserId,
    RefreshToken,
    TokenExpiry,
    TermsAccepted,
    NotificationsSet,
    ProfileCompleted,
}

impl FlagKey {
    /// Keys removed on logout.
    pub const CREDENTIALS: [FlagKey; 4] = [
        FlagKey::UserToken,
        FlagKey::UserId,
        FlagKey::RefreshToken,
        FlagKey::TokenExpiry,
    ];

    /// Per-account progress cached locally, also removed on logout.
    pub const ACCOUNT_PROGRESS: [FlagKey; 3] = [
        FlagKey::TermsAccepted,
        FlagKey::NotificationsSet,
        FlagKey::ProfileCompleted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FlagKey::UserToken => "userToken",
            FlagKey::UserId => "userId",
            FlagKey::RefreshToken => "refreshToken",
            FlagKey::TokenExpiry => "tokenExpiry",
            FlagKey::TermsAccepted => "termsAccepted",
            FlagKey::NotificationsSet => "notificationsSet",
            FlagKey::ProfileCompleted => "profileCompleted",
        }
    }
}

impl std::fmt::Display for FlagKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const FLAG_TRUE: &str = "true";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("flag store io failed: {0}")]
    Io(String),

    #[error("flag store data corrupt: {0}")]
    Corrupt(String),
}

#[async_trait]
pub trait FlagStorePort: Send + Sync {
    async fn get(&self, key: FlagKey) -> Result<Option<String>, StorageError>;

    async fn set(&self, key: FlagKey, value: &str) -> Result<(), StorageError>;

    async fn remove(&self, keys: &[FlagKey]) -> Result<(), StorageError>;

    /// Read a boolean flag. Only the literal `"true"` counts as set.
    async fn get_flag(&self, key: FlagKey) -> Result<bool, StorageError> {
        Ok(self.get(key).await?.as_deref() == Some(FLAG_TRUE))
    }

    async fn set_flag(&self, key: FlagKey) -> Result<(), StorageError> {
        self.set(key, FLAG_TRUE).await
    }
}
