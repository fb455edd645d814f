//! Error taxonomy shared by the session, profile and storage ports.

use serde::{Deserialize, Serialize};

/// Coarse error classification recorded on session / profile state.
///
/// 错误分类：决定导航层如何响应。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Retryable; never moves navigation beyond the safe fallback.
    TransientNetwork,
    /// Credential rejected by the backend.
    Authorization,
    /// Credential expired.
    SessionExpired,
    /// Local input rejected before any side effect.
    Validation,
    /// Flag store read/write failed; degrades to defaults.
    Storage,
    Other,
}

impl ErrorKind {
    /// Whether this error forces a logout when seen after bootstrap.
    pub fn forces_logout(self) -> bool {
        matches!(self, ErrorKind::Authorization | ErrorKind::SessionExpired)
    }
}
