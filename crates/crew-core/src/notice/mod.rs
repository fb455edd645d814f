//! User-visible notices raised by the flow resolver.

use serde::{Deserialize, Serialize};

pub const SESSION_EXPIRED_TITLE: &str = "Session Expired";
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please log in again.";
pub const COMPLETION_FAILED_MESSAGE: &str = "Failed to complete your profile. Please try again.";
pub const INCOMPLETE_PROFILE_TITLE: &str = "Incomplete Profile";
pub const INCOMPLETE_PROFILE_MESSAGE: &str =
    "Please make sure you have selected at least one vibe, scene, and hobby.";

/// How the shell should present a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeKind {
    /// Blocking dialog shown before a forced navigation reset.
    Modal,
    /// Contextual hint next to the control that was rejected.
    Inline,
    /// Non-blocking error toast; navigation is unchanged.
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn session_expired(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Modal,
            title: SESSION_EXPIRED_TITLE.to_string(),
            message: message.into(),
        }
    }

    pub fn inline(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Inline,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn incomplete_profile() -> Self {
        Self::inline(INCOMPLETE_PROFILE_TITLE, INCOMPLETE_PROFILE_MESSAGE)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: "Error".to_string(),
            message: message.into(),
        }
    }
}
