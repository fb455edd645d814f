use crew_core::ports::ProfileError;
use crew_core::profile::ValidationError;

/// Errors returned by flow resolver entry points.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    #[error("invalid selection: {0}")]
    Validation(#[from] ValidationError),

    #[error("no authenticated session for this user")]
    NotAuthenticated,

    #[error("profile service failed: {0}")]
    Profile(#[from] ProfileError),
}

/// How a `complete_and_navigate` call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// Server confirmed, flag written, navigator reset to `Main`.
    Completed,
    /// Another call already owns or finished the finalization.
    AlreadyHandled,
    /// The session changed while the update was in flight; result dropped.
    Superseded,
}
