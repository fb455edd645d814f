//! Session domain models
//!
//! The session is owned by the flow resolver. Its durable copy (token and
//! user id) lives in the flag store and is only consulted on cold start.

mod credential;

pub use credential::Credential;

use crate::error::ErrorKind;
use crate::ids::UserId;

/// In-memory session state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    pub authenticated: bool,
    pub user_id: Option<UserId>,
    pub credential: Option<Credential>,
    pub last_error: Option<ErrorKind>,
    /// Bumped on every sign-in / sign-out. In-flight work compares the epoch
    /// it started under before acting on a result.
    pub epoch: u64,
}

impl SessionState {
    /// Enter the authenticated state for `user_id`.
    pub fn sign_in(&mut self, user_id: UserId, credential: Option<Credential>) {
        self.authenticated = true;
        self.user_id = Some(user_id);
        self.credential = credential;
        self.last_error = None;
        self.epoch += 1;
    }

    /// Drop every credential field. The epoch keeps counting.
    pub fn sign_out(&mut self, reason: Option<ErrorKind>) {
        self.authenticated = false;
        self.user_id = None;
        self.credential = None;
        self.last_error = reason;
        self.epoch += 1;
    }
}

/// Result of `SessionServicePort::validate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStatus {
    pub authenticated: bool,
    pub user_id: Option<UserId>,
}

impl SessionStatus {
    pub fn authenticated(user_id: impl Into<UserId>) -> Self {
        Self {
            authenticated: true,
            user_id: Some(user_id.into()),
        }
    }

    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            user_id: None,
        }
    }
}

/// Credentials handed to the resolver after a successful OTP verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedSession {
    pub user_id: UserId,
    pub credential: Credential,
}
