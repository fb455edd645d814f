use std::sync::Arc;
use std::time::Duration;

use crew_core::error::ErrorKind;
use crew_core::ids::UserId;
use crew_core::ports::{FlagKey, FlagStorePort, SessionError, SessionServicePort};
use tracing::{debug, info, warn};

use crate::usecases::internal::flag_io;

/// Outcome of validating the stored session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCheck {
    Authenticated {
        user_id: UserId,
    },
    Anonymous {
        /// Persisted credential fields are stale and must be cleared.
        stale_credentials: bool,
        reason: Option<ErrorKind>,
    },
}

impl SessionCheck {
    /// Fallback used when validation did not finish in time.
    pub fn timed_out() -> Self {
        SessionCheck::Anonymous {
            stale_credentials: true,
            reason: Some(ErrorKind::TransientNetwork),
        }
    }
}

/// Use case for validating the stored credential at launch.
///
/// Transient network failures are retried; every other failure resolves to
/// an anonymous session. This use case never returns an error: the resolver
/// always needs a concrete answer.
pub struct ValidateSession {
    session_service: Arc<dyn SessionServicePort>,
    flag_store: Arc<dyn FlagStorePort>,
    retries: u32,
    retry_delay: Duration,
}

impl ValidateSession {
    pub fn new(
        session_service: Arc<dyn SessionServicePort>,
        flag_store: Arc<dyn FlagStorePort>,
        retries: u32,
        retry_delay: Duration,
    ) -> Self {
        Self {
            session_service,
            flag_store,
            retries,
            retry_delay,
        }
    }

    pub async fn execute(&self) -> SessionCheck {
        let mut attempt = 0;
        loop {
            match self.session_service.validate().await {
                Ok(status) if status.authenticated => {
                    let user_id = match status.user_id {
                        Some(user_id) => Some(user_id),
                        None => UserId::parse_stored(
                            flag_io::read_value(self.flag_store.as_ref(), FlagKey::UserId).await,
                        ),
                    };
                    return match user_id {
                        Some(user_id) => {
                            info!(user_id = %user_id, "stored session is valid");
                            SessionCheck::Authenticated { user_id }
                        }
                        None => {
                            warn!("session valid but no user id available");
                            SessionCheck::Anonymous {
                                stale_credentials: true,
                                reason: Some(ErrorKind::Authorization),
                            }
                        }
                    };
                }
                Ok(_) => {
                    info!("stored session is not authenticated");
                    return SessionCheck::Anonymous {
                        stale_credentials: true,
                        reason: None,
                    };
                }
                Err(SessionError::NoCredential) => {
                    debug!("no stored credential");
                    return SessionCheck::Anonymous {
                        stale_credentials: false,
                        reason: None,
                    };
                }
                Err(err) if err.is_transient() && attempt < self.retries => {
                    attempt += 1;
                    warn!(
                        error = %err,
                        attempt,
                        max_retries = self.retries,
                        "session validation failed, retrying"
                    );
                    tokio::time::sleep(self.retry_delay).await;
                }
                Err(err) => {
                    warn!(error = %err, "session validation failed");
                    return SessionCheck::Anonymous {
                        stale_credentials: true,
                        reason: Some(err.kind()),
                    };
                }
            }
        }
    }
}
