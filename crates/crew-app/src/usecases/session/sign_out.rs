use std::sync::Arc;
use std::time::Duration;

use crew_core::ports::{FlagKey, FlagStorePort, SessionServicePort};
use tracing::{info, warn};

use crate::usecases::internal::flag_io;

/// Use case for clearing the signed-in account from the device.
///
/// The local clear is authoritative for navigation: a failing remote logout
/// is logged and ignored. Both steps are bounded by `timeout`.
pub struct SignOut {
    session_service: Arc<dyn SessionServicePort>,
    flag_store: Arc<dyn FlagStorePort>,
    timeout: Duration,
}

impl SignOut {
    pub fn new(
        session_service: Arc<dyn SessionServicePort>,
        flag_store: Arc<dyn FlagStorePort>,
        timeout: Duration,
    ) -> Self {
        Self {
            session_service,
            flag_store,
            timeout,
        }
    }

    /// Remote logout followed by the local clear.
    pub async fn execute(&self) {
        match tokio::time::timeout(self.timeout, self.session_service.logout()).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                warn!(error = %err, "remote logout failed, clearing local session anyway");
            }
            Err(_) => warn!("remote logout timed out, clearing local session anyway"),
        }
        self.clear_local().await;
    }

    /// Remove persisted credentials and per-account progress flags.
    pub async fn clear_local(&self) {
        let keys: Vec<FlagKey> = FlagKey::CREDENTIALS
            .into_iter()
            .chain(FlagKey::ACCOUNT_PROGRESS)
            .collect();
        let removal = flag_io::remove_keys(self.flag_store.as_ref(), &keys);
        match tokio::time::timeout(self.timeout, removal).await {
            Ok(true) => info!("local session data cleared"),
            Ok(false) => {}
            Err(_) => warn!("clearing local session data timed out"),
        }
    }
}
