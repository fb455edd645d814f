use std::sync::Arc;

use crew_core::ids::UserId;
use crew_core::ports::{FlagKey, FlagStorePort, ProfileError, ProfileServicePort};
use crew_core::profile::{PreferenceSelections, ProfileAttributes};
use tracing::{info, warn};

use crate::usecases::internal::flag_io;

/// Use case for finalizing profile setup.
///
/// Submission and the local completion flag are separate steps so the
/// caller can drop a stale server result before anything is written locally.
pub struct CompleteProfile {
    profile_service: Arc<dyn ProfileServicePort>,
    flag_store: Arc<dyn FlagStorePort>,
}

impl CompleteProfile {
    pub fn new(
        profile_service: Arc<dyn ProfileServicePort>,
        flag_store: Arc<dyn FlagStorePort>,
    ) -> Self {
        Self {
            profile_service,
            flag_store,
        }
    }

    /// Send the three preference lists with the completion flag.
    ///
    /// Callers validate `selections` first.
    pub async fn submit(
        &self,
        user_id: &UserId,
        selections: PreferenceSelections,
    ) -> Result<ProfileAttributes, ProfileError> {
        let update = selections.into_completion_update();
        match self.profile_service.update(user_id, &update).await {
            Ok(attributes) => {
                info!(user_id = %user_id, "profile completion accepted");
                Ok(attributes)
            }
            Err(err) => {
                warn!(user_id = %user_id, error = %err, "profile completion rejected");
                Err(err)
            }
        }
    }

    /// Persist the local completion cache after server confirmation.
    pub async fn record_completion(&self) -> bool {
        flag_io::write_flag(self.flag_store.as_ref(), FlagKey::ProfileCompleted).await
    }
}
