use std::sync::Arc;
use std::time::Duration;

use crew_core::ids::UserId;
use crew_core::onboarding::OnboardingState;
use crew_core::ports::{FlagKey, FlagStorePort, ProfileError, ProfileServicePort};
use crew_core::profile::ProfileStatus;
use crew_core::session::Credential;
use tracing::{debug, info, warn};

use crate::usecases::internal::flag_io;

/// Everything the resolver needs about a signed-in account.
#[derive(Debug, Clone)]
pub struct AccountSnapshot {
    pub onboarding: OnboardingState,
    pub profile: Result<ProfileStatus, ProfileError>,
    pub credential: Option<Credential>,
}

/// Use case for loading profile status and onboarding flags for a user.
///
/// The profile fetch and the local flag reads run concurrently. Afterwards
/// the local cache is repaired from server truth: a server-side terms
/// acceptance or profile completion is copied into a local flag that is still
/// unset. A set local flag is never overwritten.
///
/// The whole step, storage included, is bounded by `timeout`.
pub struct HydrateAccount {
    profile_service: Arc<dyn ProfileServicePort>,
    flag_store: Arc<dyn FlagStorePort>,
    timeout: Duration,
}

impl HydrateAccount {
    pub fn new(
        profile_service: Arc<dyn ProfileServicePort>,
        flag_store: Arc<dyn FlagStorePort>,
        timeout: Duration,
    ) -> Self {
        Self {
            profile_service,
            flag_store,
            timeout,
        }
    }

    pub async fn execute(&self, user_id: &UserId) -> AccountSnapshot {
        match tokio::time::timeout(self.timeout, self.load(user_id)).await {
            Ok(account) => account,
            Err(_) => {
                warn!(
                    user_id = %user_id,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "account hydration timed out, assuming nothing is set"
                );
                AccountSnapshot {
                    onboarding: OnboardingState::default(),
                    profile: Err(ProfileError::Network("account hydration timed out".to_string())),
                    credential: None,
                }
            }
        }
    }

    async fn load(&self, user_id: &UserId) -> AccountSnapshot {
        let store = self.flag_store.as_ref();
        let (profile, terms_accepted, notifications_acknowledged, profile_cached, token) = tokio::join!(
            self.fetch_profile(user_id),
            flag_io::read_flag(store, FlagKey::TermsAccepted),
            flag_io::read_flag(store, FlagKey::NotificationsSet),
            flag_io::read_flag(store, FlagKey::ProfileCompleted),
            flag_io::read_value(store, FlagKey::UserToken),
        );

        let mut onboarding = OnboardingState {
            terms_accepted,
            notifications_acknowledged,
        };

        if let Ok(status) = &profile {
            if !onboarding.terms_accepted && status.attributes.terms_accepted {
                info!(user_id = %user_id, "terms accepted server-side, repairing local flag");
                flag_io::write_flag(store, FlagKey::TermsAccepted).await;
                onboarding.terms_accepted = true;
            }
            if !profile_cached && status.complete {
                debug!(user_id = %user_id, "refreshing local profile completion cache");
                flag_io::write_flag(store, FlagKey::ProfileCompleted).await;
            }
        }

        AccountSnapshot {
            onboarding,
            profile,
            credential: token
                .map(Credential::new)
                .filter(|credential| !credential.is_empty()),
        }
    }

    /// Fetch the profile status, bounded by the configured timeout.
    pub async fn fetch_profile(&self, user_id: &UserId) -> Result<ProfileStatus, ProfileError> {
        match tokio::time::timeout(self.timeout, self.profile_service.get_status(user_id))
            .await
        {
            Ok(Ok(status)) => Ok(status),
            Ok(Err(err)) => {
                warn!(user_id = %user_id, error = %err, "profile status fetch failed");
                Err(err)
            }
            Err(_) => {
                warn!(
                    user_id = %user_id,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "profile status fetch timed out"
                );
                Err(ProfileError::Network("profile status timed out".to_string()))
            }
        }
    }
}
