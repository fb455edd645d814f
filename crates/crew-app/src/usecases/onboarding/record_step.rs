use std::sync::Arc;

use crew_core::onboarding::OnboardingStep;
use crew_core::ports::{FlagKey, FlagStorePort};
use tracing::debug;

use crate::usecases::internal::flag_io;

/// Use case for persisting a completed onboarding step.
pub struct RecordOnboardingStep {
    flag_store: Arc<dyn FlagStorePort>,
}

impl RecordOnboardingStep {
    pub fn new(flag_store: Arc<dyn FlagStorePort>) -> Self {
        Self { flag_store }
    }

    /// Write the step's flag. Returns whether the write was persisted; a
    /// failed write still lets the in-memory state advance.
    pub async fn execute(&self, step: OnboardingStep) -> bool {
        let key = Self::flag_for(step);
        let persisted = flag_io::write_flag(self.flag_store.as_ref(), key).await;
        debug!(?step, key = %key, persisted, "onboarding step recorded");
        persisted
    }

    pub fn flag_for(step: OnboardingStep) -> FlagKey {
        match step {
            OnboardingStep::Terms => FlagKey::TermsAccepted,
            OnboardingStep::Notifications => FlagKey::NotificationsSet,
        }
    }
}
