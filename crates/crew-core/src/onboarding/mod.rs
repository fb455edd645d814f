//! Onboarding domain models
//!
//! Onboarding covers the two screens shown after sign-in and before profile
//! setup: accepting the terms and choosing notification preferences.

/// Onboarding flow state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct OnboardingState {
    /// Whether the terms and conditions have been accepted
    pub terms_accepted: bool,
    /// Whether the notifications step was continued or skipped
    pub notifications_acknowledged: bool,
}

impl OnboardingState {
    pub fn is_complete(&self) -> bool {
        self.terms_accepted && self.notifications_acknowledged
    }
}

/// One step of the onboarding flow, as reported by its screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OnboardingStep {
    Terms,
    Notifications,
}

impl OnboardingStep {
    /// Apply this step to `state`. Returns `false` if it was already recorded.
    pub fn apply(self, state: &mut OnboardingState) -> bool {
        let flag = match self {
            OnboardingStep::Terms => &mut state.terms_accepted,
            OnboardingStep::Notifications => &mut state.notifications_acknowledged,
        };
        if *flag {
            return false;
        }
        *flag = true;
        true
    }
}
