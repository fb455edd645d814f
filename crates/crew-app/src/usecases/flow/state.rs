use crew_core::error::ErrorKind;
use crew_core::navigation::{resolve_target, BootstrapState, FlowSnapshot, NavigationTarget};
use crew_core::onboarding::OnboardingState;
use crew_core::profile::ProfileState;
use crew_core::session::SessionState;

/// Single-flight latch for profile finalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompletionLatch {
    #[default]
    Idle,
    /// Claimed under the given session epoch.
    InFlight { epoch: u64 },
    /// The reset to `Main` has been dispatched for this account.
    Done,
}

impl CompletionLatch {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, CompletionLatch::InFlight { .. })
    }
}

/// Single-flight latch for forced and user-initiated logout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvalidationLatch {
    #[default]
    Idle,
    InFlight,
}

/// Everything the resolver tracks between calls.
#[derive(Debug, Clone, Default)]
pub struct FlowState {
    pub bootstrap: BootstrapState,
    pub session: SessionState,
    pub onboarding: OnboardingState,
    pub profile: ProfileState,
    pub completion: CompletionLatch,
    pub invalidation: InvalidationLatch,
}

impl FlowState {
    pub fn target(&self) -> NavigationTarget {
        resolve_target(&self.session, &self.onboarding, &self.profile)
    }

    pub fn snapshot(&self) -> FlowSnapshot {
        FlowSnapshot {
            phase: self.bootstrap.phase(),
            target: self.target(),
            completing: self.completion.is_in_flight(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.bootstrap == BootstrapState::Ready
    }

    /// The signed-in user, if any.
    pub fn current_user(&self) -> Option<&crew_core::ids::UserId> {
        if self.session.authenticated {
            self.session.user_id.as_ref()
        } else {
            None
        }
    }

    /// Forget the account: session, onboarding progress, profile, and any
    /// finalization claim. The bootstrap phase is kept.
    pub fn clear_account(&mut self, reason: Option<ErrorKind>) {
        self.session.sign_out(reason);
        self.onboarding = OnboardingState::default();
        self.profile = ProfileState::default();
        self.completion = CompletionLatch::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crew_core::ids::UserId;
    use crew_core::navigation::PresentationPhase;

    #[test]
    fn snapshot_reflects_latch_and_phase() {
        let mut state = FlowState::default();
        assert_eq!(state.snapshot(), FlowSnapshot::default());

        state.session.sign_in(UserId::from("u-1"), None);
        state.completion = CompletionLatch::InFlight {
            epoch: state.session.epoch,
        };
        state.bootstrap = BootstrapState::Ready;

        let snapshot = state.snapshot();
        assert_eq!(snapshot.phase, PresentationPhase::Ready);
        assert_eq!(snapshot.target, NavigationTarget::Onboarding);
        assert!(snapshot.completing);
    }

    #[test]
    fn clear_account_resets_progress_but_not_phase() {
        let mut state = FlowState {
            bootstrap: BootstrapState::Ready,
            onboarding: OnboardingState {
                terms_accepted: true,
                notifications_acknowledged: true,
            },
            completion: CompletionLatch::Done,
            ..Default::default()
        };
        state.session.sign_in(UserId::from("u-1"), None);
        state.profile.complete = true;

        state.clear_account(Some(ErrorKind::SessionExpired));

        assert!(state.is_ready());
        assert!(state.current_user().is_none());
        assert_eq!(state.onboarding, OnboardingState::default());
        assert!(!state.profile.complete);
        assert_eq!(state.completion, CompletionLatch::Idle);
        assert_eq!(state.target(), NavigationTarget::Auth);
    }
}
