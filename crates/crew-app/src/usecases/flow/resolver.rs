//! Flow resolver orchestrator.
//!
//! Drives the bootstrap state machine, runs the session / profile use cases,
//! and owns the single-flight guards for profile finalization and logout.

use std::sync::Arc;

use crew_core::config::FlowConfig;
use crew_core::error::ErrorKind;
use crew_core::ids::UserId;
use crew_core::navigation::{
    BootstrapAction, BootstrapEvent, BootstrapStateMachine, FlowSnapshot, NavigationTarget,
};
use crew_core::notice::{Notice, COMPLETION_FAILED_MESSAGE, SESSION_EXPIRED_MESSAGE};
use crew_core::onboarding::{OnboardingState, OnboardingStep};
use crew_core::ports::{
    FlagKey, FlagStorePort, NavigatorPort, NoticePort, ProfileError, ProfileServicePort,
    SessionServicePort,
};
use crew_core::profile::{PreferenceSelections, ProfileState, ProfileStatus};
use crew_core::session::AuthenticatedSession;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, info_span, warn, Instrument};

use super::context::FlowContext;
use super::error::{CompletionOutcome, FlowError};
use super::state::{CompletionLatch, FlowState, InvalidationLatch};
use crate::usecases::internal::flag_io;
use crate::usecases::{
    AccountSnapshot, CompleteProfile, HydrateAccount, RecordOnboardingStep, SessionCheck, SignOut,
    ValidateSession,
};

/// Ports the resolver is wired with.
#[derive(Clone)]
pub struct FlowResolverDeps {
    pub session_service: Arc<dyn SessionServicePort>,
    pub profile_service: Arc<dyn ProfileServicePort>,
    pub flag_store: Arc<dyn FlagStorePort>,
    pub navigator: Arc<dyn NavigatorPort>,
    pub notices: Arc<dyn NoticePort>,
}

/// Orchestrator deciding which top-level flow the user sees.
///
/// 启动时只校验一次会话；之后的状态变化只重新计算导航目标。
pub struct FlowResolver {
    config: FlowConfig,
    context: Arc<FlowContext>,
    machine: BootstrapStateMachine,

    // 能力型 use cases
    validate_session: ValidateSession,
    hydrate_account: HydrateAccount,
    record_step: RecordOnboardingStep,
    complete_profile: CompleteProfile,
    sign_out: SignOut,

    flag_store: Arc<dyn FlagStorePort>,
    navigator: Arc<dyn NavigatorPort>,
    notices: Arc<dyn NoticePort>,
}

impl FlowResolver {
    pub fn new(config: FlowConfig, deps: FlowResolverDeps) -> Self {
        let FlowResolverDeps {
            session_service,
            profile_service,
            flag_store,
            navigator,
            notices,
        } = deps;

        Self {
            machine: BootstrapStateMachine::new(config.interactive_loading_floor().is_some()),
            context: FlowContext::default().arc(),
            validate_session: ValidateSession::new(
                session_service.clone(),
                flag_store.clone(),
                config.validation_retries,
                config.validation_retry_delay(),
            ),
            hydrate_account: HydrateAccount::new(
                profile_service.clone(),
                flag_store.clone(),
                config.bootstrap_timeout(),
            ),
            record_step: RecordOnboardingStep::new(flag_store.clone()),
            complete_profile: CompleteProfile::new(profile_service, flag_store.clone()),
            sign_out: SignOut::new(
                session_service,
                flag_store.clone(),
                config.bootstrap_timeout(),
            ),
            flag_store,
            navigator,
            notices,
            config,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<FlowSnapshot> {
        self.context.subscribe()
    }

    pub fn snapshot(&self) -> FlowSnapshot {
        self.context.snapshot()
    }

    /// Copy of the full resolver state.
    pub async fn state(&self) -> FlowState {
        self.context.get_state().await
    }

    /// Run [`mount`](Self::mount) on the runtime.
    pub fn spawn_bootstrap(self: &Arc<Self>) -> JoinHandle<()> {
        let resolver = Arc::clone(self);
        tokio::spawn(async move { resolver.mount().await })
    }

    // ===== Bootstrap =====

    /// Run the launch sequence. Only the first call has any effect.
    pub async fn mount(&self) {
        let actions = self.advance_bootstrap(BootstrapEvent::Mount).await;
        if actions.is_empty() {
            debug!("bootstrap already started, ignoring mount");
            return;
        }

        let span = info_span!("usecase.flow.bootstrap");
        async {
            let start_splash = actions.contains(&BootstrapAction::StartSplashTimer);
            let validate = actions.contains(&BootstrapAction::ValidateSession);
            tokio::join!(
                async {
                    if start_splash {
                        self.run_splash_timer().await;
                    }
                },
                async {
                    if validate {
                        self.run_session_validation().await;
                    }
                },
            );
            info!(snapshot = ?self.snapshot(), "bootstrap finished");
        }
        .instrument(span)
        .await
    }

    async fn advance_bootstrap(&self, event: BootstrapEvent) -> Vec<BootstrapAction> {
        let machine = self.machine;
        self.context
            .update(|state| {
                let from = state.bootstrap;
                let (next, actions) = machine.transition(from, event);
                if from != next {
                    info!(from = ?from, to = ?next, event = ?event, "bootstrap state transition");
                }
                state.bootstrap = next;
                actions
            })
            .await
    }

    async fn run_splash_timer(&self) {
        tokio::time::sleep(self.config.min_splash()).await;
        let follow_up = self.advance_bootstrap(BootstrapEvent::SplashElapsed).await;

        if follow_up.contains(&BootstrapAction::StartLoadingFloorTimer) {
            if let Some(floor) = self.config.interactive_loading_floor() {
                tokio::time::sleep(floor).await;
            }
            self.advance_bootstrap(BootstrapEvent::LoadingFloorElapsed)
                .await;
        }
    }

    async fn run_session_validation(&self) {
        let epoch = self.context.read(|state| state.session.epoch).await;

        let check = match tokio::time::timeout(
            self.config.bootstrap_timeout(),
            self.validate_session.execute(),
        )
        .await
        {
            Ok(check) => check,
            Err(_) => {
                warn!(
                    timeout_ms = self.config.bootstrap_timeout_ms,
                    "session validation timed out, falling back to sign-in"
                );
                SessionCheck::timed_out()
            }
        };

        match check {
            SessionCheck::Authenticated { user_id } => {
                let account = self.hydrate_account.execute(&user_id).await;
                self.apply_account(epoch, user_id, account).await;
            }
            SessionCheck::Anonymous {
                stale_credentials,
                reason,
            } => {
                if stale_credentials {
                    self.sign_out.clear_local().await;
                }
                self.context
                    .update(|state| state.clear_account(reason))
                    .await;
            }
        }

        self.advance_bootstrap(BootstrapEvent::Resolved).await;
    }

    /// Commit a hydrated account unless the session changed since `epoch`.
    async fn apply_account(&self, epoch: u64, user_id: UserId, account: AccountSnapshot) -> bool {
        let AccountSnapshot {
            onboarding,
            profile,
            credential,
        } = account;

        if let Err(err) = &profile {
            if err.is_authorization() {
                warn!(user_id = %user_id, error = %err, "profile rejected the session, signing out");
                let current = self.context.read(|state| state.session.epoch).await;
                if current != epoch {
                    return false;
                }
                self.sign_out.clear_local().await;
                let reason = err.kind();
                self.context
                    .update(|state| state.clear_account(Some(reason)))
                    .await;
                return false;
            }
        }

        let applied = self
            .context
            .update(|state| {
                if state.session.epoch != epoch {
                    return false;
                }
                state.session.sign_in(user_id.clone(), credential);
                state.onboarding = onboarding;
                state.completion = CompletionLatch::Idle;
                match profile {
                    Ok(status) => {
                        state.profile = ProfileState::default();
                        state.profile.hydrate(status);
                    }
                    // server value unknown: treat as incomplete
                    Err(err) => {
                        state.profile = ProfileState {
                            last_error: Some(err.kind()),
                            ..Default::default()
                        };
                    }
                }
                true
            })
            .await;

        if applied {
            info!(user_id = %user_id, target = ?self.snapshot().target, "account applied");
        } else {
            debug!(user_id = %user_id, "session changed during hydration, result dropped");
        }
        applied
    }

    // ===== Sign-in =====

    /// Adopt a freshly verified session. No splash, no validation call.
    pub async fn report_authenticated(&self, session: AuthenticatedSession) -> bool {
        let AuthenticatedSession {
            user_id,
            credential,
        } = session;
        let span = info_span!("usecase.flow.report_authenticated", user_id = %user_id);
        async {
            let epoch = self.context.read(|state| state.session.epoch).await;

            let store = self.flag_store.as_ref();
            flag_io::write_value(store, FlagKey::UserToken, credential.expose()).await;
            flag_io::write_value(store, FlagKey::UserId, user_id.as_str()).await;

            let mut account = self.hydrate_account.execute(&user_id).await;
            account.credential = Some(credential);
            self.apply_account(epoch, user_id, account).await
        }
        .instrument(span)
        .await
    }

    // ===== Onboarding =====

    pub async fn report_terms_accepted(&self) -> bool {
        self.report_step(OnboardingStep::Terms).await
    }

    pub async fn report_notifications_acknowledged(&self) -> bool {
        self.report_step(OnboardingStep::Notifications).await
    }

    /// Record a step for the signed-in user. Returns `false` when nothing
    /// changed (already recorded, or nobody signed in).
    async fn report_step(&self, step: OnboardingStep) -> bool {
        let changed = self
            .context
            .update(|state| state.session.authenticated && step.apply(&mut state.onboarding))
            .await;
        if !changed {
            debug!(?step, "onboarding step ignored");
            return false;
        }

        self.record_step.execute(step).await;
        info!(?step, target = ?self.snapshot().target, "onboarding step reported");
        true
    }

    pub async fn onboarding(&self) -> OnboardingState {
        self.context.read(|state| state.onboarding).await
    }

    // ===== Profile =====

    /// Finalize profile setup and reset the navigator to `Main` exactly once.
    pub async fn complete_and_navigate(
        &self,
        user_id: UserId,
        selections: PreferenceSelections,
    ) -> Result<CompletionOutcome, FlowError> {
        let span = info_span!("usecase.flow.complete_and_navigate", user_id = %user_id);
        async {
            if let Err(err) = selections.validate() {
                info!(error = %err, "profile completion rejected locally");
                self.notices.notify(Notice::incomplete_profile()).await;
                return Err(FlowError::Validation(err));
            }

            let started = Instant::now();
            let claim = self
                .context
                .update(|state| {
                    if state.current_user() != Some(&user_id) {
                        return Err(FlowError::NotAuthenticated);
                    }
                    if state.completion != CompletionLatch::Idle {
                        return Ok(None);
                    }
                    let epoch = state.session.epoch;
                    state.completion = CompletionLatch::InFlight { epoch };
                    Ok(Some(epoch))
                })
                .await?;
            let Some(epoch) = claim else {
                debug!("profile completion already handled");
                return Ok(CompletionOutcome::AlreadyHandled);
            };

            let attributes = match self.complete_profile.submit(&user_id, selections).await {
                Ok(attributes) => attributes,
                Err(err) => return self.fail_completion(epoch, err).await,
            };

            if !self.is_current(epoch).await {
                info!("session changed during profile completion, result dropped");
                return Ok(CompletionOutcome::Superseded);
            }

            // durable before the reset
            self.complete_profile.record_completion().await;

            let remaining = self.config.completion_floor().saturating_sub(started.elapsed());
            if !remaining.is_zero() {
                tokio::time::sleep(remaining).await;
            }

            if !self.is_current(epoch).await {
                info!("session changed before navigation, completion dropped");
                return Ok(CompletionOutcome::Superseded);
            }

            // reset before the Main target is published
            self.navigator.reset_to(NavigationTarget::Main).await;

            let committed = self
                .context
                .update(|state| {
                    if state.session.epoch != epoch {
                        return false;
                    }
                    state.profile.mark_complete(attributes);
                    state.completion = CompletionLatch::Done;
                    true
                })
                .await;
            if !committed {
                info!("session changed during navigation, completion dropped");
                return Ok(CompletionOutcome::Superseded);
            }

            info!("profile completed, navigated to main");
            Ok(CompletionOutcome::Completed)
        }
        .instrument(span)
        .await
    }

    async fn fail_completion(
        &self,
        epoch: u64,
        err: ProfileError,
    ) -> Result<CompletionOutcome, FlowError> {
        let current = self
            .context
            .update(|state| {
                if state.completion == (CompletionLatch::InFlight { epoch }) {
                    state.completion = CompletionLatch::Idle;
                }
                state.session.epoch == epoch
            })
            .await;

        if current {
            if err.is_authorization() {
                self.invalidate_session(SESSION_EXPIRED_MESSAGE).await;
            } else {
                self.notices
                    .notify(Notice::error(COMPLETION_FAILED_MESSAGE))
                    .await;
            }
        }
        Err(FlowError::Profile(err))
    }

    /// Re-fetch the profile status for the signed-in user.
    pub async fn refresh_profile(&self) -> Result<ProfileStatus, FlowError> {
        let (user_id, epoch) = self
            .context
            .read(|state| {
                state
                    .current_user()
                    .cloned()
                    .map(|user_id| (user_id, state.session.epoch))
            })
            .await
            .ok_or(FlowError::NotAuthenticated)?;

        match self.hydrate_account.fetch_profile(&user_id).await {
            Ok(status) => {
                let fresh = status.clone();
                self.context
                    .update(|state| {
                        if state.session.epoch == epoch {
                            state.profile.hydrate(fresh);
                        }
                    })
                    .await;
                Ok(status)
            }
            Err(err) => {
                if self.is_current(epoch).await {
                    self.report_profile_error(&err).await;
                }
                Err(FlowError::Profile(err))
            }
        }
    }

    /// Session-error monitoring for profile calls issued by screens.
    ///
    /// Returns whether the error forced a logout.
    pub async fn report_profile_error(&self, err: &ProfileError) -> bool {
        if err.is_authorization() {
            return self.invalidate_session(SESSION_EXPIRED_MESSAGE).await;
        }

        let kind = err.kind();
        let authenticated = self
            .context
            .update(|state| {
                if state.session.authenticated {
                    state.profile.last_error = Some(kind);
                }
                state.session.authenticated
            })
            .await;
        if authenticated {
            warn!(error = %err, "profile error reported");
            self.notices.notify(Notice::error(err.to_string())).await;
        }
        false
    }

    // ===== Logout =====

    /// Forced logout after an authorization failure.
    ///
    /// Only acts while ready and signed in; concurrent calls collapse into
    /// one. Returns whether this call performed the logout.
    pub async fn invalidate_session(&self, message: impl Into<String>) -> bool {
        let message: String = message.into();
        let claimed = self
            .context
            .update(|state| {
                if !state.is_ready() || !state.session.authenticated {
                    return false;
                }
                if state.invalidation == InvalidationLatch::InFlight {
                    return false;
                }
                state.invalidation = InvalidationLatch::InFlight;
                true
            })
            .await;
        if !claimed {
            debug!("session invalidation skipped");
            return false;
        }

        let span = info_span!("usecase.flow.invalidate_session");
        async {
            warn!("session invalidated, forcing logout");
            self.notices.notify(Notice::session_expired(message)).await;
            self.finish_logout(Some(ErrorKind::SessionExpired)).await;
            true
        }
        .instrument(span)
        .await
    }

    /// User-initiated logout. No notice.
    pub async fn logout(&self) -> bool {
        let claimed = self
            .context
            .update(|state| {
                if !state.session.authenticated
                    || state.invalidation == InvalidationLatch::InFlight
                {
                    return false;
                }
                state.invalidation = InvalidationLatch::InFlight;
                true
            })
            .await;
        if !claimed {
            debug!("logout skipped");
            return false;
        }

        let span = info_span!("usecase.flow.logout");
        async {
            self.finish_logout(None).await;
            info!("user logged out");
            true
        }
        .instrument(span)
        .await
    }

    async fn finish_logout(&self, reason: Option<ErrorKind>) {
        self.sign_out.execute().await;
        self.context
            .update(|state| {
                state.clear_account(reason);
                state.invalidation = InvalidationLatch::Idle;
            })
            .await;
        self.navigator.reset_to(NavigationTarget::Auth).await;
    }

    async fn is_current(&self, epoch: u64) -> bool {
        self.context
            .read(|state| state.session.epoch == epoch)
            .await
    }
}
