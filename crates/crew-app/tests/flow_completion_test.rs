//! Profile finalization: validation, single-flight, minimum duration and
//! stale results.

mod support;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use crew_app::{CompletionOutcome, FlowError, FlowResolver, FlowResolverDeps};
use crew_core::config::FlowConfig;
use crew_core::navigation::{FlowSnapshot, NavigationTarget};
use crew_core::notice::{NoticeKind, COMPLETION_FAILED_MESSAGE, INCOMPLETE_PROFILE_TITLE};
use crew_core::ports::{FlagKey, NavigatorPort, ProfileError};
use crew_core::profile::{PreferenceCategory, PreferenceSelections, ValidationError};
use tokio::sync::watch;
use tokio::time::Instant;

use support::{
    selections, user, Harness, MemoryFlagStore, RecordingNotices, ScriptedProfileService,
    ScriptedSessionService,
};

#[tokio::test(start_paused = true)]
async fn double_submit_updates_and_navigates_once() {
    let h = Harness::at_profile_setup().await;
    assert_eq!(h.resolver.snapshot().target, NavigationTarget::ProfileSetup);

    let (first, second) = tokio::join!(
        h.resolver.complete_and_navigate(user(), selections()),
        h.resolver.complete_and_navigate(user(), selections()),
    );

    let mut outcomes = vec![first.unwrap(), second.unwrap()];
    outcomes.sort_by_key(|outcome| *outcome != CompletionOutcome::Completed);
    assert_eq!(
        outcomes,
        vec![CompletionOutcome::Completed, CompletionOutcome::AlreadyHandled]
    );
    assert_eq!(h.profile.updates(), 1);
    assert_eq!(h.navigator.resets(), vec![NavigationTarget::Main]);
    assert_eq!(h.resolver.snapshot().target, NavigationTarget::Main);
    assert!(h.flags.is_set(FlagKey::ProfileCompleted));

    // a late third tap after completion is also absorbed
    let third = h
        .resolver
        .complete_and_navigate(user(), selections())
        .await
        .unwrap();
    assert_eq!(third, CompletionOutcome::AlreadyHandled);
    assert_eq!(h.navigator.resets().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn empty_selection_is_rejected_without_side_effects() {
    let h = Harness::at_profile_setup().await;
    let incomplete = PreferenceSelections::new(
        vec!["chill".to_string()],
        Vec::new(),
        vec!["climbing".to_string()],
    );

    let result = h.resolver.complete_and_navigate(user(), incomplete).await;

    assert_eq!(
        result,
        Err(FlowError::Validation(ValidationError::EmptySelection(
            PreferenceCategory::Scenes
        )))
    );
    assert_eq!(h.profile.updates(), 0);
    assert!(!h.flags.is_set(FlagKey::ProfileCompleted));
    assert!(h.navigator.resets().is_empty());
    assert_eq!(h.resolver.snapshot().target, NavigationTarget::ProfileSetup);

    let notices = h.notices.all();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].kind, NoticeKind::Inline);
    assert_eq!(notices[0].title, INCOMPLETE_PROFILE_TITLE);
}

#[tokio::test(start_paused = true)]
async fn update_carries_selections_and_completion_flag() {
    let h = Harness::at_profile_setup().await;

    h.resolver
        .complete_and_navigate(user(), selections())
        .await
        .unwrap();

    let update = h.profile.last_update.lock().unwrap().clone().unwrap();
    assert_eq!(update.vibes, Some(vec!["chill".to_string()]));
    assert_eq!(update.scenes, Some(vec!["rooftop".to_string()]));
    assert_eq!(update.hobbies, Some(vec!["climbing".to_string()]));
    assert_eq!(update.profile_completed, Some(true));
}

#[tokio::test(start_paused = true)]
async fn completion_floor_delays_reset_but_not_the_update() {
    let h = Harness::at_profile_setup().await;
    let started = Instant::now();

    let resolver = h.resolver.clone();
    let completion =
        tokio::spawn(async move { resolver.complete_and_navigate(user(), selections()).await });

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(h.profile.updates(), 1);
    assert!(h.resolver.snapshot().completing);
    assert!(h.navigator.resets().is_empty());

    let outcome = completion.await.unwrap().unwrap();
    assert_eq!(outcome, CompletionOutcome::Completed);
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(500), "{elapsed:?}");
    assert!(elapsed < Duration::from_millis(600), "{elapsed:?}");
    assert!(!h.resolver.snapshot().completing);
}

#[tokio::test(start_paused = true)]
async fn slow_update_adds_no_extra_wait() {
    let h = Harness::at_profile_setup().await;
    h.profile.set_update_delay(Duration::from_millis(800));
    let started = Instant::now();

    h.resolver
        .complete_and_navigate(user(), selections())
        .await
        .unwrap();

    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(800), "{elapsed:?}");
    assert!(elapsed < Duration::from_millis(900), "{elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn transient_failure_releases_latch_for_retry() {
    let h = Harness::at_profile_setup().await;
    h.profile
        .queue_update_results(vec![Err(ProfileError::Network("offline".to_string()))]);

    let first = h.resolver.complete_and_navigate(user(), selections()).await;

    assert!(matches!(first, Err(FlowError::Profile(ProfileError::Network(_)))));
    assert!(!h.flags.is_set(FlagKey::ProfileCompleted));
    assert!(h.navigator.resets().is_empty());
    assert!(!h.resolver.snapshot().completing);
    let notices = h.notices.all();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].kind, NoticeKind::Error);
    assert_eq!(notices[0].message, COMPLETION_FAILED_MESSAGE);

    let retry = h
        .resolver
        .complete_and_navigate(user(), selections())
        .await
        .unwrap();
    assert_eq!(retry, CompletionOutcome::Completed);
    assert_eq!(h.profile.updates(), 2);
    assert_eq!(h.navigator.resets(), vec![NavigationTarget::Main]);
}

#[tokio::test(start_paused = true)]
async fn unauthorized_update_forces_logout() {
    let h = Harness::at_profile_setup().await;
    h.profile
        .queue_update_results(vec![Err(ProfileError::Unauthorized)]);

    let result = h.resolver.complete_and_navigate(user(), selections()).await;

    assert_eq!(result, Err(FlowError::Profile(ProfileError::Unauthorized)));
    assert_eq!(h.session.logouts(), 1);
    assert_eq!(h.navigator.resets(), vec![NavigationTarget::Auth]);
    assert_eq!(h.resolver.snapshot().target, NavigationTarget::Auth);
    assert_eq!(h.notices.count(NoticeKind::Modal), 1);
    assert_eq!(h.notices.count(NoticeKind::Error), 0);
}

#[tokio::test(start_paused = true)]
async fn completion_requires_signed_in_user() {
    let h = Harness::new(
        FlowConfig::default(),
        ScriptedSessionService::fresh_install(),
        ScriptedProfileService::incomplete(),
        MemoryFlagStore::default(),
    );
    h.resolver.mount().await;

    let result = h.resolver.complete_and_navigate(user(), selections()).await;

    assert_eq!(result, Err(FlowError::NotAuthenticated));
    assert_eq!(h.profile.updates(), 0);
}

#[tokio::test(start_paused = true)]
async fn stale_completion_after_logout_does_not_navigate() {
    let h = Harness::at_profile_setup().await;
    h.profile.set_update_delay(Duration::from_millis(1_000));

    let resolver = h.resolver.clone();
    let completion =
        tokio::spawn(async move { resolver.complete_and_navigate(user(), selections()).await });

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(h.resolver.logout().await);

    let outcome = completion.await.unwrap().unwrap();
    assert_eq!(outcome, CompletionOutcome::Superseded);
    assert_eq!(h.navigator.resets(), vec![NavigationTarget::Auth]);
    assert!(!h.flags.is_set(FlagKey::ProfileCompleted));
    assert_eq!(h.resolver.snapshot().target, NavigationTarget::Auth);
    assert!(!h.resolver.snapshot().completing);
}

/// Records whether the completion flag was durable when the reset fired.
struct FlagProbeNavigator {
    flags: Arc<MemoryFlagStore>,
    seen: Mutex<Vec<(NavigationTarget, bool)>>,
}

#[async_trait]
impl NavigatorPort for FlagProbeNavigator {
    async fn reset_to(&self, target: NavigationTarget) {
        let written = self.flags.is_set(FlagKey::ProfileCompleted);
        self.seen.lock().unwrap().push((target, written));
    }
}

#[tokio::test(start_paused = true)]
async fn completion_flag_is_written_before_reset() {
    let flags = Arc::new(
        MemoryFlagStore::with_flags(&[FlagKey::TermsAccepted, FlagKey::NotificationsSet])
            .with_credentials(),
    );
    let navigator = Arc::new(FlagProbeNavigator {
        flags: flags.clone(),
        seen: Mutex::new(Vec::new()),
    });
    let resolver = FlowResolver::new(
        FlowConfig::default(),
        FlowResolverDeps {
            session_service: Arc::new(ScriptedSessionService::signed_in()),
            profile_service: Arc::new(ScriptedProfileService::incomplete()),
            flag_store: flags.clone(),
            navigator: navigator.clone(),
            notices: Arc::new(RecordingNotices::default()),
        },
    );
    resolver.mount().await;

    resolver
        .complete_and_navigate(user(), selections())
        .await
        .unwrap();

    assert_eq!(
        *navigator.seen.lock().unwrap(),
        vec![(NavigationTarget::Main, true)]
    );
}

/// Records the published target at the moment each reset is requested.
#[derive(Default)]
struct TargetAtResetNavigator {
    snapshots: Mutex<Option<watch::Receiver<FlowSnapshot>>>,
    seen: Mutex<Vec<(NavigationTarget, NavigationTarget)>>,
}

#[async_trait]
impl NavigatorPort for TargetAtResetNavigator {
    async fn reset_to(&self, target: NavigationTarget) {
        let published = self
            .snapshots
            .lock()
            .unwrap()
            .as_ref()
            .map(|rx| rx.borrow().target)
            .unwrap();
        self.seen.lock().unwrap().push((target, published));
    }
}

#[tokio::test(start_paused = true)]
async fn reset_to_main_precedes_the_main_snapshot() {
    let navigator = Arc::new(TargetAtResetNavigator::default());
    let resolver = FlowResolver::new(
        FlowConfig::default(),
        FlowResolverDeps {
            session_service: Arc::new(ScriptedSessionService::signed_in()),
            profile_service: Arc::new(ScriptedProfileService::incomplete()),
            flag_store: Arc::new(
                MemoryFlagStore::with_flags(&[FlagKey::TermsAccepted, FlagKey::NotificationsSet])
                    .with_credentials(),
            ),
            navigator: navigator.clone(),
            notices: Arc::new(RecordingNotices::default()),
        },
    );
    *navigator.snapshots.lock().unwrap() = Some(resolver.subscribe());
    resolver.mount().await;
    assert_eq!(resolver.snapshot().target, NavigationTarget::ProfileSetup);

    let outcome = resolver
        .complete_and_navigate(user(), selections())
        .await
        .unwrap();

    assert_eq!(outcome, CompletionOutcome::Completed);
    assert_eq!(
        *navigator.seen.lock().unwrap(),
        vec![(NavigationTarget::Main, NavigationTarget::ProfileSetup)]
    );
    assert_eq!(resolver.snapshot().target, NavigationTarget::Main);
}
