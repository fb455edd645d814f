//! Shared fakes for flow resolver integration tests.
#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use crew_app::{FlowResolver, FlowResolverDeps};
use crew_core::config::FlowConfig;
use crew_core::ids::UserId;
use crew_core::navigation::NavigationTarget;
use crew_core::notice::{Notice, NoticeKind};
use crew_core::ports::{
    FlagKey, FlagStorePort, NavigatorPort, NoticePort, ProfileError, ProfileServicePort,
    SessionError, SessionServicePort, StorageError, FLAG_TRUE,
};
use crew_core::profile::{PreferenceSelections, ProfileAttributes, ProfileStatus, ProfileUpdate};
use crew_core::session::SessionStatus;

/// Route resolver logs to the test writer; `RUST_LOG` selects the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub const USER: &str = "u-1";

// ===== Session service =====

pub struct ScriptedSessionService {
    responses: Mutex<VecDeque<Result<SessionStatus, SessionError>>>,
    fallback: Result<SessionStatus, SessionError>,
    validate_delay: Duration,
    logout_delay: Duration,
    hang: bool,
    pub validate_calls: AtomicUsize,
    pub logout_calls: AtomicUsize,
}

impl ScriptedSessionService {
    pub fn returning(result: Result<SessionStatus, SessionError>) -> Self {
        Self::scripted(Vec::new(), result)
    }

    pub fn signed_in() -> Self {
        Self::returning(Ok(SessionStatus::authenticated(USER)))
    }

    pub fn fresh_install() -> Self {
        Self::returning(Err(SessionError::NoCredential))
    }

    pub fn scripted(
        responses: Vec<Result<SessionStatus, SessionError>>,
        fallback: Result<SessionStatus, SessionError>,
    ) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            fallback,
            validate_delay: Duration::ZERO,
            logout_delay: Duration::ZERO,
            hang: false,
            validate_calls: AtomicUsize::new(0),
            logout_calls: AtomicUsize::new(0),
        }
    }

    pub fn hanging() -> Self {
        Self {
            hang: true,
            ..Self::signed_in()
        }
    }

    pub fn with_validate_delay(mut self, delay: Duration) -> Self {
        self.validate_delay = delay;
        self
    }

    pub fn with_logout_delay(mut self, delay: Duration) -> Self {
        self.logout_delay = delay;
        self
    }

    pub fn validations(&self) -> usize {
        self.validate_calls.load(Ordering::SeqCst)
    }

    pub fn logouts(&self) -> usize {
        self.logout_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionServicePort for ScriptedSessionService {
    async fn validate(&self) -> Result<SessionStatus, SessionError> {
        self.validate_calls.fetch_add(1, Ordering::SeqCst);
        if self.hang {
            std::future::pending::<()>().await;
        }
        if !self.validate_delay.is_zero() {
            tokio::time::sleep(self.validate_delay).await;
        }
        let scripted = self.responses.lock().unwrap().pop_front();
        scripted.unwrap_or_else(|| self.fallback.clone())
    }

    async fn logout(&self) -> Result<(), SessionError> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        if !self.logout_delay.is_zero() {
            tokio::time::sleep(self.logout_delay).await;
        }
        Ok(())
    }
}

// ===== Profile service =====

pub struct ScriptedProfileService {
    status: Mutex<Result<ProfileStatus, ProfileError>>,
    update_results: Mutex<VecDeque<Result<(), ProfileError>>>,
    update_delay: Mutex<Duration>,
    pub get_calls: AtomicUsize,
    pub update_calls: AtomicUsize,
    pub last_update: Mutex<Option<ProfileUpdate>>,
}

impl ScriptedProfileService {
    pub fn with_status(status: Result<ProfileStatus, ProfileError>) -> Self {
        Self {
            status: Mutex::new(status),
            update_results: Mutex::new(VecDeque::new()),
            update_delay: Mutex::new(Duration::ZERO),
            get_calls: AtomicUsize::new(0),
            update_calls: AtomicUsize::new(0),
            last_update: Mutex::new(None),
        }
    }

    pub fn complete() -> Self {
        Self::with_status(Ok(status(true, true)))
    }

    pub fn incomplete() -> Self {
        Self::with_status(Ok(status(false, false)))
    }

    pub fn set_status(&self, next: Result<ProfileStatus, ProfileError>) {
        *self.status.lock().unwrap() = next;
    }

    /// Queue results for the next `update` calls; unqueued calls succeed.
    pub fn queue_update_results(&self, results: Vec<Result<(), ProfileError>>) {
        self.update_results.lock().unwrap().extend(results);
    }

    pub fn set_update_delay(&self, delay: Duration) {
        *self.update_delay.lock().unwrap() = delay;
    }

    pub fn gets(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub fn updates(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProfileServicePort for ScriptedProfileService {
    async fn get_status(&self, _user_id: &UserId) -> Result<ProfileStatus, ProfileError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.status.lock().unwrap().clone()
    }

    async fn update(
        &self,
        _user_id: &UserId,
        update: &ProfileUpdate,
    ) -> Result<ProfileAttributes, ProfileError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_update.lock().unwrap() = Some(update.clone());

        let delay = *self.update_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let result = self.update_results.lock().unwrap().pop_front();
        result.unwrap_or(Ok(()))?;

        let mut attributes = ProfileAttributes::default();
        attributes.apply(update);
        Ok(attributes)
    }
}

pub fn status(complete: bool, terms_accepted: bool) -> ProfileStatus {
    ProfileStatus {
        complete,
        attributes: ProfileAttributes {
            terms_accepted,
            profile_completed: complete,
            ..Default::default()
        },
    }
}

// ===== Flag store =====

/// Flag store whose every call never returns.
pub struct StuckFlagStore;

#[async_trait]
impl FlagStorePort for StuckFlagStore {
    async fn get(&self, _key: FlagKey) -> Result<Option<String>, StorageError> {
        std::future::pending().await
    }

    async fn set(&self, _key: FlagKey, _value: &str) -> Result<(), StorageError> {
        std::future::pending().await
    }

    async fn remove(&self, _keys: &[FlagKey]) -> Result<(), StorageError> {
        std::future::pending().await
    }
}

#[derive(Default)]
pub struct MemoryFlagStore {
    values: Mutex<HashMap<FlagKey, String>>,
}

impl MemoryFlagStore {
    pub fn with_flags(keys: &[FlagKey]) -> Self {
        let store = Self::default();
        {
            let mut values = store.values.lock().unwrap();
            for key in keys {
                values.insert(*key, FLAG_TRUE.to_string());
            }
        }
        store
    }

    pub fn with_credentials(mut self) -> Self {
        {
            let values = self.values.get_mut().unwrap();
            values.insert(FlagKey::UserToken, "stored-token".to_string());
            values.insert(FlagKey::UserId, USER.to_string());
        }
        self
    }

    pub fn value(&self, key: FlagKey) -> Option<String> {
        self.values.lock().unwrap().get(&key).cloned()
    }

    pub fn is_set(&self, key: FlagKey) -> bool {
        self.value(key).as_deref() == Some(FLAG_TRUE)
    }
}

#[async_trait]
impl FlagStorePort for MemoryFlagStore {
    async fn get(&self, key: FlagKey) -> Result<Option<String>, StorageError> {
        Ok(self.value(key))
    }

    async fn set(&self, key: FlagKey, value: &str) -> Result<(), StorageError> {
        self.values.lock().unwrap().insert(key, value.to_string());
        Ok(())
    }

    async fn remove(&self, keys: &[FlagKey]) -> Result<(), StorageError> {
        let mut values = self.values.lock().unwrap();
        for key in keys {
            values.remove(key);
        }
        Ok(())
    }
}

// ===== Shell side =====

#[derive(Default)]
pub struct RecordingNavigator {
    pub resets: Mutex<Vec<NavigationTarget>>,
}

impl RecordingNavigator {
    pub fn resets(&self) -> Vec<NavigationTarget> {
        self.resets.lock().unwrap().clone()
    }
}

#[async_trait]
impl NavigatorPort for RecordingNavigator {
    async fn reset_to(&self, target: NavigationTarget) {
        self.resets.lock().unwrap().push(target);
    }
}

#[derive(Default)]
pub struct RecordingNotices {
    pub notices: Mutex<Vec<Notice>>,
}

impl RecordingNotices {
    pub fn all(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn count(&self, kind: NoticeKind) -> usize {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .filter(|notice| notice.kind == kind)
            .count()
    }
}

#[async_trait]
impl NoticePort for RecordingNotices {
    async fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

// ===== Harness =====

pub struct Harness {
    pub resolver: Arc<FlowResolver>,
    pub session: Arc<ScriptedSessionService>,
    pub profile: Arc<ScriptedProfileService>,
    pub flags: Arc<MemoryFlagStore>,
    pub navigator: Arc<RecordingNavigator>,
    pub notices: Arc<RecordingNotices>,
}

impl Harness {
    pub fn new(
        config: FlowConfig,
        session: ScriptedSessionService,
        profile: ScriptedProfileService,
        flags: MemoryFlagStore,
    ) -> Self {
        init_tracing();
        let session = Arc::new(session);
        let profile = Arc::new(profile);
        let flags = Arc::new(flags);
        let navigator = Arc::new(RecordingNavigator::default());
        let notices = Arc::new(RecordingNotices::default());

        let resolver = Arc::new(FlowResolver::new(
            config,
            FlowResolverDeps {
                session_service: session.clone(),
                profile_service: profile.clone(),
                flag_store: flags.clone(),
                navigator: navigator.clone(),
                notices: notices.clone(),
            },
        ));

        Self {
            resolver,
            session,
            profile,
            flags,
            navigator,
            notices,
        }
    }

    /// Signed in, onboarding done, profile still to finalize.
    pub async fn at_profile_setup() -> Self {
        let harness = Self::new(
            FlowConfig::default(),
            ScriptedSessionService::signed_in(),
            ScriptedProfileService::incomplete(),
            MemoryFlagStore::with_flags(&[FlagKey::TermsAccepted, FlagKey::NotificationsSet])
                .with_credentials(),
        );
        harness.resolver.mount().await;
        harness
    }

    /// Signed in with a complete profile.
    pub async fn at_main() -> Self {
        Self::at_main_with(ScriptedSessionService::signed_in()).await
    }

    pub async fn at_main_with(session: ScriptedSessionService) -> Self {
        let harness = Self::new(
            FlowConfig::default(),
            session,
            ScriptedProfileService::complete(),
            MemoryFlagStore::with_flags(&[FlagKey::TermsAccepted, FlagKey::NotificationsSet])
                .with_credentials(),
        );
        harness.resolver.mount().await;
        harness
    }
}

pub fn user() -> UserId {
    UserId::from(USER)
}

pub fn selections() -> PreferenceSelections {
    PreferenceSelections::new(
        vec!["chill".to_string()],
        vec!["rooftop".to_string()],
        vec!["climbing".to_string()],
    )
}
