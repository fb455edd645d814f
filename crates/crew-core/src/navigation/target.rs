use serde::{Deserialize, Serialize};

use crate::onboarding::OnboardingState;
use crate::profile::ProfileState;
use crate::session::SessionState;

/// Top-level flow the shell should mount.
///
/// 顶层导航目标。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NavigationTarget {
    /// Sign-up / sign-in / OTP verification.
    ///
    /// 登录注册流程。
    Auth,
    /// Terms and notification preferences.
    ///
    /// 引导流程（条款、通知）。
    Onboarding,
    /// Basic info, photo and preference selection.
    ///
    /// 资料设置流程。
    ProfileSetup,
    /// Main tab shell.
    ///
    /// 主界面。
    Main,
}

/// Decision table. First matching row wins:
///
/// | authenticated | terms | notifications | profile | target       |
/// |---------------|-------|---------------|---------|--------------|
/// | false         | -     | -             | -       | Auth         |
/// | true          | false | -             | -       | Onboarding   |
/// | true          | true  | false         | -       | Onboarding   |
/// | true          | true  | true          | false   | ProfileSetup |
/// | true          | true  | true          | true    | Main         |
pub fn resolve_target(
    session: &SessionState,
    onboarding: &OnboardingState,
    profile: &ProfileState,
) -> NavigationTarget {
    if !session.authenticated {
        return NavigationTarget::Auth;
    }
    if !onboarding.terms_accepted || !onboarding.notifications_acknowledged {
        return NavigationTarget::Onboarding;
    }
    if !profile.complete {
        return NavigationTarget::ProfileSetup;
    }
    NavigationTarget::Main
}
