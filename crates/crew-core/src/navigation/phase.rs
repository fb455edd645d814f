use serde::{Deserialize, Serialize};

use super::NavigationTarget;

/// Coarse UI mode gating whether the navigation target is honored.
///
/// 展示阶段：只有 `Ready` 时才使用导航目标。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PresentationPhase {
    Splash,
    InteractiveLoading,
    Ready,
}

impl PresentationPhase {
    pub fn is_ready(self) -> bool {
        self == PresentationPhase::Ready
    }
}

/// The reactive output consumed by the navigation shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowSnapshot {
    pub phase: PresentationPhase,
    pub target: NavigationTarget,
    /// Profile finalization is in progress.
    pub completing: bool,
}

impl FlowSnapshot {
    /// The target, but only once the phase allows honoring it.
    pub fn honored_target(&self) -> Option<NavigationTarget> {
        self.phase.is_ready().then_some(self.target)
    }
}

impl Default for FlowSnapshot {
    fn default() -> Self {
        Self {
            phase: PresentationPhase::Splash,
            target: NavigationTarget::Auth,
            completing: false,
        }
    }
}
