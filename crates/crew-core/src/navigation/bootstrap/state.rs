use serde::Serialize;

use crate::navigation::PresentationPhase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BootstrapState {
    /// 尚未挂载
    Idle,

    /// 启动画面：等待最短时长与会话校验结果
    Splash {
        splash_elapsed: bool,
        resolved: bool,
    },

    /// 启动画面结束但数据仍在加载
    InteractiveLoading {
        resolved: bool,
        floor_elapsed: bool,
    },

    /// 可以使用导航目标
    Ready,
}

impl BootstrapState {
    pub fn phase(&self) -> PresentationPhase {
        match self {
            BootstrapState::Idle | BootstrapState::Splash { .. } => PresentationPhase::Splash,
            BootstrapState::InteractiveLoading { .. } => PresentationPhase::InteractiveLoading,
            BootstrapState::Ready => PresentationPhase::Ready,
        }
    }

    /// Whether `Mount` has already been accepted.
    pub fn has_started(&self) -> bool {
        !matches!(self, BootstrapState::Idle)
    }
}

impl Default for BootstrapState {
    fn default() -> Self {
        BootstrapState::Idle
    }
}
