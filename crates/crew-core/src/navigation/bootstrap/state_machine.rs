//! Bootstrap state machine.
//!
//! Pure transition function for the launch sequence: the splash minimum and
//! session validation run concurrently, and the phase only becomes `Ready`
//! once both are done.

use tracing::warn;

use super::{BootstrapAction, BootstrapEvent, BootstrapState};

/// Pure bootstrap state machine.
///
/// 纯状态机：不包含副作用。
#[derive(Debug, Clone, Copy, Default)]
pub struct BootstrapStateMachine {
    /// Interpose `InteractiveLoading` when the splash minimum elapses before
    /// the session is resolved.
    interactive_loading: bool,
}

impl BootstrapStateMachine {
    pub fn new(interactive_loading: bool) -> Self {
        Self {
            interactive_loading,
        }
    }

    pub fn transition(
        &self,
        state: BootstrapState,
        event: BootstrapEvent,
    ) -> (BootstrapState, Vec<BootstrapAction>) {
        match (state, event) {
            // ===== Mount =====
            (BootstrapState::Idle, BootstrapEvent::Mount) => (
                BootstrapState::Splash {
                    splash_elapsed: false,
                    resolved: false,
                },
                vec![
                    BootstrapAction::StartSplashTimer,
                    BootstrapAction::ValidateSession,
                ],
            ),
            // re-render: validation must not start twice
            (state, BootstrapEvent::Mount) => (state, Vec::new()),

            // ===== Splash =====
            (
                BootstrapState::Splash {
                    splash_elapsed: false,
                    resolved: true,
                },
                BootstrapEvent::SplashElapsed,
            ) => (BootstrapState::Ready, Vec::new()),
            (
                BootstrapState::Splash {
                    splash_elapsed: false,
                    resolved: false,
                },
                BootstrapEvent::SplashElapsed,
            ) => {
                if self.interactive_loading {
                    (
                        BootstrapState::InteractiveLoading {
                            resolved: false,
                            floor_elapsed: false,
                        },
                        vec![BootstrapAction::StartLoadingFloorTimer],
                    )
                } else {
                    (
                        BootstrapState::Splash {
                            splash_elapsed: true,
                            resolved: false,
                        },
                        Vec::new(),
                    )
                }
            }
            (
                BootstrapState::Splash {
                    splash_elapsed: true,
                    resolved: false,
                },
                BootstrapEvent::Resolved,
            ) => (BootstrapState::Ready, Vec::new()),
            (
                BootstrapState::Splash {
                    splash_elapsed: false,
                    resolved: false,
                },
                BootstrapEvent::Resolved,
            ) => (
                BootstrapState::Splash {
                    splash_elapsed: false,
                    resolved: true,
                },
                Vec::new(),
            ),

            // ===== Interactive loading =====
            (
                BootstrapState::InteractiveLoading {
                    resolved: false,
                    floor_elapsed,
                },
                BootstrapEvent::Resolved,
            ) => {
                if floor_elapsed {
                    (BootstrapState::Ready, Vec::new())
                } else {
                    (
                        BootstrapState::InteractiveLoading {
                            resolved: true,
                            floor_elapsed: false,
                        },
                        Vec::new(),
                    )
                }
            }
            (
                BootstrapState::InteractiveLoading {
                    resolved,
                    floor_elapsed: false,
                },
                BootstrapEvent::LoadingFloorElapsed,
            ) => {
                if resolved {
                    (BootstrapState::Ready, Vec::new())
                } else {
                    (
                        BootstrapState::InteractiveLoading {
                            resolved: false,
                            floor_elapsed: true,
                        },
                        Vec::new(),
                    )
                }
            }

            // ===== Ready is terminal =====
            (BootstrapState::Ready, _event) => (BootstrapState::Ready, Vec::new()),

            // ===== Invalid =====
            (state, event) => {
                warn!(?state, ?event, "invalid bootstrap transition");
                (state, Vec::new())
            }
        }
    }
}
