//! Navigation shell
//!
//! Renders the flow resolver's output: the mounted screen is a pure function
//! of `(phase, target)`. Explicit stack resets requested by the resolver
//! arrive separately through [`ShellNavigator`].

mod navigator;
mod notices;

pub use navigator::ShellNavigator;
pub use notices::{ChannelNoticeSink, DeliveredNotice};

use async_trait::async_trait;
use crew_core::navigation::{FlowSnapshot, NavigationTarget, PresentationPhase};
use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

/// Screen the shell mounts.
///
/// 展示阶段未就绪时只显示启动页或加载页。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Route {
    Splash,
    Loading,
    Auth,
    Onboarding,
    ProfileSetup,
    Main,
}

impl From<NavigationTarget> for Route {
    fn from(target: NavigationTarget) -> Self {
        match target {
            NavigationTarget::Auth => Route::Auth,
            NavigationTarget::Onboarding => Route::Onboarding,
            NavigationTarget::ProfileSetup => Route::ProfileSetup,
            NavigationTarget::Main => Route::Main,
        }
    }
}

impl From<FlowSnapshot> for Route {
    fn from(snapshot: FlowSnapshot) -> Self {
        match snapshot.phase {
            PresentationPhase::Splash => Route::Splash,
            PresentationPhase::InteractiveLoading => Route::Loading,
            PresentationPhase::Ready => snapshot.target.into(),
        }
    }
}

/// Host UI hook that actually shows screens.
#[async_trait]
pub trait ScreenMounter: Send + Sync {
    /// Replace the visible root screen.
    async fn mount(&self, route: Route);

    /// Clear the back stack and show `route`.
    async fn reset(&self, route: Route);
}

/// Drives a [`ScreenMounter`] from resolver snapshots and navigator resets.
pub struct NavigationShell<M> {
    mounter: M,
    snapshots: watch::Receiver<FlowSnapshot>,
    resets: mpsc::UnboundedReceiver<NavigationTarget>,
    current: Option<Route>,
}

impl<M: ScreenMounter> NavigationShell<M> {
    pub fn new(
        mounter: M,
        snapshots: watch::Receiver<FlowSnapshot>,
        resets: mpsc::UnboundedReceiver<NavigationTarget>,
    ) -> Self {
        Self {
            mounter,
            snapshots,
            resets,
            current: None,
        }
    }

    pub fn current_route(&self) -> Option<Route> {
        self.current
    }

    /// Mount screens until the resolver goes away.
    pub async fn run(mut self) -> M {
        let initial = Route::from(*self.snapshots.borrow_and_update());
        self.show(initial).await;

        let mut resets_open = true;
        loop {
            // resets are requested before the matching snapshot is published
            tokio::select! {
                biased;
                reset = self.resets.recv(), if resets_open => match reset {
                    Some(target) => {
                        let route = Route::from(target);
                        info!(?route, "navigation stack reset");
                        self.mounter.reset(route).await;
                        self.current = Some(route);
                    }
                    None => resets_open = false,
                },
                changed = self.snapshots.changed() => {
                    if changed.is_err() {
                        debug!("flow resolver dropped, stopping shell");
                        break;
                    }
                    let route = Route::from(*self.snapshots.borrow_and_update());
                    self.show(route).await;
                }
            }
        }
        self.mounter
    }

    async fn show(&mut self, route: Route) {
        if self.current == Some(route) {
            return;
        }
        debug!(from = ?self.current, to = ?route, "mounting route");
        self.mounter.mount(route).await;
        self.current = Some(route);
    }
}
